//! `recur` CLI — expand an RRULE line into concrete timestamps.
//!
//! ## Usage
//!
//! ```sh
//! # Expand a rule, printing every occurrence (or the first 300 if unbounded)
//! recur expand --dtstart 19970902T090000Z --rrule "FREQ=YEARLY;COUNT=3;BYDAY=1TU,-1TH"
//!
//! # First occurrence strictly after a timestamp
//! recur after --dtstart 19970902T090000Z --rrule "FREQ=DAILY" --at 19971231T000000Z
//!
//! # Occurrences within a window
//! recur between --dtstart 19970902T090000Z --rrule "FREQ=WEEKLY" \
//!     --from 19971001T000000Z --to 19971101T000000Z
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use recurrence_core::{rrule_text, RuleSpec};

#[derive(Parser)]
#[command(name = "recur", version, about = "Expand RFC 5545 RRULE lines into concrete timestamps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every occurrence (capped at 300 if neither COUNT nor UNTIL bounds the rule)
    Expand(RuleArgs),
    /// Print the first occurrence at or after (or strictly after) a timestamp
    After {
        #[command(flatten)]
        rule: RuleArgs,
        /// Reference timestamp, YYYYMMDDTHHMMSS(Z)
        #[arg(long)]
        at: String,
        /// Include the reference timestamp itself if it is an occurrence
        #[arg(long)]
        inclusive: bool,
    },
    /// Print the last occurrence at or before (or strictly before) a timestamp
    Before {
        #[command(flatten)]
        rule: RuleArgs,
        #[arg(long)]
        at: String,
        #[arg(long)]
        inclusive: bool,
    },
    /// Print every occurrence within a window
    Between {
        #[command(flatten)]
        rule: RuleArgs,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        inclusive: bool,
    },
}

#[derive(clap::Args)]
struct RuleArgs {
    /// Anchor timestamp, YYYYMMDDTHHMMSS(Z) — UTC if no 'Z' is present
    #[arg(long)]
    dtstart: String,
    /// RRULE content-line value, e.g. "FREQ=DAILY;COUNT=5"
    #[arg(long)]
    rrule: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Expand(args) => {
            let rule = build_rule(&args)?;
            for occurrence in rule.all() {
                println!("{}", format_timestamp(&occurrence));
            }
        }
        Commands::After { rule, at, inclusive } => {
            let rule = build_rule(&rule)?;
            let at = parse_timestamp(&at).context("invalid --at timestamp")?;
            match rule.after(&at, inclusive) {
                Some(t) => println!("{}", format_timestamp(&t)),
                None => println!("(none)"),
            }
        }
        Commands::Before { rule, at, inclusive } => {
            let rule = build_rule(&rule)?;
            let at = parse_timestamp(&at).context("invalid --at timestamp")?;
            match rule.before(&at, inclusive) {
                Some(t) => println!("{}", format_timestamp(&t)),
                None => println!("(none)"),
            }
        }
        Commands::Between { rule, from, to, inclusive } => {
            let rule = build_rule(&rule)?;
            let from = parse_timestamp(&from).context("invalid --from timestamp")?;
            let to = parse_timestamp(&to).context("invalid --to timestamp")?;
            for occurrence in rule.between(&from, &to, inclusive) {
                println!("{}", format_timestamp(&occurrence));
            }
        }
    }

    Ok(())
}

fn build_rule(args: &RuleArgs) -> Result<RuleSpec<Utc>> {
    let dtstart = parse_timestamp(&args.dtstart).context("invalid --dtstart timestamp")?;
    rrule_text::parse(&args.rrule, dtstart).context("failed to parse --rrule")
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let stripped = value.strip_suffix('Z').unwrap_or(value);
    let naive = NaiveDateTime::parse_from_str(stripped, "%Y%m%dT%H%M%S")
        .with_context(|| format!("expected YYYYMMDDTHHMMSS(Z), got {value}"))?;
    Ok(DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}
