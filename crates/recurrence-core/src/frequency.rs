//! Recurrence frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How often the rule repeats, from coarsest to finest.
///
/// Declaration order is significant: `derive(PartialOrd, Ord)` gives
/// `Yearly < Monthly < Weekly < Daily < Hourly < Minutely < Secondly`, used by
/// the advancement state machine (`cursor.rs`) wherever "coarser than"
/// comparisons are genuinely about granularity. The candidate filter and
/// time-of-day expander instead ask "is this one of the sub-day
/// frequencies", which is a different question answered with explicit
/// `matches!` arms rather than this ordering — see `filter.rs`/`timeset.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
    Hourly,
    Minutely,
    Secondly,
}

impl Frequency {
    pub const fn token(self) -> &'static str {
        match self {
            Frequency::Yearly => "YEARLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Daily => "DAILY",
            Frequency::Hourly => "HOURLY",
            Frequency::Minutely => "MINUTELY",
            Frequency::Secondly => "SECONDLY",
        }
    }

    pub fn from_token(token: &str) -> Option<Frequency> {
        match token {
            "YEARLY" => Some(Frequency::Yearly),
            "MONTHLY" => Some(Frequency::Monthly),
            "WEEKLY" => Some(Frequency::Weekly),
            "DAILY" => Some(Frequency::Daily),
            "HOURLY" => Some(Frequency::Hourly),
            "MINUTELY" => Some(Frequency::Minutely),
            "SECONDLY" => Some(Frequency::Secondly),
            _ => None,
        }
    }

    /// True for `Hourly`/`Minutely`/`Secondly` — the frequencies whose own
    /// cursor field seeds the matching axis of the time-of-day expander
    /// instead of the axis being expanded from the rule's BY* list.
    pub const fn is_sub_daily(self) -> bool {
        matches!(self, Frequency::Hourly | Frequency::Minutely | Frequency::Secondly)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
