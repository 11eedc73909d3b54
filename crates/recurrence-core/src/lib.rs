//! # recurrence-core
//!
//! RFC 5545 §3.3.10 RRULE expansion and RRULESET composition.
//!
//! Given a validated rule specification, produces the ordered sequence of
//! timestamps at which a recurrence occurs, and supports random-access
//! queries (`after`, `before`, `between`) without materializing the whole
//! sequence. Generic over `chrono::TimeZone` — this crate never loads
//! timezone transition data itself; callers supply `chrono::Utc`,
//! `chrono::FixedOffset`, or `chrono_tz::Tz`.
//!
//! ## Modules
//!
//! - [`rule`] — `RuleSpec`, its builder, and the validator
//! - [`yearinfo`] — year-granularity calendar precomputation
//! - [`filter`] — candidate-day expansion against the BY* filters
//! - [`timeset`] — time-of-day expansion
//! - [`setpos`] — `BYSETPOS` projection
//! - [`cursor`] — the frequency-driven advancement state machine
//! - [`generator`] — the pull-style iterator and derived `all`/`after`/`before`/`between`
//! - [`set`] — RRULESET composition (rule + rdates − exdates)
//! - [`rrule_text`] — RRULE content-line reader/writer
//! - [`error`] — error types

pub mod cursor;
pub mod error;
pub mod filter;
pub mod frequency;
pub mod generator;
pub mod masks;
pub mod rrule_text;
pub mod rule;
pub mod set;
pub mod setpos;
pub mod timeset;
pub mod weekday;
pub mod yearinfo;

pub use error::{Result, RuleError};
pub use frequency::Frequency;
pub use generator::{DstPolicy, RRuleIter};
pub use rule::{RuleSpec, RuleSpecBuilder};
pub use set::RuleSet;
pub use weekday::{NWeekday, Weekday};
pub use yearinfo::YearInfo;
