//! Time-of-day expander (§4.4): turns one surviving date ordinal into the
//! sorted Cartesian product of `(hour, minute, second)` triples.
//!
//! Grounded on the `hour_timeset`/`min_timeset`/`sec_timeset`/`get_timeset`
//! quartet in the reference `rust-rrule` iterinfo implementation — each
//! field is either "expand" (enumerate the rule's BY* list, or the anchor's
//! own value as an implicit singleton) or "limit" (the cursor's own value
//! for that field must already satisfy the BY* list, otherwise the whole
//! tick contributes nothing).

use crate::frequency::Frequency;
use crate::rule::RuleSpec;
use chrono::{TimeZone, Timelike};

/// Returns `None` when a sub-day cursor field is rejected by its own BY*
/// limit (e.g. `FREQ=SECONDLY;BYSECOND=0` ticking on second 30).
pub fn time_candidates<Tz: TimeZone>(
    rule: &RuleSpec<Tz>,
    cursor: (u32, u32, u32),
) -> Option<Vec<(u8, u8, u8)>> {
    let (ch, cm, cs) = cursor;
    let anchor_h = rule.anchor.hour() as u8;
    let anchor_m = rule.anchor.minute() as u8;
    let anchor_s = rule.anchor.second() as u8;

    let mut hours: Vec<u8> = if rule.freq >= Frequency::Hourly {
        if !rule.byhour.is_empty() && !rule.byhour.contains(&(ch as u8)) {
            return None;
        }
        vec![ch as u8]
    } else if rule.byhour.is_empty() {
        vec![anchor_h]
    } else {
        rule.byhour.clone()
    };

    let mut minutes: Vec<u8> = if rule.freq >= Frequency::Minutely {
        if !rule.byminute.is_empty() && !rule.byminute.contains(&(cm as u8)) {
            return None;
        }
        vec![cm as u8]
    } else if rule.byminute.is_empty() {
        vec![anchor_m]
    } else {
        rule.byminute.clone()
    };

    let mut seconds: Vec<u8> = if rule.freq == Frequency::Secondly {
        if !rule.bysecond.is_empty() && !rule.bysecond.contains(&(cs as u8)) {
            return None;
        }
        vec![cs as u8]
    } else if rule.bysecond.is_empty() {
        vec![anchor_s]
    } else {
        rule.bysecond.clone()
    };

    hours.sort_unstable();
    minutes.sort_unstable();
    seconds.sort_unstable();

    let mut out = Vec::with_capacity(hours.len() * minutes.len() * seconds.len());
    for &h in &hours {
        for &m in &minutes {
            for &s in &seconds {
                out.push((h, m, s));
            }
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn anchor() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(1997, 9, 2, 9, 0, 0).unwrap()
    }

    #[test]
    fn yearly_with_no_by_time_uses_anchor_singleton() {
        let rule = RuleSpec::builder(Frequency::Yearly, anchor()).count(3).build().unwrap();
        let triples = time_candidates(&rule, (0, 0, 0)).unwrap();
        assert_eq!(triples, vec![(9, 0, 0)]);
    }

    #[test]
    fn monthly_bysetpos_expands_hour_and_minute() {
        let rule = RuleSpec::builder(Frequency::Monthly, anchor())
            .count(3)
            .bymonthday(vec![13, 17])
            .byhour(vec![6, 18])
            .bysetpos(vec![3, -3])
            .build()
            .unwrap();
        let triples = time_candidates(&rule, (0, 0, 0)).unwrap();
        assert_eq!(triples, vec![(6, 0, 0), (18, 0, 0)]);
    }

    #[test]
    fn hourly_limits_cursor_hour_against_byhour() {
        let rule = RuleSpec::builder(Frequency::Hourly, anchor())
            .count(3)
            .byhour(vec![9, 10, 11])
            .build()
            .unwrap();
        assert!(time_candidates(&rule, (9, 0, 0)).is_some());
        assert!(time_candidates(&rule, (12, 0, 0)).is_none());
    }

    #[test]
    fn secondly_expands_nothing_below_its_own_granularity() {
        let rule = RuleSpec::builder(Frequency::Secondly, anchor()).count(3).build().unwrap();
        let triples = time_candidates(&rule, (9, 30, 15)).unwrap();
        assert_eq!(triples, vec![(9, 30, 15)]);
    }
}
