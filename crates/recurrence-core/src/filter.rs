//! Candidate filter (§4.3): given a `YearInfo` and a `RuleSpec`, produce the
//! sorted year-day ordinals that survive every active BY* constraint for the
//! current period.
//!
//! Grounded on the `IterInfo`/`*_dayset` family in the reference `rust-rrule`
//! iterinfo implementation: seed a period-sized pool, then AND each present
//! filter against it (BYDAY entries OR together internally before joining
//! the AND chain), rather than building and re-merging separate per-filter
//! candidate lists.

use crate::frequency::Frequency;
use crate::masks;
use crate::rule::RuleSpec;
use crate::weekday::Weekday;
use crate::yearinfo::YearInfo;
use chrono::{Datelike, TimeZone};

/// BY* lists after RFC 5545's implicit defaulting: a rule with none of
/// `BYWEEKNO`/`BYYEARDAY`/`BYMONTHDAY`/`BYDAY` set repeats on the anchor's
/// own day-of-month (`YEARLY`/`MONTHLY`) or weekday (`WEEKLY`) rather than
/// every day of the period.
struct Effective {
    bymonth: Vec<u8>,
    bymonthday: Vec<i8>,
    byyearday: Vec<i16>,
    byday_plain: Vec<u8>,
    byday_active: bool,
}

fn effective_filters<Tz: TimeZone>(rule: &RuleSpec<Tz>) -> Effective {
    let mut bymonth = rule.bymonth.clone();
    let mut bymonthday = rule.bymonthday.clone();
    let byyearday = rule.byyearday.clone();
    let mut byday_plain: Vec<u8> = rule
        .byday
        .iter()
        .filter(|d| !d.is_positional())
        .map(|d| d.weekday.num_from_monday())
        .collect();
    let has_positional = rule.byday.iter().any(|d| d.is_positional());

    let nothing_date_level =
        rule.byweekno.is_empty() && byyearday.is_empty() && bymonthday.is_empty() && rule.byday.is_empty();
    if nothing_date_level {
        match rule.freq {
            Frequency::Yearly => {
                if bymonth.is_empty() {
                    bymonth.push(rule.anchor.month() as u8);
                }
                bymonthday.push(rule.anchor.day() as i8);
            }
            Frequency::Monthly => {
                bymonthday.push(rule.anchor.day() as i8);
            }
            Frequency::Weekly => {
                byday_plain.push(Weekday::from_chrono(rule.anchor.weekday()).num_from_monday());
            }
            _ => {}
        }
    }

    Effective {
        bymonth,
        bymonthday,
        byyearday,
        byday_active: has_positional || !byday_plain.is_empty(),
        byday_plain,
    }
}

fn day_matches<Tz: TimeZone>(
    rule: &RuleSpec<Tz>,
    yi: &YearInfo,
    eff: &Effective,
    day: usize,
) -> bool {
    if day >= yi.weekday_mask.len() {
        return false;
    }

    if !eff.bymonth.is_empty() && !eff.bymonth.contains(&yi.month_mask[day]) {
        return false;
    }

    if !eff.bymonthday.is_empty() {
        let dom = yi.month_day_mask[day];
        let neg = yi.neg_month_day_mask[day];
        if !(eff.bymonthday.contains(&dom) || eff.bymonthday.contains(&neg)) {
            return false;
        }
    }

    if !eff.byyearday.is_empty() {
        let pos = day as i32 + 1;
        let neg = pos - yi.year_len as i32 - 1;
        if !eff.byyearday.contains(&(pos as i16)) && !eff.byyearday.contains(&(neg as i16)) {
            return false;
        }
    }

    if !rule.byweekno.is_empty() {
        let in_week = yi.week_no_mask.as_ref().and_then(|m| m.get(day)).copied().unwrap_or(false);
        if !in_week {
            return false;
        }
    }

    if eff.byday_active {
        let plain_match = eff.byday_plain.contains(&yi.weekday_mask[day]);
        let positional_match = yi
            .nweekday_mask
            .as_ref()
            .and_then(|m| m.get(day))
            .copied()
            .unwrap_or(false);
        if !(plain_match || positional_match) {
            return false;
        }
    }

    if !rule.byeaster.is_empty() {
        let easter = masks::easter_ordinal(yi.year);
        let matches = rule.byeaster.iter().any(|&off| easter + off as i64 == day as i64);
        if !matches {
            return false;
        }
    }

    true
}

/// Seeds and filters one period's candidate ordinals.
///
/// `month` is the cursor's current month (1..=12, used only under
/// `Monthly`); `day_ordinal` is the cursor's current day-of-year ordinal —
/// under `Weekly` it must already be the wkst-aligned first day of the
/// cursor's week (the advancement state machine guarantees this), not an
/// arbitrary day within it.
pub fn candidate_ordinals<Tz: TimeZone>(
    rule: &RuleSpec<Tz>,
    yi: &YearInfo,
    month: u8,
    day_ordinal: usize,
) -> Vec<usize> {
    let eff = effective_filters(rule);

    let seed: Vec<usize> = match rule.freq {
        Frequency::Yearly => (0..yi.year_len as usize).collect(),
        Frequency::Monthly => (yi.month_start(month)..yi.month_end(month)).collect(),
        Frequency::Weekly => (day_ordinal..day_ordinal + 7).collect(),
        Frequency::Daily | Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
            vec![day_ordinal]
        }
    };

    seed.into_iter().filter(|&d| day_matches(rule, yi, &eff, d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleSpec;
    use crate::weekday::NWeekday;
    use chrono::Utc;

    fn anchor() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(1997, 9, 2, 9, 0, 0).unwrap()
    }

    #[test]
    fn yearly_defaults_to_anchor_month_and_day() {
        let rule = RuleSpec::builder(Frequency::Yearly, anchor()).count(3).build().unwrap();
        let yi = YearInfo::new(1997, Weekday::Mon, &[], &[], &[], None);
        let ords = candidate_ordinals(&rule, &yi, 0, 0);
        assert_eq!(ords.len(), 1);
        assert_eq!(yi.month_mask[ords[0]], 9);
        assert_eq!(yi.month_day_mask[ords[0]], 2);
    }

    #[test]
    fn monthly_bymonthday_neg1_selects_last_day() {
        let rule = RuleSpec::builder(Frequency::Monthly, anchor())
            .count(3)
            .bymonthday(vec![-1])
            .build()
            .unwrap();
        let yi = YearInfo::new(1997, Weekday::Mon, &[], &[], &[], Some(9));
        let ords = candidate_ordinals(&rule, &yi, 9, 0);
        assert_eq!(ords.len(), 1);
        assert_eq!(yi.month_day_mask[ords[0]], 30); // September has 30 days
    }

    #[test]
    fn yearly_byday_1tu_neg1th() {
        let rule = RuleSpec::builder(Frequency::Yearly, anchor())
            .count(3)
            .byday(vec![NWeekday::nth(Weekday::Tue, 1), NWeekday::nth(Weekday::Thu, -1)])
            .build()
            .unwrap();
        let byday = rule.byday.clone();
        let yi = YearInfo::new(1997, Weekday::Mon, &[], &byday, &[], None);
        let ords = candidate_ordinals(&rule, &yi, 0, 0);
        // Each positional entry resolves once per year (S4): 1st Tuesday and
        // last Thursday of 1997, two ordinals total.
        assert_eq!(ords.len(), 2);
    }

    #[test]
    fn weekly_defaults_to_anchor_weekday() {
        let rule = RuleSpec::builder(Frequency::Weekly, anchor()).count(3).build().unwrap();
        let yi = YearInfo::new(1997, Weekday::Mon, &[], &[], &[], None);
        // Sept 2 1997 was a Tuesday; week starting Monday Sept 1 (ordinal 243).
        let week_start = yi.month_range[8] as usize; // Sept 1 ordinal
        let ords = candidate_ordinals(&rule, &yi, 0, week_start);
        assert_eq!(ords.len(), 1);
        assert_eq!(yi.weekday_mask[ords[0]], Weekday::Tue.num_from_monday());
    }
}
