//! Year-granularity calendar precomputation (§4.2).
//!
//! A `YearInfo` is built for a `(year, wkst)` pair and cached by the
//! generator while the cursor stays within that year. `wnomask` and
//! `nwdaymask` are only materialized when the rule actually uses
//! `BYWEEKNO`/positional `BYDAY`, since most rules need neither.

use crate::masks;
use crate::weekday::{NWeekday, Weekday};
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone)]
pub struct YearInfo {
    pub year: i32,
    pub wkst: Weekday,
    pub year_len: u16,
    pub next_year_len: u16,
    /// day-of-year ordinal (0-based) -> month number (1..=12), length `year_len + 7`.
    pub month_mask: &'static [u8],
    /// day-of-year ordinal -> day-of-month (1..), length `year_len + 7`.
    pub month_day_mask: &'static [i8],
    /// day-of-year ordinal -> day-of-month counted from month end, length `year_len + 7`.
    pub neg_month_day_mask: &'static [i8],
    /// day-of-year ordinal -> weekday, Monday=0, length `year_len + 7`.
    pub weekday_mask: Vec<u8>,
    /// cumulative day count before the start of each month.
    pub month_range: [u16; 13],
    /// set when `BYWEEKNO` is used: day-of-year ordinal -> belongs to a selected ISO week.
    pub week_no_mask: Option<Vec<bool>>,
    /// set when positional `BYDAY` is used: day-of-year ordinal -> matches an `nth weekday` constraint.
    pub nweekday_mask: Option<Vec<bool>>,
}

impl YearInfo {
    /// `monthly_cursor_month` must be `Some(cursor month)` when the owning
    /// rule's frequency is `Monthly` and `None` otherwise — it controls
    /// which span(s) `nwdaymask` is computed over (see
    /// [`nweekday_ranges`]).
    pub fn new(
        year: i32,
        wkst: Weekday,
        byweekno: &[i16],
        byday: &[NWeekday],
        bymonth: &[u8],
        monthly_cursor_month: Option<u8>,
    ) -> YearInfo {
        let leap = masks::is_leap_year(year);
        let year_len = masks::year_len(year);
        let next_year_len = masks::year_len(year + 1);

        let jan1_weekday = weekday_of_jan1(year);
        let weekday_mask = masks::weekday_mask(jan1_weekday, year_len as usize + 7);

        let week_no_mask = if byweekno.is_empty() {
            None
        } else {
            Some(build_week_no_mask(year, wkst, byweekno, year_len, &weekday_mask))
        };

        let contains_positional = byday.iter().any(|d| d.is_positional());
        let nweekday_mask = if contains_positional {
            let ranges = nweekday_ranges(leap, bymonth, monthly_cursor_month);
            Some(build_nweekday_mask(byday, &ranges, year_len, &weekday_mask))
        } else {
            None
        };

        YearInfo {
            year,
            wkst,
            year_len,
            next_year_len,
            month_mask: masks::month_mask(leap),
            month_day_mask: masks::month_day_mask(leap),
            neg_month_day_mask: masks::neg_month_day_mask(leap),
            weekday_mask,
            month_range: masks::month_range(leap),
            week_no_mask,
            nweekday_mask,
        }
    }

    /// First day-of-year ordinal of `month` (1..=12).
    pub fn month_start(&self, month: u8) -> usize {
        self.month_range[(month - 1) as usize] as usize
    }

    /// First day-of-year ordinal of `month + 1` (1..=12) — the exclusive end.
    pub fn month_end(&self, month: u8) -> usize {
        self.month_range[month as usize] as usize
    }
}

fn weekday_of_jan1(year: i32) -> u8 {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid calendar year");
    Weekday::from_chrono(jan1.weekday()).num_from_monday()
}

/// Port of the dateutil/rrule-go `BYWEEKNO` algorithm: a week belongs to
/// "week 1" once at least 4 of its days fall in the new year, counting
/// weeks from `wkst`. Negative `byweekno` values count back from the
/// year's last week; `-1`/`1` additionally spill a selected boundary week
/// into the neighbouring year via the mask's 7-day tail.
fn build_week_no_mask(
    year: i32,
    wkst: Weekday,
    byweekno: &[i16],
    year_len: u16,
    weekday_mask: &[u8],
) -> Vec<bool> {
    let mut mask = vec![false; year_len as usize + 7];
    let wkst_n = wkst.num_from_monday() as i32;
    let year_weekday = weekday_of_jan1(year) as i32;

    let first_wkst = (7 - year_weekday + wkst_n).rem_euclid(7);
    let mut no1_weekday = first_wkst;
    let w_year_len: i32;
    if no1_weekday >= 4 {
        no1_weekday = 0;
        w_year_len = year_len as i32 + (year_weekday - wkst_n).rem_euclid(7);
    } else {
        w_year_len = year_len as i32 - no1_weekday;
    }
    let num_weeks = w_year_len / 7 + (w_year_len % 7) / 4;

    let mark_week = |mask: &mut Vec<bool>, mut i: i32| {
        for _ in 0..7 {
            if i < 0 {
                break;
            }
            if let Some(slot) = mask.get_mut(i as usize) {
                *slot = true;
            }
            i += 1;
            if weekday_mask.get(i as usize).copied() == Some(wkst_n as u8) {
                break;
            }
        }
    };

    for &n in byweekno {
        let n = if n < 0 { n as i32 + num_weeks + 1 } else { n as i32 };
        if !(n > 0 && n <= num_weeks) {
            continue;
        }
        let i = if n > 1 {
            let mut i = no1_weekday + (n - 1) * 7;
            if no1_weekday != first_wkst {
                i -= 7 - first_wkst;
            }
            i
        } else {
            no1_weekday
        };
        mark_week(&mut mask, i);
    }

    if byweekno.contains(&1) || byweekno.contains(&-1) {
        let mut i = no1_weekday + num_weeks * 7;
        if no1_weekday != first_wkst {
            i -= 7 - first_wkst;
        }
        if i < year_len as i32 {
            mark_week(&mut mask, i);
        }
    }

    if no1_weekday != 0 && !byweekno.contains(&1) {
        let prev_year_weekday = weekday_of_jan1(year - 1) as i32;
        let prev_first_wkst = (7 - prev_year_weekday + wkst_n).rem_euclid(7);
        let prev_year_len = masks::year_len(year - 1) as i32;
        let prev_no1_weekday = if prev_first_wkst >= 4 { 0 } else { prev_first_wkst };
        let prev_w_year_len = if prev_first_wkst >= 4 {
            prev_year_len + (prev_year_weekday - wkst_n).rem_euclid(7)
        } else {
            prev_year_len - prev_no1_weekday
        };
        let prev_num_weeks = prev_w_year_len / 7 + (prev_w_year_len % 7) / 4;
        if byweekno.contains(&-prev_num_weeks) || (prev_num_weeks == 53 && byweekno.contains(&53))
        {
            mark_week(&mut mask, no1_weekday - 7);
        }
    }

    mask
}

/// The span(s) a positional `BYDAY` entry is resolved against: the cursor's
/// own month under `Monthly`; one span per `BYMONTH` entry when present;
/// otherwise the whole year as a single span. Critically, a bare
/// `FREQ=YEARLY;BYDAY=1TU,-1TH` resolves "1st Tuesday"/"last Thursday" once
/// per *year*, not once per calendar month — matching the canonical
/// RFC 5545 worked example (1st Tue/last Thu of 1997 is Dec 25, not one hit
/// in each of the twelve months).
fn nweekday_ranges(leap: bool, bymonth: &[u8], monthly_cursor_month: Option<u8>) -> Vec<(usize, usize)> {
    let mr = masks::month_range(leap);
    if let Some(month) = monthly_cursor_month {
        let m = month as usize;
        vec![(mr[m - 1] as usize, mr[m] as usize)]
    } else if bymonth.is_empty() {
        vec![(0, mr[12] as usize)]
    } else {
        bymonth
            .iter()
            .map(|&m| (mr[(m - 1) as usize] as usize, mr[m as usize] as usize))
            .collect()
    }
}

/// Port of the dateutil/rrule-go `nwdaymask` algorithm: for each positional
/// `BYDAY` entry, find the single day-of-year ordinal matching its `nth`
/// occurrence of that weekday within each span in `ranges`.
fn build_nweekday_mask(
    byday: &[NWeekday],
    ranges: &[(usize, usize)],
    year_len: u16,
    weekday_mask: &[u8],
) -> Vec<bool> {
    let mut mask = vec![false; year_len as usize + 7];

    for nwd in byday {
        if !nwd.is_positional() {
            continue;
        }
        let target = nwd.weekday.num_from_monday();

        for &(start, end) in ranges {
            let start = start as i32;
            let end = end as i32;

            if nwd.n > 0 {
                let mut i = start;
                while i < end && weekday_mask[i as usize] != target {
                    i += 1;
                }
                i += (nwd.n as i32 - 1) * 7;
                if i < end {
                    mask[i as usize] = true;
                }
            } else {
                let mut i = end - 1;
                while i >= start && weekday_mask[i as usize] != target {
                    i -= 1;
                }
                i += (nwd.n as i32 + 1) * 7;
                if i >= start && i < end {
                    mask[i as usize] = true;
                }
            }
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weekday::Weekday as W;

    #[test]
    fn plain_year_has_no_optional_masks() {
        let yi = YearInfo::new(2024, W::Mon, &[], &[], &[], None);
        assert_eq!(yi.year_len, 366);
        assert!(yi.week_no_mask.is_none());
        assert!(yi.nweekday_mask.is_none());
    }

    #[test]
    fn week_no_1_monday_1997() {
        // S3: FREQ=YEARLY;BYWEEKNO=1;BYDAY=MO over 1997 should mark Dec 29 1997
        // (the Monday of the week containing the first Thursday of ISO week 1 of 1998).
        let yi = YearInfo::new(1997, W::Mon, &[1], &[], &[], None);
        let mask = yi.week_no_mask.expect("week_no_mask built");
        // Day-of-year ordinal for Dec 29, 1997 (0-based): Jan1=0 ... Dec29 = 362.
        let dec29 = yi.month_range[11] as usize + 29 - 1;
        assert!(mask[dec29], "Dec 29 1997 should be in week 1 of 1998");
    }

    #[test]
    fn nweekday_first_tuesday_and_last_thursday_of_the_year() {
        // FREQ=YEARLY;BYDAY=1TU,-1TH with no BYMONTH resolves each entry once
        // per year, not once per month (S4): 1st Tuesday of 1997 is Jan 7,
        // last Thursday of 1997 is Dec 25.
        let byday = vec![NWeekday::nth(W::Tue, 1), NWeekday::nth(W::Thu, -1)];
        let yi = YearInfo::new(1997, W::Mon, &[], &byday, &[], None);
        let mask = yi.nweekday_mask.expect("nweekday_mask built");
        let jan7 = 7 - 1;
        let dec25 = yi.month_range[11] as usize + 25 - 1;
        assert!(mask[jan7]);
        assert!(mask[dec25]);
        assert_eq!(mask.iter().filter(|&&m| m).count(), 2);
    }

    #[test]
    fn nweekday_under_monthly_resolves_only_cursor_month() {
        let byday = vec![NWeekday::nth(W::Mon, -1)];
        let yi = YearInfo::new(1997, W::Mon, &[], &byday, &[], Some(9));
        let mask = yi.nweekday_mask.expect("nweekday_mask built");
        assert_eq!(mask.iter().filter(|&&m| m).count(), 1);
        // Last Monday of September 1997 is Sep 29.
        let sep29 = yi.month_range[8] as usize + 29 - 1;
        assert!(mask[sep29]);
    }
}
