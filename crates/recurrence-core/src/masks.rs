//! Process-wide, read-only calendar mask templates and the Easter (Gauss) algorithm.
//!
//! Every mask is built once, covers a full year plus a 7-day tail so that a
//! week spanning New Year's Eve can be addressed through a single
//! contiguous index space, and comes in exactly two variants: leap (366
//! days) and common (365 days). Which variant a given year uses is the only
//! per-year decision; the templates themselves never change.

use std::sync::OnceLock;

const MONTH_LENGTHS_LEAP: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const MONTH_LENGTHS_COMMON: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

fn month_lengths(leap: bool) -> &'static [u8; 12] {
    if leap {
        &MONTH_LENGTHS_LEAP
    } else {
        &MONTH_LENGTHS_COMMON
    }
}

/// `month_mask[i]` = month number (1..=12) of the day-of-year ordinal `i`
/// (0-based), extended by the first 7 days of the following January.
pub fn month_mask(leap: bool) -> &'static [u8] {
    static LEAP: OnceLock<Vec<u8>> = OnceLock::new();
    static COMMON: OnceLock<Vec<u8>> = OnceLock::new();
    let cell = if leap { &LEAP } else { &COMMON };
    cell.get_or_init(|| build_month_mask(leap))
}

fn build_month_mask(leap: bool) -> Vec<u8> {
    let lens = month_lengths(leap);
    let mut out = Vec::with_capacity(lens.iter().map(|&l| l as usize).sum::<usize>() + 7);
    for (month, &len) in lens.iter().enumerate() {
        out.extend(std::iter::repeat((month + 1) as u8).take(len as usize));
    }
    out.extend(std::iter::repeat(1u8).take(7));
    out
}

/// `month_day_mask[i]` = day-of-month (1..) of the day-of-year ordinal `i`,
/// same 7-day tail convention as [`month_mask`].
pub fn month_day_mask(leap: bool) -> &'static [i8] {
    static LEAP: OnceLock<Vec<i8>> = OnceLock::new();
    static COMMON: OnceLock<Vec<i8>> = OnceLock::new();
    let cell = if leap { &LEAP } else { &COMMON };
    cell.get_or_init(|| build_month_day_mask(leap))
}

fn build_month_day_mask(leap: bool) -> Vec<i8> {
    let lens = month_lengths(leap);
    let mut out = Vec::with_capacity(lens.iter().map(|&l| l as usize).sum::<usize>() + 7);
    for &len in lens.iter() {
        out.extend((1..=len as i8).map(i8::from));
    }
    out.extend(1..=7);
    out
}

/// `neg_month_day_mask[i]` = day-of-month counted from the end of its month
/// (`-1` = last day), same index space as [`month_mask`].
pub fn neg_month_day_mask(leap: bool) -> &'static [i8] {
    static LEAP: OnceLock<Vec<i8>> = OnceLock::new();
    static COMMON: OnceLock<Vec<i8>> = OnceLock::new();
    let cell = if leap { &LEAP } else { &COMMON };
    cell.get_or_init(|| build_neg_month_day_mask(leap))
}

fn build_neg_month_day_mask(leap: bool) -> Vec<i8> {
    let lens = month_lengths(leap);
    let mut out = Vec::with_capacity(lens.iter().map(|&l| l as usize).sum::<usize>() + 7);
    for &len in lens.iter() {
        let len = len as i16;
        out.extend((0..len).map(|i| (i - len - 1) as i8));
    }
    // Tail: first 7 days of a (31-day) January, counted from that January's end.
    out.extend((0..7i16).map(|i| (i - 31 - 1) as i8));
    out
}

/// `weekday_mask[i]` = weekday (`0` = Monday .. `6` = Sunday) of day-of-year
/// ordinal `i`, for a year whose January 1st falls on `jan1_weekday`.
///
/// Backed by a single periodic 0..=6 template shared by every year; only the
/// starting offset into the template differs.
pub fn weekday_mask(jan1_weekday: u8, len: usize) -> Vec<u8> {
    static TEMPLATE: OnceLock<Vec<u8>> = OnceLock::new();
    let template = TEMPLATE.get_or_init(|| (0u8..7).cycle().take(400).collect());
    let jan1_weekday = (jan1_weekday % 7) as usize;
    template[jan1_weekday..jan1_weekday + len].to_vec()
}

/// Cumulative day count before the start of each month (1-based month
/// index access: `month_range(leap)[m]` is the 0-based ordinal of the first
/// day of month `m+1`; `month_range(leap)[12]` is `yearlen`).
pub fn month_range(leap: bool) -> [u16; 13] {
    let lens = month_lengths(leap);
    let mut out = [0u16; 13];
    for i in 0..12 {
        out[i + 1] = out[i] + lens[i] as u16;
    }
    out
}

/// Day of the year that is Easter Sunday, via the anonymous Gregorian
/// (Gauss) algorithm. 0-based ordinal in the same index space as
/// [`month_mask`] (`0` = January 1st).
///
/// Valid for any Gregorian year; RFC 5545 recurrences only use this for
/// years well past the 1583 adoption date, so no range check is applied.
pub fn easter_ordinal(year: i32) -> i64 {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;

    let month = (h + l - 7 * m + 114) / 31; // 3 = March, 4 = April
    let day = (h + l - 7 * m + 114) % 31 + 1;

    let leap = is_leap_year(year);
    let ranges = month_range(leap);
    i64::from(ranges[(month - 1) as usize]) + i64::from(day) - 1
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn year_len(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_mask_leap_has_29_entries_for_february() {
        let mask = month_mask(true);
        assert_eq!(mask.len(), 366 + 7);
        let feb_count = mask.iter().take(366).filter(|&&m| m == 2).count();
        assert_eq!(feb_count, 29);
        assert_eq!(&mask[366..], &[1, 1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn month_mask_common_has_28_entries_for_february() {
        let mask = month_mask(false);
        assert_eq!(mask.len(), 365 + 7);
        let feb_count = mask.iter().take(365).filter(|&&m| m == 2).count();
        assert_eq!(feb_count, 28);
    }

    #[test]
    fn month_day_mask_wraps_each_month() {
        let mask = month_day_mask(false);
        assert_eq!(mask[0], 1); // Jan 1
        assert_eq!(mask[30], 31); // Jan 31
        assert_eq!(mask[31], 1); // Feb 1
        assert_eq!(&mask[365..], &[1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn neg_month_day_mask_counts_from_month_end() {
        let mask = neg_month_day_mask(false);
        assert_eq!(mask[0], -31); // Jan 1 is 31 days from Jan's end
        assert_eq!(mask[30], -1); // Jan 31 is the last day of Jan
        assert_eq!(mask[31], -28); // Feb 1 in a common year
    }

    #[test]
    fn weekday_mask_cycles_from_jan1() {
        // Jan 1 on a Wednesday (index 2 in Mon=0 convention).
        let mask = weekday_mask(2, 10);
        assert_eq!(mask, vec![2, 3, 4, 5, 6, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn month_range_prefix_sums() {
        let r = month_range(false);
        assert_eq!(r[0], 0);
        assert_eq!(r[1], 31);
        assert_eq!(r[2], 59);
        assert_eq!(r[12], 365);
    }

    #[test]
    fn easter_matches_known_dates() {
        // 1998-04-12, 1999-04-04, 2000-04-23 (RFC 5545 §3.8.5.3 BYEASTER example).
        let r1998 = month_range(is_leap_year(1998));
        let r1999 = month_range(is_leap_year(1999));
        let r2000 = month_range(is_leap_year(2000));
        assert_eq!(easter_ordinal(1998), i64::from(r1998[3]) + 12 - 1);
        assert_eq!(easter_ordinal(1999), i64::from(r1999[3]) + 4 - 1);
        assert_eq!(easter_ordinal(2000), i64::from(r2000[3]) + 23 - 1);
    }

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2025));
    }
}
