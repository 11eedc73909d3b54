//! Advancement state machine (§4.6): moves the generator's cursor forward
//! by one `INTERVAL` unit of the rule's frequency.
//!
//! Stored as plain calendar fields per the data model in §3 rather than a
//! single `NaiveDateTime`, since `Yearly`/`Monthly` advancement only ever
//! touches `year`/`month` and must leave `day` exactly as the anchor left
//! it (the candidate filter regenerates the full day grid from scratch each
//! period). Rollover-sensitive advances (`Weekly` and finer) go through
//! `chrono::NaiveDate`/`NaiveDateTime` arithmetic rather than hand-rolled
//! modular math.

use crate::frequency::Frequency;
use crate::weekday::Weekday;
use crate::yearinfo::YearInfo;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Cursor {
    pub fn from_anchor<Tz: TimeZone>(anchor: &DateTime<Tz>) -> Cursor {
        Cursor {
            year: anchor.year(),
            month: anchor.month(),
            day: anchor.day(),
            hour: anchor.hour(),
            minute: anchor.minute(),
            second: anchor.second(),
        }
    }

    fn naive_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).expect("cursor date always valid")
    }

    fn set_date(&mut self, date: NaiveDate) {
        self.year = date.year();
        self.month = date.month();
        self.day = date.day();
    }

    /// Moves the cursor's date back to the first day (inclusive) of the
    /// `wkst`-aligned week it falls in. Called once at generator start for
    /// `Weekly` rules so every subsequent `advance` stays aligned.
    pub fn align_to_week_start(&mut self, wkst: Weekday) {
        let date = self.naive_date();
        let cur = Weekday::from_chrono(date.weekday()).num_from_monday();
        let wk = wkst.num_from_monday();
        let back = (cur + 7 - wk) % 7;
        self.set_date(date - Duration::days(back as i64));
    }

    /// Day-of-year ordinal (0-based) of the cursor's current date, against a
    /// `YearInfo` built for `self.year`.
    pub fn day_ordinal(&self, yi: &YearInfo) -> usize {
        yi.month_start(self.month as u8) + (self.day as usize - 1)
    }

    pub fn advance(&mut self, freq: Frequency, interval: u32) {
        match freq {
            Frequency::Yearly => {
                self.year += interval as i32;
            }
            Frequency::Monthly => {
                let total = (self.month - 1) as i64 + interval as i64;
                self.year += (total / 12) as i32;
                self.month = (total % 12) as u32 + 1;
            }
            Frequency::Weekly => {
                self.set_date(self.naive_date() + Duration::days(7 * interval as i64));
            }
            Frequency::Daily => {
                self.set_date(self.naive_date() + Duration::days(interval as i64));
            }
            Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
                let base = self
                    .naive_date()
                    .and_hms_opt(self.hour, self.minute, self.second)
                    .expect("cursor time always valid");
                let delta = match freq {
                    Frequency::Hourly => Duration::hours(interval as i64),
                    Frequency::Minutely => Duration::minutes(interval as i64),
                    Frequency::Secondly => Duration::seconds(interval as i64),
                    _ => unreachable!("matched above"),
                };
                let next = base + delta;
                self.set_date(next.date());
                self.hour = next.hour();
                self.minute = next.minute();
                self.second = next.second();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn cursor_from(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Cursor {
        Cursor { year: y, month: mo, day: d, hour: h, minute: mi, second: s }
    }

    #[test]
    fn yearly_advance_leaves_month_day_untouched() {
        let mut c = cursor_from(1997, 9, 2, 9, 0, 0);
        c.advance(Frequency::Yearly, 1);
        assert_eq!((c.year, c.month, c.day), (1998, 9, 2));
    }

    #[test]
    fn monthly_advance_rolls_over_year() {
        let mut c = cursor_from(1997, 11, 30, 9, 0, 0);
        c.advance(Frequency::Monthly, 2);
        assert_eq!((c.year, c.month, c.day), (1998, 1, 30));
    }

    #[test]
    fn weekly_advance_crosses_year_boundary() {
        let mut c = cursor_from(1997, 12, 29, 9, 0, 0);
        c.advance(Frequency::Weekly, 1);
        assert_eq!((c.year, c.month, c.day), (1998, 1, 5));
    }

    #[test]
    fn align_to_week_start_moves_back_to_monday() {
        // Sept 2 1997 is a Tuesday.
        let mut c = cursor_from(1997, 9, 2, 9, 0, 0);
        c.align_to_week_start(Weekday::Mon);
        assert_eq!((c.year, c.month, c.day), (1997, 9, 1));
    }

    #[test]
    fn align_to_week_start_with_sunday_wkst() {
        let mut c = cursor_from(1997, 9, 2, 9, 0, 0);
        c.align_to_week_start(Weekday::Sun);
        assert_eq!((c.year, c.month, c.day), (1997, 8, 31));
    }

    #[test]
    fn hourly_advance_rolls_into_next_day() {
        let mut c = cursor_from(1997, 9, 2, 23, 0, 0);
        c.advance(Frequency::Hourly, 2);
        assert_eq!((c.year, c.month, c.day, c.hour), (1997, 9, 3, 1));
    }

    #[test]
    fn from_anchor_matches_anchor_fields() {
        let anchor = Utc.with_ymd_and_hms(1997, 9, 2, 9, 0, 0).unwrap();
        let c = Cursor::from_anchor(&anchor);
        assert_eq!(c, cursor_from(1997, 9, 2, 9, 0, 0));
    }
}
