//! The `RuleSpec` record, its builder, and the validator (§3, §4.1).

use crate::error::{Result, RuleError};
use crate::frequency::Frequency;
use crate::weekday::{NWeekday, Weekday};
use chrono::{DateTime, TimeZone};

/// A validated, immutable RRULE. Generic over the timezone implementation so
/// the core never needs to load zone data itself — callers supply
/// `chrono::Utc`, `chrono::FixedOffset`, or `chrono_tz::Tz`.
#[derive(Debug, Clone)]
pub struct RuleSpec<Tz: TimeZone> {
    pub freq: Frequency,
    pub interval: u32,
    pub wkst: Weekday,
    pub anchor: DateTime<Tz>,
    pub count: Option<u32>,
    pub until: Option<DateTime<Tz>>,
    pub bysecond: Vec<u8>,
    pub byminute: Vec<u8>,
    pub byhour: Vec<u8>,
    pub byday: Vec<NWeekday>,
    pub bymonthday: Vec<i8>,
    pub byyearday: Vec<i16>,
    pub byweekno: Vec<i16>,
    pub bymonth: Vec<u8>,
    pub bysetpos: Vec<i16>,
    pub byeaster: Vec<i32>,
}

impl<Tz: TimeZone> RuleSpec<Tz> {
    pub fn builder(freq: Frequency, anchor: DateTime<Tz>) -> RuleSpecBuilder<Tz> {
        RuleSpecBuilder::new(freq, anchor)
    }

    /// Replaces the anchor, preserving its wall-clock calendar fields in the
    /// new instant (§6: "setting dtstart preserves the nominal wall-clock
    /// reading"). Re-validates, since the anchor participates in several
    /// invariants (e.g. implicit BYHOUR/BYMINUTE/BYSECOND singletons).
    pub fn set_dtstart(&mut self, new: DateTime<Tz>) -> Result<()> {
        let candidate = RuleSpecBuilder {
            freq: self.freq,
            interval: self.interval,
            wkst: self.wkst,
            anchor: new.clone(),
            count: self.count,
            until: self.until.clone(),
            bysecond: self.bysecond.clone(),
            byminute: self.byminute.clone(),
            byhour: self.byhour.clone(),
            byday: self.byday.clone(),
            bymonthday: self.bymonthday.clone(),
            byyearday: self.byyearday.clone(),
            byweekno: self.byweekno.clone(),
            bymonth: self.bymonth.clone(),
            bysetpos: self.bysetpos.clone(),
            byeaster: self.byeaster.clone(),
        };
        validate(&candidate)?;
        self.anchor = new;
        Ok(())
    }

    pub fn set_until(&mut self, until: Option<DateTime<Tz>>) {
        self.until = until;
    }
}

/// Builder collecting option setters before a single validation pass.
/// Mirrors the teacher's preference for explicit construction plus a
/// fallible `build()` over panicking setters.
#[derive(Debug, Clone)]
pub struct RuleSpecBuilder<Tz: TimeZone> {
    freq: Frequency,
    interval: u32,
    wkst: Weekday,
    anchor: DateTime<Tz>,
    count: Option<u32>,
    until: Option<DateTime<Tz>>,
    bysecond: Vec<u8>,
    byminute: Vec<u8>,
    byhour: Vec<u8>,
    byday: Vec<NWeekday>,
    bymonthday: Vec<i8>,
    byyearday: Vec<i16>,
    byweekno: Vec<i16>,
    bymonth: Vec<u8>,
    bysetpos: Vec<i16>,
    byeaster: Vec<i32>,
}

impl<Tz: TimeZone> RuleSpecBuilder<Tz> {
    pub fn new(freq: Frequency, anchor: DateTime<Tz>) -> Self {
        RuleSpecBuilder {
            freq,
            interval: 1,
            wkst: Weekday::Mon,
            anchor,
            count: None,
            until: None,
            bysecond: Vec::new(),
            byminute: Vec::new(),
            byhour: Vec::new(),
            byday: Vec::new(),
            bymonthday: Vec::new(),
            byyearday: Vec::new(),
            byweekno: Vec::new(),
            bymonth: Vec::new(),
            bysetpos: Vec::new(),
            byeaster: Vec::new(),
        }
    }

    pub fn interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    pub fn wkst(mut self, wkst: Weekday) -> Self {
        self.wkst = wkst;
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn until(mut self, until: DateTime<Tz>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn bysecond(mut self, v: Vec<u8>) -> Self {
        self.bysecond = v;
        self
    }

    pub fn byminute(mut self, v: Vec<u8>) -> Self {
        self.byminute = v;
        self
    }

    pub fn byhour(mut self, v: Vec<u8>) -> Self {
        self.byhour = v;
        self
    }

    pub fn byday(mut self, v: Vec<NWeekday>) -> Self {
        self.byday = v;
        self
    }

    pub fn bymonthday(mut self, v: Vec<i8>) -> Self {
        self.bymonthday = v;
        self
    }

    pub fn byyearday(mut self, v: Vec<i16>) -> Self {
        self.byyearday = v;
        self
    }

    pub fn byweekno(mut self, v: Vec<i16>) -> Self {
        self.byweekno = v;
        self
    }

    pub fn bymonth(mut self, v: Vec<u8>) -> Self {
        self.bymonth = v;
        self
    }

    pub fn bysetpos(mut self, v: Vec<i16>) -> Self {
        self.bysetpos = v;
        self
    }

    pub fn byeaster(mut self, v: Vec<i32>) -> Self {
        self.byeaster = v;
        self
    }

    pub fn build(self) -> Result<RuleSpec<Tz>> {
        validate(&self)?;
        Ok(RuleSpec {
            freq: self.freq,
            interval: self.interval,
            wkst: self.wkst,
            anchor: self.anchor,
            count: self.count,
            until: self.until,
            bysecond: self.bysecond,
            byminute: self.byminute,
            byhour: self.byhour,
            byday: self.byday,
            bymonthday: self.bymonthday,
            byyearday: self.byyearday,
            byweekno: self.byweekno,
            bymonth: self.bymonth,
            bysetpos: self.bysetpos,
            byeaster: self.byeaster,
        })
    }
}

fn check_bound(field: &'static str, value: i32, min: i32, max: i32) -> Result<()> {
    if value < min || value > max {
        return Err(RuleError::InvalidBound { field, value, min, max });
    }
    Ok(())
}

fn validate<Tz: TimeZone>(b: &RuleSpecBuilder<Tz>) -> Result<()> {
    if b.interval < 1 {
        return Err(RuleError::IntervalNotPositive(b.interval as i64));
    }

    if b.count.is_some() && b.until.is_some() {
        return Err(RuleError::RuleConflict(
            "count and until may not both be set".into(),
        ));
    }

    for &v in &b.bysecond {
        check_bound("bysecond", v as i32, 0, 59)?;
    }
    for &v in &b.byminute {
        check_bound("byminute", v as i32, 0, 59)?;
    }
    for &v in &b.byhour {
        check_bound("byhour", v as i32, 0, 23)?;
    }
    for &v in &b.bymonth {
        check_bound("bymonth", v as i32, 1, 12)?;
    }
    for &v in &b.bymonthday {
        if v == 0 || v < -31 || v > 31 {
            return Err(RuleError::InvalidBound {
                field: "bymonthday",
                value: v as i32,
                min: -31,
                max: 31,
            });
        }
    }
    for &v in &b.byyearday {
        if v == 0 || v < -366 || v > 366 {
            return Err(RuleError::InvalidBound {
                field: "byyearday",
                value: v as i32,
                min: -366,
                max: 366,
            });
        }
    }
    for &v in &b.byweekno {
        if v == 0 || v < -53 || v > 53 {
            return Err(RuleError::InvalidBound {
                field: "byweekno",
                value: v as i32,
                min: -53,
                max: 53,
            });
        }
    }
    for &v in &b.bysetpos {
        if v == 0 || v < -366 || v > 366 {
            return Err(RuleError::InvalidBound {
                field: "bysetpos",
                value: v as i32,
                min: -366,
                max: 366,
            });
        }
    }

    // (c) byweekno implies Yearly.
    if !b.byweekno.is_empty() && b.freq != Frequency::Yearly {
        return Err(RuleError::RuleConflict(
            "byweekno requires freq=Yearly".into(),
        ));
    }

    // (d) bysetpos requires at least one other BY* filter. Exempt the
    // sub-daily frequencies: their own cursor granularity already produces
    // a well-defined (if possibly single-element) period for BYSETPOS to
    // project over, e.g. `FREQ=HOURLY;BYSETPOS=1,-1,2` (S8).
    if !b.bysetpos.is_empty() && !b.freq.is_sub_daily() {
        let other_present = !b.bysecond.is_empty()
            || !b.byminute.is_empty()
            || !b.byhour.is_empty()
            || !b.byday.is_empty()
            || !b.bymonthday.is_empty()
            || !b.byyearday.is_empty()
            || !b.byweekno.is_empty()
            || !b.bymonth.is_empty()
            || !b.byeaster.is_empty();
        if !other_present {
            return Err(RuleError::RuleConflict(
                "bysetpos requires at least one other BY* filter".into(),
            ));
        }
    }

    // (e) positional BYDAY only under Yearly/Monthly, and not alongside BYWEEKNO.
    if b.byday.iter().any(NWeekday::is_positional) {
        if !matches!(b.freq, Frequency::Yearly | Frequency::Monthly) {
            return Err(RuleError::RuleConflict(
                "positional BYDAY requires freq=Yearly or Monthly".into(),
            ));
        }
        if b.freq == Frequency::Yearly && !b.byweekno.is_empty() {
            return Err(RuleError::RuleConflict(
                "positional BYDAY cannot combine with BYWEEKNO".into(),
            ));
        }
    }
    // (a) plain BYDAY under Weekly must stay non-positional.
    if b.freq == Frequency::Weekly && b.byday.iter().any(NWeekday::is_positional) {
        return Err(RuleError::RuleConflict(
            "BYDAY under freq=Weekly must not carry a positional ordinal".into(),
        ));
    }

    Ok(())
}
