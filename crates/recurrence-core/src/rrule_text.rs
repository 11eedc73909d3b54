//! RRULE content-line reader/writer (§6): `FREQ=...;INTERVAL=...;BYDAY=...`.
//!
//! Deliberately narrow — handles only the RRULE value grammar, not VEVENT
//! bodies, property parameters, or line folding. `parse` needs a `DateTime<Tz>`
//! anchor up front since `RuleSpec` carries no text form internally; `UNTIL`
//! values are resolved against the anchor's own timezone.

use crate::error::{Result, RuleError};
use crate::frequency::Frequency;
use crate::rule::RuleSpec;
use crate::weekday::{NWeekday, Weekday};
use chrono::{DateTime, NaiveDateTime, TimeZone};

/// Parses an RRULE content-line value (without the leading `RRULE:`) against
/// the given anchor, producing a validated [`RuleSpec`].
pub fn parse<Tz: TimeZone>(text: &str, anchor: DateTime<Tz>) -> Result<RuleSpec<Tz>> {
    let mut freq = None;
    let mut builder_interval = 1u32;
    let mut wkst = Weekday::Mon;
    let mut count = None;
    let mut until = None;
    let mut bysecond = Vec::new();
    let mut byminute = Vec::new();
    let mut byhour = Vec::new();
    let mut byday = Vec::new();
    let mut bymonthday = Vec::new();
    let mut byyearday = Vec::new();
    let mut byweekno = Vec::new();
    let mut bymonth = Vec::new();
    let mut bysetpos = Vec::new();
    let mut byeaster = Vec::new();

    for pair in text.split(';').filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| RuleError::InvalidFormat(format!("malformed pair: {pair}")))?;
        match key {
            "FREQ" => {
                freq = Some(
                    Frequency::from_token(value)
                        .ok_or_else(|| RuleError::InvalidFrequency(value.to_string()))?,
                );
            }
            "INTERVAL" => builder_interval = parse_int(value)?,
            "WKST" => {
                wkst = Weekday::from_token(value)
                    .ok_or_else(|| RuleError::InvalidWeekday(value.to_string()))?
            }
            "COUNT" => count = Some(parse_int(value)?),
            "UNTIL" => until = Some(parse_until(value, &anchor)?),
            "BYSECOND" => bysecond = parse_int_list(value)?,
            "BYMINUTE" => byminute = parse_int_list(value)?,
            "BYHOUR" => byhour = parse_int_list(value)?,
            "BYDAY" => byday = parse_byday_list(value)?,
            "BYMONTHDAY" => bymonthday = parse_signed_i8_list(value)?,
            "BYYEARDAY" => byyearday = parse_signed_i16_list(value)?,
            "BYWEEKNO" => byweekno = parse_signed_i16_list(value)?,
            "BYMONTH" => bymonth = parse_int_list(value)?,
            "BYSETPOS" => bysetpos = parse_signed_i16_list(value)?,
            "BYEASTER" => byeaster = parse_signed_i32_list(value)?,
            _ => return Err(RuleError::InvalidFormat(format!("unrecognized key: {key}"))),
        }
    }

    let freq = freq.ok_or_else(|| RuleError::InvalidFormat("missing FREQ".into()))?;

    let mut builder = RuleSpec::builder(freq, anchor)
        .interval(builder_interval)
        .wkst(wkst)
        .bysecond(bysecond)
        .byminute(byminute)
        .byhour(byhour)
        .byday(byday)
        .bymonthday(bymonthday)
        .byyearday(byyearday)
        .byweekno(byweekno)
        .bymonth(bymonth)
        .bysetpos(bysetpos)
        .byeaster(byeaster);
    if let Some(c) = count {
        builder = builder.count(c);
    }
    if let Some(u) = until {
        builder = builder.until(u);
    }
    builder.build()
}

/// Formats a [`RuleSpec`] back into its RRULE content-line value. Round-trips
/// with [`parse`] modulo key ordering (this always emits `FREQ` first, then
/// the remaining keys in RFC 5545's own listing order).
pub fn format<Tz: TimeZone>(rule: &RuleSpec<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut parts = vec![format!("FREQ={}", rule.freq)];
    if rule.interval != 1 {
        parts.push(format!("INTERVAL={}", rule.interval));
    }
    if rule.wkst != Weekday::Mon {
        parts.push(format!("WKST={}", rule.wkst));
    }
    if let Some(count) = rule.count {
        parts.push(format!("COUNT={count}"));
    }
    if let Some(until) = &rule.until {
        parts.push(format!("UNTIL={}", until.format("%Y%m%dT%H%M%S")));
    }
    push_list(&mut parts, "BYSECOND", &rule.bysecond);
    push_list(&mut parts, "BYMINUTE", &rule.byminute);
    push_list(&mut parts, "BYHOUR", &rule.byhour);
    if !rule.byday.is_empty() {
        let joined = rule.byday.iter().map(NWeekday::to_string).collect::<Vec<_>>().join(",");
        parts.push(format!("BYDAY={joined}"));
    }
    push_list(&mut parts, "BYMONTHDAY", &rule.bymonthday);
    push_list(&mut parts, "BYYEARDAY", &rule.byyearday);
    push_list(&mut parts, "BYWEEKNO", &rule.byweekno);
    push_list(&mut parts, "BYMONTH", &rule.bymonth);
    push_list(&mut parts, "BYSETPOS", &rule.bysetpos);
    push_list(&mut parts, "BYEASTER", &rule.byeaster);
    parts.join(";")
}

fn push_list<T: std::fmt::Display>(parts: &mut Vec<String>, key: &str, values: &[T]) {
    if values.is_empty() {
        return;
    }
    let joined = values.iter().map(T::to_string).collect::<Vec<_>>().join(",");
    parts.push(format!("{key}={joined}"));
}

fn parse_int<T>(value: &str) -> Result<T>
where
    T: std::str::FromStr,
{
    value
        .parse()
        .map_err(|_| RuleError::InvalidFormat(format!("expected an integer, got {value}")))
}

fn parse_int_list<T>(value: &str) -> Result<Vec<T>>
where
    T: std::str::FromStr,
{
    value.split(',').map(parse_int).collect()
}

fn parse_signed_i8_list(value: &str) -> Result<Vec<i8>> {
    parse_int_list(value)
}

fn parse_signed_i16_list(value: &str) -> Result<Vec<i16>> {
    parse_int_list(value)
}

fn parse_signed_i32_list(value: &str) -> Result<Vec<i32>> {
    parse_int_list(value)
}

fn parse_byday_list(value: &str) -> Result<Vec<NWeekday>> {
    value.split(',').map(parse_byday_entry).collect()
}

fn parse_byday_entry(token: &str) -> Result<NWeekday> {
    let token = token.trim();
    if token.len() < 2 {
        return Err(RuleError::InvalidFormat(format!("malformed BYDAY entry: {token}")));
    }
    let split_at = token.len() - 2;
    let (ord_part, wd_part) = token.split_at(split_at);
    let weekday = Weekday::from_token(wd_part)
        .ok_or_else(|| RuleError::InvalidWeekday(wd_part.to_string()))?;
    if ord_part.is_empty() {
        return Ok(NWeekday::plain(weekday));
    }
    let n: i16 = ord_part
        .parse()
        .map_err(|_| RuleError::InvalidFormat(format!("malformed BYDAY ordinal: {ord_part}")))?;
    Ok(NWeekday::nth(weekday, n))
}

/// `UNTIL` must carry the same time granularity as `DTSTART` (RFC 5545):
/// only `YYYYMMDDTHHMMSSZ`/`YYYYMMDDTHHMMSS` are accepted, date-only
/// `YYYYMMDD` is rejected since the core has no floating-date anchor to
/// borrow a time-of-day from.
fn parse_until<Tz: TimeZone>(value: &str, anchor: &DateTime<Tz>) -> Result<DateTime<Tz>> {
    let stripped = value.strip_suffix('Z').unwrap_or(value);
    if stripped.len() != 15 || !stripped.contains('T') {
        return Err(RuleError::InvalidFormat(format!(
            "UNTIL must be YYYYMMDDTHHMMSS(Z), got {value}"
        )));
    }
    let naive = NaiveDateTime::parse_from_str(stripped, "%Y%m%dT%H%M%S")
        .map_err(|e| RuleError::InvalidFormat(format!("invalid UNTIL datetime {value}: {e}")))?;
    anchor
        .timezone()
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| RuleError::InvalidFormat(format!("UNTIL is ambiguous or invalid in this zone: {value}")))
}
