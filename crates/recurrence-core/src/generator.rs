//! Generator (§4.7): the pull-style state machine driving one rule, plus the
//! derived `all`/`after`/`before`/`between` operations (§4.7, §6).
//!
//! Folds in the DST-resolution policy the teacher kept as a separate
//! `dst.rs` collaborator: since the core is generic over `chrono::TimeZone`
//! rather than hard-wired to `chrono-tz`, ambiguous and nonexistent local
//! times are resolved right here, at the point a naive calendar candidate
//! is converted into a concrete instant.

use crate::cursor::Cursor;
use crate::filter;
use crate::rule::RuleSpec;
use crate::setpos;
use crate::timeset;
use crate::yearinfo::YearInfo;
use chrono::{DateTime, LocalResult, NaiveDate, TimeZone};
use std::collections::VecDeque;

/// Safety bound past which generation silently stops (§4.6); chosen per the
/// spec's suggested `MAXYEAR`.
pub const MAXYEAR: i32 = 9999;

/// Soft cap applied by [`RuleSpec::all`] only when neither `count` nor
/// `until` bounds the rule — resolves the open question of how many
/// occurrences an unbounded yearly rule should produce when fully drained.
pub const DEFAULT_IMPLICIT_LIMIT: usize = 300;

/// How to resolve a local wall-clock time that a DST transition makes
/// ambiguous (falls twice) or nonexistent (falls in the spring-forward gap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DstPolicy {
    /// Ambiguous times resolve to their earlier UTC instant; nonexistent
    /// times are silently dropped from the sequence.
    #[default]
    EarliestOffset,
    /// Ambiguous times resolve to their later UTC instant; nonexistent times
    /// are silently dropped from the sequence.
    LatestOffset,
}

fn resolve_local<Tz: TimeZone>(
    tz: &Tz,
    naive: chrono::NaiveDateTime,
    policy: DstPolicy,
) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earlier, later) => Some(match policy {
            DstPolicy::EarliestOffset => earlier,
            DstPolicy::LatestOffset => later,
        }),
        LocalResult::None => None,
    }
}

/// Lazy, pull-style iterator over one rule's occurrences.
pub struct RRuleIter<Tz: TimeZone> {
    rule: RuleSpec<Tz>,
    policy: DstPolicy,
    cursor: Cursor,
    year_info: YearInfo,
    queue: VecDeque<DateTime<Tz>>,
    emitted: u32,
    done: bool,
    /// Month the cached `year_info`'s `nwdaymask` was built for, under
    /// `Monthly` — `None` for every other frequency. Forces a rebuild each
    /// time the cursor's month changes, since that mask resolves positional
    /// `BYDAY` against the cursor's specific month (§4.2).
    year_info_month: Option<u32>,
}

impl<Tz: TimeZone> RRuleIter<Tz> {
    pub fn new(rule: RuleSpec<Tz>) -> RRuleIter<Tz> {
        Self::with_dst_policy(rule, DstPolicy::default())
    }

    pub fn with_dst_policy(rule: RuleSpec<Tz>, policy: DstPolicy) -> RRuleIter<Tz> {
        let mut cursor = Cursor::from_anchor(&rule.anchor);
        if rule.freq == crate::frequency::Frequency::Weekly {
            cursor.align_to_week_start(rule.wkst);
        }
        let is_monthly = rule.freq == crate::frequency::Frequency::Monthly;
        let year_info = build_year_info(&rule, cursor.year, is_monthly.then_some(cursor.month as u8));
        let mut iter = RRuleIter {
            rule,
            policy,
            cursor,
            year_info,
            queue: VecDeque::new(),
            emitted: 0,
            done: false,
            year_info_month: is_monthly.then_some(cursor.month),
        };
        iter.fill_period();
        iter
    }

    fn ensure_year_info(&mut self) {
        let is_monthly = self.rule.freq == crate::frequency::Frequency::Monthly;
        let stale = self.year_info.year != self.cursor.year
            || (is_monthly && self.year_info_month != Some(self.cursor.month));
        if stale {
            self.year_info = build_year_info(
                &self.rule,
                self.cursor.year,
                is_monthly.then_some(self.cursor.month as u8),
            );
            self.year_info_month = is_monthly.then_some(self.cursor.month);
        }
    }

    fn fill_period(&mut self) {
        self.ensure_year_info();
        let yi = &self.year_info;
        let ordinals = filter::candidate_ordinals(
            &self.rule,
            yi,
            self.cursor.month as u8,
            self.cursor.day_ordinal(yi),
        );

        let Some(triples) =
            timeset::time_candidates(&self.rule, (self.cursor.hour, self.cursor.minute, self.cursor.second))
        else {
            self.queue.clear();
            return;
        };

        let mut period: Vec<DateTime<Tz>> = Vec::with_capacity(ordinals.len() * triples.len());
        for ord in ordinals {
            let date = ordinal_to_date(yi, ord);
            for &(h, m, s) in &triples {
                let naive = date.and_hms_opt(h as u32, m as u32, s as u32).expect("valid time triple");
                if let Some(dt) = resolve_local(&self.rule.anchor.timezone(), naive, self.policy) {
                    period.push(dt);
                }
            }
        }
        period.sort();

        let projected = if self.rule.bysetpos.is_empty() {
            period
        } else {
            setpos::project(&period, &self.rule.bysetpos)
        };

        self.queue = projected.into_iter().filter(|dt| *dt >= self.rule.anchor).collect();
    }
}

fn build_year_info<Tz: TimeZone>(rule: &RuleSpec<Tz>, year: i32, monthly_cursor_month: Option<u8>) -> YearInfo {
    YearInfo::new(year, rule.wkst, &rule.byweekno, &rule.byday, &rule.bymonth, monthly_cursor_month)
}

fn ordinal_to_date(yi: &YearInfo, ord: usize) -> NaiveDate {
    if ord < yi.year_len as usize {
        NaiveDate::from_ymd_opt(yi.year, yi.month_mask[ord] as u32, yi.month_day_mask[ord] as u32)
            .expect("ordinal within year is always a valid date")
    } else {
        let day = yi.month_day_mask[ord] as u32;
        NaiveDate::from_ymd_opt(yi.year + 1, 1, day).expect("tail ordinal is always a valid January date")
    }
}

impl<Tz: TimeZone> Iterator for RRuleIter<Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<DateTime<Tz>> {
        loop {
            if self.done {
                return None;
            }
            if let Some(item) = self.queue.pop_front() {
                if let Some(until) = &self.rule.until {
                    if &item > until {
                        self.done = true;
                        return None;
                    }
                }
                if let Some(count) = self.rule.count {
                    if self.emitted >= count {
                        self.done = true;
                        return None;
                    }
                }
                self.emitted += 1;
                return Some(item);
            }

            self.cursor.advance(self.rule.freq, self.rule.interval);
            if self.cursor.year > MAXYEAR {
                self.done = true;
                return None;
            }
            self.fill_period();
        }
    }
}

impl<Tz: TimeZone> RuleSpec<Tz> {
    pub fn iter(&self) -> RRuleIter<Tz> {
        RRuleIter::new(self.clone())
    }

    pub fn iter_with_dst_policy(&self, policy: DstPolicy) -> RRuleIter<Tz> {
        RRuleIter::with_dst_policy(self.clone(), policy)
    }

    /// Drains the rule to exhaustion. When neither `count` nor `until` is
    /// set, applies [`DEFAULT_IMPLICIT_LIMIT`] rather than running to
    /// `MAXYEAR`.
    pub fn all(&self) -> Vec<DateTime<Tz>> {
        if self.count.is_none() && self.until.is_none() {
            self.iter().take(DEFAULT_IMPLICIT_LIMIT).collect()
        } else {
            self.iter().collect()
        }
    }

    pub fn after(&self, t: &DateTime<Tz>, inclusive: bool) -> Option<DateTime<Tz>> {
        self.iter().find(|x| if inclusive { x >= t } else { x > t })
    }

    pub fn before(&self, t: &DateTime<Tz>, inclusive: bool) -> Option<DateTime<Tz>> {
        let mut last = None;
        for x in self.iter() {
            let keep = if inclusive { x <= *t } else { x < *t };
            if keep {
                last = Some(x);
            } else {
                break;
            }
        }
        last
    }

    pub fn between(&self, a: &DateTime<Tz>, b: &DateTime<Tz>, inclusive: bool) -> Vec<DateTime<Tz>> {
        self.iter()
            .take_while(|x| if inclusive { x <= b } else { x < b })
            .filter(|x| if inclusive { x >= a } else { x > a })
            .collect()
    }
}
