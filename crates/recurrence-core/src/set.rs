//! Set composition (§4.8, §3): merges a rule's generator output with
//! explicit `rdates`/`exdates`, preserving sort order and deduplicating.

use crate::generator::DstPolicy;
use crate::rule::RuleSpec;
use chrono::{DateTime, TimeZone};

/// `(anchor, optional rule, rdates, exdates)`. The emitted sequence is
/// `sort({anchor?} ∪ rule(anchor) ∪ rdates) \ exdates`, deduplicated.
#[derive(Debug, Clone)]
pub struct RuleSet<Tz: TimeZone> {
    pub anchor: DateTime<Tz>,
    pub rule: Option<RuleSpec<Tz>>,
    pub rdates: Vec<DateTime<Tz>>,
    pub exdates: Vec<DateTime<Tz>>,
}

impl<Tz: TimeZone> RuleSet<Tz> {
    pub fn new(anchor: DateTime<Tz>) -> RuleSet<Tz> {
        RuleSet { anchor, rule: None, rdates: Vec::new(), exdates: Vec::new() }
    }

    pub fn with_rule(mut self, rule: RuleSpec<Tz>) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn add_rdate(mut self, t: DateTime<Tz>) -> Self {
        self.rdates.push(t);
        self
    }

    pub fn add_exdate(mut self, t: DateTime<Tz>) -> Self {
        self.exdates.push(t);
        self
    }

    /// K-way ascending merge of the rule's emissions and `rdates`, with
    /// `exdates` dropped and consecutive duplicates collapsed. `count`/
    /// `until` on the inner rule bound only the rule's own contribution;
    /// explicit `rdates` are always emitted unless individually excluded.
    pub fn all(&self) -> Vec<DateTime<Tz>> {
        self.all_with_dst_policy(DstPolicy::default())
    }

    pub fn all_with_dst_policy(&self, policy: DstPolicy) -> Vec<DateTime<Tz>> {
        let mut merged: Vec<DateTime<Tz>> = Vec::new();
        if self.rule.is_none() {
            merged.push(self.anchor.clone());
        }
        if let Some(rule) = &self.rule {
            merged.extend(rule.iter_with_dst_policy(policy));
        }
        merged.extend(self.rdates.iter().cloned());
        merged.sort();
        merged.dedup();

        let mut exdates = self.exdates.clone();
        exdates.sort();
        merged.retain(|t| exdates.binary_search(t).is_err());
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::Frequency;
    use chrono::Utc;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1997, 9, 2, 9, 0, 0).unwrap()
    }

    #[test]
    fn rdates_merge_and_exdates_drop() {
        let rule = RuleSpec::builder(Frequency::Yearly, anchor()).count(3).build().unwrap();
        let extra = Utc.with_ymd_and_hms(1997, 12, 25, 9, 0, 0).unwrap();
        let excluded = Utc.with_ymd_and_hms(1998, 9, 2, 9, 0, 0).unwrap();
        let set = RuleSet::new(anchor()).with_rule(rule).add_rdate(extra).add_exdate(excluded);

        let all = set.all();
        assert!(all.contains(&extra));
        assert!(!all.contains(&excluded));
        assert_eq!(all, {
            let mut v = all.clone();
            v.sort();
            v
        });
    }

    #[test]
    fn duplicate_rdate_collapses() {
        let rule = RuleSpec::builder(Frequency::Yearly, anchor()).count(2).build().unwrap();
        let set = RuleSet::new(anchor()).with_rule(rule).add_rdate(anchor());
        let all = set.all();
        assert_eq!(all.iter().filter(|&&t| t == anchor()).count(), 1);
    }

    #[test]
    fn anchor_only_set_without_a_rule() {
        let set = RuleSet::new(anchor());
        assert_eq!(set.all(), vec![anchor()]);
    }
}
