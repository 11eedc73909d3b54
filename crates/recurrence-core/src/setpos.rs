//! BYSETPOS projector (§4.5): selects positive/negative positional indices
//! out of a period's fully expanded, sorted timestamp list.

/// `items` must already be sorted ascending. Positive `p` is 1-based from
/// the front, negative `p` is 1-based from the back; out-of-range values
/// select nothing. Duplicate selections collapse (e.g. `BYSETPOS=1,-1` on a
/// single-element period selects it once).
pub fn project<T: Clone + Ord>(items: &[T], bysetpos: &[i16]) -> Vec<T> {
    if bysetpos.is_empty() {
        return items.to_vec();
    }

    let len = items.len() as i32;
    let mut picked: Vec<T> = Vec::new();
    for &p in bysetpos {
        let idx = if p > 0 { p as i32 - 1 } else { len + p as i32 };
        if idx < 0 || idx >= len {
            continue;
        }
        picked.push(items[idx as usize].clone());
    }
    picked.sort();
    picked.dedup();
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_and_negative_indices() {
        let items = vec![1, 2, 3, 4, 5];
        assert_eq!(project(&items, &[1]), vec![1]);
        assert_eq!(project(&items, &[-1]), vec![5]);
        assert_eq!(project(&items, &[3, -3]), vec![3]);
    }

    #[test]
    fn out_of_range_selects_nothing() {
        let items = vec![1, 2, 3];
        assert_eq!(project(&items, &[10, -10]), Vec::<i32>::new());
    }

    #[test]
    fn empty_bysetpos_passes_through() {
        let items = vec![1, 2, 3];
        assert_eq!(project(&items, &[]), items);
    }

    #[test]
    fn s6_scenario_monthday_13_17_hour_6_18_setpos_3_neg3() {
        // S6: BYMONTHDAY=13,17;BYHOUR=6,18;BYSETPOS=3,-3 over September 1997:
        // the sorted cross product is (13,6) (13,18) (17,6) (17,18); setpos 3
        // selects (17,6) and setpos -3 selects (13,18), matching 09-13T18:00
        // and 09-17T06:00 from the expected emission sequence.
        let items = vec![(13u8, 6u8), (13, 18), (17, 6), (17, 18)];
        assert_eq!(project(&items, &[3, -3]), vec![(13, 18), (17, 6)]);
    }
}
