//! Multiset intersection between two frequency maps.

use crate::types::{KeyFrequencies, Overlap};

/// Count keys shared by both maps and the multiplicity-bounded overlap.
///
/// A shared key contributes 1 to `distinct` and `min(count_a, count_b)` to
/// `total`. Keys of the smaller map are looked up in the larger one;
/// the result does not depend on argument order.
pub fn compute_overlap(first: &KeyFrequencies, second: &KeyFrequencies) -> Overlap {
    let (scan, lookup) = if first.distinct_count() <= second.distinct_count() {
        (first, second)
    } else {
        (second, first)
    };

    scan.iter().fold(Overlap::default(), |mut overlap, (key, count)| {
        let other = lookup.count(key);
        if other > 0 {
            overlap.distinct += 1;
            overlap.total += count.min(other);
        }
        overlap
    })
}
