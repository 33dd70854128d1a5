use core::cmp::Ordering;
use core::ops::{Bound, RangeBounds};

use crate::index::compare::Comparator;

/// First position whose key is not below `key`.
#[inline]
pub fn lower_bound<K, C: Comparator<K> + ?Sized>(keys: &[K], key: &K, compare: &C) -> usize {
    keys.partition_point(|k| compare.compare(k, key) == Ordering::Less)
}

/// First position whose key is above `key`.
#[inline]
pub fn upper_bound<K, C: Comparator<K> + ?Sized>(keys: &[K], key: &K, compare: &C) -> usize {
    keys.partition_point(|k| compare.compare(k, key) != Ordering::Greater)
}

/// Compute the half-open `(start, end)` positions covered by `range` in
/// keys sorted under `compare`. Never returns `end < start`.
pub fn range_to_indices<K, R, C>(keys: &[K], range: &R, compare: &C) -> (usize, usize)
where
    R: RangeBounds<K> + ?Sized,
    C: Comparator<K> + ?Sized,
{
    let start = match range.start_bound() {
        Bound::Included(key) => lower_bound(keys, key, compare),
        Bound::Excluded(key) => upper_bound(keys, key, compare),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(key) => upper_bound(keys, key, compare),
        Bound::Excluded(key) => lower_bound(keys, key, compare),
        Bound::Unbounded => keys.len(),
    };
    (start, end.max(start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::compare::Natural;
    use alloc::vec;

    #[test]
    fn test_bounds() {
        let keys = vec![1, 3, 3, 5];
        assert_eq!(lower_bound(&keys, &3, &Natural), 1);
        assert_eq!(upper_bound(&keys, &3, &Natural), 3);
        assert_eq!(lower_bound(&keys, &0, &Natural), 0);
        assert_eq!(upper_bound(&keys, &9, &Natural), 4);
    }

    #[test]
    fn test_range_to_indices() {
        let keys = vec![10, 20, 30, 40, 50];
        assert_eq!(range_to_indices(&keys, &(20..40), &Natural), (1, 3));
        assert_eq!(range_to_indices(&keys, &(20..=40), &Natural), (1, 4));
        assert_eq!(range_to_indices(&keys, &(..), &Natural), (0, 5));
        assert_eq!(range_to_indices(&keys, &(25..), &Natural), (2, 5));
        assert_eq!(range_to_indices(&keys, &(..=5), &Natural), (0, 0));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let keys = vec![10, 20, 30];
        let (start, end) = range_to_indices(&keys, &(30..10), &Natural);
        assert_eq!(start, end);
    }

    #[test]
    fn test_excluded_start() {
        let keys = vec![1, 2, 3];
        let range = (Bound::Excluded(1), Bound::Unbounded);
        assert_eq!(range_to_indices(&keys, &range, &Natural), (1, 3));
    }
}
