use core::cmp::Ordering;
use core::fmt;

use crate::index::compare::Comparator;
use crate::util::cache::Slot;

/// A point-lookup algorithm over keys sorted by `compare`.
///
/// Implementations must return [`Slot::Found`] with the lowest matching
/// position when the key is present, and otherwise [`Slot::NotFound`] with
/// the greatest position whose key compares `Less` than the queried one.
pub trait Search<K> {
    fn search<C: Comparator<K> + ?Sized>(&self, keys: &[K], key: &K, compare: &C) -> Slot;
}

/// Build the outcome from the first position whose key is not below `key`.
#[inline]
fn slot_at<K, C: Comparator<K> + ?Sized>(keys: &[K], key: &K, first: usize, compare: &C) -> Slot {
    match keys.get(first) {
        Some(k) if compare.compare(k, key) == Ordering::Equal => Slot::Found(first),
        _ => Slot::NotFound(first.checked_sub(1)),
    }
}

/// Classic bisection. O(log n).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binary;

impl<K> Search<K> for Binary {
    fn search<C: Comparator<K> + ?Sized>(&self, keys: &[K], key: &K, compare: &C) -> Slot {
        let mut lo = 0usize;
        let mut hi = keys.len();
        let mut found = None;

        // Narrow [lo, hi) and keep going left after a hit, so duplicates
        // resolve to their first position.
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match compare.compare(&keys[mid], key) {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => {
                    found = Some(mid);
                    hi = mid;
                }
            }
        }

        match found {
            Some(pos) => Slot::Found(pos),
            None => Slot::NotFound(lo.checked_sub(1)),
        }
    }
}

/// Front-to-back scan. O(n), but cheaper than bisection on short runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Linear;

impl<K> Search<K> for Linear {
    fn search<C: Comparator<K> + ?Sized>(&self, keys: &[K], key: &K, compare: &C) -> Slot {
        let first = keys
            .iter()
            .position(|k| compare.compare(k, key) != Ordering::Less)
            .unwrap_or(keys.len());
        slot_at(keys, key, first, compare)
    }
}

const LINEAR_SEARCH_THRESHOLD: usize = 64;

/// [`Linear`] up to a threshold length, [`Binary`] beyond it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Adaptive {
    pub threshold: usize,
}

impl Default for Adaptive {
    fn default() -> Self {
        Self {
            threshold: LINEAR_SEARCH_THRESHOLD,
        }
    }
}

impl<K> Search<K> for Adaptive {
    #[inline]
    fn search<C: Comparator<K> + ?Sized>(&self, keys: &[K], key: &K, compare: &C) -> Slot {
        if keys.len() <= self.threshold {
            Linear.search(keys, key, compare)
        } else {
            Binary.search(keys, key, compare)
        }
    }
}

/// Adapts a plain search function.
///
/// The function receives the sorted keys, the queried key and the active
/// ordering, and must uphold the [`Search`] contract.
#[derive(Clone, Copy)]
pub struct FnSearch<F>(pub F);

impl<F> fmt::Debug for FnSearch<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSearch")
    }
}

impl<K, F> Search<K> for FnSearch<F>
where
    F: Fn(&[K], &K, &dyn Fn(&K, &K) -> Ordering) -> Slot,
{
    #[inline]
    fn search<C: Comparator<K> + ?Sized>(&self, keys: &[K], key: &K, compare: &C) -> Slot {
        (self.0)(keys, key, &|a: &K, b: &K| compare.compare(a, b))
    }
}
