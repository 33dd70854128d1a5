//! Orderings over keys.
//!
//! A [`Comparator`] must be a total order and a pure function of its two
//! arguments: sorting and searching both rely on it giving the same answer
//! for the same pair every time.

use alloc::boxed::Box;
use core::cmp::Ordering;
use core::fmt;

use crate::index::key::Key;

pub trait Comparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;

    /// Called once at construction with the first key of a non-empty
    /// collection, before anything is compared.
    #[inline]
    fn prepare(&mut self, first: &K) {
        let _ = first;
    }
}

impl<K: ?Sized, C: Comparator<K> + ?Sized> Comparator<K> for &C {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (**self).compare(a, b)
    }
}

impl<K: ?Sized, C: Comparator<K> + ?Sized> Comparator<K> for Box<C> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (**self).compare(a, b)
    }

    #[inline]
    fn prepare(&mut self, first: &K) {
        (**self).prepare(first)
    }
}

/// The default ordering: numeric when the first key is a number, otherwise
/// lexicographic over the keys' text.
///
/// Under `Numeric`, keys without a numeric view sort after every key that has
/// one, among themselves by `Ord`.
///
/// `Auto` picks between the two in [`Comparator::prepare`]. An `Auto` that
/// was never prepared (an empty collection) falls back to the keys' own
/// `Ord`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Builtin {
    #[default]
    Auto,
    Numeric,
    Lexical,
}

impl Builtin {
    pub fn for_key<K: Key>(first: &K) -> Self {
        if first.is_numeric() {
            Builtin::Numeric
        } else {
            Builtin::Lexical
        }
    }
}

impl<K: Key> Comparator<K> for Builtin {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        match self {
            Builtin::Auto => a.cmp(b),
            // Keys with a numeric view sort first, by value; the rest follow by `Ord`.
            // Ties on the projection fall back to `Ord` so `Equal` still means equal keys.
            Builtin::Numeric => match (a.to_number(), b.to_number()) {
                (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.cmp(b),
            },
            Builtin::Lexical => a.to_text().cmp(&b.to_text()).then_with(|| a.cmp(b)),
        }
    }

    fn prepare(&mut self, first: &K) {
        if *self == Builtin::Auto {
            *self = Builtin::for_key(first);
        }
    }
}

/// The keys' own `Ord`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Adapts a plain comparison function.
///
/// ```
/// use keyed_index::index::{Comparator, FnComparator};
/// use core::cmp::Ordering;
///
/// let desc = FnComparator(|a: &u32, b: &u32| b.cmp(a));
/// assert_eq!(desc.compare(&1, &2), Ordering::Greater);
/// ```
#[derive(Clone, Copy)]
pub struct FnComparator<F>(pub F);

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnComparator")
    }
}

impl<K: ?Sized, F> Comparator<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::key::KeyValue;
    use alloc::string::String;

    #[test]
    fn test_builtin_detects_kind() {
        let mut numeric = Builtin::Auto;
        Comparator::<u64>::prepare(&mut numeric, &1);
        assert_eq!(numeric, Builtin::Numeric);

        let mut lexical = Builtin::Auto;
        Comparator::<String>::prepare(&mut lexical, &String::from("a"));
        assert_eq!(lexical, Builtin::Lexical);
    }

    #[test]
    fn test_prepare_keeps_explicit_choice() {
        let mut cmp = Builtin::Lexical;
        Comparator::<u64>::prepare(&mut cmp, &1);
        assert_eq!(cmp, Builtin::Lexical);
    }

    #[test]
    fn test_numeric_vs_lexical() {
        assert_eq!(Builtin::Numeric.compare(&9u32, &10u32), Ordering::Less);
        assert_eq!(Builtin::Lexical.compare(&9u32, &10u32), Ordering::Greater);
        assert_eq!(Builtin::Lexical.compare(&"Bruce", &"Alf"), Ordering::Greater);
        assert_eq!(Builtin::Numeric.compare(&5i64, &5i64), Ordering::Equal);
    }

    #[test]
    fn test_numeric_on_key_values() {
        let a = KeyValue::Number(2.0);
        let b = KeyValue::Number(10.0);
        assert_eq!(Builtin::Numeric.compare(&a, &b), Ordering::Less);
        assert_eq!(Builtin::Lexical.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_numeric_is_total_on_mixed_text() {
        let keys = ["9", "10", "1a", "0x", "0"].map(KeyValue::from);
        let cmp = |a: &KeyValue, b: &KeyValue| Builtin::Numeric.compare(a, b);

        assert_eq!(cmp(&keys[0], &keys[1]), Ordering::Less);
        assert_eq!(cmp(&keys[1], &keys[2]), Ordering::Less);
        assert_eq!(cmp(&keys[0], &keys[2]), Ordering::Less);
        assert_eq!(cmp(&keys[2], &keys[3]), Ordering::Greater);

        for a in &keys {
            for b in &keys {
                assert_eq!(cmp(a, b), cmp(b, a).reverse(), "{a} vs {b}");
                for c in &keys {
                    if cmp(a, b) == Ordering::Less && cmp(b, c) == Ordering::Less {
                        assert_eq!(cmp(a, c), Ordering::Less, "{a} < {b} < {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_numeric_ties_broken_past_f64_precision() {
        let lo = 1u64 << 53;
        let hi = lo + 1;
        assert_eq!(lo as f64, hi as f64);

        assert_eq!(Builtin::Numeric.compare(&lo, &hi), Ordering::Less);
        assert_eq!(Builtin::Numeric.compare(&hi, &lo), Ordering::Greater);
        assert_eq!(Builtin::Numeric.compare(&hi, &hi), Ordering::Equal);

        let neg = -(1i64 << 53);
        assert_eq!(Builtin::Numeric.compare(&(neg - 1), &neg), Ordering::Less);
    }

    #[test]
    fn test_boxed_and_fn_comparators() {
        let mut boxed: Box<dyn Comparator<u32>> = Box::new(Builtin::Auto);
        boxed.prepare(&3);
        assert_eq!(boxed.compare(&1, &2), Ordering::Less);

        let desc = FnComparator(|a: &u32, b: &u32| b.cmp(a));
        assert_eq!(desc.compare(&1, &2), Ordering::Greater);
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
    }
}
