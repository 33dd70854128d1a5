//! The indexed collection.

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::ops::RangeBounds;

use tracing::{debug, trace};

use crate::error::Error;
use crate::index::builder::Builder;
use crate::index::compare::{Builtin, Comparator};
use crate::index::key::{Key, KeyRule};
use crate::util::cache::{Mode, PositionCache};
use crate::util::range::range_to_indices;
use crate::util::search::{Binary, Search};

/// Records indexed by one key, with cached point and range lookups.
///
/// Keys are extracted once, at construction, and kept alongside the records.
/// Lookups assume the records are ordered by `compare`; call [`Indexed::sort`]
/// first if the input was not already in that order.
///
/// Every point query goes through a position cache, so repeated queries for
/// the same key skip the search. The cache is cleared by [`Indexed::sort`]
/// (positions change) but kept by [`Indexed::set_compare`] and
/// [`Indexed::set_search`], which only take effect for later sorts and
/// searches.
///
/// Queries take `&mut self`: they record their outcome in the cache and in
/// the last-result slot read by [`Indexed::current`]. Share across threads
/// behind a `Mutex`.
///
/// # Example
///
/// ```
/// use keyed_index::{Indexed, KeyFn, Mode};
///
/// struct City { name: &'static str, population: u32 }
///
/// let cities = vec![
///     City { name: "Lyon", population: 522_000 },
///     City { name: "Nice", population: 342_000 },
///     City { name: "Paris", population: 2_102_000 },
/// ];
/// let mut index = Indexed::new(cities, KeyFn::new("population", |c: &City| c.population)).unwrap();
/// index.sort();
///
/// assert_eq!(index.get(&342_000, Mode::Exact).map(|c| c.name), Some("Nice"));
/// assert_eq!(index.get(&600_000, Mode::Approximate).map(|c| c.name), Some("Lyon"));
///
/// let names: Vec<_> = index
///     .get_range(&300_000, &600_000, Mode::Approximate)
///     .unwrap()
///     .iter()
///     .map(|c| c.name)
///     .collect();
/// assert_eq!(names, ["Nice", "Lyon"]);
/// ```
pub struct Indexed<R, K, C = Builtin, S = Binary> {
    records: Vec<R>,
    keys: Vec<K>,
    name: String,
    min: Option<K>,
    max: Option<K>,
    compare: C,
    search: S,
    cache: PositionCache<K>,
    last: Option<usize>,
}

impl<R, K: Key> Indexed<R, K> {
    /// Index `records` by `rule` with the default comparator and binary search.
    ///
    /// The records are not reordered; see [`Indexed::sort`].
    pub fn new<X>(records: Vec<R>, rule: X) -> Result<Self, Error>
    where
        X: KeyRule<R, Key = K>,
    {
        Builder::new().build(records, rule)
    }
}

#[cfg(feature = "serde")]
impl Indexed<serde_json::Value, crate::index::key::KeyValue> {
    /// Index a JSON array of objects by the field `name`.
    ///
    /// Fails with [`Error::InvalidData`] if `value` is not an array.
    pub fn from_json(value: serde_json::Value, name: &str) -> Result<Self, Error> {
        match value {
            serde_json::Value::Array(records) => Self::new(records, name),
            _ => Err(Error::InvalidData),
        }
    }
}

impl<R, K, C, S> Indexed<R, K, C, S>
where
    K: Key,
    C: Comparator<K>,
    S: Search<K>,
{
    pub(crate) fn from_parts<X>(
        records: Vec<R>,
        rule: X,
        mut compare: C,
        search: S,
    ) -> Result<Self, Error>
    where
        X: KeyRule<R, Key = K>,
    {
        if rule.name().is_empty() {
            return Err(Error::InvalidKey {
                name: String::new(),
                position: 0,
            });
        }

        let keys = records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                rule.extract(record).ok_or_else(|| Error::InvalidKey {
                    name: rule.name().into(),
                    position,
                })
            })
            .collect::<Result<Vec<K>, Error>>()?;

        if let Some(first) = keys.first() {
            compare.prepare(first);
        }

        let mut index = Self {
            records,
            keys,
            name: rule.name().into(),
            min: None,
            max: None,
            compare,
            search,
            cache: PositionCache::new(),
            last: None,
        };
        index.refresh_bounds();

        debug!(key = %index.name, len = index.len(), "built index");
        Ok(index)
    }

    fn refresh_bounds(&mut self) {
        self.min = self.keys.first().cloned();
        self.max = self.keys.last().cloned();
    }

    /// Reorder the records by key, in place and stably.
    ///
    /// Recomputes the boundaries and clears the position cache and the last
    /// result, which both refer to positions in the old order.
    pub fn sort(&mut self) -> &mut Self {
        let compare = &self.compare;
        let mut pairs: Vec<(K, R)> = core::mem::take(&mut self.keys)
            .into_iter()
            .zip(core::mem::take(&mut self.records))
            .collect();
        pairs.sort_by(|a, b| compare.compare(&a.0, &b.0));
        let (keys, records): (Vec<K>, Vec<R>) = pairs.into_iter().unzip();
        self.keys = keys;
        self.records = records;

        self.after_sort();
        self
    }

    /// Parallel [`Indexed::sort`].
    #[cfg(feature = "parallel")]
    pub fn par_sort(&mut self) -> &mut Self
    where
        R: Send,
        K: Send,
        C: Sync,
    {
        use rayon::slice::ParallelSliceMut;

        let compare = &self.compare;
        let mut pairs: Vec<(K, R)> = core::mem::take(&mut self.keys)
            .into_iter()
            .zip(core::mem::take(&mut self.records))
            .collect();
        pairs.par_sort_by(|a, b| compare.compare(&a.0, &b.0));
        let (keys, records): (Vec<K>, Vec<R>) = pairs.into_iter().unzip();
        self.keys = keys;
        self.records = records;

        self.after_sort();
        self
    }

    fn after_sort(&mut self) {
        self.refresh_bounds();
        let dropped = self.cache.len();
        self.cache.clear();
        self.last = None;
        debug!(key = %self.name, len = self.len(), dropped, "sorted index");
    }

    /// Resolve `key` and remember the outcome for [`Indexed::current`].
    ///
    /// - an empty collection, or a key below the minimum, resolves to nothing
    ///   in either mode;
    /// - a key above the maximum resolves to the last position when
    ///   approximate, else to nothing;
    /// - otherwise the cached or freshly searched [`Slot`](crate::Slot) decides.
    pub fn fetch(&mut self, key: &K, mode: Mode) -> &mut Self {
        self.last = self.resolve(key, mode);
        self
    }

    /// [`Indexed::fetch`] returning the resolved position.
    #[inline]
    pub fn locate(&mut self, key: &K, mode: Mode) -> Option<usize> {
        self.fetch(key, mode).last
    }

    fn resolve(&mut self, key: &K, mode: Mode) -> Option<usize> {
        let (Some(min), Some(max)) = (&self.min, &self.max) else {
            return None;
        };

        if self.compare.compare(key, min) == Ordering::Less {
            return None;
        }
        if self.compare.compare(key, max) == Ordering::Greater {
            return if mode.is_approximate() {
                self.keys.len().checked_sub(1)
            } else {
                None
            };
        }

        let slot = match self.cache.lookup(key) {
            Some(slot) => {
                trace!(?key, ?slot, "position cache hit");
                slot
            }
            None => {
                let slot = self.search.search(&self.keys, key, &self.compare);
                trace!(?key, ?slot, "searched");
                self.cache.insert(key.clone(), slot);
                slot
            }
        };
        slot.resolve(mode)
    }

    /// Position resolved by the most recent point query.
    #[inline]
    pub fn last(&self) -> Option<usize> {
        self.last
    }

    /// The record at `key`, or its lower neighbor in approximate mode.
    pub fn get(&mut self, key: &K, mode: Mode) -> Option<&R> {
        self.fetch(key, mode);
        self.current()
    }

    /// The record the most recent point query resolved to.
    ///
    /// This depends on call order: after `get_range` it is the end bound's
    /// outcome.
    #[inline]
    pub fn current(&self) -> Option<&R> {
        self.last.and_then(|pos| self.records.get(pos))
    }

    /// Records from `begin` to `end`, both inclusive, in current order.
    ///
    /// Nothing is returned when `begin` sorts after `end` or either bound
    /// fails to resolve. In approximate mode each bound falls back to its
    /// lower neighbor, and a `begin` below the minimum starts the slice at
    /// the first record.
    pub fn get_range(&mut self, begin: &K, end: &K, mode: Mode) -> Option<&[R]> {
        if self.compare.compare(begin, end) == Ordering::Greater {
            return None;
        }

        let mut start = self.locate(begin, mode);
        let finish = self.locate(end, mode);

        if start.is_none() && mode.is_approximate() {
            start = Some(0);
        }

        let (start, finish) = (start?, finish?);
        self.records.get(start..=finish)
    }

    /// Records whose keys fall in `range`, without touching the cache.
    pub fn range<B>(&self, range: B) -> impl DoubleEndedIterator<Item = &R> + ExactSizeIterator
    where
        B: RangeBounds<K>,
    {
        let (start, end) = range_to_indices(&self.keys, &range, &self.compare);
        self.records[start..end].iter()
    }

    /// Replace the comparator. Cached outcomes and boundaries are kept until
    /// the next [`Indexed::sort`].
    pub fn set_compare(&mut self, compare: C) -> &mut Self {
        self.compare = compare;
        self
    }

    /// Replace the search strategy. Cached outcomes are kept.
    pub fn set_search(&mut self, search: S) -> &mut Self {
        self.search = search;
        self
    }

    /// [`Indexed::set_compare`] with a comparator of another type.
    pub fn with_compare<C2: Comparator<K>>(self, compare: C2) -> Indexed<R, K, C2, S> {
        Indexed {
            records: self.records,
            keys: self.keys,
            name: self.name,
            min: self.min,
            max: self.max,
            compare,
            search: self.search,
            cache: self.cache,
            last: self.last,
        }
    }

    /// [`Indexed::set_search`] with a strategy of another type.
    pub fn with_search<S2: Search<K>>(self, search: S2) -> Indexed<R, K, C, S2> {
        Indexed {
            records: self.records,
            keys: self.keys,
            name: self.name,
            min: self.min,
            max: self.max,
            compare: self.compare,
            search,
            cache: self.cache,
            last: self.last,
        }
    }

    /// Drop every cached search outcome.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl<R, K, C, S> Indexed<R, K, C, S> {
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Name of the key rule.
    #[inline]
    pub fn key_name(&self) -> &str {
        &self.name
    }

    /// Key of the first record as of construction or the last sort.
    #[inline]
    pub fn min_key(&self) -> Option<&K> {
        self.min.as_ref()
    }

    /// Key of the last record as of construction or the last sort.
    #[inline]
    pub fn max_key(&self) -> Option<&K> {
        self.max.as_ref()
    }

    #[inline]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Keys, position for position with [`Indexed::records`].
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &R)> + ExactSizeIterator {
        self.keys.iter().zip(self.records.iter())
    }

    #[inline]
    pub fn comparator(&self) -> &C {
        &self.compare
    }

    #[inline]
    pub fn strategy(&self) -> &S {
        &self.search
    }

    /// Number of distinct keys with a cached outcome.
    #[inline]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    #[inline]
    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

impl<R, K, C, S> fmt::Debug for Indexed<R, K, C, S>
where
    K: fmt::Debug,
    C: fmt::Debug,
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Indexed")
            .field("key", &self.name)
            .field("len", &self.records.len())
            .field("min", &self.min)
            .field("max", &self.max)
            .field("compare", &self.compare)
            .field("search", &self.search)
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl<R: Clone, K: Clone, C: Clone, S: Clone> Clone for Indexed<R, K, C, S> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            keys: self.keys.clone(),
            name: self.name.clone(),
            min: self.min.clone(),
            max: self.max.clone(),
            compare: self.compare.clone(),
            search: self.search.clone(),
            cache: self.cache.clone(),
            last: self.last,
        }
    }
}

impl<'a, R, K, C, S> IntoIterator for &'a Indexed<R, K, C, S> {
    type Item = &'a R;
    type IntoIter = core::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
