use alloc::collections::BTreeMap;

/// How a point query treats a key with no exact match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Only an exact match resolves.
    #[default]
    Exact,
    /// Fall back to the nearest lower neighbor.
    Approximate,
}

impl Mode {
    #[inline]
    pub fn is_approximate(self) -> bool {
        self == Mode::Approximate
    }
}

impl From<bool> for Mode {
    #[inline]
    fn from(approximate: bool) -> Self {
        if approximate {
            Mode::Approximate
        } else {
            Mode::Exact
        }
    }
}

/// Outcome of searching for one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    /// An exact match sits at this position.
    Found(usize),
    /// No exact match. Holds the position of the greatest key strictly
    /// below the queried one, or `None` when there is no such key.
    NotFound(Option<usize>),
}

impl Slot {
    /// Position a query in the given mode resolves to.
    #[inline]
    pub fn resolve(self, mode: Mode) -> Option<usize> {
        match self {
            Slot::Found(pos) => Some(pos),
            Slot::NotFound(prev) if mode.is_approximate() => prev,
            Slot::NotFound(_) => None,
        }
    }

    #[inline]
    pub fn is_found(self) -> bool {
        matches!(self, Slot::Found(_))
    }
}

/// Memo of search outcomes, one entry per distinct queried key.
///
/// Entries are keyed by the key's own `Ord`, independent of the collection's
/// comparator. Nothing is evicted; the cache only grows until cleared.
#[derive(Clone, Debug)]
pub struct PositionCache<K> {
    entries: BTreeMap<K, Slot>,
}

impl<K: Ord> PositionCache<K> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn lookup(&self, key: &K) -> Option<Slot> {
        self.entries.get(key).copied()
    }

    #[inline]
    pub fn insert(&mut self, key: K, slot: Slot) {
        self.entries.insert(key, slot);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K> PositionCache<K> {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Ord> Default for PositionCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_resolve() {
        assert_eq!(Slot::Found(3).resolve(Mode::Exact), Some(3));
        assert_eq!(Slot::Found(3).resolve(Mode::Approximate), Some(3));
        assert_eq!(Slot::NotFound(Some(2)).resolve(Mode::Exact), None);
        assert_eq!(Slot::NotFound(Some(2)).resolve(Mode::Approximate), Some(2));
        assert_eq!(Slot::NotFound(Some(0)).resolve(Mode::Approximate), Some(0));
        assert_eq!(Slot::NotFound(None).resolve(Mode::Approximate), None);
    }

    #[test]
    fn test_mode_from_bool() {
        assert_eq!(Mode::from(true), Mode::Approximate);
        assert_eq!(Mode::from(false), Mode::Exact);
        assert_eq!(Mode::default(), Mode::Exact);
    }

    #[test]
    fn test_cache_basic() {
        let mut cache: PositionCache<u64> = PositionCache::new();

        assert_eq!(cache.lookup(&42), None);

        cache.insert(42, Slot::Found(100));
        assert_eq!(cache.lookup(&42), Some(Slot::Found(100)));

        cache.insert(42, Slot::NotFound(Some(7)));
        assert_eq!(cache.lookup(&42), Some(Slot::NotFound(Some(7))));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_miss() {
        let mut cache: PositionCache<u64> = PositionCache::new();
        cache.insert(42, Slot::Found(100));

        assert_eq!(cache.lookup(&43), None);
    }

    #[test]
    fn test_cache_size_needs_no_ordering() {
        fn size<K>(cache: &PositionCache<K>) -> (usize, bool) {
            (cache.len(), cache.is_empty())
        }

        let mut cache: PositionCache<u64> = PositionCache::new();
        assert_eq!(size(&cache), (0, true));
        cache.insert(1, Slot::NotFound(None));
        assert_eq!(size(&cache), (1, false));
    }

    #[test]
    fn test_cache_clear() {
        let mut cache: PositionCache<&str> = PositionCache::new();
        cache.insert("Gabi", Slot::Found(4));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.lookup(&"Gabi"), None);
    }
}
