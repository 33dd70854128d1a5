use alloc::vec::Vec;

use crate::error::Error;
use crate::index::compare::{Builtin, Comparator};
use crate::index::indexed::Indexed;
use crate::index::key::KeyRule;
use crate::util::search::{Binary, Search};

/// Builder for indexed collections with a custom ordering or search strategy.
///
/// # Example
///
/// ```
/// use keyed_index::index::{Builder, FnComparator, Linear};
/// use keyed_index::{KeyFn, Mode};
///
/// let mut index = Builder::new()
///     .compare(FnComparator(|a: &i32, b: &i32| b.cmp(a)))
///     .search(Linear)
///     .sort(true)
///     .build(vec![1, 7, 4], KeyFn::new("n", |n: &i32| *n))
///     .unwrap();
///
/// assert_eq!(index.records(), &[7, 4, 1]);
/// assert_eq!(index.locate(&4, Mode::Exact), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct Builder<C = Builtin, S = Binary> {
    compare: C,
    search: S,
    sort: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            compare: Builtin::Auto,
            search: Binary,
            sort: false,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C, S> Builder<C, S> {
    /// Set the ordering used to sort and search.
    pub fn compare<C2>(self, compare: C2) -> Builder<C2, S> {
        Builder {
            compare,
            search: self.search,
            sort: self.sort,
        }
    }

    /// Set the point-lookup algorithm run on cache misses.
    pub fn search<S2>(self, search: S2) -> Builder<C, S2> {
        Builder {
            compare: self.compare,
            search,
            sort: self.sort,
        }
    }

    /// Sort the records right after construction.
    pub fn sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    pub fn build<R, X>(self, records: Vec<R>, rule: X) -> Result<Indexed<R, X::Key, C, S>, Error>
    where
        X: KeyRule<R>,
        C: Comparator<X::Key>,
        S: Search<X::Key>,
    {
        let mut index = Indexed::from_parts(records, rule, self.compare, self.search)?;
        if self.sort {
            index.sort();
        }
        Ok(index)
    }
}
