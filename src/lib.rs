//! # keyed-index
//!
//! Index a sequence of uniform records by one sortable key and answer exact,
//! nearest-lower and range lookups by that key without re-scanning.
//!
//! ## Quick Start
//!
//! ```rust
//! use keyed_index::{Indexed, KeyFn, Mode};
//!
//! #[derive(Debug, PartialEq)]
//! struct Person { name: &'static str }
//!
//! let people = ["Alf", "Gabi", "Lars", "Fran", "Juli", "Gorka", "Bruce", "Ale"]
//!     .into_iter()
//!     .map(|name| Person { name })
//!     .collect();
//!
//! let mut index = Indexed::new(people, KeyFn::new("name", |p: &Person| p.name)).unwrap();
//! index.sort();
//!
//! assert_eq!(index.get(&"Bruce", Mode::Exact), Some(&Person { name: "Bruce" }));
//! assert_eq!(index.get(&"Herman", Mode::Exact), None);
//! assert_eq!(index.get(&"Herman", Mode::Approximate), Some(&Person { name: "Gorka" }));
//! assert_eq!(index.get_range(&"Bruce", &"Gorka", Mode::Exact).map(<[_]>::len), Some(4));
//! ```
//!
//! ## Lookups
//!
//! - [`Indexed::fetch`] / [`Indexed::locate`]: resolve a key to a position
//! - [`Indexed::get`] / [`Indexed::current`]: resolve a key to a record
//! - [`Indexed::get_range`]: inclusive slice between two keys
//! - [`Indexed::range`]: std-style `RangeBounds` iteration
//!
//! Point queries are memoized per key in a position cache. A miss (absent
//! key, key out of range, inverted range) is `None`, never an error.
//!
//! ## Features
//!
//! - `std` (default): `std::error::Error` for [`Error`], `HashMap` records
//! - `parallel`: [`Indexed::par_sort`] via rayon
//! - `serde`: serde derives and JSON records via [`Indexed::from_json`]

#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub mod error;
pub mod index;
pub mod util;

pub use error::Error;
pub use index::{Builder, Indexed};
pub use index::key::{KeyFn, KeyValue};
pub use util::{Mode, Slot};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_integration_numeric() {
        let data: Vec<u64> = (0..10000).rev().collect();
        let mut index = Builder::new()
            .sort(true)
            .build(data, KeyFn::new("n", |n: &u64| *n))
            .unwrap();

        for i in (0..10000).step_by(100) {
            assert_eq!(index.locate(&i, Mode::Exact), Some(i as usize));
        }
    }

    #[test]
    fn test_integration_signed() {
        let data: Vec<i64> = (-5000..5000).collect();
        let mut index = Indexed::new(data, KeyFn::new("n", |n: &i64| *n)).unwrap();

        for i in (-5000i64..5000).step_by(100) {
            let pos = index.locate(&i, Mode::Exact);
            assert_eq!(pos, Some((i + 5000) as usize), "Failed for key {}", i);
        }

        assert!(index.get(&-5000, Mode::Exact).is_some());
        assert!(index.get(&5000, Mode::Exact).is_none());
    }

    #[test]
    fn test_missing_keys() {
        let data: Vec<u64> = (0..100).map(|i| i * 2).collect();
        let mut index = Indexed::new(data, KeyFn::new("n", |n: &u64| *n)).unwrap();

        assert_eq!(index.locate(&1, Mode::Exact), None);
        assert_eq!(index.locate(&1, Mode::Approximate), Some(0));
        assert_eq!(index.locate(&199, Mode::Approximate), Some(99));
        assert_eq!(index.locate(&0, Mode::Approximate), Some(0));
    }

    #[test]
    fn test_sparse_range() {
        let data: Vec<u64> = (0..1000).map(|i| i * i).collect();
        let mut index = Indexed::new(data, KeyFn::new("n", |n: &u64| *n)).unwrap();

        let slice = index.get_range(&100, &400, Mode::Exact).unwrap();
        assert_eq!(slice, &[100, 121, 144, 169, 196, 225, 256, 289, 324, 361, 400]);

        let slice = index.get_range(&101, &399, Mode::Approximate).unwrap();
        assert_eq!(slice.first(), Some(&100));
        assert_eq!(slice.last(), Some(&361));
    }
}
