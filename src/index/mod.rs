//! The indexed collection and the pieces it is assembled from.
//!
//! - [`Indexed`]: records plus their keys, boundaries, position cache and
//!   last query result
//! - [`Builder`]: constructs an [`Indexed`] with a chosen ordering and search
//!   strategy
//!
//! ## Traits
//!
//! - [`Comparator`]: total order over keys ([`Builtin`], [`Natural`],
//!   [`FnComparator`])
//! - [`Search`]: point-lookup algorithm ([`Binary`], [`Linear`], [`Adaptive`],
//!   [`FnSearch`])
//! - [`key::KeyRule`]: maps a record to its key ([`key::KeyFn`], or a field
//!   name for [`key::Fields`] records)

pub(crate) mod builder;
pub mod compare;
pub(crate) mod indexed;
pub mod key;

pub use builder::Builder;
pub use compare::{Builtin, Comparator, FnComparator, Natural};
pub use indexed::Indexed;
pub use key::{Fields, Key, KeyFn, KeyRule, KeyValue};

pub use crate::util::search::{Adaptive, Binary, FnSearch, Linear, Search};
