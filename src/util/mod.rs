pub mod cache;
pub mod range;
pub mod search;

pub use cache::{Mode, PositionCache, Slot};
