use alloc::string::String;
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input is not an ordered, indexable sequence of records.
    InvalidData,
    /// The key rule does not resolve on the record at `position`.
    InvalidKey { name: String, position: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidData => write!(f, "input data must be a sequence of records"),
            Error::InvalidKey { name, position } => {
                write!(f, "key `{name}` is missing on record {position}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
