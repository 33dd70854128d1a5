use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::fmt;
use num_traits::ToPrimitive;

/// A value records can be ordered and looked up by.
///
/// The two hooks besides `Ord` drive the [`Builtin`](crate::index::Builtin)
/// comparator: a collection whose first key reports [`Key::is_numeric`] is
/// ordered numerically, every other collection lexically.
pub trait Key: Clone + Ord + fmt::Debug {
    fn is_numeric(&self) -> bool;

    /// Numeric view of the key, if it has one.
    fn to_number(&self) -> Option<f64>;

    /// Textual view of the key.
    fn to_text(&self) -> Cow<'_, str>;
}

macro_rules! impl_key_numeric {
    ($($t:ty),*) => {
        $(
            impl Key for $t {
                #[inline]
                fn is_numeric(&self) -> bool {
                    true
                }

                #[inline]
                fn to_number(&self) -> Option<f64> {
                    ToPrimitive::to_f64(self)
                }

                #[inline]
                fn to_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_key_numeric!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Key for String {
    #[inline]
    fn is_numeric(&self) -> bool {
        false
    }

    #[inline]
    fn to_number(&self) -> Option<f64> {
        self.parse().ok()
    }

    #[inline]
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Key for &str {
    #[inline]
    fn is_numeric(&self) -> bool {
        false
    }

    #[inline]
    fn to_number(&self) -> Option<f64> {
        self.parse().ok()
    }

    #[inline]
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

/// Dynamically typed key, as found on schemaless records.
///
/// Numbers sort before text; numbers are totally ordered with
/// [`f64::total_cmp`], so `NaN` has a stable place instead of poisoning the
/// order.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum KeyValue {
    Number(f64),
    Text(String),
}

impl KeyValue {
    #[cfg(feature = "serde")]
    pub(crate) fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map(KeyValue::Number),
            serde_json::Value::String(s) => Some(KeyValue::Text(s.clone())),
            _ => None,
        }
    }
}

impl Ord for KeyValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyValue::Number(a), KeyValue::Number(b)) => a.total_cmp(b),
            (KeyValue::Number(_), KeyValue::Text(_)) => Ordering::Less,
            (KeyValue::Text(_), KeyValue::Number(_)) => Ordering::Greater,
            (KeyValue::Text(a), KeyValue::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for KeyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for KeyValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyValue {}

impl Key for KeyValue {
    #[inline]
    fn is_numeric(&self) -> bool {
        matches!(self, KeyValue::Number(_))
    }

    fn to_number(&self) -> Option<f64> {
        match self {
            KeyValue::Number(n) => Some(*n),
            KeyValue::Text(s) => s.parse().ok(),
        }
    }

    fn to_text(&self) -> Cow<'_, str> {
        match self {
            KeyValue::Number(n) => Cow::Owned(n.to_string()),
            KeyValue::Text(s) => Cow::Borrowed(s),
        }
    }
}

macro_rules! impl_key_value_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for KeyValue {
                #[inline]
                fn from(value: $t) -> Self {
                    KeyValue::Number(value as f64)
                }
            }
        )*
    };
}

impl_key_value_from_number!(f32, f64, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        KeyValue::Text(value.into())
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        KeyValue::Text(value)
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Number(n) => write!(f, "{n}"),
            KeyValue::Text(s) => f.write_str(s),
        }
    }
}

/// Records whose keys are looked up by field name.
pub trait Fields {
    type Value: Key;

    /// The value stored under `name`, if the record has one that can serve as a key.
    fn field(&self, name: &str) -> Option<Self::Value>;
}

impl<V: Key> Fields for BTreeMap<String, V> {
    type Value = V;

    #[inline]
    fn field(&self, name: &str) -> Option<V> {
        self.get(name).cloned()
    }
}

#[cfg(feature = "std")]
impl<V: Key, H: core::hash::BuildHasher> Fields for std::collections::HashMap<String, V, H> {
    type Value = V;

    #[inline]
    fn field(&self, name: &str) -> Option<V> {
        self.get(name).cloned()
    }
}

#[cfg(feature = "serde")]
impl Fields for serde_json::Map<String, serde_json::Value> {
    type Value = KeyValue;

    fn field(&self, name: &str) -> Option<KeyValue> {
        self.get(name).and_then(KeyValue::from_json)
    }
}

#[cfg(feature = "serde")]
impl Fields for serde_json::Value {
    type Value = KeyValue;

    fn field(&self, name: &str) -> Option<KeyValue> {
        self.as_object()?.field(name)
    }
}

/// The rule mapping a record to its key. Fixed for the lifetime of a collection.
///
/// A field name (`&str` or `String`) works for any [`Fields`] record; use
/// [`KeyFn`] for typed records.
pub trait KeyRule<R: ?Sized> {
    type Key: Key;

    /// Name used in errors and diagnostics.
    fn name(&self) -> &str;

    fn extract(&self, record: &R) -> Option<Self::Key>;
}

impl<R: Fields + ?Sized> KeyRule<R> for &str {
    type Key = R::Value;

    #[inline]
    fn name(&self) -> &str {
        self
    }

    #[inline]
    fn extract(&self, record: &R) -> Option<R::Value> {
        record.field(self)
    }
}

impl<R: Fields + ?Sized> KeyRule<R> for String {
    type Key = R::Value;

    #[inline]
    fn name(&self) -> &str {
        self
    }

    #[inline]
    fn extract(&self, record: &R) -> Option<R::Value> {
        record.field(self)
    }
}

/// Key rule backed by an accessor closure.
///
/// ```
/// use keyed_index::index::key::{KeyFn, KeyRule};
///
/// struct User { id: u64 }
///
/// let rule = KeyFn::new("id", |u: &User| u.id);
/// assert_eq!(rule.extract(&User { id: 7 }), Some(7));
/// ```
#[derive(Clone)]
pub struct KeyFn<F> {
    name: String,
    accessor: F,
}

impl<F> KeyFn<F> {
    pub fn new(name: impl Into<String>, accessor: F) -> Self {
        Self {
            name: name.into(),
            accessor,
        }
    }
}

impl<F> fmt::Debug for KeyFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyFn").field("name", &self.name).finish()
    }
}

impl<R, K, F> KeyRule<R> for KeyFn<F>
where
    K: Key,
    F: Fn(&R) -> K,
{
    type Key = K;

    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn extract(&self, record: &R) -> Option<K> {
        Some((self.accessor)(record))
    }
}
