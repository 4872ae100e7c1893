//! Field values.

use serde::{Deserialize, Serialize};

/// The value carried by a field: nothing, a single string, or a list of
/// strings (multi-selects, `name[]` inputs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value was submitted or configured.
    #[default]
    Null,
    /// A single submitted string.
    Scalar(String),
    /// Several submitted strings under one name.
    List(Vec<String>),
}

impl FieldValue {
    /// Returns true for `Null` and the empty string.
    ///
    /// Lists are not considered empty here, even without items: the
    /// validators that care treat a list as a separate case.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Scalar(s) => s.is_empty(),
            Self::List(_) => false,
        }
    }

    /// Like [`is_empty`](Self::is_empty), but an empty list is blank too.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::List(items) => items.iter().all(|i| i.trim().is_empty()),
            Self::Scalar(s) => s.trim().is_empty(),
            Self::Null => true,
        }
    }

    /// Returns whether a checkbox holding this value is ticked: a
    /// non-empty scalar other than `"0"`, or a non-empty list.
    pub fn is_checked(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Scalar(s) => !s.is_empty() && s != "0",
            Self::List(items) => !items.is_empty(),
        }
    }

    /// Returns whether this is a list value.
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns the scalar string, if any.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns whether `candidate` is (one of) the value(s).
    pub fn contains(&self, candidate: &str) -> bool {
        match self {
            Self::Null => false,
            Self::Scalar(s) => s == candidate,
            Self::List(items) => items.iter().any(|i| i == candidate),
        }
    }

    /// Appends a string, turning the value into a list.
    pub fn push(&mut self, item: impl Into<String>) {
        let item = item.into();
        match self {
            Self::List(items) => items.push(item),
            Self::Null => *self = Self::List(vec![item]),
            Self::Scalar(s) => *self = Self::List(vec![std::mem::take(s), item]),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
