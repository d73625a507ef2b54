//! Typed node properties

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a node property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Single string value
    String(String),
    /// Multi-valued string property
    Strings(Vec<String>),
    /// Signed integer value
    Long(i64),
    /// Boolean value
    Boolean(bool),
}

impl PropertyValue {
    /// Returns the value if this is a single string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a list of strings
    ///
    /// A single string is returned as a one-element list; non-string values
    /// yield `None`.
    pub fn as_strings(&self) -> Option<Vec<&str>> {
        match self {
            Self::String(s) => Some(vec![s.as_str()]),
            Self::Strings(values) => Some(values.iter().map(String::as_str).collect()),
            _ => None,
        }
    }

    /// Whether this property holds multiple values
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Strings(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Strings(_) => "Strings",
            Self::Long(_) => "Long",
            Self::Boolean(_) => "Boolean",
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        Self::Strings(values)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Strings(values.into_iter().map(str::to_string).collect())
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            Self::Strings(values) => write!(f, "[{}]", values.join(", ")),
            Self::Long(v) => write!(f, "{}", v),
            Self::Boolean(v) => write!(f, "{}", v),
        }
    }
}

/// A named property as read from a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyState {
    name: String,
    value: PropertyValue,
}

impl PropertyState {
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }
}
