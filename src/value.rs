//! Request parameter values.
//!
//! A request parameter is either a single scalar string or a flat list of
//! scalar strings (`key[]=a&key[]=b` style). Deeper nesting is excluded by
//! the type itself: hosts with nested parameter structures flatten them
//! before constructing the context.

use serde::{Deserialize, Serialize};

/// A raw or sanitized request parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A single scalar value.
    Scalar(String),
    /// An ordered list of scalar values.
    List(Vec<String>),
}

impl Value {
    /// Returns the scalar content, or `None` for a list.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Returns the scalar content, or the first list element.
    ///
    /// Useful where a host treats a repeated parameter as if it were
    /// supplied once.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(items) => items.first().map(String::as_str),
        }
    }

    /// Returns true for an empty scalar or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(Value::from("a").as_str(), Some("a"));
        assert_eq!(Value::from(vec!["a", "b"]).as_str(), None);
    }

    #[test]
    fn test_first() {
        assert_eq!(Value::from("a").first(), Some("a"));
        assert_eq!(Value::from(vec!["a", "b"]).first(), Some("a"));
        assert_eq!(Value::List(vec![]).first(), None);
    }

    #[test]
    fn test_is_empty() {
        assert!(Value::Scalar(String::new()).is_empty());
        assert!(Value::List(vec![]).is_empty());
        assert!(!Value::from("x").is_empty());
        assert!(!Value::from(vec!["x"]).is_empty());
    }

    #[test]
    fn test_serde_untagged() {
        let scalar: Value = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(scalar, Value::from("hello"));

        let list: Value = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(list, Value::from(vec!["a", "b"]));
    }
}
