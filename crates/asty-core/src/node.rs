//! The node model the matcher walks.
//!
//! The engine never sees a concrete syntax tree.  It sees a read-only
//! projection through [`AstNode`]: a kind tag plus named attributes, each of
//! which resolves to a [`Scalar`], a single child node, or an ordered
//! sequence of child nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AdapterError;

/// A scalar attribute value.
///
/// Equality is exact: `Int(1)` and `Float(1.0)` are different values.
///
/// # Example
///
/// ```
/// use asty_core::Scalar;
///
/// assert_eq!(Scalar::from("STRING"), Scalar::Str(String::from("STRING")));
/// assert_ne!(Scalar::Int(1), Scalar::Float(1.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
}

impl Scalar {
    /// Returns the string payload, if this is a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// The resolved value of one attribute on a node.
#[derive(Debug)]
pub enum AttributeValue<'a, N> {
    /// A scalar value.
    Scalar(Scalar),
    /// A single child node.
    Node(&'a N),
    /// An ordered sequence of child nodes.
    Nodes(Vec<&'a N>),
}

impl<N> Clone for AttributeValue<'_, N> {
    fn clone(&self) -> Self {
        match self {
            Self::Scalar(value) => Self::Scalar(value.clone()),
            Self::Node(node) => Self::Node(node),
            Self::Nodes(nodes) => Self::Nodes(nodes.clone()),
        }
    }
}

impl<'a, N> AttributeValue<'a, N> {
    /// Returns the child nodes held by this value in declaration order.
    ///
    /// Scalars hold no nodes and yield an empty list.
    #[must_use]
    pub fn nodes(&self) -> Vec<&'a N> {
        match self {
            Self::Scalar(_) => Vec::new(),
            Self::Node(node) => vec![*node],
            Self::Nodes(nodes) => nodes.clone(),
        }
    }
}

/// Read-only projection of a concrete syntax tree node.
///
/// Implementations must be stable and free of side effects: asking the same
/// node for the same attribute twice returns the same answer.  Any failure to
/// project the underlying tree is reported as an [`AdapterError`], which
/// aborts the match call in flight.
pub trait AstNode: Sized {
    /// Returns the node's type tag, such as `"CallExpr"`.
    ///
    /// # Errors
    ///
    /// Returns an [`AdapterError`] when the underlying node has no usable tag.
    fn kind(&self) -> Result<&str, AdapterError>;

    /// Returns every attribute of the node in declaration order.
    ///
    /// The order defines the left-to-right child order used by searches.
    ///
    /// # Errors
    ///
    /// Returns an [`AdapterError`] when an attribute cannot be projected.
    fn fields(&self) -> Result<Vec<(&str, AttributeValue<'_, Self>)>, AdapterError>;

    /// Returns a single attribute by name, or `None` when it is absent.
    ///
    /// The default implementation scans [`fields`](Self::fields); adapters
    /// with keyed storage should override it.
    ///
    /// # Errors
    ///
    /// Returns an [`AdapterError`] when the attribute cannot be projected.
    fn attribute(&self, name: &str) -> Result<Option<AttributeValue<'_, Self>>, AdapterError> {
        Ok(self
            .fields()?
            .into_iter()
            .find_map(|(field, value)| (field == name).then_some(value)))
    }

    /// Returns every direct child node in declaration order.
    ///
    /// # Errors
    ///
    /// Returns an [`AdapterError`] when an attribute cannot be projected.
    fn child_nodes(&self) -> Result<Vec<&Self>, AdapterError> {
        Ok(self
            .fields()?
            .iter()
            .flat_map(|(_, value)| value.nodes())
            .collect())
    }
}
