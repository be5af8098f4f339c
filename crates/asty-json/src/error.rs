//! Errors raised while reading JSON patterns and syntax trees.

use asty_core::CompileError;
use thiserror::Error;

/// An error loading a pattern or a syntax tree from JSON.
///
/// `path` fields use a `$.Rules[0].Fun` style location relative to the
/// document root.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The input is not well-formed JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A pattern or tree node is not a JSON object.
    #[error("expected an object at {path}")]
    NotAnObject {
        /// Location of the offending value.
        path: String,
    },

    /// An object that must be a node has no `NodeType`.
    #[error("missing NodeType at {path}")]
    MissingNodeType {
        /// Location of the offending object.
        path: String,
    },

    /// A reserved key holds a value of the wrong JSON type.
    #[error("field {field} at {path} must be {expected}")]
    InvalidField {
        /// Location of the enclosing object.
        path: String,
        /// The offending key.
        field: String,
        /// Description of the accepted JSON type.
        expected: &'static str,
    },

    /// A reserved key appears on a rule that does not accept it.
    #[error("field {field} is not allowed on a {rule} rule at {path}")]
    UnexpectedField {
        /// Location of the enclosing object.
        path: String,
        /// The offending key.
        field: String,
        /// `"search"` or `"literal"`.
        rule: &'static str,
    },

    /// The `Operator` of a search rule is not a known operator.
    #[error("unknown operator {operator:?} at {path}")]
    UnknownOperator {
        /// Location of the enclosing object.
        path: String,
        /// The rejected operator name.
        operator: String,
    },

    /// The loaded pattern failed validation.
    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl LoadError {
    pub(crate) fn not_an_object(path: &str) -> Self {
        Self::NotAnObject {
            path: path.to_owned(),
        }
    }

    pub(crate) fn missing_node_type(path: &str) -> Self {
        Self::MissingNodeType {
            path: path.to_owned(),
        }
    }

    pub(crate) fn invalid_field(path: &str, field: &str, expected: &'static str) -> Self {
        Self::InvalidField {
            path: path.to_owned(),
            field: field.to_owned(),
            expected,
        }
    }

    pub(crate) fn unexpected_field(path: &str, field: &str, rule: &'static str) -> Self {
        Self::UnexpectedField {
            path: path.to_owned(),
            field: field.to_owned(),
            rule,
        }
    }
}
