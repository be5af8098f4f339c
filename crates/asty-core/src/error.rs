//! Error types for compilation and matching.
//!
//! Compilation failures are fatal for the pattern that produced them: the
//! caller fixes the pattern and compiles again.  Match failures come from the
//! node adapter or from an exhausted search budget and abort only the call
//! in flight; no partial result is ever returned.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::pattern::PatternId;

/// Opaque failure raised by an [`AstNode`](crate::AstNode) implementation.
///
/// # Example
///
/// ```
/// use asty_core::AdapterError;
///
/// let error = AdapterError::new("attribute `Args` is not a node list");
/// assert_eq!(error.to_string(), "attribute `Args` is not a node list");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AdapterError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AdapterError {
    /// Creates an adapter error with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an adapter error wrapping an underlying cause.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Why a raw pattern was rejected by [`compile`](crate::compile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CompileErrorKind {
    /// A pattern node is reachable from itself.
    CycleDetected,
    /// A search rule has no sub-rules.
    EmptyRuleSet,
    /// A pattern node refers to an id that was never defined.
    DanglingReference,
}

impl fmt::Display for CompileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycleDetected => f.write_str("cycle detected"),
            Self::EmptyRuleSet => f.write_str("search rule has an empty rule set"),
            Self::DanglingReference => f.write_str("reference to an undefined pattern node"),
        }
    }
}

/// A raw pattern failed validation.
///
/// # Example
///
/// ```
/// use asty_core::{compile, CompileErrorKind, PatternBuilder, PatternNode, SearchRule};
///
/// let mut builder = PatternBuilder::new();
/// let root = builder.add(PatternNode::from(SearchRule::new(Vec::new())));
/// let error = compile(builder.build(root)).unwrap_err();
/// assert_eq!(error.kind(), CompileErrorKind::EmptyRuleSet);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid pattern: {kind} at node {pattern}")]
pub struct CompileError {
    kind: CompileErrorKind,
    pattern: PatternId,
}

impl CompileError {
    /// Creates a compile error for the given node.
    #[must_use]
    pub const fn new(kind: CompileErrorKind, pattern: PatternId) -> Self {
        Self { kind, pattern }
    }

    /// Creates a cycle error.
    #[must_use]
    pub const fn cycle(pattern: PatternId) -> Self {
        Self::new(CompileErrorKind::CycleDetected, pattern)
    }

    /// Creates an empty rule set error.
    #[must_use]
    pub const fn empty_rule_set(pattern: PatternId) -> Self {
        Self::new(CompileErrorKind::EmptyRuleSet, pattern)
    }

    /// Creates a dangling reference error.
    #[must_use]
    pub const fn dangling(pattern: PatternId) -> Self {
        Self::new(CompileErrorKind::DanglingReference, pattern)
    }

    /// Returns the reason for the failure.
    #[must_use]
    pub const fn kind(&self) -> CompileErrorKind {
        self.kind
    }

    /// Returns the pattern node where the failure was detected.
    #[must_use]
    pub const fn pattern(&self) -> PatternId {
        self.pattern
    }
}

/// A match call failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MatchError {
    /// The node adapter could not project part of the tree.
    #[error("AST adapter failed: {0}")]
    Adapter(#[from] AdapterError),

    /// The search visited more nodes than the configured budget allows.
    #[error("search visited more than {limit} nodes")]
    SearchLimitExceeded {
        /// The configured node budget.
        limit: usize,
    },
}

impl MatchError {
    /// Creates a search limit error.
    #[must_use]
    pub const fn search_limit(limit: usize) -> Self {
        Self::SearchLimitExceeded { limit }
    }
}
