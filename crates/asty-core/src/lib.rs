//! Core data model and matching engine for Asty structural patterns.
//!
//! This crate holds everything needed to run a pattern against an
//! already-parsed syntax tree: the [`AstNode`] adapter contract, the pattern
//! arena and its rule variants, compilation into a validated
//! [`CompiledPattern`], the matcher itself, and the nested, named
//! [`MatchResult`] tree it produces.  It is re-exported by the `asty` facade
//! crate for stable public consumption.
//!
//! # Core types
//!
//! - [`AstNode`], [`AttributeValue`] and [`Scalar`]: the node model
//! - [`PatternBuilder`], [`PatternNode`] and [`PatternRule`]: raw patterns
//! - [`compile`] and [`CompiledPattern`]: validated, reusable patterns
//! - [`find_all`]: the matcher entry point
//! - [`Matches`], [`MatchResult`] and [`Captures`]: nested capture groups
//! - [`EngineConfig`]: search limits
//!
//! # Example
//!
//! ```
//! use asty_core::{
//!     compile, find_all, EngineConfig, LiteralRule, PatternBuilder, PatternNode, SearchRule,
//! };
//! use asty_core::test_support::TestNode;
//!
//! let mut builder = PatternBuilder::new();
//! let ident = builder.add(PatternNode::from(LiteralRule::of_kind("Ident")).named("ident"));
//! let root = builder.add(PatternNode::from(SearchRule::new(vec![ident])));
//! let pattern = compile(builder.build(root))?;
//!
//! let tree = TestNode::new("CallExpr").with_node("Fun", TestNode::ident("print"));
//! let matches = find_all(&tree, &pattern, &EngineConfig::default())?;
//! assert_eq!(matches.named("ident").count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod capture;
mod compile;
mod config;
mod error;
mod match_result;
mod matcher;
mod node;
mod pattern;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use capture::Captures;
pub use compile::{CompiledPattern, compile};
pub use config::EngineConfig;
pub use error::{AdapterError, CompileError, CompileErrorKind, MatchError};
pub use match_result::{MatchResult, Matches};
pub use matcher::find_all;
pub use node::{AstNode, AttributeValue, Scalar};
pub use pattern::{
    Constraint, LiteralRule, MatchOperator, PatternBuilder, PatternId, PatternNode, PatternRule,
    RawPattern, SearchRule,
};

#[cfg(test)]
mod tests;
