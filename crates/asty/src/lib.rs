//! Asty: structural pattern matching over abstract syntax trees.
//!
//! This facade crate re-exports the stable types from [`asty_core`] and
//! [`asty_json`] and provides the top-level [`Engine`] entrypoint for
//! compiling patterns once and running them against many trees.
//!
//! # Stability
//!
//! The `asty` crate is the only semver-stable entrypoint.  The internal
//! crates (`asty_core`, `asty_json`) may evolve, but this facade preserves
//! type names and method behaviour.
//!
//! # Core types
//!
//! - [`AstNode`], [`AttributeValue`] and [`Scalar`]: the tree adapter contract
//! - [`PatternBuilder`], [`RawPattern`] and [`PatternNode`]: pattern authoring
//! - [`CompiledPattern`]: a validated, immutable pattern
//! - [`MatchResult`], [`Captures`] and [`Matches`]: match output
//! - [`JsonNode`]: a `go2json`-style tree read from JSON
//! - [`EngineConfig`]: search limits
//! - [`Engine`]: compilation and execution
//!
//! # Example
//!
//! ```
//! use asty::{Engine, EngineConfig, JsonNode};
//!
//! let engine = Engine::new(EngineConfig::default());
//! let pattern = engine.compile_json(r#"{
//!     "NodeType": "MatchRule",
//!     "Name": "lit",
//!     "Rules": [{"NodeType": "BasicLit"}]
//! }"#)?;
//! let tree = JsonNode::parse(r#"{"NodeType": "BasicLit", "Kind": "INT"}"#)?;
//! let matches = engine.execute(&tree, &pattern)?;
//! assert_eq!(matches.named("lit").count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod engine;

pub use asty_core::{
    AdapterError, AstNode, AttributeValue, Captures, CompileError, CompileErrorKind,
    CompiledPattern, Constraint, EngineConfig, LiteralRule, MatchError, MatchOperator,
    MatchResult, Matches, PatternBuilder, PatternId, PatternNode, PatternRule, RawPattern,
    Scalar, SearchRule,
};
pub use asty_json::{JsonNode, LoadError};

pub use engine::Engine;

#[cfg(test)]
mod tests;
