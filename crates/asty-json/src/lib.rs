//! JSON front end for the `asty` pattern engine.
//!
//! Two formats are handled here:
//!
//! - **Patterns.**  A pattern is a tree of JSON objects.  `"NodeType":
//!   "MatchRule"` marks a search rule whose sub-rules are listed under
//!   `Rules`; any other `NodeType` is a literal rule requiring that node
//!   kind.  On a `MatchRule`, `Name` labels the capture; on a literal rule
//!   it is an attribute like any other.  Every other key constrains the
//!   attribute of the same name: an object is a sub-pattern, an array a
//!   positional sequence of sub-patterns and a scalar must compare equal.
//!   Attribute constraints whose names collide with the reserved keys are
//!   written inside an `Attributes` object.
//! - **Syntax trees.**  [`JsonNode`] adapts `go2json`-style documents, where
//!   every object carrying a `NodeType` is a node, to [`asty_core::AstNode`].
//!
//! # Example
//!
//! ```
//! use asty_core::{find_all, EngineConfig};
//! use asty_json::{load_pattern, JsonNode};
//!
//! let pattern = load_pattern(r#"{
//!     "NodeType": "MatchRule",
//!     "Name": "ident",
//!     "Rules": [{"NodeType": "Ident"}]
//! }"#)?;
//! let tree = JsonNode::parse(r#"{"NodeType": "Ident", "Name": "x"}"#)?;
//! let matches = find_all(&tree, &pattern, &EngineConfig::default())?;
//! assert_eq!(matches.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod loader;
mod node;

pub use error::LoadError;
pub use loader::{load_pattern, parse_pattern, parse_pattern_value};
pub use node::JsonNode;

#[cfg(test)]
mod tests;
