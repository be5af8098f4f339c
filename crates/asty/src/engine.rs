//! The [`Engine`] entrypoint.
//!
//! Compilation and execution are separate phases: a [`CompiledPattern`] is
//! validated once and can then be executed against any number of trees,
//! from any number of threads.

use asty_core::{
    AstNode, CompileError, CompiledPattern, EngineConfig, MatchError, Matches, RawPattern,
};
use asty_json::LoadError;
use tracing::debug;

const ENGINE_TARGET: &str = "asty::engine";

/// Compiles patterns and executes them against syntax trees.
///
/// # Example
///
/// ```
/// use asty::{Engine, EngineConfig};
///
/// let engine = Engine::new(EngineConfig::new(Some(1_000)));
/// let result = engine.compile_json(r#"{"NodeType": "MatchRule", "Rules": []}"#);
/// assert!(result.is_err());
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Creates a new engine with the given configuration.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates a programmatically built pattern.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] when the pattern has a cycle, an empty rule
    /// set or a dangling reference.
    pub fn compile(&self, raw: RawPattern) -> Result<CompiledPattern, CompileError> {
        asty_core::compile(raw)
    }

    /// Loads and validates a JSON pattern.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the JSON does not describe a pattern or
    /// the pattern fails validation.
    pub fn compile_json(&self, json: &str) -> Result<CompiledPattern, LoadError> {
        let pattern = asty_json::load_pattern(json)?;
        debug!(target: ENGINE_TARGET, nodes = pattern.len(), "compiled JSON pattern");
        Ok(pattern)
    }

    /// Matches a compiled pattern against the tree rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError`] when the tree adapter fails or the configured
    /// search budget is exhausted.
    pub fn execute<'a, 'p, N: AstNode>(
        &self,
        root: &'a N,
        pattern: &'p CompiledPattern,
    ) -> Result<Matches<'a, 'p, N>, MatchError> {
        asty_core::find_all(root, pattern, &self.config)
    }
}
