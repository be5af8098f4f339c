//! Matching context shared across recursive operations.

use crate::compile::CompiledPattern;
use crate::config::EngineConfig;
use crate::error::MatchError;

/// Per-call state: the pattern being matched and the search budget spent so
/// far.  Created fresh for every top-level call and never shared.
pub(super) struct MatchContext<'p> {
    pub(super) pattern: &'p CompiledPattern,
    limit: Option<usize>,
    visited: usize,
}

impl<'p> MatchContext<'p> {
    pub(super) const fn new(pattern: &'p CompiledPattern, config: &EngineConfig) -> Self {
        Self {
            pattern,
            limit: config.max_search_nodes(),
            visited: 0,
        }
    }

    pub(super) const fn visited(&self) -> usize {
        self.visited
    }

    /// Charges one visited node against the budget.
    pub(super) fn charge(&mut self) -> Result<(), MatchError> {
        self.visited += 1;
        match self.limit {
            Some(limit) if self.visited > limit => Err(MatchError::search_limit(limit)),
            _ => Ok(()),
        }
    }
}
