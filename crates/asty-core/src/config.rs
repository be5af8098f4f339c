//! Engine configuration for search limits.

/// Engine configuration controlling how much work a single match call may do.
///
/// # Defaults
///
/// - `max_search_nodes`: unbounded
///
/// A bounded budget turns a runaway search into
/// [`MatchError::SearchLimitExceeded`](crate::MatchError::SearchLimitExceeded).
/// Results are never truncated.
///
/// # Example
///
/// ```
/// use asty_core::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.max_search_nodes(), None);
///
/// let bounded = EngineConfig::new(Some(50_000));
/// assert_eq!(bounded.max_search_nodes(), Some(50_000));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of tree nodes visited by searches in one match call.
    max_search_nodes: Option<usize>,
}

impl EngineConfig {
    /// Creates a configuration with an explicit node budget.
    #[must_use]
    pub const fn new(max_search_nodes: Option<usize>) -> Self {
        Self { max_search_nodes }
    }

    /// Returns the search node budget, if bounded.
    #[must_use]
    pub const fn max_search_nodes(&self) -> Option<usize> {
        self.max_search_nodes
    }
}
