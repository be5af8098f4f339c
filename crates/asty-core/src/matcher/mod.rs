//! Pattern matching engine.
//!
//! The matcher is a mutually recursive pair: a structural match tests one
//! node against a literal rule, and a search walks a subtree in pre-order
//! testing every visited node against a search rule's sub-rules.  Literal
//! rules reach searches through their attribute constraints, and searches
//! reach literal rules through their sub-rules.
//!
//! Subtree walks use an explicit work stack, so tree depth never turns into
//! call-stack depth.  Recursion depth is bounded by the pattern.

mod context;
mod matching;

use tracing::debug;

use crate::compile::CompiledPattern;
use crate::config::EngineConfig;
use crate::error::MatchError;
use crate::match_result::Matches;
use crate::node::AstNode;

use context::MatchContext;

pub(crate) const MATCH_TARGET: &str = "asty::matcher";

/// Matches `pattern` against the tree rooted at `root`.
///
/// When the pattern's root is a search rule the whole tree is searched and
/// every hit is returned in pre-order.  When it is a literal rule only `root`
/// itself is tested, yielding zero or one result.
///
/// # Errors
///
/// Returns [`MatchError::Adapter`] when the node adapter fails, and
/// [`MatchError::SearchLimitExceeded`] when the configured node budget runs
/// out.  No partial result is returned in either case.
///
/// # Example
///
/// ```
/// use asty_core::{compile, find_all, EngineConfig};
/// use asty_core::test_support::{call_pattern, TestNode};
///
/// let pattern = compile(call_pattern())?;
/// let tree = TestNode::call("println", vec![TestNode::string_lit("hi")]);
/// let matches = find_all(&tree, &pattern, &EngineConfig::default())?;
/// assert!(matches.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn find_all<'a, 'p, N: AstNode>(
    root: &'a N,
    pattern: &'p CompiledPattern,
    config: &EngineConfig,
) -> Result<Matches<'a, 'p, N>, MatchError> {
    let mut ctx = MatchContext::new(pattern, config);
    let results = ctx.match_root(root)?;
    debug!(
        target: MATCH_TARGET,
        results = results.len(),
        visited = ctx.visited(),
        "match finished"
    );
    Ok(Matches::new(results))
}
