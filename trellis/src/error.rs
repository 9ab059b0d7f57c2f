//! Engine error types.

use thiserror::Error;

/// Errors raised while building a [`Forest`](crate::forest::Forest).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForestError {
    /// A record's parent chain loops back onto itself.
    ///
    /// Covers direct self-reference (`parent == own key`) as well as longer
    /// chains. The offending key is reported in its `Debug` form.
    #[error("record {key} is part of a parent-reference cycle")]
    ParentCycle { key: String },
}
