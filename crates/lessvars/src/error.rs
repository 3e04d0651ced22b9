//! Error types for variable extraction.

use lesstree::{Node, TreeError};
use thiserror::Error;

/// Errors that abort an extraction pass.
///
/// Evaluation failures always abort. Degraded outcomes (a reference to a
/// variable not declared yet, a node with no native form) only abort under
/// [`DegradedPolicy::Fail`](crate::DegradedPolicy::Fail).
#[derive(Error, Debug)]
pub enum Error {
    /// A function call or operation failed to evaluate.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// A variable refers to another that has no value at that point.
    #[error("{variable} refers to {reference}, which has no value yet")]
    UnresolvedReference { variable: String, reference: String },

    /// A variable's value has no native representation.
    #[error("{variable} has an unsupported value: {node}")]
    UnsupportedNode { variable: String, node: Node },
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
