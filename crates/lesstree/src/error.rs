//! Error types for LESS parsing and expression evaluation.
//!
//! This module defines the errors that can occur when parsing a stylesheet,
//! loading its imports, or evaluating expression nodes.

use thiserror::Error;

/// Errors that can occur while building or evaluating a LESS tree.
///
/// # Examples
///
/// ```rust
/// use lesstree::parse_stylesheet;
///
/// // Missing value after the colon
/// let result = parse_stylesheet("@color: ;");
/// assert!(result.is_err());
/// ```
#[derive(Error, Debug)]
pub enum TreeError {
    /// Invalid LESS syntax was encountered during parsing.
    ///
    /// The string contains details about what was unexpected and where.
    #[error("LESS syntax error: {0}")]
    InvalidSyntax(String),

    /// A variable was referenced during evaluation but no declaration exists.
    #[error("variable {0} is undefined")]
    UndefinedVariable(String),

    /// A variable's value refers back to itself, directly or indirectly.
    #[error("recursive variable definition for {0}")]
    RecursiveVariable(String),

    /// A function call named a function the registry does not know.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// A function was called with arguments it cannot handle.
    #[error("invalid argument to {function}: {message}")]
    InvalidArgument { function: String, message: String },

    /// An arithmetic operation was applied to operands that don't support it.
    #[error("cannot apply '{op}' to {lhs} and {rhs}")]
    IncompatibleOperands { op: char, lhs: String, rhs: String },

    /// An `@import` could not be satisfied by the loader.
    #[error("cannot import {0}")]
    ImportUnavailable(String),

    /// An `@import` chain leads back to a file that is still being parsed.
    #[error("import cycle through {0}")]
    ImportCycle(String),

    /// An I/O error occurred while reading a stylesheet file.
    #[error("I/O error reading stylesheet")]
    Io(#[from] std::io::Error),
}

impl TreeError {
    pub(crate) fn invalid_argument(function: &str, message: impl Into<String>) -> Self {
        TreeError::InvalidArgument {
            function: function.to_string(),
            message: message.into(),
        }
    }
}
