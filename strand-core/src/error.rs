//! Error Types for Term and Declaration Construction.
//!
//! Every error here is synchronous and deterministic: a failed construction
//! never creates a value, and repeating the call reproduces the same error.

use thiserror::Error;

/// Errors raised by the term graph and the sequence theory front-end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrandError {
    /// Wrong number of arguments for an operator or sort.
    #[error("operator {op} expects {expected} argument(s), got {found}")]
    Arity {
        /// Operator or sort name.
        op: String,
        /// Declared arity.
        expected: usize,
        /// Arity of the rejected request.
        found: usize,
    },

    /// An argument sort does not fit the declaration being built.
    #[error("sort mismatch: expected {expected}, found {found}")]
    SortMismatch {
        /// Human-readable expected shape.
        expected: String,
        /// Human-readable offending sort.
        found: String,
    },

    /// No registered signature unifies with the given argument sorts.
    ///
    /// Surfaced only after every candidate signature has been tried.
    #[error("no applicable signature for operator {op}")]
    NoMatch {
        /// Operator name.
        op: String,
    },

    /// A textual literal contains a malformed escape sequence or a code
    /// point outside the representable range.
    #[error("malformed string literal: {0}")]
    MalformedLiteral(String),

    /// The theory does not recognize the requested operator kind.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// The theory does not recognize the requested sort kind, or its
    /// parameters have the wrong shape.
    #[error("unknown or malformed sort: {0}")]
    UnknownSort(String),
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, StrandError>;
