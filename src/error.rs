//! Error types for the branch code generator.
//!
//! This module provides a unified error type [`BranchgenError`] covering
//! definition parsing, naming-rule reading and output writing.

use std::fmt;

use thiserror::Error;

/// Result type alias using [`BranchgenError`].
pub type Result<T> = std::result::Result<T, BranchgenError>;

/// Why a definition line was not accepted as a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The line does not follow the branch grammar
    GrammarMismatch,
    /// The line follows the grammar but names a type code outside the scalar table
    UnknownType(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::GrammarMismatch => write!(f, "does not match the branch grammar"),
            RejectReason::UnknownType(code) => write!(f, "unknown type code '{}'", code),
        }
    }
}

/// Unified error type for all branchgen operations.
#[derive(Error, Debug)]
pub enum BranchgenError {
    // ============ Definition Errors ============
    /// A single line was rejected as a branch definition
    #[error("Definition rejected: '{definition}' {reason}")]
    DefinitionRejected {
        definition: String,
        reason: RejectReason,
    },

    /// A rejected line inside a definition source
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    // ============ I/O Errors ============
    /// Error reading a definition file
    #[error("Failed to read definition file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error reading a naming block or writing generated output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BranchgenError {
    /// Create a definition rejection
    pub fn rejected(definition: impl Into<String>, reason: RejectReason) -> Self {
        Self::DefinitionRejected {
            definition: definition.into(),
            reason,
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Whether this error only means "not a branch definition".
    ///
    /// Callers trying several definition kinds on the same line use this to
    /// fall through to the next kind.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::DefinitionRejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message() {
        let err = BranchgenError::rejected("x/Q", RejectReason::UnknownType("Q".to_string()));
        assert!(err.is_rejection());
        assert_eq!(
            err.to_string(),
            "Definition rejected: 'x/Q' unknown type code 'Q'"
        );
    }

    #[test]
    fn test_parse_error_is_not_rejection() {
        let err = BranchgenError::parse(3, "bad line");
        assert!(!err.is_rejection());
        assert_eq!(err.to_string(), "Parse error at line 3: bad line");
    }
}
