//! Error types for rule compilation, substitution tables and the segmenter

use crate::rules::RuleId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while compiling a rule source.
///
/// Every variant is fatal: a rule source either compiles completely or not at
/// all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Structural problem in the markup (missing, duplicated or unclosed tags)
    #[error("malformed rule source at line {line}: {reason}")]
    Malformed {
        /// Line where the problem was detected
        line: usize,
        /// What is wrong
        reason: String,
    },

    /// A pattern body is not a valid regular expression
    #[error("invalid pattern in {rule}: {message}")]
    PatternSyntax {
        /// The offending rule
        rule: RuleId,
        /// The pattern text as written
        pattern: String,
        /// Message from the regex compiler
        message: String,
    },

    /// An output template names a group its pattern does not define
    #[error("template of {rule} references group {reference}, but its pattern defines {available} group(s)")]
    TemplateReference {
        /// The offending rule
        rule: RuleId,
        /// The reference as written in the template
        reference: String,
        /// Number of capture groups the pattern defines
        available: usize,
    },
}

/// Errors raised while building substitution tables
#[derive(Debug, Error)]
pub enum SubstitutionError {
    /// A table rule's pattern is not a valid regular expression
    #[error("invalid pattern in substitution table '{table}', rule {ordinal}: {message}")]
    InvalidPattern {
        /// Name of the table
        table: String,
        /// 1-based position of the rule in its table
        ordinal: usize,
        /// The pattern text as written
        pattern: String,
        /// Message from the regex compiler
        message: String,
    },

    /// The table file could not be read
    #[error("failed to read substitution table {}: {source}", path.display())]
    Io {
        /// Path of the table file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Error type for the segmenter API
#[derive(Debug, Error)]
pub enum Error {
    /// Rule compilation error
    #[error(transparent)]
    Rules(#[from] RuleError),

    /// Substitution table error
    #[error(transparent)]
    Substitution(#[from] SubstitutionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Infrastructure error (I/O, etc.)
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for segmenter operations
pub type Result<T> = std::result::Result<T, Error>;
