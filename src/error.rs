//! Error types for phonetic feature encoding.
//!
//! Only caller mistakes and corrupt compiled-in data are errors. An IPA
//! codepoint with no table entry is not an error: it is recorded as
//! [`Phone::Unknown`](crate::Phone::Unknown) and decodes to
//! [`FeatureValue::Undefined`](crate::FeatureValue::Undefined).

use thiserror::Error;

/// The main error type for phonetic feature operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneticError {
    /// Requested feature is not one of the enumerated feature names
    #[error("Invalid feature name '{name}': feature must be one of: {expected}")]
    InvalidFeatureName {
        /// The name the caller passed
        name: String,
        /// Comma-separated list of accepted names
        expected: String,
    },

    /// The static feature table violates one of its structural invariants
    #[error("Invalid feature table: {0}")]
    InvalidTable(String),
}

/// A specialized `Result` type for phonetic feature operations.
pub type Result<T> = std::result::Result<T, PhoneticError>;
