//! Validation failures for wire-shaped input
//!
//! Raised before any store call is issued; a record that fails validation
//! causes no partial mutation anywhere.

/// Malformed input detected at the model boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Tile value that is not exactly one character
    #[error("value must be a single character, got `{0}`")]
    ValueNotSingleChar(String),
    /// Index that is not a non-negative integer
    #[error("index must be a non-negative integer, got `{0}`")]
    InvalidIndex(String),
    /// Update proposal missing a field the protocol requires
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}
