//! Error types for the vulnera-cvss crate.
//!
//! Every failure in this crate is deterministic for a given input, so nothing
//! here is retryable: callers must correct the vector string, not retry.

/// The main error type for all scoring operations in this crate.
///
/// All validation-style failures carry the same numeric code (403), exposed
/// through [`CvssError::code`]; callers distinguish causes by message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CvssError {
    /// The vector string failed grammar validation or matched no known
    /// CVSS version.
    #[error("The vector you have provided is invalid")]
    InvalidVector,

    /// A metric letter-code had no entry in the version's weight table.
    ///
    /// Unreachable for vectors that passed validation; hitting this is a
    /// defect, not a data error.
    #[error("Value could not be parsed")]
    InvalidValue,

    /// A mandatory metric was absent from the vector.
    #[error("Missing value")]
    MissingValue,
}

/// A specialized Result type for CVSS scoring operations.
pub type Result<T> = std::result::Result<T, CvssError>;

impl CvssError {
    /// Create a new invalid-vector error.
    pub fn invalid_vector() -> Self {
        Self::InvalidVector
    }

    /// Create a new invalid-value error.
    pub fn invalid_value() -> Self {
        Self::InvalidValue
    }

    /// Create a new missing-value error.
    pub fn missing_value() -> Self {
        Self::MissingValue
    }

    /// Numeric code reported alongside the message, shared by every
    /// validation failure cause.
    pub fn code(&self) -> u16 {
        403
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_fixed() {
        assert_eq!(
            CvssError::invalid_vector().to_string(),
            "The vector you have provided is invalid"
        );
        assert_eq!(
            CvssError::invalid_value().to_string(),
            "Value could not be parsed"
        );
        assert_eq!(CvssError::missing_value().to_string(), "Missing value");
    }

    #[test]
    fn test_all_errors_share_code() {
        assert_eq!(CvssError::InvalidVector.code(), 403);
        assert_eq!(CvssError::InvalidValue.code(), 403);
        assert_eq!(CvssError::MissingValue.code(), 403);
    }
}
