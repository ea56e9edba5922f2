//! # Error Types
//!
//! Domain-specific error types for nearby-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nearby-core errors (this file)                                        │
//! │  ├── CoreError        - Pricing input and domain errors                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  nearby-db errors (separate crate)                                     │
//! │  └── DbError          - Durable backend failures                       │
//! │                                                                         │
//! │  Backend failures stop at FavoriteStore: they are logged, never        │
//! │  returned. Only caller mistakes (ValidationError) reach the caller.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A price or discount was outside the range the strict pricing
    /// path accepts.
    ///
    /// ## When This Occurs
    /// - `try_quote` with a negative base price
    /// - `try_quote` with a discount fraction outside `[0, 1]`
    /// - NaN or infinite input
    #[error("Invalid pricing input: {0}")]
    InvalidPricing(#[source] ValidationError),

    /// Pricing tier string is not recognised.
    #[error("Unknown pricing tier: '{0}'. Valid options: normal, vip")]
    UnknownTier(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Numeric value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0.0,
            max: 1.0,
        };
        assert_eq!(err.to_string(), "discount must be between 0 and 1");
    }

    #[test]
    fn test_invalid_pricing_message() {
        let err = CoreError::InvalidPricing(ValidationError::NotFinite {
            field: "base price".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Invalid pricing input: base price must be a finite number"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
