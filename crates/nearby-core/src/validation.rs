//! # Validation Module
//!
//! Input validation for favorites and pricing.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen                                                       │
//! │  └── Catalog data is already shaped, nothing typed by the user         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Favorite input: id / name / category present, rating in range     │
//! │  └── Pricing input: finite, price ≥ 0, discount in [0, 1]              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: FavoriteCollection                                           │
//! │  └── id uniqueness (duplicate add is a no-op, not an error)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nearby_core::validation::{validate_base_price, validate_discount_fraction};
//!
//! assert!(validate_base_price(1500.0).is_ok());
//! assert!(validate_discount_fraction(1.5).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::FavoriteItemInput;
use crate::MAX_RATING;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a catalog id.
pub const MAX_ID_LEN: usize = 128;

/// Maximum length of a display name.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// Favorite Validators
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a favorite before it is stamped and inserted.
///
/// ## Rules
/// - `id`, `name`, `category` must not be blank
/// - `id` at most 128 characters, `name` at most 200
/// - `rating`, when present, must be within `[0, 5]`
///
/// ## Example
/// ```rust
/// use nearby_core::types::FavoriteItemInput;
/// use nearby_core::validation::validate_favorite_input;
///
/// let input = FavoriteItemInput::new("r1", "Karachi Biryani House", "Food");
/// assert!(validate_favorite_input(&input).is_ok());
///
/// let blank = FavoriteItemInput::new("", "Nameless", "Food");
/// assert!(validate_favorite_input(&blank).is_err());
/// ```
pub fn validate_favorite_input(input: &FavoriteItemInput) -> ValidationResult<()> {
    require("id", &input.id)?;
    require("name", &input.name)?;
    require("category", &input.category)?;

    if input.id.chars().count() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    if input.name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    if let Some(rating) = input.rating {
        if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
            return Err(ValidationError::OutOfRange {
                field: "rating".to_string(),
                min: 0.0,
                max: MAX_RATING,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Pricing Validators
// =============================================================================

/// Validates a catalog base price.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative (zero is a free service)
pub fn validate_base_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "base price".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "base price".to_string(),
            min: 0.0,
            max: f64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount fraction.
///
/// ## Rules
/// - Must be finite
/// - Must be within `[0, 1]` (0 = no discount, 1 = free)
pub fn validate_discount_fraction(fraction: f64) -> ValidationResult<()> {
    if !fraction.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "discount".to_string(),
        });
    }

    if !(0.0..=1.0).contains(&fraction) {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0.0,
            max: 1.0,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
