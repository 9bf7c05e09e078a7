//! # Error Types
//!
//! Domain-specific error types for banner-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  banner-core errors (this file)                                        │
//! │  ├── CoreError        - Configuration / domain failures                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quote-cli errors (app)                                                │
//! │  └── ConfigError      - Config file / environment problems             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (CLI boundary)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending value in the message (material, mode, etc.)
//! 3. Errors are enum variants, never String
//! 4. Rounding is a policy, never an error

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core engine errors.
///
/// Every variant is a fail-fast rejection: the engine never substitutes a
/// default material, fit mode or add-on, since a silent default misprices
/// an order.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Material identifier is not one the storefront sells.
    ///
    /// ## When This Occurs
    /// - Cart payload carries a retired material key
    /// - Typo in an order file (`"13 oz"` instead of `"13oz"`)
    #[error("Unknown material: '{0}'")]
    UnknownMaterial(String),

    /// Material is known but the active rate table has no price for it.
    ///
    /// ## When This Occurs
    /// - An alternate rate table (promo pricing, test table) omits a tier
    #[error("No rate configured for material {material}")]
    MissingMaterialRate { material: String },

    /// Fit mode identifier is not `contain`, `cover` or `stretch`.
    #[error("Unknown fit mode: '{0}'")]
    UnknownFitMode(String),

    /// Grommet configuration identifier is not recognised.
    #[error("Unknown grommet option: '{0}'")]
    UnknownGrommets(String),

    /// Pole-pocket position identifier is not recognised.
    #[error("Unknown pole pocket option: '{0}'")]
    UnknownPolePockets(String),

    /// Aspect ratio is not one the generator supports.
    #[error("Unknown aspect ratio: '{0}'")]
    UnknownAspectRatio(String),

    /// Target size is not of the form `WIDTHxHEIGHT`.
    #[error("Invalid target size '{0}': expected WIDTHxHEIGHT")]
    InvalidTargetSize(String),

    /// Order total is below the storefront minimum.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout total: $12.50
    ///      │
    ///      ▼
    /// validate_minimum_order(1250)
    ///      │
    ///      ▼
    /// BelowMinimumOrder { total_cents: 1250, minimum_cents: 2000, shortfall_cents: 750 }
    ///      │
    ///      ▼
    /// UI shows: "Please add $7.50 more to your order"
    /// ```
    #[error("Order total {total_cents} cents is below the {minimum_cents} cent minimum (short {shortfall_cents})")]
    BelowMinimumOrder {
        total_cents: i64,
        minimum_cents: i64,
        shortfall_cents: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The engine itself does not sanitize; callers run these checks before
/// handing dimensions and quantities to the pricing or layout functions.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// String exceeds maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::BelowMinimumOrder {
            total_cents: 1250,
            minimum_cents: 2000,
            shortfall_cents: 750,
        };
        assert_eq!(
            err.to_string(),
            "Order total 1250 cents is below the 2000 cent minimum (short 750)"
        );

        let err = CoreError::UnknownMaterial("20oz".to_string());
        assert_eq!(err.to_string(), "Unknown material: '20oz'");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "prompt".to_string(),
        };
        assert_eq!(err.to_string(), "prompt is required");

        let err = ValidationError::NotFinite {
            field: "width".to_string(),
        };
        assert_eq!(err.to_string(), "width must be a finite number");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
