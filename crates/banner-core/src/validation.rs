//! # Validation Module
//!
//! Input checks callers run before handing values to the engine. The pricing
//! and layout functions assume finite, strictly positive inputs and do not
//! sanitize.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront form                                              │
//! │  ├── Size pickers, quantity stepper                                    │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization                                              │
//! │  ├── Closed enums reject unknown material / grommet / fit identifiers  │
//! │  └── THIS MODULE: numeric ranges, finiteness, rates, minimum order     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine                                                        │
//! │  └── Rate-table lookup rejects unpriced materials                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use banner_core::validation::{validate_dimension, validate_quantity};
//!
//! validate_dimension("width", 48.0).unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::PricingConfig;
use crate::{MAX_DIMENSION_IN, MAX_ITEM_QUANTITY, MAX_PROMPT_CHARS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Dimension Validators
// =============================================================================

/// Validates a banner dimension in inches.
///
/// ## Rules
/// - Must be finite (no NaN, no infinity)
/// - Must be positive (> 0)
/// - Must not exceed MAX_DIMENSION_IN (1200", 100 ft)
///
/// ## Example
/// ```rust
/// use banner_core::validation::validate_dimension;
///
/// assert!(validate_dimension("width", 48.0).is_ok());
/// assert!(validate_dimension("width", 0.0).is_err());
/// assert!(validate_dimension("height", f64::INFINITY).is_err());
/// ```
pub fn validate_dimension(field: &str, inches: f64) -> ValidationResult<()> {
    if !inches.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if inches <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if inches > MAX_DIMENSION_IN {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_DIMENSION_IN as i64,
        });
    }

    Ok(())
}

/// Validates artwork pixel dimensions before a fit or DPI computation.
pub fn validate_pixel_size(width_px: f64, height_px: f64) -> ValidationResult<()> {
    for (field, px) in [("image width", width_px), ("image height", height_px)] {
        if !px.is_finite() {
            return Err(ValidationError::NotFinite {
                field: field.to_string(),
            });
        }
        if px <= 0.0 {
            return Err(ValidationError::MustBePositive {
                field: field.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Design page: quantity stepper                                          │
/// │                                                                         │
/// │  User enters quantity: 5                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → price_line_item                                         │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

/// Validates a discount rate in basis points. Same bounds as tax.
pub fn validate_discount_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "discount_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Order Validators
// =============================================================================

/// Rejects order totals below the configured minimum.
///
/// ## Example
/// ```rust
/// use banner_core::money::Money;
/// use banner_core::pricing::PricingConfig;
/// use banner_core::validation::validate_minimum_order;
///
/// let config = PricingConfig::default(); // $20.00 minimum
/// assert!(validate_minimum_order(Money::from_cents(2000), &config).is_ok());
/// assert!(validate_minimum_order(Money::from_cents(1250), &config).is_err());
/// ```
pub fn validate_minimum_order(total: Money, config: &PricingConfig) -> CoreResult<()> {
    let minimum = config.minimum_order();
    if total < minimum {
        let shortfall = minimum - total;
        tracing::warn!(
            total = total.cents(),
            minimum = minimum.cents(),
            "Order below minimum"
        );
        return Err(CoreError::BelowMinimumOrder {
            total_cents: total.cents(),
            minimum_cents: minimum.cents(),
            shortfall_cents: shortfall.cents(),
        });
    }

    Ok(())
}

// =============================================================================
// Prompt Validators
// =============================================================================

/// Validates an AI generation prompt.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most MAX_PROMPT_CHARS characters
///
/// ## Returns
/// The trimmed prompt.
pub fn validate_prompt(prompt: &str) -> ValidationResult<String> {
    let prompt = prompt.trim();

    if prompt.is_empty() {
        return Err(ValidationError::Required {
            field: "prompt".to_string(),
        });
    }

    if prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(ValidationError::TooLong {
            field: "prompt".to_string(),
            max: MAX_PROMPT_CHARS,
        });
    }

    Ok(prompt.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dimension() {
        assert!(validate_dimension("width", 0.5).is_ok());
        assert!(validate_dimension("width", 1200.0).is_ok());

        assert!(matches!(
            validate_dimension("width", f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            validate_dimension("height", -3.0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_dimension("height", 1200.5),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_pixel_size() {
        assert!(validate_pixel_size(1024.0, 768.0).is_ok());
        assert!(validate_pixel_size(0.0, 768.0).is_err());
        assert!(validate_pixel_size(1024.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_rates() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
        assert!(validate_discount_rate_bps(500).is_ok());
        assert!(validate_discount_rate_bps(10001).is_err());
    }

    #[test]
    fn test_validate_minimum_order() {
        let config = PricingConfig::default();
        assert!(validate_minimum_order(Money::from_cents(2000), &config).is_ok());

        match validate_minimum_order(Money::from_cents(1250), &config) {
            Err(CoreError::BelowMinimumOrder {
                shortfall_cents, ..
            }) => assert_eq!(shortfall_cents, 750),
            other => panic!("expected BelowMinimumOrder, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_prompt() {
        assert_eq!(validate_prompt("  mountain sunset ").unwrap(), "mountain sunset");
        assert!(matches!(validate_prompt("   "), Err(ValidationError::Required { .. })));
        assert!(validate_prompt(&"a".repeat(MAX_PROMPT_CHARS + 1)).is_err());
    }
}
