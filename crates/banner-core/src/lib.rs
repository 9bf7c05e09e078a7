//! # banner-core: Pure Quote Engine for Banner Forge
//!
//! Every price, preview placement and AI-generation cache lookup in the
//! storefront comes from this crate. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Banner Forge Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Storefront (cart, checkout, email, admin, preview)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain data in, integer cents out      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ banner-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  pricing  │  │  layout   │  │  prompt   │  │   │
//! │  │   │   Money   │  │ LineItem  │  │  FitRect  │  │ CacheKey  │  │   │
//! │  │   │  TaxRate  │  │   Order   │  │ grommets  │  │  ids      │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer-cents Money, tax and discount rates, formatting
//! - [`types`] - Banner specs, line items, order aggregates
//! - [`pricing`] - Line-item pricing, multi-banner discount, order totals
//! - [`layout`] - Artwork fit rectangles, grommet placement, DPI
//! - [`prompt`] - Prompt normalization and cache keys
//! - [`validation`] - Input checks callers run before pricing
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, bit-identical output
//! 2. **Integer Money**: all monetary values are cents (i64)
//! 3. **Round Once**: each real-valued amount is rounded half away from zero
//!    exactly where it becomes cents
//! 4. **Explicit Config**: rates arrive in a [`PricingConfig`], never globals
//!
//! ## Example Usage
//!
//! ```rust
//! use banner_core::pricing::{price_order, PricingConfig};
//! use banner_core::types::{BannerSpec, Material};
//!
//! let config = PricingConfig::default();
//! let specs = [BannerSpec::new(48.0, 24.0, 1, Material::Vinyl13oz)];
//!
//! let order = price_order(&specs, &config, None).unwrap();
//!
//! // 8 sq ft × $4.50 = $36.00, plus 6% tax
//! assert_eq!(order.subtotal_cents, 3600);
//! assert_eq!(order.tax_cents, 216);
//! assert_eq!(order.total().to_string(), "$38.16");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod layout;
pub mod money;
pub mod pricing;
pub mod prompt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use banner_core::Money` instead of
// `use banner_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use layout::{fit_image, FitMode, FitRect, Size};
pub use money::{DiscountRate, Money, TaxRate};
pub use pricing::{price_line_item, price_order, PricingConfig, RateTable};
pub use prompt::{prompt_cache_key, AspectRatio, PromptCacheKey, StyleOptions, TargetSize};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax applied at checkout, in basis points (6%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 600;

/// Discount on every line item but the most expensive, in basis points (5%).
pub const DEFAULT_MULTI_BANNER_DISCOUNT_BPS: u32 = 500;

/// Smallest order the storefront accepts ($20.00).
pub const DEFAULT_MINIMUM_ORDER_CENTS: i64 = 2000;

/// Maximum quantity of a single banner specification.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Largest banner edge the printer accepts, in inches (100 ft).
pub const MAX_DIMENSION_IN: f64 = 1200.0;

/// Longest AI prompt accepted, in characters.
pub const MAX_PROMPT_CHARS: usize = 1000;
