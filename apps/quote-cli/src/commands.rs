//! # Commands
//!
//! One function per subcommand. Each validates its input, calls into
//! `banner-core`, and returns a serializable response; `main` prints it.
//!
//! ## Command Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price       BannerSpec ───────► LineItem + breakdown + quick quote     │
//! │  order       order.json ───────► OrderAggregate + summary lines         │
//! │  fit         banner + artwork ─► FitRect + DPI + grommets               │
//! │  prompt-key  prompt + style ───► PromptCacheKey                         │
//! │  new-id      ──────────────────► gen_… / sel_…                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use banner_core::layout::{
    effective_dpi, fit_image, grommet_positions, grommet_radius, FitMode, FitRect, Point, Size,
};
use banner_core::pricing::{price_line_item, price_order, quick_quote, PricingConfig, QuickQuote};
use banner_core::prompt::{
    generation_id, normalize_prompt, prompt_cache_key, selection_id, AspectRatio, StyleOptions,
    TargetSize,
};
use banner_core::validation::{
    validate_dimension, validate_minimum_order, validate_pixel_size, validate_prompt,
};
use banner_core::{BannerSpec, BreakdownLine, Grommets, LineItem, OrderAggregate, PromoDiscount};

// =============================================================================
// price
// =============================================================================

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub item: LineItem,
    pub description: String,
    pub breakdown: Vec<BreakdownLine>,
    pub quick_quote: QuickQuote,
    pub line_total: String,
}

pub fn price(spec: BannerSpec, pricing: &PricingConfig) -> Result<PriceResponse> {
    spec.validate()?;
    let item = price_line_item(&spec, pricing)?;
    let quick_quote = quick_quote(&spec, pricing)?;

    info!(
        material = %spec.material,
        quantity = spec.quantity,
        line_total = item.line_total_cents,
        "Priced banner"
    );

    Ok(PriceResponse {
        description: item.description(),
        breakdown: item.breakdown_lines(),
        line_total: item.line_total().to_string(),
        quick_quote,
        item,
    })
}

// =============================================================================
// order
// =============================================================================

/// Order file contents.
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<BannerSpec>,
    #[serde(default)]
    pub promo: Option<PromoDiscount>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: OrderAggregate,
    pub summary: Vec<BreakdownLine>,
    pub total: String,
}

pub fn order(path: &Path, pricing: &PricingConfig, enforce_minimum: bool) -> Result<OrderResponse> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read order file {}", path.display()))?;
    let request: OrderRequest = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid order file {}", path.display()))?;

    for (index, spec) in request.items.iter().enumerate() {
        spec.validate()
            .with_context(|| format!("Order item {} is invalid", index + 1))?;
    }
    if let Some(promo) = &request.promo {
        promo.validate()
            .with_context(|| format!("Promo {} is invalid", promo.code()))?;
    }
    debug!(items = request.items.len(), promo = request.promo.is_some(), "Order file loaded");

    let order = price_order(&request.items, pricing, request.promo.as_ref())?;
    if enforce_minimum {
        validate_minimum_order(order.total(), pricing)?;
    }

    info!(
        items = order.items.len(),
        subtotal = order.subtotal_cents,
        discount = order.discount.amount_cents,
        total = order.total_cents,
        "Priced order"
    );

    Ok(OrderResponse {
        summary: order.summary_lines(),
        total: order.total().to_string(),
        order,
    })
}

// =============================================================================
// fit
// =============================================================================

#[derive(Debug, Serialize)]
pub struct FitResponse {
    pub mode: FitMode,
    pub rect: FitRect,
    pub effective_dpi: f64,
    pub grommets: Vec<Point>,
    pub grommet_radius: f64,
}

pub fn fit(banner_in: Size, artwork_px: Size, mode: FitMode, grommets: Grommets) -> Result<FitResponse> {
    validate_dimension("width", banner_in.width)?;
    validate_dimension("height", banner_in.height)?;
    validate_pixel_size(artwork_px.width, artwork_px.height)?;

    let rect = fit_image(banner_in, artwork_px, mode);
    let dpi = effective_dpi(artwork_px, banner_in);
    debug!(?rect, dpi, "Computed fit");

    Ok(FitResponse {
        mode,
        rect,
        effective_dpi: dpi,
        grommets: grommet_positions(banner_in.width, banner_in.height, grommets),
        grommet_radius: grommet_radius(banner_in.width, banner_in.height),
    })
}

// =============================================================================
// prompt-key
// =============================================================================

#[derive(Debug, Serialize)]
pub struct PromptKeyResponse {
    pub normalized: String,
    pub aspect: AspectRatio,
    pub size: String,
    pub style: String,
    pub key: String,
}

pub fn prompt_key(
    prompt: &str,
    aspect: AspectRatio,
    style: StyleOptions,
    size: Option<TargetSize>,
) -> Result<PromptKeyResponse> {
    let prompt = validate_prompt(prompt)?;
    let size = size.unwrap_or_else(|| aspect.default_size());
    let key = prompt_cache_key(&prompt, aspect, &style, size);

    Ok(PromptKeyResponse {
        normalized: normalize_prompt(&prompt),
        aspect,
        size: size.to_string(),
        style: style.canonical_json(),
        key: key.to_string(),
    })
}

// =============================================================================
// new-id
// =============================================================================

pub fn new_id(selection: bool) -> String {
    if selection {
        selection_id()
    } else {
        generation_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banner_core::Material;

    #[test]
    fn test_price_rejects_zero_width() {
        let spec = BannerSpec::new(0.0, 24.0, 1, Material::Vinyl13oz);
        assert!(price(spec, &PricingConfig::default()).is_err());
    }

    #[test]
    fn test_price_response() {
        let spec = BannerSpec::new(48.0, 24.0, 2, Material::Vinyl13oz).with_rope(true);
        let response = price(spec, &PricingConfig::default()).unwrap();
        assert_eq!(response.item.line_total_cents, 8800);
        assert_eq!(response.line_total, "$88.00");
        assert_eq!(response.description, "48\" × 24\" 13oz Vinyl (8.00 sq ft)");
        assert_eq!(response.quick_quote.discount_cents, 220);
    }

    #[test]
    fn test_order_request_parses_wire_values() {
        let request: OrderRequest = serde_json::from_str(
            r#"{
                "items": [
                    {"width_in": 48, "height_in": 24, "quantity": 1, "material": "13oz",
                     "grommets": "every-2-3ft", "pole_pockets": "top-bottom", "rope": true},
                    {"width_in": 36, "height_in": 72, "quantity": 3, "material": "mesh"}
                ],
                "promo": {"kind": "fixed_amount", "code": "TAKE5", "amount_cents": 500}
            }"#,
        )
        .unwrap();

        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[0].grommets, Grommets::Every2To3Ft);
        assert_eq!(request.items[1].material, Material::Mesh);
        assert_eq!(request.promo.unwrap().code(), "TAKE5");
    }

    #[test]
    fn test_order_rejects_promo_above_full_price() {
        let path = std::env::temp_dir().join(format!("banner-quote-promo-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{
                "items": [{"width_in": 48, "height_in": 24, "quantity": 1, "material": "13oz"}],
                "promo": {"kind": "percentage", "code": "OOPS150", "rate": 15000}
            }"#,
        )
        .unwrap();

        let result = order(&path, &PricingConfig::default(), false);
        std::fs::remove_file(&path).ok();

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("OOPS150"));
    }

    #[test]
    fn test_order_missing_file() {
        let result = order(Path::new("/nonexistent/order.json"), &PricingConfig::default(), false);
        assert!(result.is_err());
    }

    #[test]
    fn test_fit_command() {
        let response = fit(
            Size::new(48.0, 24.0),
            Size::new(1000.0, 1000.0),
            FitMode::Contain,
            Grommets::FourCorners,
        )
        .unwrap();
        assert_eq!(response.rect.x, 12.0);
        assert_eq!(response.grommets.len(), 4);

        assert!(fit(Size::new(48.0, 24.0), Size::new(0.0, 10.0), FitMode::Cover, Grommets::None).is_err());
    }

    #[test]
    fn test_prompt_key_defaults_size_from_aspect() {
        let response =
            prompt_key("A mountain banner", AspectRatio::Wide, StyleOptions::default(), None).unwrap();
        assert_eq!(response.size, "1792x1024");
        assert_eq!(response.normalized, "mountain");
        assert_eq!(response.key.len(), 64);

        assert!(prompt_key("  ", AspectRatio::Square, StyleOptions::default(), None).is_err());
    }

    #[test]
    fn test_new_id_prefix() {
        assert!(new_id(false).starts_with("gen_"));
        assert!(new_id(true).starts_with("sel_"));
    }
}
