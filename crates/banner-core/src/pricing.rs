//! # Quote Pricing
//!
//! Turns a [`BannerSpec`] into a priced [`LineItem`], and a set of line items
//! into an [`OrderAggregate`] with the multi-banner discount and tax applied.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Quote Pricing                                  │
//! │                                                                         │
//! │  BannerSpec ──► w × h × rate ÷ 144 ──round──► unit_price_cents          │
//! │      │                                               │                  │
//! │      ├──► rope_cost ─────────────────────────────────┤                  │
//! │      └──► pole_pocket_cost ──────────────────────────┤                  │
//! │                                                      ▼                  │
//! │                                (unit + add-ons) × quantity              │
//! │                                                      │                  │
//! │  LineItem[] ──► subtotal ──► − discount ──► taxable ──► + tax ──► total │
//! │                     │                                                   │
//! │                     └─ sorted COPY: highest line total pays full price, │
//! │                        every other line gets 5% off its own total       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rates never live in globals. Every function takes a [`PricingConfig`] (or
//! the single rate it needs), so alternate tables price independently.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{DiscountRate, Money, TaxRate};
use crate::types::{
    AppliedDiscount, BannerSpec, DiscountKind, ItemDiscount, LineItem, Material, OrderAggregate,
    PromoDiscount,
};
use crate::validation::{validate_discount_rate_bps, validate_tax_rate_bps};

/// Shown when a promo code and the multi-banner discount competed.
pub const BEST_DISCOUNT_MESSAGE: &str = "Discounts can't be combined; we applied the best one.";

// =============================================================================
// Rate Table
// =============================================================================

/// Cents per square foot, keyed by material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(BTreeMap<Material, i64>);

impl RateTable {
    pub fn new(rates: BTreeMap<Material, i64>) -> Self {
        RateTable(rates)
    }

    /// Rate for a material. A material missing from the table is rejected.
    pub fn rate_for(&self, material: Material) -> CoreResult<Money> {
        match self.0.get(&material) {
            Some(cents) => Ok(Money::from_cents(*cents)),
            None => {
                warn!(material = %material, "No rate configured for material");
                Err(CoreError::MissingMaterialRate {
                    material: material.to_string(),
                })
            }
        }
    }

    pub fn set_rate(&mut self, material: Material, cents_per_sq_ft: i64) {
        self.0.insert(material, cents_per_sq_ft);
    }

    pub fn remove(&mut self, material: Material) -> Option<i64> {
        self.0.remove(&material)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable(BTreeMap::from([
            (Material::Vinyl13oz, 450),
            (Material::Vinyl15oz, 600),
            (Material::Vinyl18oz, 750),
            (Material::Mesh, 600),
        ]))
    }
}

// =============================================================================
// Pricing Config
// =============================================================================

/// Immutable pricing inputs, passed explicitly to every pricing call.
///
/// `Default` is the storefront's production price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub material_rates: RateTable,
    /// Multi-banner discount in basis points (500 = 5%).
    pub multi_banner_discount_bps: u32,
    /// Sales tax in basis points (600 = 6%).
    pub tax_rate_bps: u32,
    pub rope_cents_per_foot: i64,
    /// Flat fee per banner when any pole pocket is selected.
    pub pole_pocket_setup_cents: i64,
    pub pole_pocket_cents_per_foot: i64,
    pub minimum_order_cents: i64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            material_rates: RateTable::default(),
            multi_banner_discount_bps: crate::DEFAULT_MULTI_BANNER_DISCOUNT_BPS,
            tax_rate_bps: crate::DEFAULT_TAX_RATE_BPS,
            rope_cents_per_foot: 200,
            pole_pocket_setup_cents: 1500,
            pole_pocket_cents_per_foot: 200,
            minimum_order_cents: crate::DEFAULT_MINIMUM_ORDER_CENTS,
        }
    }
}

impl PricingConfig {
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    #[inline]
    pub fn multi_banner_rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.multi_banner_discount_bps)
    }

    #[inline]
    pub fn minimum_order(&self) -> Money {
        Money::from_cents(self.minimum_order_cents)
    }

    /// Rejects rates above 100%, negative fees and unpriced materials.
    pub fn validate(&self) -> CoreResult<()> {
        validate_tax_rate_bps(self.tax_rate_bps)?;
        validate_discount_rate_bps(self.multi_banner_discount_bps)?;

        for (field, cents) in [
            ("rope_cents_per_foot", self.rope_cents_per_foot),
            ("pole_pocket_setup_cents", self.pole_pocket_setup_cents),
            ("pole_pocket_cents_per_foot", self.pole_pocket_cents_per_foot),
            ("minimum_order_cents", self.minimum_order_cents),
        ] {
            if cents < 0 {
                return Err(ValidationError::OutOfRange {
                    field: field.to_string(),
                    min: 0,
                    max: i64::MAX,
                }
                .into());
            }
        }

        for material in Material::ALL {
            let rate = self.material_rates.rate_for(material)?;
            if rate.is_negative() {
                return Err(ValidationError::MustBePositive {
                    field: format!("material_rates.{}", material),
                }
                .into());
            }
        }

        Ok(())
    }
}

// =============================================================================
// Per-Item Pricing
// =============================================================================

/// Area in square feet, for display. Prices never go through this value.
#[inline]
pub fn area_sq_ft(width_in: f64, height_in: f64) -> f64 {
    width_in * height_in / 144.0
}

/// `round(width × height × rate / 144)`: the only rounding point for the
/// banner itself.
///
/// Multiplies before the single division so products that land exactly on
/// half a cent stay exact and round up.
///
/// ## Example
/// ```rust
/// use banner_core::money::Money;
/// use banner_core::pricing::unit_price;
///
/// // 48" × 24" = 8 sq ft at $4.50/sq ft
/// assert_eq!(unit_price(48.0, 24.0, Money::from_cents(450)).cents(), 3600);
/// // 8" × 18.5" is exactly 462.5¢
/// assert_eq!(unit_price(8.0, 18.5, Money::from_cents(450)).cents(), 463);
/// ```
#[inline]
pub fn unit_price(width_in: f64, height_in: f64, rate_per_sq_ft: Money) -> Money {
    let cents = width_in * height_in * rate_per_sq_ft.cents() as f64 / 144.0;
    Money::from_cents(cents.round() as i64)
}

/// Rope along the width of one banner.
pub fn rope_cost(spec: &BannerSpec, config: &PricingConfig) -> Money {
    if !spec.rope {
        return Money::zero();
    }
    per_foot(spec.width_in, config.rope_cents_per_foot)
}

/// Pole pockets for one banner: setup fee plus the per-foot charge.
pub fn pole_pocket_cost(spec: &BannerSpec, config: &PricingConfig) -> Money {
    if spec.pole_pockets.is_none() {
        return Money::zero();
    }
    let inches = spec.pole_pockets.linear_inches(spec.width_in, spec.height_in);
    Money::from_cents(config.pole_pocket_setup_cents) + per_foot(inches, config.pole_pocket_cents_per_foot)
}

#[inline]
fn per_foot(inches: f64, cents_per_foot: i64) -> Money {
    Money::from_cents((inches * cents_per_foot as f64 / 12.0).round() as i64)
}

/// Prices one banner specification.
///
/// Quantity is applied after every per-unit value has been rounded, so the
/// rounding error is at most one cent per unit per rounding point.
///
/// ## Example
/// ```rust
/// use banner_core::pricing::{price_line_item, PricingConfig};
/// use banner_core::types::{BannerSpec, Material};
///
/// let spec = BannerSpec::new(48.0, 24.0, 2, Material::Vinyl13oz).with_rope(true);
/// let item = price_line_item(&spec, &PricingConfig::default()).unwrap();
///
/// assert_eq!(item.unit_price_cents, 3600);
/// assert_eq!(item.rope_cents, 800);
/// assert_eq!(item.line_total_cents, 8800);
/// ```
pub fn price_line_item(spec: &BannerSpec, config: &PricingConfig) -> CoreResult<LineItem> {
    let rate = config.material_rates.rate_for(spec.material)?;
    let area = area_sq_ft(spec.width_in, spec.height_in);

    let unit = unit_price(spec.width_in, spec.height_in, rate);
    let rope = rope_cost(spec, config);
    let pockets = pole_pocket_cost(spec, config);
    let add_ons = rope + pockets;
    let unit_each = unit + add_ons;
    let line_total = unit_each.multiply_quantity(spec.quantity);

    Ok(LineItem {
        spec: spec.clone(),
        area_sq_ft: area,
        unit_price_cents: unit.cents(),
        rope_cents: rope.cents(),
        pole_pocket_cents: pockets.cents(),
        add_on_cents: add_ons.cents(),
        unit_each_cents: unit_each.cents(),
        line_total_cents: line_total.cents(),
        grommet_count: spec.grommets.count(spec.width_in, spec.height_in),
    })
}

/// Prices every specification, failing on the first unpriceable one.
pub fn price_line_items(specs: &[BannerSpec], config: &PricingConfig) -> CoreResult<Vec<LineItem>> {
    specs.iter().map(|spec| price_line_item(spec, config)).collect()
}

// =============================================================================
// Multi-Banner Discount
// =============================================================================

/// Per-item multi-banner discount, highest line total first.
///
/// Works on a sorted copy; `items` is left in the caller's order. The sort is
/// stable, so among equal totals the earliest item is the full-price anchor.
/// The anchor is reported with a zero discount.
pub fn multi_banner_discounts(items: &[LineItem], rate: DiscountRate) -> Vec<ItemDiscount> {
    let mut ranked: Vec<(usize, i64)> = items
        .iter()
        .enumerate()
        .map(|(index, item)| (index, item.line_total_cents))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .enumerate()
        .map(|(rank, (item_index, line_total_cents))| {
            let discount = if rank == 0 {
                Money::zero()
            } else {
                Money::from_cents(line_total_cents).portion(rate)
            };
            ItemDiscount {
                item_index,
                line_total_cents,
                discount_cents: discount.cents(),
            }
        })
        .collect()
}

/// Total multi-banner discount. Zero for orders of 0 or 1 line items.
pub fn multi_banner_discount(items: &[LineItem], rate: DiscountRate) -> Money {
    multi_banner_discounts(items, rate)
        .iter()
        .map(|d| Money::from_cents(d.discount_cents))
        .sum()
}

/// Same rule as [`multi_banner_discount`], over bare line totals.
///
/// ```rust
/// use banner_core::money::DiscountRate;
/// use banner_core::pricing::multi_banner_discount_for_totals;
///
/// let discount = multi_banner_discount_for_totals(&[1000, 800, 500], DiscountRate::from_bps(500));
/// assert_eq!(discount.cents(), 65); // 40 + 25, the $10 item pays full price
/// ```
pub fn multi_banner_discount_for_totals(line_totals: &[i64], rate: DiscountRate) -> Money {
    let mut sorted = line_totals.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));
    sorted
        .into_iter()
        .skip(1)
        .map(|cents| Money::from_cents(cents).portion(rate))
        .sum()
}

// =============================================================================
// Quick Quote
// =============================================================================

/// Price of one specification at quantity N, discounted per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickQuote {
    pub unit_each_cents: i64,
    pub quantity: i64,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
}

/// `round(unit × rate) × (N − 1)`.
///
/// Agrees with the sort-based discount over N identical single-unit items.
///
/// ```rust
/// use banner_core::money::{DiscountRate, Money};
/// use banner_core::pricing::quick_quote_discount;
///
/// let d = quick_quote_discount(Money::from_cents(1000), 3, DiscountRate::from_bps(500));
/// assert_eq!(d.cents(), 100);
/// ```
pub fn quick_quote_discount(unit: Money, quantity: i64, rate: DiscountRate) -> Money {
    if quantity <= 1 {
        return Money::zero();
    }
    unit.portion(rate).multiply_quantity(quantity - 1)
}

/// Quick estimate for the design page. Tax is not included.
pub fn quick_quote(spec: &BannerSpec, config: &PricingConfig) -> CoreResult<QuickQuote> {
    let item = price_line_item(spec, config)?;
    let discount = quick_quote_discount(item.unit_each(), spec.quantity, config.multi_banner_rate());
    let subtotal = item.line_total();

    Ok(QuickQuote {
        unit_each_cents: item.unit_each_cents,
        quantity: spec.quantity,
        subtotal_cents: subtotal.cents(),
        discount_cents: discount.cents(),
        total_cents: (subtotal - discount).cents(),
    })
}

// =============================================================================
// Order Aggregation
// =============================================================================

/// Aggregates priced items with the multi-banner discount and tax.
///
/// Tax is charged on `subtotal − discount`.
pub fn aggregate_order(items: Vec<LineItem>, config: &PricingConfig) -> OrderAggregate {
    aggregate_order_with_promo(items, config, None)
}

/// Like [`aggregate_order`], letting a promo code compete with the
/// multi-banner discount. The larger one applies; ties keep multi-banner.
///
/// ## Discount Resolution
/// ```text
/// multi-banner ─┐
///               ├──► max ──► AppliedDiscount (never both)
/// promo ────────┘
/// ```
pub fn aggregate_order_with_promo(
    items: Vec<LineItem>,
    config: &PricingConfig,
    promo: Option<&PromoDiscount>,
) -> OrderAggregate {
    let rate = config.multi_banner_rate();
    let subtotal: Money = items.iter().map(LineItem::line_total).sum();
    let mut item_discounts = multi_banner_discounts(&items, rate);
    let multi: Money = item_discounts
        .iter()
        .map(|d| Money::from_cents(d.discount_cents))
        .sum();

    let discount = resolve_discount(subtotal, multi, rate, promo);
    if discount.kind != DiscountKind::MultiBanner {
        item_discounts.clear();
    }

    let taxable = subtotal - discount.amount();
    let tax_rate = config.tax_rate();
    let tax = taxable.calculate_tax(tax_rate);
    let total = taxable + tax;

    debug!(
        items = items.len(),
        subtotal = subtotal.cents(),
        discount = discount.amount_cents,
        kind = ?discount.kind,
        tax = tax.cents(),
        total = total.cents(),
        "Order aggregated"
    );

    OrderAggregate {
        items,
        item_discounts,
        subtotal_cents: subtotal.cents(),
        discount,
        taxable_cents: taxable.cents(),
        tax_rate,
        tax_cents: tax.cents(),
        total_cents: total.cents(),
    }
}

fn resolve_discount(
    subtotal: Money,
    multi: Money,
    rate: DiscountRate,
    promo: Option<&PromoDiscount>,
) -> AppliedDiscount {
    let multi_banner = AppliedDiscount {
        kind: DiscountKind::MultiBanner,
        label: format!("Multi-banner discount ({})", rate),
        amount_cents: multi.cents(),
        helper_message: None,
    };

    let Some(promo) = promo else {
        return if multi.is_positive() {
            multi_banner
        } else {
            AppliedDiscount::default()
        };
    };

    let promo_amount = promo.amount_for(subtotal);
    let competed = multi.is_positive() && promo_amount.is_positive();
    let helper_message = competed.then(|| BEST_DISCOUNT_MESSAGE.to_string());

    debug!(
        code = promo.code(),
        promo = promo_amount.cents(),
        multi_banner = multi.cents(),
        "Resolving best discount"
    );

    if promo_amount > multi {
        AppliedDiscount {
            kind: DiscountKind::Promo,
            label: promo.label(promo_amount),
            amount_cents: promo_amount.cents(),
            helper_message,
        }
    } else if multi.is_positive() {
        AppliedDiscount {
            helper_message,
            ..multi_banner
        }
    } else {
        AppliedDiscount::default()
    }
}

/// Prices and aggregates an order in one call. An out-of-range promo is
/// rejected before anything is priced.
///
/// ## Example
/// ```rust
/// use banner_core::pricing::{price_order, PricingConfig};
/// use banner_core::types::{BannerSpec, Material};
///
/// let specs = vec![
///     BannerSpec::new(48.0, 24.0, 1, Material::Vinyl13oz), // $36.00
///     BannerSpec::new(24.0, 24.0, 1, Material::Vinyl13oz), // $18.00
/// ];
/// let order = price_order(&specs, &PricingConfig::default(), None).unwrap();
///
/// assert_eq!(order.subtotal_cents, 5400);
/// assert_eq!(order.discount.amount_cents, 90);
/// assert_eq!(order.tax_cents, 319);
/// assert_eq!(order.total_cents, 5629);
/// ```
pub fn price_order(
    specs: &[BannerSpec],
    config: &PricingConfig,
    promo: Option<&PromoDiscount>,
) -> CoreResult<OrderAggregate> {
    if let Some(promo) = promo {
        promo.validate()?;
    }
    let items = price_line_items(specs, config)?;
    Ok(aggregate_order_with_promo(items, config, promo))
}

// =============================================================================
// Unit Tests
// =============================================================================
