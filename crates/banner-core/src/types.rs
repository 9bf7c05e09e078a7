//! # Domain Types
//!
//! Core domain types shared by the cart, checkout, emailed receipt and
//! admin views.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   BannerSpec    │──►│    LineItem     │──►│ OrderAggregate  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  width_in       │   │  area_sq_ft     │   │  subtotal_cents │       │
//! │  │  height_in      │   │  unit_price     │   │  discount       │       │
//! │  │  quantity       │   │  add_on_cents   │   │  tax_cents      │       │
//! │  │  material ...   │   │  line_total     │   │  total_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Material     │   │    Grommets     │   │  PolePockets    │       │
//! │  │  13oz 15oz 18oz │   │  none, corners, │   │  none, top,     │       │
//! │  │  mesh           │   │  every-N-ft     │   │  left, ...      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every enum parses from the storefront's wire identifier and rejects
//! anything else: an unknown identifier is a configuration error, never a
//! silent fallback.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, ValidationError};
use crate::layout;
use crate::money::{format_area, format_dimensions, DiscountRate, Money, TaxRate};
use crate::validation::{
    validate_discount_rate_bps, validate_dimension, validate_quantity, ValidationResult,
};

// =============================================================================
// Material
// =============================================================================

/// Banner substrate. Each tier has its own per-square-foot rate in the
/// active [`RateTable`](crate::pricing::RateTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Material {
    /// 13oz vinyl, the default tier.
    #[serde(rename = "13oz")]
    Vinyl13oz,
    /// 15oz vinyl.
    #[serde(rename = "15oz")]
    Vinyl15oz,
    /// 18oz heavy-duty vinyl.
    #[serde(rename = "18oz")]
    Vinyl18oz,
    /// Mesh for fence applications.
    #[serde(rename = "mesh")]
    Mesh,
}

impl Material {
    pub const ALL: [Material; 4] = [
        Material::Vinyl13oz,
        Material::Vinyl15oz,
        Material::Vinyl18oz,
        Material::Mesh,
    ];

    /// Wire identifier (`"13oz"`, `"mesh"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Material::Vinyl13oz => "13oz",
            Material::Vinyl15oz => "15oz",
            Material::Vinyl18oz => "18oz",
            Material::Mesh => "mesh",
        }
    }

    /// Name shown on the pricing card and receipt.
    pub const fn label(&self) -> &'static str {
        match self {
            Material::Vinyl13oz => "13oz Vinyl",
            Material::Vinyl15oz => "15oz Vinyl",
            Material::Vinyl18oz => "18oz Vinyl",
            Material::Mesh => "Mesh Fence Application",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Material {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Material::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnknownMaterial(s.to_string()))
    }
}

// =============================================================================
// Grommets
// =============================================================================

/// Grommet configuration. Grommets are free; the count is recorded on the
/// line item for production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Grommets {
    #[default]
    #[serde(rename = "none")]
    None,
    /// Spaced every 24 inches along each edge, plus corners.
    #[serde(rename = "every-2-3ft")]
    Every2To3Ft,
    /// Spaced every 18 inches along each edge, plus corners.
    #[serde(rename = "every-1-2ft")]
    Every1To2Ft,
    #[serde(rename = "4-corners")]
    FourCorners,
    #[serde(rename = "top-corners")]
    TopCorners,
    #[serde(rename = "right-corners")]
    RightCorners,
    #[serde(rename = "left-corners")]
    LeftCorners,
}

impl Grommets {
    pub const ALL: [Grommets; 7] = [
        Grommets::None,
        Grommets::Every2To3Ft,
        Grommets::Every1To2Ft,
        Grommets::FourCorners,
        Grommets::TopCorners,
        Grommets::RightCorners,
        Grommets::LeftCorners,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Grommets::None => "none",
            Grommets::Every2To3Ft => "every-2-3ft",
            Grommets::Every1To2Ft => "every-1-2ft",
            Grommets::FourCorners => "4-corners",
            Grommets::TopCorners => "top-corners",
            Grommets::RightCorners => "right-corners",
            Grommets::LeftCorners => "left-corners",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Grommets::None => "No grommets",
            Grommets::Every2To3Ft => "Every 2–3 feet",
            Grommets::Every1To2Ft => "Every 1–2 feet",
            Grommets::FourCorners => "4 corners only",
            Grommets::TopCorners => "Top corners only",
            Grommets::RightCorners => "Right corners only",
            Grommets::LeftCorners => "Left corners only",
        }
    }

    /// Edge spacing in inches for the spaced modes.
    pub const fn spacing_in(&self) -> Option<f64> {
        match self {
            Grommets::Every2To3Ft => Some(24.0),
            Grommets::Every1To2Ft => Some(18.0),
            _ => None,
        }
    }

    /// Number of grommets placed on a banner of the given size.
    pub fn count(&self, width_in: f64, height_in: f64) -> u32 {
        layout::grommet_positions(width_in, height_in, *self).len() as u32
    }
}

impl fmt::Display for Grommets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grommets {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grommets::ALL
            .into_iter()
            .find(|g| g.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnknownGrommets(s.to_string()))
    }
}

// =============================================================================
// Pole Pockets
// =============================================================================

/// Pole-pocket placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PolePockets {
    #[default]
    None,
    Top,
    Bottom,
    Left,
    Right,
    TopBottom,
}

impl PolePockets {
    pub const ALL: [PolePockets; 6] = [
        PolePockets::None,
        PolePockets::Top,
        PolePockets::Bottom,
        PolePockets::Left,
        PolePockets::Right,
        PolePockets::TopBottom,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PolePockets::None => "none",
            PolePockets::Top => "top",
            PolePockets::Bottom => "bottom",
            PolePockets::Left => "left",
            PolePockets::Right => "right",
            PolePockets::TopBottom => "top-bottom",
        }
    }

    /// Inches of pocket sewn onto one banner.
    ///
    /// Top/bottom pockets run the width, left/right pockets run the height.
    pub fn linear_inches(&self, width_in: f64, height_in: f64) -> f64 {
        match self {
            PolePockets::None => 0.0,
            PolePockets::Top | PolePockets::Bottom => width_in,
            PolePockets::Left | PolePockets::Right => height_in,
            PolePockets::TopBottom => width_in * 2.0,
        }
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, PolePockets::None)
    }
}

impl fmt::Display for PolePockets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolePockets {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolePockets::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnknownPolePockets(s.to_string()))
    }
}

// =============================================================================
// Banner Specification
// =============================================================================

/// What the customer configured on the design page. Immutable once priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BannerSpec {
    /// Width in inches.
    pub width_in: f64,
    /// Height in inches.
    pub height_in: f64,
    /// Number of identical banners.
    pub quantity: i64,
    pub material: Material,
    #[serde(default)]
    pub grommets: Grommets,
    #[serde(default)]
    pub pole_pockets: PolePockets,
    /// Rope sewn into the hem.
    #[serde(default)]
    pub rope: bool,
}

impl BannerSpec {
    /// A plain banner: no grommets, pockets or rope.
    pub fn new(width_in: f64, height_in: f64, quantity: i64, material: Material) -> Self {
        BannerSpec {
            width_in,
            height_in,
            quantity,
            material,
            grommets: Grommets::None,
            pole_pockets: PolePockets::None,
            rope: false,
        }
    }

    pub fn with_grommets(mut self, grommets: Grommets) -> Self {
        self.grommets = grommets;
        self
    }

    pub fn with_pole_pockets(mut self, pole_pockets: PolePockets) -> Self {
        self.pole_pockets = pole_pockets;
        self
    }

    pub fn with_rope(mut self, rope: bool) -> Self {
        self.rope = rope;
        self
    }

    /// Area in square feet. Not rounded.
    #[inline]
    pub fn area_sq_ft(&self) -> f64 {
        self.width_in * self.height_in / 144.0
    }

    /// Checks dimensions and quantity. Callers run this before pricing.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_dimension("width", self.width_in)?;
        validate_dimension("height", self.height_in)?;
        validate_quantity(self.quantity)?;
        Ok(())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A priced banner specification.
///
/// ## Cents Pipeline
/// ```text
/// area_sq_ft × rate ──round──► unit_price_cents
///                                    │
/// rope_cents + pole_pocket_cents ────┤ (each rounded once)
///                                    ▼
///                             unit_each_cents ──× quantity──► line_total_cents
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub spec: BannerSpec,
    pub area_sq_ft: f64,
    /// Banner price per unit, before add-ons.
    pub unit_price_cents: i64,
    /// Rope cost per unit.
    pub rope_cents: i64,
    /// Pole-pocket cost per unit.
    pub pole_pocket_cents: i64,
    /// Sum of per-unit add-ons.
    pub add_on_cents: i64,
    /// Unit price plus add-ons.
    pub unit_each_cents: i64,
    /// `unit_each_cents × quantity`.
    pub line_total_cents: i64,
    pub grommet_count: u32,
}

impl LineItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn add_ons(&self) -> Money {
        Money::from_cents(self.add_on_cents)
    }

    #[inline]
    pub fn unit_each(&self) -> Money {
        Money::from_cents(self.unit_each_cents)
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }

    /// One-line description for receipts: `48" × 24" 13oz Vinyl (8.00 sq ft)`.
    pub fn description(&self) -> String {
        format!(
            "{} {} ({})",
            format_dimensions(self.spec.width_in, self.spec.height_in),
            self.spec.material.label(),
            format_area(self.area_sq_ft)
        )
    }

    /// Receipt rows for this item. Add-on rows appear only when non-zero.
    pub fn breakdown_lines(&self) -> Vec<BreakdownLine> {
        let qty = self.spec.quantity;
        let mut lines = vec![
            BreakdownLine::new("Banner cost", self.unit_price().multiply_quantity(qty)),
            BreakdownLine::new("Subtotal per banner", self.unit_each()),
        ];

        if self.rope_cents > 0 {
            lines.push(
                BreakdownLine::new("Rope", Money::from_cents(self.rope_cents * qty))
                    .with_description(format!("{:.2} ft", self.spec.width_in / 12.0)),
            );
        }

        if self.pole_pocket_cents > 0 {
            lines.push(
                BreakdownLine::new("Pole Pockets", Money::from_cents(self.pole_pocket_cents * qty))
                    .with_description(format!("({})", self.spec.pole_pockets)),
            );
        }

        if self.grommet_count > 0 {
            lines.push(
                BreakdownLine::new("Grommets", Money::zero())
                    .with_description(self.spec.grommets.label().to_string()),
            );
        }

        lines
    }
}

// =============================================================================
// Discounts
// =============================================================================

/// One item's share of the multi-banner discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemDiscount {
    /// Index of the item in the order as the caller supplied it.
    pub item_index: usize,
    pub line_total_cents: i64,
    pub discount_cents: i64,
}

/// Promotional code entered at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromoDiscount {
    /// Percentage of the pre-discount subtotal.
    Percentage { code: String, rate: DiscountRate },
    /// Fixed amount, capped at the subtotal.
    FixedAmount { code: String, amount_cents: i64 },
}

impl PromoDiscount {
    pub fn code(&self) -> &str {
        match self {
            PromoDiscount::Percentage { code, .. } | PromoDiscount::FixedAmount { code, .. } => code,
        }
    }

    /// Rejects rates above 100% and negative fixed amounts.
    pub fn validate(&self) -> ValidationResult<()> {
        match self {
            PromoDiscount::Percentage { rate, .. } => validate_discount_rate_bps(rate.bps()),
            PromoDiscount::FixedAmount { amount_cents, .. } if *amount_cents < 0 => {
                Err(ValidationError::OutOfRange {
                    field: "promo.amount_cents".to_string(),
                    min: 0,
                    max: i64::MAX,
                })
            }
            PromoDiscount::FixedAmount { .. } => Ok(()),
        }
    }

    /// Discount this promo yields against `subtotal`, never more than the
    /// subtotal itself.
    pub fn amount_for(&self, subtotal: Money) -> Money {
        let cents = match self {
            PromoDiscount::Percentage { rate, .. } => subtotal.portion(*rate).cents(),
            PromoDiscount::FixedAmount { amount_cents, .. } => *amount_cents,
        };
        Money::from_cents(cents.clamp(0, subtotal.cents().max(0)))
    }

    /// Receipt label: `SPRING20 (20% off)`, `TAKE5 ($5.00 off)`.
    pub fn label(&self, amount: Money) -> String {
        match self {
            PromoDiscount::Percentage { code, rate } => format!("{} ({} off)", code, rate),
            PromoDiscount::FixedAmount { code, .. } => format!("{} ({} off)", code, amount),
        }
    }
}

/// Which discount an order ended up with. Discounts never stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    #[default]
    None,
    MultiBanner,
    Promo,
}

/// The discount applied to an order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppliedDiscount {
    pub kind: DiscountKind,
    pub label: String,
    pub amount_cents: i64,
    /// Shown when a promo and the multi-banner discount competed.
    pub helper_message: Option<String>,
}

impl AppliedDiscount {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Order Aggregate
// =============================================================================

/// Totals across all line items of one order.
///
/// `items` keeps the caller's order; discount allocation worked on a
/// sorted copy and reports indices back into `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderAggregate {
    pub items: Vec<LineItem>,
    /// Multi-banner discount per item, highest line total first.
    pub item_discounts: Vec<ItemDiscount>,
    /// Sum of line totals, pre-discount.
    pub subtotal_cents: i64,
    pub discount: AppliedDiscount,
    /// `subtotal - discount`.
    pub taxable_cents: i64,
    pub tax_rate: TaxRate,
    pub tax_cents: i64,
    /// `taxable + tax`.
    pub total_cents: i64,
}

impl OrderAggregate {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn discount_amount(&self) -> Money {
        self.discount.amount()
    }

    #[inline]
    pub fn taxable(&self) -> Money {
        Money::from_cents(self.taxable_cents)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Total banners across all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.spec.quantity).sum()
    }

    /// Summary rows shared by cart, checkout, order email and admin view.
    ///
    /// ```text
    /// Subtotal                      $88.00
    /// Multi-banner discount (5%)    -$2.00   (only when non-zero)
    /// Free Next-Day Air              $0.00
    /// Tax (6%)                       $5.16
    /// Total                         $91.16
    /// ```
    pub fn summary_lines(&self) -> Vec<BreakdownLine> {
        let mut lines = vec![BreakdownLine::new("Subtotal", self.subtotal())];

        if self.discount.amount_cents > 0 {
            let mut line = BreakdownLine::new(self.discount.label.clone(), -self.discount.amount());
            line.description = self.discount.helper_message.clone();
            lines.push(line);
        }

        lines.push(BreakdownLine::new("Free Next-Day Air", Money::zero()));
        lines.push(BreakdownLine::new(format!("Tax ({})", self.tax_rate), self.tax()));
        lines.push(BreakdownLine::new("Total", self.total()));
        lines
    }
}

// =============================================================================
// Breakdown Line
// =============================================================================

/// A labelled money row on a receipt or summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BreakdownLine {
    pub label: String,
    pub value_cents: i64,
    pub description: Option<String>,
}

impl BreakdownLine {
    pub fn new(label: impl Into<String>, value: Money) -> Self {
        BreakdownLine {
            label: label.into(),
            value_cents: value.cents(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    #[inline]
    pub fn value(&self) -> Money {
        Money::from_cents(self.value_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_parse_and_label() {
        assert_eq!("13oz".parse::<Material>().unwrap(), Material::Vinyl13oz);
        assert_eq!(" mesh ".parse::<Material>().unwrap(), Material::Mesh);
        assert_eq!(Material::Vinyl18oz.label(), "18oz Vinyl");
        assert!(matches!(
            "20oz".parse::<Material>(),
            Err(CoreError::UnknownMaterial(ref s)) if s == "20oz"
        ));
    }

    #[test]
    fn test_material_serde_uses_wire_ids() {
        let json = serde_json::to_string(&Material::Vinyl15oz).unwrap();
        assert_eq!(json, "\"15oz\"");
        let back: Material = serde_json::from_str("\"mesh\"").unwrap();
        assert_eq!(back, Material::Mesh);
        assert!(serde_json::from_str::<Material>("\"canvas\"").is_err());
    }

    #[test]
    fn test_grommets_parse_round_trip() {
        for g in Grommets::ALL {
            assert_eq!(g.as_str().parse::<Grommets>().unwrap(), g);
            let json = serde_json::to_string(&g).unwrap();
            assert_eq!(json, format!("\"{}\"", g.as_str()));
        }
        assert!("every-3ft".parse::<Grommets>().is_err());
        assert_eq!(Grommets::default(), Grommets::None);
    }

    #[test]
    fn test_grommet_counts() {
        assert_eq!(Grommets::None.count(48.0, 24.0), 0);
        assert_eq!(Grommets::FourCorners.count(48.0, 24.0), 4);
        assert_eq!(Grommets::TopCorners.count(48.0, 24.0), 2);
        assert_eq!(Grommets::Every2To3Ft.count(48.0, 24.0), 6);
        assert_eq!(Grommets::Every1To2Ft.count(48.0, 24.0), 10);
    }

    #[test]
    fn test_pole_pocket_linear_inches() {
        assert_eq!(PolePockets::None.linear_inches(48.0, 24.0), 0.0);
        assert_eq!(PolePockets::Top.linear_inches(48.0, 24.0), 48.0);
        assert_eq!(PolePockets::Left.linear_inches(48.0, 24.0), 24.0);
        assert_eq!(PolePockets::TopBottom.linear_inches(48.0, 24.0), 96.0);
        assert_eq!("top-bottom".parse::<PolePockets>().unwrap(), PolePockets::TopBottom);
        assert!("sides".parse::<PolePockets>().is_err());
    }

    #[test]
    fn test_banner_spec_defaults_from_json() {
        let spec: BannerSpec = serde_json::from_str(
            r#"{"width_in": 48, "height_in": 24, "quantity": 2, "material": "13oz"}"#,
        )
        .unwrap();
        assert_eq!(spec, BannerSpec::new(48.0, 24.0, 2, Material::Vinyl13oz));
        assert!((spec.area_sq_ft() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_banner_spec_validate() {
        assert!(BannerSpec::new(48.0, 24.0, 1, Material::Mesh).validate().is_ok());
        assert!(BannerSpec::new(0.0, 24.0, 1, Material::Mesh).validate().is_err());
        assert!(BannerSpec::new(48.0, f64::NAN, 1, Material::Mesh).validate().is_err());
        assert!(BannerSpec::new(48.0, 24.0, 0, Material::Mesh).validate().is_err());
    }

    #[test]
    fn test_promo_amounts() {
        let pct = PromoDiscount::Percentage {
            code: "SPRING20".to_string(),
            rate: DiscountRate::from_bps(2000),
        };
        assert_eq!(pct.amount_for(Money::from_cents(8800)).cents(), 1760);
        assert_eq!(pct.label(Money::from_cents(1760)), "SPRING20 (20% off)");

        let fixed = PromoDiscount::FixedAmount {
            code: "TAKE50".to_string(),
            amount_cents: 5000,
        };
        assert_eq!(fixed.amount_for(Money::from_cents(3600)).cents(), 3600);
        assert_eq!(fixed.amount_for(Money::from_cents(8800)).cents(), 5000);
        assert_eq!(fixed.label(Money::from_cents(5000)), "TAKE50 ($50.00 off)");
    }

    #[test]
    fn test_promo_above_full_price_is_rejected_and_capped() {
        let promo = PromoDiscount::Percentage {
            code: "OOPS150".to_string(),
            rate: DiscountRate::from_bps(15_000),
        };
        assert!(matches!(
            promo.validate(),
            Err(ValidationError::OutOfRange { max: 10000, .. })
        ));
        assert_eq!(promo.amount_for(Money::from_cents(3600)).cents(), 3600);

        let negative = PromoDiscount::FixedAmount {
            code: "BACKWARDS".to_string(),
            amount_cents: -500,
        };
        assert!(negative.validate().is_err());
        assert!(negative.amount_for(Money::from_cents(3600)).is_zero());

        let full = PromoDiscount::Percentage {
            code: "FREE".to_string(),
            rate: DiscountRate::from_bps(10_000),
        };
        assert!(full.validate().is_ok());
        assert_eq!(full.amount_for(Money::from_cents(3600)).cents(), 3600);
    }

    #[test]
    fn test_promo_serde_is_tagged() {
        let promo: PromoDiscount =
            serde_json::from_str(r#"{"kind": "percentage", "code": "VIP", "rate": 1000}"#).unwrap();
        assert_eq!(promo.code(), "VIP");
        assert!(matches!(promo, PromoDiscount::Percentage { rate, .. } if rate.bps() == 1000));
    }
}
