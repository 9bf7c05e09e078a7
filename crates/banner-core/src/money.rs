//! # Money Module
//!
//! Provides the `Money` type plus the basis-point rate types used for tax
//! and discounts.
//!
//! ## Why Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart shows $38.16, emailed receipt shows $38.15                        │
//! │    → two surfaces rounded a dollar float at different steps            │
//! │                                                                         │
//! │  Here: every real-valued derivation (area × rate, % discount, % tax)   │
//! │  becomes cents exactly ONCE, where it is derived. Everything after     │
//! │  that is integer addition and multiplication.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Rule
//! One rule everywhere: **round half away from zero**. Real-valued
//! derivations use [`f64::round`]; basis-point products are computed exactly
//! in `i128` with the same rule, so the two paths never disagree.
//!
//! ## Usage
//! ```rust
//! use banner_core::money::{Money, TaxRate};
//!
//! let subtotal = Money::from_cents(3600); // $36.00
//! let tax = subtotal.calculate_tax(TaxRate::from_bps(600)); // 6%
//! assert_eq!(tax.cents(), 216);
//! assert_eq!((subtotal + tax).to_string(), "$38.16");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

/// Basis points in 100%.
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// US dollar amount in integer cents.
///
/// Signed, so discount rows on receipts can carry negative values. Serializes
/// as a bare integer: every payload that crosses a boundary is cents.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  BannerSpec ──► unit price ──► + add-ons ──► × quantity ──► line total │
/// │                                                                │        │
/// │  line totals ──► subtotal ──► − discount ──► + tax ──► grand total     │
/// │                                                                         │
/// │  Cart, checkout, emailed receipt and admin view all read these cents   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Wraps an integer cents amount.
    ///
    /// ## Example
    /// ```rust
    /// use banner_core::money::Money;
    ///
    /// let price = Money::from_cents(3600); // Represents $36.00
    /// assert_eq!(price.cents(), 3600);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a dollar amount to cents, rounding half away from zero.
    ///
    /// Only for ingesting dollar figures at a boundary (legacy payloads,
    /// operator input). Never feed the result of [`Money::to_dollars`] back
    /// through this in a pricing path.
    ///
    /// ## Example
    /// ```rust
    /// use banner_core::money::Money;
    ///
    /// assert_eq!(Money::from_dollars(36.0).cents(), 3600);
    /// assert_eq!(Money::from_dollars(0.125).cents(), 13);
    /// assert_eq!(Money::from_dollars(-0.125).cents(), -13);
    /// ```
    #[inline]
    pub fn from_dollars(dollars: f64) -> Self {
        Money((dollars * 100.0).round() as i64)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in dollars. Display only.
    #[inline]
    pub fn to_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Cents past the whole dollars, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates tax on this amount: `round(amount × rate)`.
    ///
    /// ## Implementation
    /// Exact integer math in `i128`: `amount_cents × bps / 10000`, rounded
    /// half away from zero. `$10.00 × 8.25% = $0.825` becomes 83 cents.
    ///
    /// ## Example
    /// ```rust
    /// use banner_core::money::{Money, TaxRate};
    ///
    /// let price = Money::from_cents(1000); // $10.00
    /// let rate = TaxRate::from_bps(825);   // 8.25%
    /// assert_eq!(price.calculate_tax(rate).cents(), 83);
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Subtotal after discount: $86.00
    ///      │
    ///      ▼
    /// calculate_tax(6%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: $5.16
    ///      │
    ///      ▼
    /// Grand Total: $91.16
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(round_bps(self.0, rate.bps()))
    }

    /// Returns `round(amount × bps / 10000)`: the discounted portion, not
    /// the remainder.
    ///
    /// ## Example
    /// ```rust
    /// use banner_core::money::{DiscountRate, Money};
    ///
    /// let line = Money::from_cents(500);
    /// assert_eq!(line.portion(DiscountRate::from_bps(500)).cents(), 25);
    /// ```
    pub fn portion(&self, rate: DiscountRate) -> Money {
        Money(round_bps(self.0, rate.bps()))
    }

    /// Line total for `qty` identical units. No rounding involved.
    ///
    /// ## Example
    /// ```rust
    /// use banner_core::money::Money;
    ///
    /// let unit_each = Money::from_cents(4400); // banner + rope
    /// assert_eq!(unit_each.multiply_quantity(3).cents(), 13200);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// `round(amount × bps / 10000)` with half-away-from-zero, exact in i128.
fn round_bps(amount_cents: i64, bps: u32) -> i64 {
    let product = amount_cents as i128 * bps as i128;
    let half = BPS_SCALE / 2;
    let rounded = if product >= 0 {
        (product + half) / BPS_SCALE
    } else {
        (product - half) / BPS_SCALE
    };
    rounded as i64
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// US-dollar display: `$1,234.56`, `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let dollars = (self.0 / 100).unsigned_abs().to_string();

        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, digit) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        write!(f, "{}${}.{:02}", sign, grouped, self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 600 bps = 6% (the storefront's sales tax)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// `6%`, `8.25%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bps_percent(f, self.0)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Percentage discount in basis points (500 = 5%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bps_percent(f, self.0)
    }
}

fn write_bps_percent(f: &mut fmt::Formatter<'_>, bps: u32) -> fmt::Result {
    if bps % 100 == 0 {
        write!(f, "{}%", bps / 100)
    } else {
        let text = format!("{}.{:02}", bps / 100, bps % 100);
        write!(f, "{}%", text.trim_end_matches('0'))
    }
}

// =============================================================================
// Free Functions
// =============================================================================
// Named entry points used by checkout handlers and email templates.

/// Dollars to integer cents, rounded half away from zero.
#[inline]
pub fn to_cents(dollars: f64) -> Money {
    Money::from_dollars(dollars)
}

/// Cents to dollars. Display only; never re-enters pricing.
#[inline]
pub fn from_cents(cents: Money) -> f64 {
    cents.to_dollars()
}

/// US-dollar string with thousands separators and two decimals.
///
/// ## Example
/// ```rust
/// use banner_core::money::{format_currency, Money};
///
/// assert_eq!(format_currency(Money::from_cents(123456)), "$1,234.56");
/// ```
pub fn format_currency(cents: Money) -> String {
    cents.to_string()
}

/// `round(subtotal × rate)`.
#[inline]
pub fn calculate_tax(subtotal: Money, rate: TaxRate) -> Money {
    subtotal.calculate_tax(rate)
}

/// Plain addition; both operands are already whole cents.
#[inline]
pub fn calculate_total(subtotal: Money, tax: Money) -> Money {
    subtotal + tax
}

/// Square feet for display: `8.00 sq ft`.
pub fn format_area(sq_ft: f64) -> String {
    format!("{:.2} sq ft", sq_ft)
}

/// Banner dimensions for display: `48" × 24"`.
pub fn format_dimensions(width_in: f64, height_in: f64) -> String {
    format!("{}\" × {}\"", width_in, height_in)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(123456)), "$1,234.56");
        assert_eq!(format!("{}", Money::from_cents(100000000)), "$1,000,000.00");
        assert_eq!(format!("{}", Money::from_cents(-99999)), "-$999.99");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-b).cents(), -500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_to_cents_rounds_half_away_from_zero() {
        assert_eq!(to_cents(36.0).cents(), 3600);
        assert_eq!(to_cents(0.125).cents(), 13);
        assert_eq!(to_cents(0.115).cents(), 12);
        assert_eq!(to_cents(-0.125).cents(), -13);
    }

    #[test]
    fn test_cents_round_trip_is_exact() {
        for c in [-123_456_789, -1, 0, 1, 99, 100, 3816, 999_999_999_999] {
            assert_eq!(to_cents(from_cents(Money::from_cents(c))).cents(), c);
        }
    }

    #[test]
    fn test_dollars_round_trip_within_half_cent() {
        for x in [0.0, 0.004, 0.005, 1.005, 36.123, 99.995, 1234.5678] {
            let back = from_cents(to_cents(x));
            assert!((back - x).abs() <= 0.005 + 1e-9, "{} -> {}", x, back);
        }
    }

    #[test]
    fn test_tax_calculation_basic() {
        let amount = Money::from_cents(3600);
        let tax = calculate_tax(amount, TaxRate::from_bps(600));
        assert_eq!(tax.cents(), 216);
        assert_eq!(calculate_total(amount, tax).cents(), 3816);
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        // $10.00 at 8.25% = $0.825 → $0.83
        let amount = Money::from_cents(1000);
        let tax = amount.calculate_tax(TaxRate::from_bps(825));
        assert_eq!(tax.cents(), 83);

        // 8.33 cents rounds down
        let tax = Money::from_cents(13883).calculate_tax(TaxRate::from_bps(6));
        assert_eq!(tax.cents(), 8);
    }

    #[test]
    fn test_zero_tax_rate() {
        let tax = Money::from_cents(98765).calculate_tax(TaxRate::zero());
        assert!(tax.is_zero());
    }

    #[test]
    fn test_portion_rounds_each_half_up() {
        assert_eq!(Money::from_cents(800).portion(DiscountRate::from_bps(500)).cents(), 40);
        assert_eq!(Money::from_cents(500).portion(DiscountRate::from_bps(500)).cents(), 25);
        // 1.5 cents → 2
        assert_eq!(Money::from_cents(30).portion(DiscountRate::from_bps(500)).cents(), 2);
        // -1.5 cents → -2
        assert_eq!(Money::from_cents(-30).portion(DiscountRate::from_bps(500)).cents(), -2);
    }

    #[test]
    fn test_rate_display() {
        assert_eq!(TaxRate::from_bps(600).to_string(), "6%");
        assert_eq!(TaxRate::from_bps(825).to_string(), "8.25%");
        assert_eq!(TaxRate::from_bps(850).to_string(), "8.5%");
        assert_eq!(DiscountRate::from_bps(500).to_string(), "5%");
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(format_area(8.0), "8.00 sq ft");
        assert_eq!(format_area(2.0 / 3.0), "0.67 sq ft");
        assert_eq!(format_dimensions(48.0, 24.0), "48\" × 24\"");
        assert_eq!(format_dimensions(30.5, 12.0), "30.5\" × 12\"");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }
}
