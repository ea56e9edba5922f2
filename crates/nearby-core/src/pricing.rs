//! # Pricing Module
//!
//! Two-tier pricing: every screen that shows a price gets its normal
//! price, VIP price and savings from [`quote`], so the tiers can never
//! disagree between screens.
//!
//! ## Computation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quote(base_price, discount_fraction)                                   │
//! │                                                                         │
//! │  1. Sanitize    base < 0 or NaN  → 0                                   │
//! │                 discount         → clamp to [0, 1] (NaN → 0)           │
//! │                                                                         │
//! │  2. Round ONCE  normal = round(base)                                   │
//! │                 vip    = round(base × (1 − discount))                  │
//! │                                                                         │
//! │  3. Integers    savings = normal − vip                                 │
//! │                                                                         │
//! │  Example: quote(1500, 0.15)                                            │
//! │           normal = 1500, vip = 1275, savings = 225                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Out-of-range Input
//! [`quote`] clamps: catalog values are expected in range and a screen
//! must always be able to render something. [`try_quote`] rejects instead,
//! for callers that want to surface bad catalog data.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, RoundingMode};
use crate::validation::{validate_base_price, validate_discount_fraction};

// =============================================================================
// Pricing Tier
// =============================================================================

/// Which price a user pays: the screens hold a VIP-mode flag and pass it
/// here as the tier selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PricingTier {
    /// Regular customer, pays the base price.
    #[default]
    Normal,
    /// VIP member, pays the discounted price.
    Vip,
}

impl PricingTier {
    /// Maps the boolean VIP-mode flag to a tier.
    pub fn from_vip_flag(is_vip: bool) -> Self {
        if is_vip {
            PricingTier::Vip
        } else {
            PricingTier::Normal
        }
    }

    /// Returns true for the VIP tier.
    pub fn is_vip(&self) -> bool {
        matches!(self, PricingTier::Vip)
    }
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingTier::Normal => write!(f, "normal"),
            PricingTier::Vip => write!(f, "vip"),
        }
    }
}

impl std::str::FromStr for PricingTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "regular" => Ok(PricingTier::Normal),
            "vip" => Ok(PricingTier::Vip),
            other => Err(CoreError::UnknownTier(other.to_string())),
        }
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A discount fraction known to be within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DiscountRate(f64);

impl DiscountRate {
    /// No discount.
    pub const NONE: DiscountRate = DiscountRate(0.0);

    /// Creates a rate from a fraction, rejecting anything outside `[0, 1]`.
    ///
    /// ## Example
    /// ```rust
    /// use nearby_core::pricing::DiscountRate;
    ///
    /// assert!(DiscountRate::new(0.2).is_ok());
    /// assert!(DiscountRate::new(1.2).is_err());
    /// ```
    pub fn new(fraction: f64) -> CoreResult<Self> {
        validate_discount_fraction(fraction)?;
        Ok(DiscountRate(fraction))
    }

    /// Creates a rate from a whole percentage (`20` = 20% off).
    pub fn from_percent(percent: u8) -> CoreResult<Self> {
        Self::new(f64::from(percent) / 100.0)
    }

    /// Creates a rate by clamping into `[0, 1]`. NaN becomes no discount.
    pub fn clamped(fraction: f64) -> Self {
        if fraction.is_nan() {
            return DiscountRate::NONE;
        }
        DiscountRate(fraction.clamp(0.0, 1.0))
    }

    /// Returns the fraction.
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for DiscountRate {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        DiscountRate::new(value)
    }
}

impl From<DiscountRate> for f64 {
    fn from(rate: DiscountRate) -> Self {
        rate.0
    }
}

// =============================================================================
// Pricing Quote
// =============================================================================

/// Normal price, VIP price and the difference, in whole units.
///
/// A quote has no identity: it is recomputed whenever a screen needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingQuote {
    pub normal: Money,
    pub vip: Money,
    pub savings: Money,
}

impl PricingQuote {
    /// The price a user in `tier` pays.
    pub fn price_for(&self, tier: PricingTier) -> Money {
        match tier {
            PricingTier::Normal => self.normal,
            PricingTier::Vip => self.vip,
        }
    }

    /// Whether the VIP tier is actually cheaper.
    pub fn has_savings(&self) -> bool {
        self.savings.is_positive()
    }

    /// Savings as a whole percentage of the normal price, for "Save 15%"
    /// badges. Zero when the normal price is zero.
    pub fn savings_percent(&self) -> i64 {
        if self.normal.is_zero() {
            return 0;
        }
        let pct = self.savings.units() as f64 * 100.0 / self.normal.units() as f64;
        Money::round_from(pct, RoundingMode::HalfAwayFromZero).units()
    }
}

// =============================================================================
// Quote Functions
// =============================================================================

/// Computes a quote with the default rounding mode, clamping
/// out-of-range input.
///
/// ## Example
/// ```rust
/// use nearby_core::pricing::quote;
///
/// let q = quote(9.0, 1.0);
/// assert_eq!((q.normal.units(), q.vip.units(), q.savings.units()), (9, 0, 9));
/// ```
pub fn quote(base_price: f64, discount_fraction: f64) -> PricingQuote {
    quote_with(base_price, discount_fraction, RoundingMode::default())
}

/// Computes a quote with an explicit rounding mode, clamping
/// out-of-range input.
pub fn quote_with(base_price: f64, discount_fraction: f64, mode: RoundingMode) -> PricingQuote {
    let base = if base_price.is_nan() || base_price < 0.0 {
        0.0
    } else {
        base_price
    };
    compute(base, DiscountRate::clamped(discount_fraction), mode)
}

/// Computes a quote, rejecting a negative or non-finite base price and a
/// discount outside `[0, 1]`.
///
/// ## Example
/// ```rust
/// use nearby_core::pricing::try_quote;
///
/// assert!(try_quote(100.0, 0.5).is_ok());
/// assert!(try_quote(-1.0, 0.5).is_err());
/// assert!(try_quote(100.0, 1.5).is_err());
/// ```
pub fn try_quote(base_price: f64, discount_fraction: f64) -> CoreResult<PricingQuote> {
    validate_base_price(base_price).map_err(CoreError::InvalidPricing)?;
    validate_discount_fraction(discount_fraction).map_err(CoreError::InvalidPricing)?;
    Ok(compute(
        base_price,
        DiscountRate(discount_fraction),
        RoundingMode::default(),
    ))
}

fn compute(base: f64, discount: DiscountRate, mode: RoundingMode) -> PricingQuote {
    let normal = Money::round_from(base, mode);
    let vip = Money::round_from(base * (1.0 - discount.fraction()), mode);

    PricingQuote {
        normal,
        vip,
        savings: normal - vip,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn units(q: PricingQuote) -> (i64, i64, i64) {
        (q.normal.units(), q.vip.units(), q.savings.units())
    }

    #[test]
    fn test_full_discount() {
        assert_eq!(units(quote(9.0, 1.0)), (9, 0, 9));
    }

    #[test]
    fn test_half_discount() {
        assert_eq!(units(quote(100.0, 0.5)), (100, 50, 50));
    }

    #[test]
    fn test_no_discount() {
        let q = quote(2500.0, 0.0);
        assert_eq!(units(q), (2500, 2500, 0));
        assert!(!q.has_savings());
    }

    #[test]
    fn test_typical_vip_discount() {
        assert_eq!(units(quote(1500.0, 0.15)), (1500, 1275, 225));
        assert_eq!(units(quote(800.0, 0.2)), (800, 640, 160));
    }

    #[test]
    fn test_fractional_base_rounds_once() {
        // 249.5 → 250 normal; 249.5 × 0.9 = 224.55 → 225 vip
        assert_eq!(units(quote(249.5, 0.1)), (250, 225, 25));
    }

    #[test]
    fn test_savings_is_normal_minus_vip() {
        for (base, discount) in [(99.99, 0.33), (10.5, 0.5), (7.0, 0.25), (1.0, 0.5)] {
            let q = quote(base, discount);
            assert_eq!(q.savings, q.normal - q.vip);
        }
    }

    #[test]
    fn test_idempotent() {
        let first = quote(1234.5, 0.175);
        let second = quote(1234.5, 0.175);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rounding_modes_differ_on_ties() {
        // 5 × 0.5 = 2.5
        assert_eq!(
            quote_with(5.0, 0.5, RoundingMode::HalfAwayFromZero).vip.units(),
            3
        );
        assert_eq!(quote_with(5.0, 0.5, RoundingMode::HalfEven).vip.units(), 2);
    }

    #[test]
    fn test_quote_clamps_out_of_range() {
        assert_eq!(units(quote(100.0, 1.5)), (100, 0, 100));
        assert_eq!(units(quote(100.0, -0.5)), (100, 100, 0));
        assert_eq!(units(quote(-50.0, 0.5)), (0, 0, 0));
        assert_eq!(units(quote(f64::NAN, 0.5)), (0, 0, 0));
        assert_eq!(units(quote(100.0, f64::NAN)), (100, 100, 0));
    }

    #[test]
    fn test_try_quote_rejects_out_of_range() {
        assert!(matches!(
            try_quote(-1.0, 0.1),
            Err(CoreError::InvalidPricing(_))
        ));
        assert!(matches!(
            try_quote(100.0, 1.01),
            Err(CoreError::InvalidPricing(_))
        ));
        assert!(try_quote(f64::INFINITY, 0.1).is_err());

        let q = try_quote(100.0, 0.5).unwrap();
        assert_eq!(units(q), (100, 50, 50));
    }

    #[test]
    fn test_price_for_tier() {
        let q = quote(1000.0, 0.1);
        assert_eq!(q.price_for(PricingTier::Normal).units(), 1000);
        assert_eq!(q.price_for(PricingTier::Vip).units(), 900);
        assert_eq!(
            q.price_for(PricingTier::from_vip_flag(true)),
            q.price_for(PricingTier::Vip)
        );
    }

    #[test]
    fn test_savings_percent() {
        assert_eq!(quote(1500.0, 0.15).savings_percent(), 15);
        assert_eq!(quote(9.0, 1.0).savings_percent(), 100);
        assert_eq!(quote(0.0, 0.5).savings_percent(), 0);
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!("vip".parse::<PricingTier>().unwrap(), PricingTier::Vip);
        assert_eq!(" Normal ".parse::<PricingTier>().unwrap(), PricingTier::Normal);
        assert!(matches!(
            "gold".parse::<PricingTier>(),
            Err(CoreError::UnknownTier(_))
        ));
        assert_eq!(PricingTier::Vip.to_string(), "vip");
    }

    #[test]
    fn test_discount_rate() {
        assert_eq!(DiscountRate::from_percent(20).unwrap().fraction(), 0.2);
        assert!(DiscountRate::from_percent(120).is_err());
        assert_eq!(DiscountRate::clamped(3.0).fraction(), 1.0);
        assert_eq!(DiscountRate::clamped(f64::NAN), DiscountRate::NONE);

        let parsed: Result<DiscountRate, _> = serde_json::from_str("1.5");
        assert!(parsed.is_err());
        let parsed: DiscountRate = serde_json::from_str("0.25").unwrap();
        assert_eq!(parsed.fraction(), 0.25);
    }

    #[test]
    fn test_quote_json_shape() {
        let json = serde_json::to_string(&quote(100.0, 0.5)).unwrap();
        assert_eq!(json, r#"{"normal":100,"vip":50,"savings":50}"#);
    }
}
