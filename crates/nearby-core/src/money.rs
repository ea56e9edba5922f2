//! # Money Module
//!
//! Provides the `Money` type for prices shown on service screens.
//!
//! ## Why Whole Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CATALOG PRICES ARE WHOLE UNITS                                         │
//! │                                                                         │
//! │  Catalog data supplies base prices like 1500 or 249.5.                 │
//! │  A VIP discount multiplies by a fraction: 1500 × (1 − 0.15) = 1275.    │
//! │                                                                         │
//! │  The screens only ever show whole units, so the float product is       │
//! │  rounded exactly ONCE, here, and everything after that is i64 math:    │
//! │    savings = normal − vip   (never re-derived from floats)             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nearby_core::money::{Money, RoundingMode};
//!
//! let price = Money::from_units(1500);
//! let vip = Money::round_from(1500.0 * 0.85, RoundingMode::HalfAwayFromZero);
//! assert_eq!((price - vip).units(), 225);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

/// Currency symbol used by `Display`.
pub const CURRENCY_SYMBOL: &str = "Rs";

// =============================================================================
// Rounding Mode
// =============================================================================

/// How a fractional price is turned into whole units.
///
/// ## Comparison
/// ```text
/// value   HalfAwayFromZero   HalfEven
/// ─────   ────────────────   ────────
///  0.5          1               0
///  1.5          2               2
///  2.5          3               2
/// -2.5         -3              -2
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Standard rounding: ties move away from zero.
    #[default]
    HalfAwayFromZero,
    /// Bankers rounding: ties go to the nearest even number.
    HalfEven,
}

impl std::str::FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "half_away_from_zero" | "half_up" | "standard" => Ok(RoundingMode::HalfAwayFromZero),
            "half_even" | "bankers" => Ok(RoundingMode::HalfEven),
            other => Err(format!(
                "Unknown rounding mode: '{}'. Valid options: half_away_from_zero, half_even",
                other
            )),
        }
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole units of the single app currency.
///
/// ## Design Decisions
/// - **i64 (signed)**: a clamped or strict quote never goes negative, but
///   `savings` arithmetic stays total without overflow checks
/// - **Single field tuple struct**: serializes as a bare integer, so a quote
///   is `{"normal":100,"vip":50,"savings":50}` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Rounds a fractional amount to whole units.
    ///
    /// This is the only place a float becomes money. Non-finite input
    /// yields zero; values beyond the i64 range saturate.
    ///
    /// ## Example
    /// ```rust
    /// use nearby_core::money::{Money, RoundingMode};
    ///
    /// assert_eq!(Money::round_from(2.5, RoundingMode::HalfAwayFromZero).units(), 3);
    /// assert_eq!(Money::round_from(2.5, RoundingMode::HalfEven).units(), 2);
    /// assert_eq!(Money::round_from(f64::NAN, RoundingMode::HalfEven).units(), 0);
    /// ```
    pub fn round_from(value: f64, mode: RoundingMode) -> Money {
        if !value.is_finite() {
            return Money::zero();
        }

        let rounded = match mode {
            RoundingMode::HalfAwayFromZero => value.round(),
            RoundingMode::HalfEven => value.round_ties_even(),
        };

        // float -> int `as` casts saturate at the i64 bounds
        Money(rounded as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `Rs 1,250` (thousands grouped, sign in front).
///
/// ## Note
/// Screens do their own localized formatting; this is for logs and the CLI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(CURRENCY_SYMBOL))
    }
}

impl Money {
    /// Formats with a caller-chosen currency symbol.
    ///
    /// ```rust
    /// use nearby_core::Money;
    ///
    /// assert_eq!(Money::from_units(1250).format_with_symbol("PKR"), "PKR 1,250");
    /// assert_eq!(Money::from_units(-4500).format_with_symbol("Rs"), "-Rs 4,500");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        format!("{}{} {}", sign, symbol, grouped)
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
