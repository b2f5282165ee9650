//! Validated monetary amounts: currency units plus two-digit cents.
//!
//! Every constructor funnels through [`MonetaryAmount::from_decimal`], which
//! rounds to two fractional digits (half away from zero) before any digit is
//! extracted, so binary floating point noise never leaks into the cents.

use std::{fmt, str::FromStr};

use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal, RoundingStrategy,
};
use serde::{Deserialize, Serialize};

use crate::errors::AmountError;

/// Largest representable integer part (just under one trillion).
pub const MAX_UNITS: u64 = 999_999_999_999;

const CENT_DIGITS: u32 = 2;

/// Non-negative amount with at most two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct MonetaryAmount {
    units: u64,
    cents: u8,
}

impl MonetaryAmount {
    pub const ZERO: MonetaryAmount = MonetaryAmount { units: 0, cents: 0 };

    /// Builds an amount from explicit parts.
    pub fn from_parts(units: u64, cents: u8) -> Result<Self, AmountError> {
        if units > MAX_UNITS {
            return Err(AmountError::OutOfRange(units.to_string()));
        }
        if cents > 99 {
            return Err(AmountError::OutOfRange(format!("{units}.{cents}")));
        }
        Ok(Self { units, cents })
    }

    /// Rounds `value` to cents and validates the range.
    pub fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative(value.to_string()));
        }
        let rounded = value.round_dp_with_strategy(CENT_DIGITS, RoundingStrategy::MidpointAwayFromZero);
        let units = rounded
            .trunc()
            .to_u64()
            .filter(|units| *units <= MAX_UNITS)
            .ok_or_else(|| AmountError::OutOfRange(value.to_string()))?;
        let cents = (rounded.fract() * Decimal::ONE_HUNDRED)
            .to_u8()
            .ok_or_else(|| AmountError::OutOfRange(value.to_string()))?;
        Ok(Self { units, cents })
    }

    /// Converts a binary float through its shortest decimal form.
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NonFinite);
        }
        if value < 0.0 {
            return Err(AmountError::Negative(value.to_string()));
        }
        let decimal =
            Decimal::from_f64(value).ok_or_else(|| AmountError::OutOfRange(value.to_string()))?;
        Self::from_decimal(decimal)
    }

    /// Integer (currency unit) part.
    pub fn units(&self) -> u64 {
        self.units
    }

    /// Cents part, always in `0..=99`.
    pub fn cents(&self) -> u8 {
        self.cents
    }

    pub fn is_zero(&self) -> bool {
        self.units == 0 && self.cents == 0
    }

    pub fn to_decimal(&self) -> Decimal {
        let minor = self.units * 100 + u64::from(self.cents);
        Decimal::new(minor as i64, CENT_DIGITS)
    }
}

impl Default for MonetaryAmount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.units, self.cents)
    }
}

/// Accepts `1234.56`, `1234,56` and grouped forms such as `1 234,56`.
impl FromStr for MonetaryAmount {
    type Err = AmountError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '\u{a0}' | '\u{202f}' | '_'))
            .map(|ch| if ch == ',' { '.' } else { ch })
            .collect();
        if cleaned.is_empty() {
            return Err(AmountError::Unparsable(input.to_string()));
        }
        let value =
            Decimal::from_str(&cleaned).map_err(|_| AmountError::Unparsable(input.to_string()))?;
        Self::from_decimal(value)
    }
}

impl TryFrom<Decimal> for MonetaryAmount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl TryFrom<f64> for MonetaryAmount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl From<MonetaryAmount> for Decimal {
    fn from(amount: MonetaryAmount) -> Self {
        amount.to_decimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let amount = MonetaryAmount::from_decimal(dec("2.675")).unwrap();
        assert_eq!((amount.units(), amount.cents()), (2, 68));

        let amount = MonetaryAmount::from_decimal(dec("0.005")).unwrap();
        assert_eq!((amount.units(), amount.cents()), (0, 1));

        let amount = MonetaryAmount::from_decimal(dec("9.994")).unwrap();
        assert_eq!((amount.units(), amount.cents()), (9, 99));
    }

    #[test]
    fn rounding_can_carry_into_units() {
        let amount = MonetaryAmount::from_decimal(dec("19.999")).unwrap();
        assert_eq!((amount.units(), amount.cents()), (20, 0));
    }

    #[test]
    fn float_noise_is_absorbed() {
        let amount = MonetaryAmount::from_f64(0.1 + 0.2).unwrap();
        assert_eq!(amount.to_string(), "0.30");
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        assert!(matches!(
            MonetaryAmount::from_f64(-1.0),
            Err(AmountError::Negative(_))
        ));
        assert_eq!(
            MonetaryAmount::from_f64(f64::NAN),
            Err(AmountError::NonFinite)
        );
        assert_eq!(
            MonetaryAmount::from_f64(f64::INFINITY),
            Err(AmountError::NonFinite)
        );
        assert!(matches!(
            MonetaryAmount::from_decimal(dec("-0.01")),
            Err(AmountError::Negative(_))
        ));
    }

    #[test]
    fn negative_zero_is_zero() {
        assert_eq!(MonetaryAmount::from_f64(-0.0).unwrap(), MonetaryAmount::ZERO);
    }

    #[test]
    fn enforces_twelve_digit_ceiling() {
        assert!(MonetaryAmount::from_decimal(dec("999999999999.99")).is_ok());
        assert!(matches!(
            MonetaryAmount::from_decimal(dec("1000000000000")),
            Err(AmountError::OutOfRange(_))
        ));
        assert!(matches!(
            MonetaryAmount::from_decimal(dec("999999999999.995")),
            Err(AmountError::OutOfRange(_))
        ));
        assert!(MonetaryAmount::from_parts(MAX_UNITS + 1, 0).is_err());
        assert!(MonetaryAmount::from_parts(1, 100).is_err());
    }

    #[test]
    fn parses_french_and_grouped_inputs() {
        let amount: MonetaryAmount = "1 234,5".parse().unwrap();
        assert_eq!(amount, MonetaryAmount::from_parts(1234, 50).unwrap());
        let amount: MonetaryAmount = " 42 ".parse().unwrap();
        assert_eq!(amount, MonetaryAmount::from_parts(42, 0).unwrap());
        assert!(matches!(
            "douze".parse::<MonetaryAmount>(),
            Err(AmountError::Unparsable(_))
        ));
        assert!(matches!(
            "".parse::<MonetaryAmount>(),
            Err(AmountError::Unparsable(_))
        ));
    }

    #[test]
    fn decimal_conversion_keeps_cents() {
        let amount = MonetaryAmount::from_parts(1500, 7).unwrap();
        assert_eq!(amount.to_decimal(), dec("1500.07"));
        assert_eq!(amount.to_string(), "1500.07");
    }

    #[test]
    fn serializes_through_decimal() {
        let amount = MonetaryAmount::from_parts(12, 5).unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"12.05\"");
        let back: MonetaryAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
        assert!(serde_json::from_str::<MonetaryAmount>("\"-3\"").is_err());
    }
}
