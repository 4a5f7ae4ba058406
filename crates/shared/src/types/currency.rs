//! The closed currency set and money rounding rules.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`; balances are stored at two
//! decimal places, exchange rates at six.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places for monetary amounts.
pub const MONEY_DP: u32 = 2;

/// Decimal places for exchange rates.
pub const RATE_DP: u32 = 6;

/// Currencies supported by the exchange office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Saudi Riyal
    Sar,
    /// Yemeni Rial
    Yer,
}

impl Currency {
    /// All supported currencies, in display order.
    pub const ALL: [Self; 3] = [Self::Usd, Self::Sar, Self::Yer];

    /// Returns the ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Sar => "SAR",
            Self::Yer => "YER",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "SAR" => Ok(Self::Sar),
            "YER" => Ok(Self::Yer),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

/// Rounds a monetary amount to two decimal places.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointNearestEven);
    // Fix the scale so serialized balances always read "375.00", not "375".
    rounded.rescale(MONEY_DP);
    rounded
}

/// Rounds an exchange rate to six decimal places.
#[must_use]
pub fn round_rate(rate: Decimal) -> Decimal {
    rate.round_dp_with_strategy(RATE_DP, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Sar.to_string(), "SAR");
        assert_eq!(Currency::Yer.to_string(), "YER");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("sar").unwrap(), Currency::Sar);
        assert_eq!(Currency::from_str("Yer").unwrap(), Currency::Yer);

        assert!(Currency::from_str("EUR").is_err());
        assert!(Currency::from_str("").is_err());
    }

    #[test]
    fn test_currency_serde_uppercase() {
        let json = serde_json::to_string(&Currency::Sar).unwrap();
        assert_eq!(json, "\"SAR\"");

        let parsed: Currency = serde_json::from_str("\"YER\"").unwrap();
        assert_eq!(parsed, Currency::Yer);
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(dec!(10.005)), dec!(10.00));
        assert_eq!(round_money(dec!(10.015)), dec!(10.02));
        assert_eq!(round_money(dec!(375)), dec!(375.00));
    }

    #[test]
    fn test_round_rate() {
        assert_eq!(round_rate(dec!(0.26666666)), dec!(0.266667));
        assert_eq!(round_rate(dec!(3.75)), dec!(3.750000));
    }
}
