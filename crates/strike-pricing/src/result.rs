//! Pricing result records.
//!
//! Records are produced at full precision. Call [`Valuation::rounded`] or
//! [`Greeks::rounded`] at the reporting boundary to get the four-decimal
//! figures shown to users.

use serde::{Deserialize, Serialize};
use strike_core::rounding::round_report;
use strike_core::{OptionStyle, OptionType};

/// First and second order sensitivities of an option price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S.
    pub delta: f64,
    /// ∂²V/∂S².
    pub gamma: f64,
    /// ∂V/∂σ, per unit of volatility.
    pub vega: f64,
    /// ∂V/∂t, annualized. Divide by 365 for a daily figure.
    pub theta: f64,
    /// ∂V/∂r, per unit of rate.
    pub rho: f64,
}

impl Greeks {
    /// Returns a copy with every sensitivity rounded to four decimals.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            delta: round_report(self.delta),
            gamma: round_report(self.gamma),
            vega: round_report(self.vega),
            theta: round_report(self.theta),
            rho: round_report(self.rho),
        }
    }

    /// Theta per calendar day.
    #[must_use]
    pub fn daily_theta(&self) -> f64 {
        self.theta / 365.0
    }
}

/// A price plus, for analytic pricing, its Greeks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Option value.
    pub price: f64,
    /// Sensitivities, when the pricer provides them.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub greeks: Option<Greeks>,
}

impl Valuation {
    /// A price without sensitivities.
    #[must_use]
    pub fn price_only(price: f64) -> Self {
        Self {
            price,
            greeks: None,
        }
    }

    /// A price with sensitivities.
    #[must_use]
    pub fn with_greeks(price: f64, greeks: Greeks) -> Self {
        Self {
            price,
            greeks: Some(greeks),
        }
    }

    /// Returns a copy rounded to four decimals.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            price: round_report(self.price),
            greeks: self.greeks.map(|g| g.rounded()),
        }
    }
}

/// Everything the option calculator displays for a priced European option.
///
/// All numeric fields are already rounded to four decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionStats {
    /// Call or put.
    pub option_type: OptionType,
    /// Exercise style.
    pub option_style: OptionStyle,
    /// Strike price.
    pub strike_price: f64,
    /// Time to expiry in years.
    pub time_to_expiry: f64,
    /// Spot price used.
    pub underlying_price: f64,
    /// Volatility used.
    pub volatility: f64,
    /// Option price.
    pub price: f64,
    /// Sensitivities.
    pub greeks: Greeks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valuation_rounding() {
        let valuation = Valuation::with_greeks(
            10.450_583_572,
            Greeks {
                delta: 0.636_830_651,
                gamma: 0.018_762_017,
                vega: 37.524_034_691,
                theta: -6.414_027_546,
                rho: 53.232_481_545,
            },
        );

        let rounded = valuation.rounded();
        assert_eq!(rounded.price, 10.4506);
        let greeks = rounded.greeks.unwrap();
        assert_eq!(greeks.delta, 0.6368);
        assert_eq!(greeks.gamma, 0.0188);
        assert_eq!(greeks.vega, 37.524);
        assert_eq!(greeks.theta, -6.414);
        assert_eq!(greeks.rho, 53.2325);
    }

    #[test]
    fn test_price_only_serialization_omits_greeks() {
        let json = serde_json::to_string(&Valuation::price_only(5.5735)).unwrap();
        assert_eq!(json, r#"{"price":5.5735}"#);
    }
}
