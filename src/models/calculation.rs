//! Output of a risk calculation: derived prices, sizes, and validation warnings.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// A single validation finding from the risk calculator.
///
/// Fatal warnings invalidate the calculation as a whole; non-fatal ones are
/// advisory and leave `is_valid` untouched. Callers are expected to block
/// trade submission whenever a fatal warning is present.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskWarning {
    /// Portfolio value is zero or negative
    PortfolioValueZero,
    /// Current price is zero or negative
    InvalidPrice,
    /// Position risk reaches or exceeds the configured portfolio maximum
    PortfolioRiskExceeded,
    /// Reward does not cover risk; carries the computed ratio
    PoorRiskReward { ratio: Decimal },
    /// Derived stop-loss price is at or below zero
    StopLossNotPositive,
    /// Derived take-profit price does not clear the entry price
    TakeProfitBelowEntry,
}

impl RiskWarning {
    /// Whether this warning invalidates the calculation.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RiskWarning::PoorRiskReward { .. })
    }
}

impl fmt::Display for RiskWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskWarning::PortfolioValueZero => write!(f, "Portfolio value is zero"),
            RiskWarning::InvalidPrice => write!(f, "Invalid price"),
            RiskWarning::PortfolioRiskExceeded => {
                write!(f, "Portfolio risk exceeds maximum")
            }
            RiskWarning::PoorRiskReward { ratio } => {
                write!(f, "Risk/reward ratio is {ratio:.2}, below the recommended 1.0")
            }
            RiskWarning::StopLossNotPositive => {
                write!(f, "Stop loss price must be positive")
            }
            RiskWarning::TakeProfitBelowEntry => {
                write!(f, "Take profit price must be above entry price")
            }
        }
    }
}

// Warnings travel to callers as plain strings
impl Serialize for RiskWarning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Derived result of one risk calculation. Never persisted; recomputed on
/// every settings, price, or portfolio change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCalculation {
    pub entry_price: Decimal,

    /// 0 when the stop loss is disabled
    pub stop_loss_price: Decimal,

    /// 0 when the take profit is disabled
    pub take_profit_price: Decimal,

    /// Whole number of shares, never negative
    pub position_size: Decimal,

    pub risk_amount: Decimal,
    pub reward_amount: Decimal,

    /// 0 when the risk amount is zero
    pub risk_reward_ratio: Decimal,

    /// Risk amount as a percentage of portfolio value
    pub portfolio_risk_percent: Decimal,

    /// Mirrors `position_size`; no independent cap beyond the sizing formula
    pub max_position_size: Decimal,

    /// Display order matters; validity does not depend on order
    pub warnings: Vec<RiskWarning>,

    /// True iff no fatal warning is present
    pub is_valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fatality_classification() {
        assert!(RiskWarning::PortfolioValueZero.is_fatal());
        assert!(RiskWarning::InvalidPrice.is_fatal());
        assert!(RiskWarning::PortfolioRiskExceeded.is_fatal());
        assert!(RiskWarning::StopLossNotPositive.is_fatal());
        assert!(RiskWarning::TakeProfitBelowEntry.is_fatal());
        assert!(!RiskWarning::PoorRiskReward { ratio: dec!(0.5) }.is_fatal());
    }

    #[test]
    fn test_warning_serializes_as_string() {
        let json = serde_json::to_string(&RiskWarning::InvalidPrice).unwrap();
        assert_eq!(json, "\"Invalid price\"");

        let json = serde_json::to_string(&RiskWarning::PoorRiskReward { ratio: dec!(0.85) }).unwrap();
        assert!(json.contains("0.85"));
    }
}
