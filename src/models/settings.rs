//! Risk settings: one configuration per (formula, user) pair.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How a stop-loss or take-profit threshold is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdKind {
    /// Absolute currency offset from the entry price
    Fixed,
    /// Percentage of the entry price
    Percentage,
}

/// Position sizing method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMethod {
    /// `value` is a share count used directly
    Fixed,
    /// `value` is a percentage of portfolio value
    Percentage,
    /// Size from the per-trade risk budget and the distance to the stop
    RiskBased,
}

impl SizingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizingMethod::Fixed => "fixed",
            SizingMethod::Percentage => "percentage",
            SizingMethod::RiskBased => "risk_based",
        }
    }
}

/// Trader's appetite for risk, used by presets and the advisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

/// Stop-loss configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLossSettings {
    pub enabled: bool,

    /// Whether `value` is an absolute offset or a percentage of price
    #[serde(rename = "type")]
    pub kind: ThresholdKind,

    /// Threshold value, non-negative; semantics depend on `type`
    pub value: Decimal,

    /// Ratchet the stop upward as price moves in the trade's favor
    pub trailing: bool,

    /// Minimum favorable advance before the trailing stop moves
    pub trailing_step: Decimal,
}

/// Take-profit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeProfitSettings {
    pub enabled: bool,

    #[serde(rename = "type")]
    pub kind: ThresholdKind,

    pub value: Decimal,
}

/// Position sizing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSizingSettings {
    pub method: SizingMethod,

    /// Share count (fixed) or percentage of portfolio (percentage)
    pub value: Decimal,

    /// Per-trade risk budget as a percentage of portfolio (0-100),
    /// used by risk_based sizing
    pub max_risk_per_trade: Decimal,
}

/// Portfolio-level risk limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfileSettings {
    /// Maximum risk per position as a percentage of portfolio value
    pub max_portfolio_risk: Decimal,

    /// Maximum tolerated daily loss as a percentage of portfolio value
    pub max_daily_loss: Decimal,

    /// Maximum number of simultaneously open trades
    pub max_concurrent_trades: u32,

    pub risk_tolerance: RiskTolerance,
}

/// Full risk configuration for one formula. Created with defaults or from a
/// preset; edited in place by the caller, with `touch` stamping every edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSettings {
    pub stop_loss: StopLossSettings,
    pub take_profit: TakeProfitSettings,
    pub position_sizing: PositionSizingSettings,
    pub risk_profile: RiskProfileSettings,

    /// When any field was last edited
    pub updated_at: DateTime<Utc>,
}

impl RiskSettings {
    /// Stamp the settings as edited now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            stop_loss: StopLossSettings {
                enabled: true,
                kind: ThresholdKind::Percentage,
                value: dec!(2),
                trailing: false,
                trailing_step: dec!(0.5),
            },
            take_profit: TakeProfitSettings {
                enabled: true,
                kind: ThresholdKind::Percentage,
                value: dec!(4),
            },
            position_sizing: PositionSizingSettings {
                method: SizingMethod::Percentage,
                value: dec!(10),
                max_risk_per_trade: dec!(2),
            },
            risk_profile: RiskProfileSettings {
                max_portfolio_risk: dec!(2),
                max_daily_loss: dec!(4),
                max_concurrent_trades: 5,
                risk_tolerance: RiskTolerance::Medium,
            },
            updated_at: Utc::now(),
        }
    }
}
