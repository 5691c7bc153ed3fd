//! Aggregated performance statistics over the trade history.

use rust_decimal::Decimal;
use serde::Serialize;

/// Derived view over a set of history entries. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalytics {
    // === Counts ===
    pub total_trades: u32,

    /// Trades whose `actual_loss` was negative (net profit)
    pub winning_trades: u32,

    /// Trades whose `actual_loss` was zero or positive
    pub losing_trades: u32,

    /// Winning trades as a percentage of all trades (0-100)
    pub win_rate: f64,

    // === Averages ===
    /// Mean risk amount across all trades
    pub average_risk: Decimal,

    /// Mean absolute realized outcome across all trades
    pub average_reward: Decimal,

    pub average_risk_reward_ratio: Decimal,

    // === Outcome ===
    /// Sum of realized P&L (profits positive)
    pub total_pnl: Decimal,

    /// Largest peak-to-trough decline of the cumulative P&L curve
    pub max_drawdown: Decimal,

    /// Mean per-trade return over its population standard deviation
    pub sharpe_ratio: f64,
}

impl Default for RiskAnalytics {
    fn default() -> Self {
        Self {
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            win_rate: 0.0,
            average_risk: Decimal::ZERO,
            average_reward: Decimal::ZERO,
            average_risk_reward_ratio: Decimal::ZERO,
            total_pnl: Decimal::ZERO,
            max_drawdown: Decimal::ZERO,
            sharpe_ratio: 0.0,
        }
    }
}
