//! History entry model: one immutable record per closed trade.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A closed trade as recorded in the risk history log.
///
/// `actual_loss` is signed with the app's original convention: positive for
/// a loss, negative for a profit. The analytics formulas are derived from
/// that convention and depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskHistoryEntry {
    pub id: Uuid,

    /// When the trade was closed
    pub timestamp: DateTime<Utc>,

    /// Formula the trade was taken under
    pub formula_id: String,

    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub position_size: Decimal,

    /// Amount that was at risk when the trade was opened
    pub risk_amount: Decimal,

    /// Realized outcome; positive = loss, negative = profit
    pub actual_loss: Decimal,

    pub risk_reward_ratio: Decimal,
    pub portfolio_risk_percent: Decimal,

    #[serde(default)]
    pub stop_loss_hit: bool,

    #[serde(default)]
    pub take_profit_hit: bool,
}

impl RiskHistoryEntry {
    /// Build an entry for a closed long trade, deriving `actual_loss` from
    /// the entry/exit prices: an exit below entry books a positive loss, a
    /// profitable exit a negative one.
    #[allow(clippy::too_many_arguments)]
    pub fn closed(
        formula_id: impl Into<String>,
        entry_price: Decimal,
        exit_price: Decimal,
        position_size: Decimal,
        risk_amount: Decimal,
        risk_reward_ratio: Decimal,
        portfolio_risk_percent: Decimal,
        stop_loss_hit: bool,
        take_profit_hit: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            formula_id: formula_id.into(),
            entry_price,
            exit_price,
            position_size,
            risk_amount,
            actual_loss: (entry_price - exit_price) * position_size,
            risk_reward_ratio,
            portfolio_risk_percent,
            stop_loss_hit,
            take_profit_hit,
        }
    }

    /// A winning trade carries a negative `actual_loss`.
    pub fn is_win(&self) -> bool {
        self.actual_loss < Decimal::ZERO
    }

    /// Realized P&L with the conventional sign (positive = profit).
    pub fn pnl(&self) -> Decimal {
        -self.actual_loss
    }
}
