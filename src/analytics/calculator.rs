//! Calculator for trade performance statistics: win rate, drawdown, Sharpe ratio.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use statrs::statistics::Statistics;

use crate::models::{RiskAnalytics, RiskHistoryEntry};

/// Calculator for aggregating closed trades into performance statistics.
pub struct AnalyticsCalculator;

impl AnalyticsCalculator {
    /// Reduce a trade history into its analytics view.
    ///
    /// Pure: the same entries always produce the same record. An empty
    /// history returns the all-zero record without touching any division.
    pub fn calculate(entries: &[RiskHistoryEntry]) -> RiskAnalytics {
        let mut analytics = RiskAnalytics::default();

        if entries.is_empty() {
            return analytics;
        }

        analytics.total_trades = entries.len() as u32;

        Self::calculate_win_loss(&mut analytics, entries);
        Self::calculate_averages(&mut analytics, entries);
        Self::calculate_drawdown(&mut analytics, entries);
        Self::calculate_sharpe(&mut analytics, entries);

        analytics
    }

    /// Split trades by the sign of `actual_loss`: negative means profit.
    fn calculate_win_loss(analytics: &mut RiskAnalytics, entries: &[RiskHistoryEntry]) {
        let (wins, losses): (Vec<_>, Vec<_>) = entries.iter().partition(|e| e.is_win());

        analytics.winning_trades = wins.len() as u32;
        analytics.losing_trades = losses.len() as u32;
        analytics.win_rate = wins.len() as f64 / entries.len() as f64 * 100.0;
    }

    fn calculate_averages(analytics: &mut RiskAnalytics, entries: &[RiskHistoryEntry]) {
        let count = Decimal::from(entries.len() as u32);

        analytics.average_risk =
            entries.iter().map(|e| e.risk_amount).sum::<Decimal>() / count;
        analytics.average_reward =
            entries.iter().map(|e| e.actual_loss.abs()).sum::<Decimal>() / count;
        analytics.average_risk_reward_ratio =
            entries.iter().map(|e| e.risk_reward_ratio).sum::<Decimal>() / count;

        analytics.total_pnl = entries.iter().map(|e| e.pnl()).sum();
    }

    /// Maximum drawdown of the cumulative P&L curve, walked in history
    /// order (oldest first). Both the running total and the peak start at
    /// zero, so a history that opens with losses reports the full decline.
    fn calculate_drawdown(analytics: &mut RiskAnalytics, entries: &[RiskHistoryEntry]) {
        let mut current = Decimal::ZERO;
        let mut peak = Decimal::ZERO;
        let mut max_dd = Decimal::ZERO;

        for entry in entries {
            current -= entry.actual_loss;

            if current > peak {
                peak = current;
            }

            let dd = peak - current;
            if dd > max_dd {
                max_dd = dd;
            }
        }

        analytics.max_drawdown = max_dd;
    }

    /// Sharpe ratio over per-trade returns `-actual_loss / risk_amount`,
    /// using the population standard deviation. Entries with a zero risk
    /// amount cannot define a return and are skipped.
    fn calculate_sharpe(analytics: &mut RiskAnalytics, entries: &[RiskHistoryEntry]) {
        let returns: Vec<f64> = entries
            .iter()
            .filter(|e| !e.risk_amount.is_zero())
            .filter_map(|e| (e.pnl() / e.risk_amount).to_f64())
            .collect();

        if returns.is_empty() {
            return;
        }

        let mean = returns.clone().mean();
        let std_dev = returns.population_std_dev();

        if std_dev > 0.0 {
            analytics.sharpe_ratio = mean / std_dev;
        }
    }
}
