//! Append-only log of closed trades, owned by a single caller context.

use crate::analytics::AnalyticsCalculator;
use crate::models::{RiskAnalytics, RiskHistoryEntry};

/// In-memory trade history. Entries are immutable once appended and keep
/// their insertion order, which is also their time order; display reads the
/// log newest first, analytics oldest first.
#[derive(Debug, Clone, Default)]
pub struct TradeHistory {
    entries: Vec<RiskHistoryEntry>,
}

impl TradeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a history from already-recorded entries, preserving their order.
    pub fn from_entries(entries: Vec<RiskHistoryEntry>) -> Self {
        Self { entries }
    }

    /// Append a closed trade.
    pub fn add_entry(&mut self, entry: RiskHistoryEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest first, the order the analytics reduction requires.
    pub fn iter(&self) -> impl Iterator<Item = &RiskHistoryEntry> {
        self.entries.iter()
    }

    /// Entries newest first, the order the history screen displays.
    pub fn newest_first(&self) -> impl Iterator<Item = &RiskHistoryEntry> {
        self.entries.iter().rev()
    }

    /// Entries recorded under one formula, oldest first.
    pub fn entries_for_formula<'a>(
        &'a self,
        formula_id: &'a str,
    ) -> impl Iterator<Item = &'a RiskHistoryEntry> {
        self.entries.iter().filter(move |e| e.formula_id == formula_id)
    }

    /// Aggregate the full log into its analytics view.
    pub fn analytics(&self) -> RiskAnalytics {
        AnalyticsCalculator::calculate(&self.entries)
    }

    /// Aggregate only the trades recorded under one formula.
    pub fn analytics_for_formula(&self, formula_id: &str) -> RiskAnalytics {
        let entries: Vec<_> = self.entries_for_formula(formula_id).cloned().collect();
        AnalyticsCalculator::calculate(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(formula_id: &str, exit_price: rust_decimal::Decimal) -> RiskHistoryEntry {
        RiskHistoryEntry::closed(
            formula_id,
            dec!(100),
            exit_price,
            dec!(10),
            dec!(20),
            dec!(2),
            dec!(0.2),
            false,
            false,
        )
    }

    #[test]
    fn test_append_preserves_order() {
        let mut history = TradeHistory::new();
        history.add_entry(entry("f-1", dec!(105)));
        history.add_entry(entry("f-1", dec!(97)));
        history.add_entry(entry("f-2", dec!(110)));

        assert_eq!(history.len(), 3);

        let exits: Vec<_> = history.iter().map(|e| e.exit_price).collect();
        assert_eq!(exits, vec![dec!(105), dec!(97), dec!(110)]);

        let newest: Vec<_> = history.newest_first().map(|e| e.exit_price).collect();
        assert_eq!(newest, vec![dec!(110), dec!(97), dec!(105)]);
    }

    #[test]
    fn test_formula_filter() {
        let mut history = TradeHistory::new();
        history.add_entry(entry("f-1", dec!(105)));
        history.add_entry(entry("f-2", dec!(97)));
        history.add_entry(entry("f-1", dec!(95)));

        assert_eq!(history.entries_for_formula("f-1").count(), 2);

        // f-1: +50 then -50
        let analytics = history.analytics_for_formula("f-1");
        assert_eq!(analytics.total_trades, 2);
        assert_eq!(analytics.total_pnl, dec!(0));
    }

    #[test]
    fn test_empty_history_analytics() {
        let history = TradeHistory::new();
        let analytics = history.analytics();
        assert_eq!(analytics.total_trades, 0);
        assert_eq!(analytics.total_pnl, dec!(0));
    }
}
