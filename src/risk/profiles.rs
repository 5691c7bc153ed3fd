//! Profile store: the active settings plus built-in presets and
//! user-defined risk profiles.

use std::collections::HashMap;

use crate::models::{PresetKind, RiskProfile, RiskSettings};

/// Owns one user session's risk settings and profile collection.
///
/// Applying a profile overwrites only the `risk_profile` sub-object of the
/// active settings; stop-loss, take-profit, and sizing configuration stay
/// untouched.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    settings: RiskSettings,
    custom: HashMap<String, RiskProfile>,
    active: Option<String>,
}

impl ProfileStore {
    pub fn new(settings: RiskSettings) -> Self {
        Self {
            settings,
            custom: HashMap::new(),
            active: None,
        }
    }

    pub fn settings(&self) -> &RiskSettings {
        &self.settings
    }

    /// Key of the currently active profile, if one is selected.
    pub fn active_profile(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Apply a caller edit to the settings, stamping `updated_at`.
    pub fn update_settings(&mut self, edit: impl FnOnce(&mut RiskSettings)) -> &RiskSettings {
        edit(&mut self.settings);
        self.settings.touch();
        &self.settings
    }

    /// Overwrite the risk-profile limits from a built-in preset and make it
    /// the active profile.
    pub fn apply_preset(&mut self, preset: PresetKind) -> &RiskSettings {
        let profile = preset.profile();
        self.apply_limits(&profile);
        self.active = Some(profile.key);
        &self.settings
    }

    /// Look up a profile by key, built-ins included.
    pub fn profile(&self, key: &str) -> Option<RiskProfile> {
        if let Some(preset) = PresetKind::from_key(key) {
            return Some(preset.profile());
        }
        self.custom.get(key).cloned()
    }

    /// Select a profile by key and apply its limits to the active settings.
    /// Returns false when no profile carries the key.
    pub fn set_active_profile(&mut self, key: &str) -> bool {
        let Some(profile) = self.profile(key) else {
            return false;
        };
        self.apply_limits(&profile);
        self.active = Some(profile.key);
        true
    }

    /// Add a user-defined profile, keyed by its own key. Replaces any
    /// existing custom profile with the same key.
    pub fn create_profile(&mut self, profile: RiskProfile) {
        self.custom.insert(profile.key.clone(), profile);
    }

    /// Edit an existing custom profile in place. Built-in presets are
    /// immutable and cannot be updated. Returns false when the key is
    /// unknown.
    pub fn update_profile(&mut self, key: &str, edit: impl FnOnce(&mut RiskProfile)) -> bool {
        match self.custom.get_mut(key) {
            Some(profile) => {
                edit(profile);
                true
            }
            None => false,
        }
    }

    /// Remove a custom profile. Deleting the active profile falls back to
    /// the first profile flagged as default, or clears the selection when
    /// none is. Returns false when the key is unknown.
    pub fn delete_profile(&mut self, key: &str) -> bool {
        if self.custom.remove(key).is_none() {
            return false;
        }
        if self.active.as_deref() == Some(key) {
            self.active = self.default_profile_key();
        }
        true
    }

    /// First profile flagged `is_default`: built-ins in declaration order,
    /// then custom profiles in key order.
    fn default_profile_key(&self) -> Option<String> {
        for preset in PresetKind::ALL {
            let profile = preset.profile();
            if profile.is_default {
                return Some(profile.key);
            }
        }
        let mut keys: Vec<_> = self
            .custom
            .values()
            .filter(|p| p.is_default)
            .map(|p| p.key.clone())
            .collect();
        keys.sort();
        keys.into_iter().next()
    }

    fn apply_limits(&mut self, profile: &RiskProfile) {
        let limits = &mut self.settings.risk_profile;
        limits.max_portfolio_risk = profile.max_portfolio_risk;
        limits.max_daily_loss = profile.max_daily_loss;
        limits.max_concurrent_trades = profile.max_concurrent_trades;
        limits.risk_tolerance = profile.risk_tolerance;
        self.settings.touch();
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new(RiskSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskTolerance;
    use rust_decimal_macros::dec;

    fn custom(key: &str, is_default: bool) -> RiskProfile {
        RiskProfile {
            key: key.to_string(),
            name: key.to_string(),
            max_portfolio_risk: dec!(3),
            max_daily_loss: dec!(6),
            max_concurrent_trades: 7,
            risk_tolerance: RiskTolerance::Medium,
            is_default,
        }
    }

    #[test]
    fn test_apply_preset_overwrites_only_limits() {
        let mut store = ProfileStore::default();
        let stop_loss = store.settings().stop_loss.clone();
        let take_profit = store.settings().take_profit.clone();
        let sizing = store.settings().position_sizing.clone();

        let settings = store.apply_preset(PresetKind::Aggressive);
        assert_eq!(settings.risk_profile.max_portfolio_risk, dec!(5));
        assert_eq!(settings.risk_profile.max_daily_loss, dec!(10));
        assert_eq!(settings.risk_profile.max_concurrent_trades, 10);
        assert_eq!(settings.risk_profile.risk_tolerance, RiskTolerance::High);

        assert_eq!(settings.stop_loss, stop_loss);
        assert_eq!(settings.take_profit, take_profit);
        assert_eq!(settings.position_sizing, sizing);
        assert_eq!(store.active_profile(), Some("aggressive"));
    }

    #[test]
    fn test_set_active_profile_by_key() {
        let mut store = ProfileStore::default();
        assert!(store.set_active_profile("conservative"));
        assert_eq!(store.settings().risk_profile.max_portfolio_risk, dec!(1));

        store.create_profile(custom("swing", false));
        assert!(store.set_active_profile("swing"));
        assert_eq!(store.settings().risk_profile.max_portfolio_risk, dec!(3));
        assert_eq!(store.active_profile(), Some("swing"));

        assert!(!store.set_active_profile("missing"));
        assert_eq!(store.active_profile(), Some("swing"));
    }

    #[test]
    fn test_update_profile_touches_customs_only() {
        let mut store = ProfileStore::default();
        store.create_profile(custom("swing", false));

        assert!(store.update_profile("swing", |p| p.max_portfolio_risk = dec!(4)));
        assert_eq!(store.profile("swing").unwrap().max_portfolio_risk, dec!(4));

        // Presets are immutable constants
        assert!(!store.update_profile("moderate", |p| p.max_portfolio_risk = dec!(9)));
        assert_eq!(
            store.profile("moderate").unwrap().max_portfolio_risk,
            dec!(2)
        );
    }

    #[test]
    fn test_delete_active_falls_back_to_default_preset() {
        let mut store = ProfileStore::default();
        store.create_profile(custom("swing", false));
        store.set_active_profile("swing");

        assert!(store.delete_profile("swing"));
        // Conservative is the first preset flagged as default
        assert_eq!(store.active_profile(), Some("conservative"));
        assert!(store.profile("swing").is_none());
    }

    #[test]
    fn test_delete_inactive_keeps_selection() {
        let mut store = ProfileStore::default();
        store.create_profile(custom("a", false));
        store.create_profile(custom("b", false));
        store.set_active_profile("a");

        assert!(store.delete_profile("b"));
        assert_eq!(store.active_profile(), Some("a"));
        assert!(!store.delete_profile("b"));
    }

    #[test]
    fn test_update_settings_stamps_edit() {
        let mut store = ProfileStore::default();
        let before = store.settings().updated_at;

        let settings = store.update_settings(|s| s.stop_loss.value = dec!(5));
        assert_eq!(settings.stop_loss.value, dec!(5));
        assert!(settings.updated_at >= before);
    }
}
