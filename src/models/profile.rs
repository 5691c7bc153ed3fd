//! Risk profiles: named limit templates applied onto the active settings.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::settings::RiskTolerance;

/// A named risk-limit template. Built-in presets are immutable constants;
/// user-defined profiles are mutable records in the profile store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub key: String,
    pub name: String,

    pub max_portfolio_risk: Decimal,
    pub max_daily_loss: Decimal,
    pub max_concurrent_trades: u32,
    pub risk_tolerance: RiskTolerance,

    /// Fallback target when the active profile is deleted
    pub is_default: bool,
}

/// The three built-in presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
    Conservative,
    Moderate,
    Aggressive,
}

impl PresetKind {
    /// All presets in declaration order.
    pub const ALL: [PresetKind; 3] = [
        PresetKind::Conservative,
        PresetKind::Moderate,
        PresetKind::Aggressive,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PresetKind::Conservative => "conservative",
            PresetKind::Moderate => "moderate",
            PresetKind::Aggressive => "aggressive",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "conservative" => Some(PresetKind::Conservative),
            "moderate" => Some(PresetKind::Moderate),
            "aggressive" => Some(PresetKind::Aggressive),
            _ => None,
        }
    }

    /// The preset's immutable profile values.
    pub fn profile(&self) -> RiskProfile {
        match self {
            PresetKind::Conservative => RiskProfile {
                key: "conservative".to_string(),
                name: "Conservative".to_string(),
                max_portfolio_risk: dec!(1),
                max_daily_loss: dec!(2),
                max_concurrent_trades: 3,
                risk_tolerance: RiskTolerance::Low,
                is_default: true,
            },
            PresetKind::Moderate => RiskProfile {
                key: "moderate".to_string(),
                name: "Moderate".to_string(),
                max_portfolio_risk: dec!(2),
                max_daily_loss: dec!(4),
                max_concurrent_trades: 5,
                risk_tolerance: RiskTolerance::Medium,
                is_default: false,
            },
            PresetKind::Aggressive => RiskProfile {
                key: "aggressive".to_string(),
                name: "Aggressive".to_string(),
                max_portfolio_risk: dec!(5),
                max_daily_loss: dec!(10),
                max_concurrent_trades: 10,
                risk_tolerance: RiskTolerance::High,
                is_default: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_values() {
        let conservative = PresetKind::Conservative.profile();
        assert_eq!(conservative.max_portfolio_risk, dec!(1));
        assert_eq!(conservative.max_daily_loss, dec!(2));
        assert_eq!(conservative.max_concurrent_trades, 3);
        assert_eq!(conservative.risk_tolerance, RiskTolerance::Low);
        assert!(conservative.is_default);

        let aggressive = PresetKind::Aggressive.profile();
        assert_eq!(aggressive.max_portfolio_risk, dec!(5));
        assert_eq!(aggressive.max_daily_loss, dec!(10));
        assert_eq!(aggressive.max_concurrent_trades, 10);
        assert!(!aggressive.is_default);
    }

    #[test]
    fn test_key_round_trip() {
        for preset in PresetKind::ALL {
            assert_eq!(PresetKind::from_key(preset.key()), Some(preset));
        }
        assert_eq!(PresetKind::from_key("Moderate"), Some(PresetKind::Moderate));
        assert_eq!(PresetKind::from_key("yolo"), None);
    }
}
