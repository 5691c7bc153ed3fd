//! Recommendation advisor: plain-text suggestions derived from the latest
//! calculation and the active settings.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{RiskCalculation, RiskSettings, RiskTolerance, SizingMethod};

const LARGE_FIXED_SIZE: Decimal = dec!(1000);

/// Produce improvement suggestions for the current configuration.
///
/// Stateless; the checks run in a fixed order and each can fire
/// independently, so a call yields zero, one, or several suggestions.
pub fn recommendations(calculation: &RiskCalculation, settings: &RiskSettings) -> Vec<String> {
    let mut suggestions = Vec::new();

    if settings.take_profit.enabled && calculation.risk_reward_ratio < Decimal::ONE {
        suggestions.push(
            "Risk/reward ratio is below 1. Widen the profit target or tighten the stop loss."
                .to_string(),
        );
    }

    if calculation.portfolio_risk_percent > settings.risk_profile.max_portfolio_risk {
        suggestions.push(
            "Position risk exceeds your portfolio limit. Reduce the position size.".to_string(),
        );
    }

    if !settings.stop_loss.enabled {
        suggestions.push(
            "Stop loss is disabled. Enable a stop loss to cap the downside on every trade."
                .to_string(),
        );
    }

    if settings.position_sizing.method == SizingMethod::Fixed
        && calculation.position_size > LARGE_FIXED_SIZE
    {
        suggestions.push(
            "Fixed position size is large. Percentage-based sizing scales with your portfolio."
                .to_string(),
        );
    }

    if settings.risk_profile.risk_tolerance == RiskTolerance::High
        && calculation.portfolio_risk_percent < Decimal::ONE
    {
        suggestions.push(
            "Portfolio risk is under 1% with a high risk tolerance. There is room to increase position size."
                .to_string(),
        );
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::calculate;

    fn settings() -> RiskSettings {
        RiskSettings::default()
    }

    #[test]
    fn test_no_recommendations_for_sound_setup() {
        // 2% stop, 4% target, 0.2% portfolio risk, medium tolerance
        let s = settings();
        let calc = calculate(&s, dec!(100), dec!(10000));
        assert!(recommendations(&calc, &s).is_empty());
    }

    #[test]
    fn test_poor_ratio_suggests_wider_target() {
        let mut s = settings();
        s.take_profit.value = dec!(1);

        let calc = calculate(&s, dec!(100), dec!(10000));
        let recs = recommendations(&calc, &s);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("Risk/reward"));
    }

    #[test]
    fn test_excess_risk_suggests_smaller_position() {
        let mut s = settings();
        s.risk_profile.max_portfolio_risk = dec!(0.1);

        let calc = calculate(&s, dec!(100), dec!(10000));
        let recs = recommendations(&calc, &s);
        assert!(recs.iter().any(|r| r.contains("Reduce the position size")));
    }

    #[test]
    fn test_disabled_stop_suggests_enabling() {
        let mut s = settings();
        s.stop_loss.enabled = false;

        let calc = calculate(&s, dec!(100), dec!(10000));
        let recs = recommendations(&calc, &s);
        assert!(recs.iter().any(|r| r.contains("Stop loss is disabled")));
    }

    #[test]
    fn test_large_fixed_size_suggests_percentage_sizing() {
        let mut s = settings();
        s.position_sizing.method = SizingMethod::Fixed;
        s.position_sizing.value = dec!(5000);
        // Keep portfolio risk under the limit so only the sizing check fires
        s.risk_profile.max_portfolio_risk = dec!(100);

        let calc = calculate(&s, dec!(1), dec!(10_000_000));
        let recs = recommendations(&calc, &s);
        assert!(recs.iter().any(|r| r.contains("Percentage-based sizing")));
    }

    #[test]
    fn test_high_tolerance_with_low_risk_suggests_sizing_up() {
        let mut s = settings();
        s.risk_profile.risk_tolerance = RiskTolerance::High;

        let calc = calculate(&s, dec!(100), dec!(10000));
        assert!(calc.portfolio_risk_percent < Decimal::ONE);

        let recs = recommendations(&calc, &s);
        assert!(recs.iter().any(|r| r.contains("room to increase")));
    }

    #[test]
    fn test_multiple_recommendations_in_check_order() {
        // A zero fixed size keeps the risk amount at zero, so the ratio,
        // disabled-stop, and sizing-headroom checks fire together without
        // tripping the portfolio limit
        let mut s = settings();
        s.stop_loss.enabled = false;
        s.position_sizing.method = SizingMethod::Fixed;
        s.position_sizing.value = Decimal::ZERO;
        s.risk_profile.risk_tolerance = RiskTolerance::High;

        let calc = calculate(&s, dec!(100), dec!(10000));
        let recs = recommendations(&calc, &s);
        assert_eq!(recs.len(), 3);
        assert!(recs[0].contains("Risk/reward"));
        assert!(recs[1].contains("Stop loss is disabled"));
        assert!(recs[2].contains("room to increase"));
    }
}
