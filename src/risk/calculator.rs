//! Pure risk calculation: stop/target prices, position sizing, validation.
//!
//! `calculate` has no state and no I/O; it is cheap enough to run on every
//! keystroke of a settings editor, and identical inputs always produce
//! identical output. Degenerate inputs never panic or error; they come back
//! as warnings with `is_valid = false`.

use rust_decimal::Decimal;

use crate::models::{
    RiskCalculation, RiskSettings, RiskWarning, SizingMethod, ThresholdKind,
};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Run the full risk calculation for one price/portfolio snapshot.
pub fn calculate(
    settings: &RiskSettings,
    current_price: Decimal,
    portfolio_value: Decimal,
) -> RiskCalculation {
    let stop_loss_price = stop_loss_price(settings, current_price);
    let take_profit_price = take_profit_price(settings, current_price);

    let position_size = raw_position_size(settings, current_price, portfolio_value, stop_loss_price);

    // Risk amounts use the unfloored size; flooring happens at return
    let risk_amount = position_size * (current_price - stop_loss_price);
    let reward_amount = position_size * (take_profit_price - current_price);

    let risk_reward_ratio = if risk_amount > Decimal::ZERO {
        reward_amount / risk_amount
    } else {
        Decimal::ZERO
    };

    let portfolio_risk_percent = if portfolio_value > Decimal::ZERO {
        risk_amount / portfolio_value * HUNDRED
    } else {
        Decimal::ZERO
    };

    let mut warnings = Vec::new();

    if portfolio_value <= Decimal::ZERO {
        warnings.push(RiskWarning::PortfolioValueZero);
    }
    if current_price <= Decimal::ZERO {
        warnings.push(RiskWarning::InvalidPrice);
    }
    if portfolio_risk_percent >= settings.risk_profile.max_portfolio_risk {
        warnings.push(RiskWarning::PortfolioRiskExceeded);
    }
    if settings.take_profit.enabled && risk_reward_ratio < Decimal::ONE {
        warnings.push(RiskWarning::PoorRiskReward {
            ratio: risk_reward_ratio,
        });
    }
    if stop_loss_price <= Decimal::ZERO {
        warnings.push(RiskWarning::StopLossNotPositive);
    }
    if settings.take_profit.enabled && take_profit_price <= current_price {
        warnings.push(RiskWarning::TakeProfitBelowEntry);
    }

    let is_valid = !warnings.iter().any(RiskWarning::is_fatal);

    // Fractional shares are not representable
    let position_size = position_size.floor().max(Decimal::ZERO);

    RiskCalculation {
        entry_price: current_price,
        stop_loss_price,
        take_profit_price,
        position_size,
        risk_amount,
        reward_amount,
        risk_reward_ratio,
        portfolio_risk_percent,
        max_position_size: position_size,
        warnings,
        is_valid,
    }
}

/// Derived stop price; 0 when the stop loss is disabled.
fn stop_loss_price(settings: &RiskSettings, current_price: Decimal) -> Decimal {
    let sl = &settings.stop_loss;
    if !sl.enabled {
        return Decimal::ZERO;
    }
    match sl.kind {
        ThresholdKind::Percentage => current_price * (Decimal::ONE - sl.value / HUNDRED),
        ThresholdKind::Fixed => current_price - sl.value,
    }
}

/// Derived target price; 0 when the take profit is disabled.
fn take_profit_price(settings: &RiskSettings, current_price: Decimal) -> Decimal {
    let tp = &settings.take_profit;
    if !tp.enabled {
        return Decimal::ZERO;
    }
    match tp.kind {
        ThresholdKind::Percentage => current_price * (Decimal::ONE + tp.value / HUNDRED),
        ThresholdKind::Fixed => current_price + tp.value,
    }
}

/// Position size before flooring. An undefined risk per share (stop at or
/// above the entry) cannot size a position and yields zero.
fn raw_position_size(
    settings: &RiskSettings,
    current_price: Decimal,
    portfolio_value: Decimal,
    stop_loss_price: Decimal,
) -> Decimal {
    let sizing = &settings.position_sizing;
    match sizing.method {
        SizingMethod::Fixed => sizing.value,
        SizingMethod::Percentage => {
            if current_price > Decimal::ZERO {
                portfolio_value * sizing.value / HUNDRED / current_price
            } else {
                Decimal::ZERO
            }
        }
        SizingMethod::RiskBased => {
            let budget = portfolio_value * sizing.max_risk_per_trade / HUNDRED;
            let risk_per_share = current_price - stop_loss_price;
            if risk_per_share > Decimal::ZERO {
                budget / risk_per_share
            } else {
                Decimal::ZERO
            }
        }
    }
}

/// Ratchet a trailing stop as price moves in the trade's favor.
///
/// The stop only ever moves up, and only once the freshly derived stop has
/// advanced at least `trailing_step` past the current one. Settings without
/// an enabled trailing stop return the stop unchanged.
pub fn trail_stop_price(
    settings: &RiskSettings,
    current_stop: Decimal,
    current_price: Decimal,
) -> Decimal {
    let sl = &settings.stop_loss;
    if !sl.enabled || !sl.trailing {
        return current_stop;
    }

    let candidate = stop_loss_price(settings, current_price);
    let step = sl.trailing_step.max(Decimal::ZERO);

    if candidate > current_stop && candidate - current_stop >= step {
        candidate
    } else {
        current_stop
    }
}
