//! Trade Executor: exact equilibrating trade against one curve
//!
//! Given a market price `P`, the target asset's balance delta that moves its
//! marginal price to exactly `P` is
//!
//! ```text
//! dy = z·(sqrt(P·φ) - B·u·φ)/(A·u·φ) - y      (A > 0)
//! dy = -y                                      (A = 0)
//! ```
//!
//! with `φ = 1 - fee` and `u` the unit price (market price when buying RISK, 1
//! when selling). A `dy` that would overdraw the target is clamped to `-y`.
//! The source delta then follows from the curve identity
//!
//! ```text
//! dx = -dy·z^2 / (A·dy·(A·y + B·z) + (A·y + B·z)^2)
//! ```

use crate::asset::Asset;
use crate::curve::CurveSet;
use crate::state::SimulationState;
use curvesim_numeric::Dec;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Direction of an equilibrating trade, from the arbitrageur's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    /// RISK bought from the protocol with CASH
    Bought,
    /// RISK sold to the protocol for CASH
    Sold,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Bought => f.write_str("bought"),
            TradeAction::Sold => f.write_str("sold"),
        }
    }
}

/// Liquidity flags of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OutOfRange {
    /// The solved trade exceeded the target balance and was clamped
    pub before: bool,
    /// The target balance is exactly zero after the trade
    pub after: bool,
}

/// What a trade did, for reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub action: TradeAction,
    /// Asset flowing into the protocol
    pub source: Asset,
    /// Asset the trade draws from the protocol
    pub target: Asset,
    pub source_delta: Dec,
    pub target_delta: Dec,
    pub out_of_range: OutOfRange,
}

/// Parameters of one trade
#[derive(Debug, Clone, Copy)]
pub struct TradeRequest<'a> {
    pub source: Asset,
    pub target: Asset,
    pub market_price: &'a Dec,
    pub unit_price: &'a Dec,
    pub action: TradeAction,
}

/// Solve, clamp and apply a trade to the latest balance/fee slots of `state`
///
/// Mutations: both balances, the target's fee accrual, and the source curve's
/// capacity when the new source balance exceeds it.
pub fn execute_trade(
    curves: &mut CurveSet,
    state: &mut SimulationState,
    request: TradeRequest<'_>,
) -> TradeRecord {
    let TradeRequest {
        source,
        target,
        market_price,
        unit_price,
        action,
    } = request;
    let inverse_fee = curves.inverse_fee.clone();
    let curve = curves.params[target].clone();
    let held = state.balance(target).clone();

    let mut out_of_range = OutOfRange::default();
    let mut target_delta = if curve.a.is_positive() {
        let reach = (market_price * &inverse_fee).sqrt() - &curve.b * unit_price * &inverse_fee;
        &curve.capacity * reach / (&curve.a * unit_price * &inverse_fee) - &held
    } else {
        -&held
    };

    let floor = -&held;
    if target_delta < floor {
        debug!(
            %target,
            solved = %target_delta,
            available = %held,
            "Trade exceeds available liquidity, clamping"
        );
        target_delta = floor;
        out_of_range.before = true;
    }

    let depth = &curve.a * &held + &curve.b * &curve.capacity;
    let source_delta = -&target_delta * curve.capacity.square()
        / (&curve.a * &target_delta * &depth + depth.square());

    *state.balance_mut(source) += &source_delta;
    *state.balance_mut(target) += &target_delta;
    *state.fee_mut(target) -= &target_delta * (Dec::one() - &inverse_fee);

    let source_balance = state.balance(source).clone();
    let source_curve = &mut curves.params[source];
    if source_balance > source_curve.capacity {
        debug!(%source, capacity = %source_balance, "Raising curve capacity");
        source_curve.capacity = source_balance;
    }

    out_of_range.after = state.balance(target).is_zero();

    debug!(
        %action,
        %source_delta,
        %target_delta,
        clamped = out_of_range.before,
        exhausted = out_of_range.after,
        "Executed trade"
    );

    TradeRecord {
        action,
        source,
        target,
        source_delta,
        target_delta,
        out_of_range,
    }
}
