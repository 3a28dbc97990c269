//! Equilibration policy
//!
//! A market price above the ask means arbitrageurs buy RISK from the protocol
//! until the ask meets the market; below the bid they sell RISK until the bid
//! meets it. Inside `[bid, ask]` (bounds included) nothing trades.

use crate::asset::Asset;
use crate::curve::CurveSet;
use crate::quote::Quote;
use crate::state::SimulationState;
use crate::trade::{execute_trade, TradeAction, TradeRecord, TradeRequest};
use curvesim_numeric::Dec;
use tracing::trace;

/// Trade against the curves if `market_price` lies outside `quote`
pub fn equilibrate(
    curves: &mut CurveSet,
    state: &mut SimulationState,
    quote: &Quote,
    market_price: &Dec,
) -> Option<TradeRecord> {
    let one = Dec::one();
    let request = if market_price > &quote.ask {
        TradeRequest {
            source: Asset::Cash,
            target: Asset::Risk,
            market_price,
            unit_price: market_price,
            action: TradeAction::Bought,
        }
    } else if market_price < &quote.bid {
        TradeRequest {
            source: Asset::Risk,
            target: Asset::Cash,
            market_price,
            unit_price: &one,
            action: TradeAction::Sold,
        }
    } else {
        trace!(%market_price, bid = %quote.bid, ask = %quote.ask, "Market inside spread");
        return None;
    };

    Some(execute_trade(curves, state, request))
}
