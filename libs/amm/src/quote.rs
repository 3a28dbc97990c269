//! Quote Engine: marginal bid/ask from the current curve state
//!
//! ```text
//! numerator(X)   = inverse_fee · (A·y + B·z)^2
//! denominator(X) = z^2
//! bid = numerator(CASH) / denominator(CASH)
//! ask = denominator(RISK) / numerator(RISK)
//! ```
//!
//! The ask inverts RISK's ratio because RISK's curve lives in inverse-price space.

use crate::asset::{Asset, PerAsset};
use crate::curve::CurveSet;
use curvesim_numeric::Dec;
use serde::Serialize;

/// Current marginal prices of the protocol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    /// Price at which the protocol buys RISK (sells CASH)
    pub bid: Dec,
    /// Price at which the protocol sells RISK
    pub ask: Dec,
}

impl Quote {
    /// Whether `price` lies within `[bid, ask]`
    pub fn contains(&self, price: &Dec) -> bool {
        price >= &self.bid && price <= &self.ask
    }
}

impl CurveSet {
    pub fn quote_numerator(&self, asset: Asset, balance: &Dec) -> Dec {
        let curve = &self.params[asset];
        &self.inverse_fee * (&curve.a * balance + &curve.b * &curve.capacity).square()
    }

    pub fn quote_denominator(&self, asset: Asset) -> Dec {
        self.params[asset].capacity.square()
    }

    /// Quote both sides for the given balances
    pub fn quote(&self, balances: &PerAsset<Dec>) -> Quote {
        Quote {
            bid: self.quote_numerator(Asset::Cash, &balances.cash)
                / self.quote_denominator(Asset::Cash),
            ask: self.quote_denominator(Asset::Risk)
                / self.quote_numerator(Asset::Risk, &balances.risk),
        }
    }
}
