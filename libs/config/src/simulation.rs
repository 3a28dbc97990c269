//! Typed simulation configuration record

use curvesim_numeric::Dec;
use serde::{Deserialize, Serialize};

/// Active price range for one side of the curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: Dec,
    pub high: Dec,
    /// Marginal price the curve starts at
    pub start: Dec,
}

impl PriceRange {
    pub fn new(low: Dec, high: Dec, start: Dec) -> Self {
        Self { low, high, start }
    }

    /// Zero-width range (`low == high`)
    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }
}

/// Complete input for one simulation run
///
/// Every decimal crosses the boundary as a string; see
/// [`curvesim_numeric::codec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Protocol fee in `[0, 1]`
    pub fee: Dec,
    /// Initial CASH balance
    pub portfolio_cash_value: Dec,
    /// Initial RISK balance
    pub portfolio_risk_value: Dec,
    /// Range over which the protocol bids for RISK with its CASH
    pub cash: PriceRange,
    /// Range over which the protocol asks for CASH with its RISK
    pub risk: PriceRange,
    /// External market price path, one entry per simulation step
    pub prices: Vec<Dec>,
}

impl SimulationConfig {
    /// `1 - fee`
    pub fn inverse_fee(&self) -> Dec {
        Dec::one() - &self.fee
    }
}
