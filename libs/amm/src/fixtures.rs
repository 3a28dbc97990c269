//! Shared unit-test fixtures
//!
//! CASH `(0.25, 1, 1)` and RISK `(4, 16, 4)`, each holding 100, give square
//! roots that keep every pinned value exact: `A = B = 0.5` on CASH,
//! `A = B = 0.25` on RISK, and an initial quote of `[1, 4]` without fee.

use curvesim_config::{PriceRange, SimulationConfig};
use curvesim_numeric::Dec;

pub(crate) fn dec(text: &str) -> Dec {
    text.parse().expect("fixture decimal")
}

pub(crate) fn fixture_config(fee: &str) -> SimulationConfig {
    SimulationConfig {
        fee: dec(fee),
        portfolio_cash_value: dec("100"),
        portfolio_risk_value: dec("100"),
        cash: PriceRange::new(dec("0.25"), dec("1"), dec("1")),
        risk: PriceRange::new(dec("4"), dec("16"), dec("4")),
        prices: vec![dec("2")],
    }
}
