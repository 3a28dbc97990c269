//! Simulation Property Tests
//!
//! Invariants that must hold for every valid configuration and price path.

use curvesim_amm::{Asset, PerAsset, RecordingObserver, Simulation, SimulationConfig};
use curvesim_config::PriceRange;
use curvesim_numeric::Dec;
use proptest::prelude::*;

/// Hundredths, so generated values stay short decimal strings
fn hundredths(value: u32) -> Dec {
    Dec::from(value) / Dec::from(100)
}

/// `[low, low + width]` with the start at one of five evenly spaced points
fn price_range() -> impl Strategy<Value = PriceRange> {
    (10u32..=300, 0u32..=300, 0u32..=4).prop_map(|(low, width, quarter)| {
        let low = hundredths(low);
        let width = hundredths(width);
        let start = &low + &width * Dec::from(quarter) / Dec::from(4);
        PriceRange::new(low.clone(), &low + &width, start)
    })
}

fn simulation_config() -> impl Strategy<Value = SimulationConfig> {
    (
        0u32..=50,
        0u32..=5_000,
        0u32..=5_000,
        price_range(),
        price_range(),
        prop::collection::vec(5u32..=800, 1..12),
    )
        .prop_map(|(fee, cash, risk, cash_range, risk_range, prices)| SimulationConfig {
            fee: Dec::from(fee) / Dec::from(1000),
            portfolio_cash_value: Dec::from(cash),
            portfolio_risk_value: Dec::from(risk),
            cash: cash_range,
            risk: risk_range,
            prices: prices.into_iter().map(hundredths).collect(),
        })
        .prop_filter("configuration must validate", SimulationConfig::is_valid)
}

/// Rounding residue allowed when a price repeats right at the quote
fn residue() -> Dec {
    Dec::one() / Dec::from(10).powi(80)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_balances_never_negative(config in simulation_config()) {
        let output = Simulation::run(&config, RecordingObserver::new()).unwrap();
        let floor = -residue();
        for asset in Asset::ALL {
            for balance in &output.state.assets[asset].balance {
                prop_assert!(balance >= &floor, "{} balance {}", asset, balance);
            }
        }
    }

    #[test]
    fn prop_capacity_never_decreases(config in simulation_config()) {
        let mut simulation = Simulation::new(&config).unwrap();
        let mut previous: PerAsset<Dec> =
            PerAsset::from_fn(|asset| simulation.curves().params[asset].capacity.clone());
        for price in &config.prices {
            simulation.step(price);
            for asset in Asset::ALL {
                let capacity = &simulation.curves().params[asset].capacity;
                prop_assert!(capacity >= &previous[asset]);
                previous[asset] = capacity.clone();
            }
        }
    }

    #[test]
    fn prop_series_match_price_path(config in simulation_config()) {
        let steps = config.prices.len();
        let output = Simulation::run(&config, RecordingObserver::new()).unwrap();
        let state = &output.state;
        for asset in Asset::ALL {
            prop_assert_eq!(state.assets[asset].balance.len(), steps);
            prop_assert_eq!(state.assets[asset].fee.len(), steps);
        }
        for series in [
            &state.bid,
            &state.ask,
            &state.hodl_value,
            &state.portfolio_cash_value,
            &state.portfolio_risk_value,
            &state.portfolio_value,
            &state.portfolio_over_hodl,
        ] {
            prop_assert_eq!(series.len(), steps);
        }
    }

    #[test]
    fn prop_quiet_steps_leave_balances(config in simulation_config()) {
        let mut simulation = Simulation::new(&config).unwrap();
        for price in &config.prices {
            let balances = simulation.balances();
            let fees = simulation.fees();
            if simulation.step(price).is_none() {
                prop_assert_eq!(simulation.balances(), balances);
                prop_assert_eq!(simulation.fees(), fees);
            }
        }
    }

    #[test]
    fn prop_trades_follow_the_market(config in simulation_config()) {
        let mut simulation = Simulation::new(&config).unwrap();
        let tolerance = residue();
        for price in &config.prices {
            let quote = simulation.quote();
            match simulation.step(price) {
                Some(trade) => {
                    prop_assert!(!quote.contains(price));
                    prop_assert!(trade.target_delta <= tolerance);
                    prop_assert_eq!(trade.target, trade.source.other());
                }
                None => prop_assert!(quote.contains(price)),
            }
        }
    }
}
