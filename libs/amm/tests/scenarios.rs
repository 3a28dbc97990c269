//! End-to-end simulation scenarios

use curvesim_amm::{
    Asset, NullObserver, RecordingObserver, Simulation, SimulationConfig, TradeAction,
};
use curvesim_config::PriceRange;
use curvesim_numeric::Dec;

fn dec(text: &str) -> Dec {
    text.parse().unwrap()
}

fn range(low: &str, high: &str, start: &str) -> PriceRange {
    PriceRange::new(dec(low), dec(high), dec(start))
}

fn config(
    fee: &str,
    balances: (&str, &str),
    cash: PriceRange,
    risk: PriceRange,
    prices: &[&str],
) -> SimulationConfig {
    SimulationConfig {
        fee: dec(fee),
        portfolio_cash_value: dec(balances.0),
        portfolio_risk_value: dec(balances.1),
        cash,
        risk,
        prices: prices.iter().map(|price| dec(price)).collect(),
    }
}

/// |a - b| < 10^-80
fn assert_close(actual: &Dec, expected: &Dec) {
    let tolerance = Dec::one() / Dec::from(10).powi(80);
    assert!(
        (actual - expected).abs() < tolerance,
        "{actual} differs from {expected}"
    );
}

#[test]
fn test_price_inside_spread_keeps_portfolio() {
    let config = config(
        "0",
        ("1000", "1000"),
        range("0.5", "1", "0.75"),
        range("1", "2", "1.5"),
        &["1"],
    );

    let output = Simulation::run(&config, NullObserver).unwrap();

    assert_eq!(output.state.assets.cash.balance, vec![dec("1000")]);
    assert_eq!(output.state.assets.risk.balance, vec![dec("1000")]);
    assert_eq!(output.state.hodl_value, vec![dec("2000")]);
    assert_eq!(output.state.portfolio_over_hodl, vec![Dec::zero()]);
    // Start prices set the initial quote
    assert_close(&output.state.bid[0], &dec("0.75"));
    assert_close(&output.state.ask[0], &dec("1.5"));
}

#[test]
fn test_crossed_ranges_buy_out_risk() {
    // Bid (~1.5) sits above ask (~0.75): any price above the ask buys RISK
    let config = config(
        "0",
        ("1000", "1000"),
        range("1", "2", "1.5"),
        range("0.5", "1", "0.75"),
        &["1.5"],
    );
    let mut observer = RecordingObserver::new();

    let output = Simulation::run(&config, &mut observer).unwrap();

    let trade = observer.steps[0].trade.as_ref().unwrap();
    assert_eq!(trade.action, TradeAction::Bought);
    assert_eq!(trade.target, Asset::Risk);
    assert!(trade.out_of_range.before);
    assert!(trade.out_of_range.after);
    assert!(output.state.assets.risk.balance[0].is_zero());
    assert!(output.state.assets.cash.balance[0] > dec("1000"));
}

#[test]
fn test_trades_move_quotes_to_market() {
    let config = config(
        "0.001",
        ("1000", "1000"),
        range("0.5", "1", "0.75"),
        range("1", "2", "1.5"),
        &["1", "1.6", "0.7"],
    );
    let mut simulation = Simulation::new(&config).unwrap();

    assert!(simulation.step(&dec("1")).is_none());

    let bought = simulation.step(&dec("1.6")).unwrap();
    assert_eq!(bought.action, TradeAction::Bought);
    assert!(!bought.out_of_range.before);
    assert_close(&simulation.quote().ask, &dec("1.6"));
    // 0.1% of the RISK drawn down is kept as fee
    assert_close(
        simulation.fee(Asset::Risk),
        &(-&bought.target_delta * dec("0.001")),
    );

    let sold = simulation.step(&dec("0.7")).unwrap();
    assert_eq!(sold.action, TradeAction::Sold);
    assert!(!sold.out_of_range.before);
    assert_close(&simulation.quote().bid, &dec("0.7"));

    let output = simulation.finish();
    assert_eq!(output.state.bid.len(), 3);
    assert_eq!(output.state.assets.cash.fee.len(), 3);
}

#[test]
fn test_single_sided_cash_portfolio() {
    let config = config(
        "0",
        ("1000", "0"),
        range("0.5", "1", "0.75"),
        range("1", "2", "1.5"),
        &["1", "0.6"],
    );
    let mut simulation = Simulation::new(&config).unwrap();

    // Empty RISK curve quotes its high bound
    assert_close(&simulation.quote().ask, &dec("2"));
    assert!(simulation.curves().params[Asset::Risk].capacity.is_positive());

    assert!(simulation.step(&dec("1")).is_none());
    let sold = simulation.step(&dec("0.6")).unwrap();

    assert_eq!(sold.target, Asset::Cash);
    assert!(simulation.balance(Asset::Risk).is_positive());
    assert!(simulation.balance(Asset::Cash) < &dec("1000"));
    assert_close(&simulation.quote().bid, &dec("0.6"));
}

#[test]
fn test_output_json_layout() {
    let config = config(
        "0.001",
        ("1000", "1000"),
        range("0.5", "1", "0.75"),
        range("1", "2", "1.5"),
        &["1", "1.6"],
    );

    let output = Simulation::run(&config, NullObserver).unwrap();
    let json = serde_json::to_value(&output).unwrap();

    for key in [
        "min_bid",
        "max_bid",
        "min_ask",
        "max_ask",
        "bid",
        "ask",
        "hodl_value",
        "portfolio_cash_value",
        "portfolio_risk_value",
        "portfolio_value",
        "portfolio_over_hodl",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["CASH"]["balance"][0], "1000");
    assert_eq!(json["RISK"]["fee"].as_array().unwrap().len(), 2);
    assert_eq!(json["min_bid"], "0.4995");
    assert_eq!(json["curve_parameters"]["inverse_fee"], "0.999");
    assert!(json["curve_parameters"]["CASH"]["A"].is_string());

    // At most 18 fractional digits at the boundary
    let ask = json["ask"][0].as_str().unwrap();
    let fraction = ask.split('.').nth(1).unwrap_or("");
    assert!(fraction.len() <= 18, "{ask}");
}
