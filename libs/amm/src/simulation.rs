//! Simulation Driver: walks a market price path against the curves
//!
//! Per price, strictly in order: snapshot, carry forward, equilibrate,
//! re-quote, record metrics, snapshot. After the last price the seed entry of
//! every balance/fee series is dropped.

use crate::asset::{Asset, PerAsset};
use crate::curve::{CurveFactory, CurveSet};
use crate::policy::equilibrate;
use crate::quote::Quote;
use crate::report::{NullObserver, StepObserver, StepSnapshot};
use crate::state::{SimulationState, StepMetrics};
use crate::trade::TradeRecord;
use curvesim_config::{ConfigError, SimulationConfig};
use curvesim_numeric::Dec;
use serde::Serialize;
use tracing::{trace, warn};

/// Final result of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutput {
    #[serde(flatten)]
    pub state: SimulationState,
    pub curve_parameters: CurveSet,
}

/// Incremental simulation over one curve pair
pub struct Simulation<O = NullObserver> {
    curves: CurveSet,
    state: SimulationState,
    initial: PerAsset<Dec>,
    steps_completed: usize,
    observer: O,
}

impl Simulation<NullObserver> {
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        Self::with_observer(config, NullObserver)
    }
}

impl<O: StepObserver> Simulation<O> {
    pub fn with_observer(config: &SimulationConfig, observer: O) -> Result<Self, ConfigError> {
        let (curves, bounds) = CurveFactory::build(config)?;
        let initial = PerAsset::new(
            config.portfolio_cash_value.clone(),
            config.portfolio_risk_value.clone(),
        );
        Ok(Self {
            curves,
            state: SimulationState::new(initial.clone(), bounds),
            initial,
            steps_completed: 0,
            observer,
        })
    }

    /// Run a whole configuration through `observer`
    pub fn run(config: &SimulationConfig, observer: O) -> Result<SimulationOutput, ConfigError> {
        let mut simulation = Self::with_observer(config, observer)?;
        for price in &config.prices {
            simulation.step(price);
        }
        Ok(simulation.finish())
    }

    /// Advance one step at `market_price`
    ///
    /// # Panics
    /// Panics if `market_price` is not strictly positive. Prices from a
    /// validated [`SimulationConfig`] always are.
    pub fn step(&mut self, market_price: &Dec) -> Option<TradeRecord> {
        assert!(
            market_price.is_positive(),
            "market price must be positive, got {market_price}"
        );
        let step = self.steps_completed;
        let quote = self.quote();
        let snapshot = self.snapshot(step, market_price, quote.clone());
        self.observer.before_step(&snapshot);

        self.state.carry_forward();
        let trade = equilibrate(&mut self.curves, &mut self.state, &quote, market_price);

        let quote = self.quote();
        trace!(step, %market_price, bid = %quote.bid, ask = %quote.ask, "Requoted");
        if let Some(record) = trade.as_ref().filter(|record| record.out_of_range.after) {
            warn!(
                step,
                %market_price,
                asset = %record.target,
                "Liquidity exhausted, curve is out of range"
            );
        }

        let metrics = self.metrics(quote.clone(), market_price);
        self.state.record(metrics);
        self.steps_completed += 1;
        debug_assert_eq!(self.state.series_len(), self.steps_completed + 1);
        debug_assert_eq!(self.state.recorded_steps(), self.steps_completed);

        let snapshot = self.snapshot(step, market_price, quote);
        self.observer.after_step(&snapshot, trade.as_ref());
        trade
    }

    /// Quote at the current balances
    pub fn quote(&self) -> Quote {
        self.curves.quote(&self.state.balances())
    }

    pub fn curves(&self) -> &CurveSet {
        &self.curves
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Current balance of `asset`
    pub fn balance(&self, asset: Asset) -> &Dec {
        self.state.balance(asset)
    }

    /// Fee accrued so far on `asset`
    pub fn fee(&self, asset: Asset) -> &Dec {
        self.state.fee(asset)
    }

    pub fn balances(&self) -> PerAsset<Dec> {
        self.state.balances()
    }

    pub fn fees(&self) -> PerAsset<Dec> {
        self.state.fees()
    }

    pub fn steps_completed(&self) -> usize {
        self.steps_completed
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Drop the seed entries and hand back everything recorded
    pub fn finish(self) -> SimulationOutput {
        let mut state = self.state;
        state.drop_seed();
        debug_assert_eq!(state.series_len(), self.steps_completed);
        SimulationOutput {
            state,
            curve_parameters: self.curves,
        }
    }

    fn snapshot<'a>(&self, step: usize, market_price: &'a Dec, quote: Quote) -> StepSnapshot<'a> {
        StepSnapshot {
            step,
            market_price,
            quote,
            balances: self.state.balances(),
            fees: self.state.fees(),
        }
    }

    fn metrics(&self, quote: Quote, market_price: &Dec) -> StepMetrics {
        let hodl_value = &self.initial.cash + &self.initial.risk * market_price;
        let portfolio_cash_value = self.state.balance(Asset::Cash).clone();
        let portfolio_risk_value = self.state.balance(Asset::Risk) * market_price;
        let portfolio_value = &portfolio_cash_value + &portfolio_risk_value;
        let portfolio_over_hodl = Dec::from(100) * (&portfolio_value - &hodl_value) / &hodl_value;
        StepMetrics {
            quote,
            hodl_value,
            portfolio_cash_value,
            portfolio_risk_value,
            portfolio_value,
            portfolio_over_hodl,
        }
    }
}
