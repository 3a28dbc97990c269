//! Simulation state: balance/fee series and derived per-step metrics
//!
//! Balance and fee series start with one seed entry. Each step first carries the
//! latest entry forward, so a trade writes into a fresh slot; after the run the
//! seed is dropped. While running, every balance/fee series therefore holds
//! `steps + 1` entries, and `steps` entries once trimmed.

use crate::asset::{Asset, PerAsset};
use crate::curve::PriceBounds;
use crate::quote::Quote;
use curvesim_numeric::Dec;
use serde::Serialize;

/// Balance and accrued protocol fee history for one asset
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AssetSeries {
    pub balance: Vec<Dec>,
    pub fee: Vec<Dec>,
}

impl AssetSeries {
    fn seeded(balance: Dec) -> Self {
        Self {
            balance: vec![balance],
            fee: vec![Dec::zero()],
        }
    }

    fn carry_forward(&mut self) {
        if let Some(last) = self.balance.last().cloned() {
            self.balance.push(last);
        }
        if let Some(last) = self.fee.last().cloned() {
            self.fee.push(last);
        }
    }

    fn drop_seed(&mut self) {
        if !self.balance.is_empty() {
            self.balance.remove(0);
        }
        if !self.fee.is_empty() {
            self.fee.remove(0);
        }
    }
}

/// Portfolio metrics recorded after a step settles
#[derive(Debug, Clone, PartialEq)]
pub struct StepMetrics {
    pub quote: Quote,
    pub hodl_value: Dec,
    pub portfolio_cash_value: Dec,
    pub portfolio_risk_value: Dec,
    pub portfolio_value: Dec,
    pub portfolio_over_hodl: Dec,
}

/// Everything a run records, owned by the simulation driver
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationState {
    #[serde(flatten)]
    pub assets: PerAsset<AssetSeries>,
    #[serde(flatten)]
    pub bounds: PriceBounds,
    pub bid: Vec<Dec>,
    pub ask: Vec<Dec>,
    pub hodl_value: Vec<Dec>,
    pub portfolio_cash_value: Vec<Dec>,
    pub portfolio_risk_value: Vec<Dec>,
    pub portfolio_value: Vec<Dec>,
    pub portfolio_over_hodl: Vec<Dec>,
}

impl SimulationState {
    pub fn new(initial: PerAsset<Dec>, bounds: PriceBounds) -> Self {
        Self {
            assets: initial.map(|_, balance| AssetSeries::seeded(balance)),
            bounds,
            bid: Vec::new(),
            ask: Vec::new(),
            hodl_value: Vec::new(),
            portfolio_cash_value: Vec::new(),
            portfolio_risk_value: Vec::new(),
            portfolio_value: Vec::new(),
            portfolio_over_hodl: Vec::new(),
        }
    }

    // Latest-entry accessors exist only while a run holds its seed entry;
    // `Simulation` exposes them publicly and consumes itself before the trim.

    pub(crate) fn balance(&self, asset: Asset) -> &Dec {
        self.assets[asset]
            .balance
            .last()
            .expect("balance series holds its seed until the run is trimmed")
    }

    pub(crate) fn balance_mut(&mut self, asset: Asset) -> &mut Dec {
        self.assets[asset]
            .balance
            .last_mut()
            .expect("balance series holds its seed until the run is trimmed")
    }

    pub(crate) fn fee(&self, asset: Asset) -> &Dec {
        self.assets[asset]
            .fee
            .last()
            .expect("fee series holds its seed until the run is trimmed")
    }

    pub(crate) fn fee_mut(&mut self, asset: Asset) -> &mut Dec {
        self.assets[asset]
            .fee
            .last_mut()
            .expect("fee series holds its seed until the run is trimmed")
    }

    pub(crate) fn balances(&self) -> PerAsset<Dec> {
        PerAsset::from_fn(|asset| self.balance(asset).clone())
    }

    pub(crate) fn fees(&self) -> PerAsset<Dec> {
        PerAsset::from_fn(|asset| self.fee(asset).clone())
    }

    /// Last recorded balance of `asset`; `None` once a zero-step run is trimmed
    pub fn latest_balance(&self, asset: Asset) -> Option<&Dec> {
        self.assets[asset].balance.last()
    }

    /// Last recorded fee of `asset`; `None` once a zero-step run is trimmed
    pub fn latest_fee(&self, asset: Asset) -> Option<&Dec> {
        self.assets[asset].fee.last()
    }

    /// Duplicate the latest balance/fee entries so this step's trade has a slot
    pub fn carry_forward(&mut self) {
        self.assets.cash.carry_forward();
        self.assets.risk.carry_forward();
    }

    pub fn record(&mut self, metrics: StepMetrics) {
        self.bid.push(metrics.quote.bid);
        self.ask.push(metrics.quote.ask);
        self.hodl_value.push(metrics.hodl_value);
        self.portfolio_cash_value.push(metrics.portfolio_cash_value);
        self.portfolio_risk_value.push(metrics.portfolio_risk_value);
        self.portfolio_value.push(metrics.portfolio_value);
        self.portfolio_over_hodl.push(metrics.portfolio_over_hodl);
    }

    /// Remove the seed entry from every balance/fee series
    pub fn drop_seed(&mut self) {
        self.assets.cash.drop_seed();
        self.assets.risk.drop_seed();
    }

    /// Length of the balance/fee series (identical across assets)
    pub fn series_len(&self) -> usize {
        self.assets.cash.balance.len()
    }

    /// Number of steps whose metrics have been recorded
    pub fn recorded_steps(&self) -> usize {
        self.bid.len()
    }
}
