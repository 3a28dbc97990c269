//! Step observation hooks
//!
//! The driver hands a [`StepSnapshot`] to its [`StepObserver`] before and after
//! every step. Observers only read; nothing they do feeds back into the run.

use crate::asset::PerAsset;
use crate::quote::Quote;
use crate::trade::TradeRecord;
use curvesim_numeric::Dec;

/// Protocol state visible to observers at a step boundary
#[derive(Debug, Clone, PartialEq)]
pub struct StepSnapshot<'a> {
    /// Zero-based step index
    pub step: usize,
    pub market_price: &'a Dec,
    pub quote: Quote,
    pub balances: PerAsset<Dec>,
    pub fees: PerAsset<Dec>,
}

/// Receives step boundaries from a running simulation
pub trait StepObserver {
    fn before_step(&mut self, _snapshot: &StepSnapshot<'_>) {}

    /// `trade` is `None` when the market price was inside the spread
    fn after_step(&mut self, _snapshot: &StepSnapshot<'_>, _trade: Option<&TradeRecord>) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl StepObserver for NullObserver {}

impl<T: StepObserver + ?Sized> StepObserver for &mut T {
    fn before_step(&mut self, snapshot: &StepSnapshot<'_>) {
        (**self).before_step(snapshot);
    }

    fn after_step(&mut self, snapshot: &StepSnapshot<'_>, trade: Option<&TradeRecord>) {
        (**self).after_step(snapshot, trade);
    }
}

/// One observed step, owned
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedStep {
    pub step: usize,
    pub market_price: Dec,
    pub before: Quote,
    pub after: Quote,
    pub balances: PerAsset<Dec>,
    pub trade: Option<TradeRecord>,
}

/// Observer that keeps every step in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pending: Option<Quote>,
    pub steps: Vec<ObservedStep>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trades(&self) -> impl Iterator<Item = &TradeRecord> {
        self.steps.iter().filter_map(|step| step.trade.as_ref())
    }
}

impl StepObserver for RecordingObserver {
    fn before_step(&mut self, snapshot: &StepSnapshot<'_>) {
        self.pending = Some(snapshot.quote.clone());
    }

    fn after_step(&mut self, snapshot: &StepSnapshot<'_>, trade: Option<&TradeRecord>) {
        let after = snapshot.quote.clone();
        self.steps.push(ObservedStep {
            step: snapshot.step,
            market_price: snapshot.market_price.clone(),
            before: self.pending.take().unwrap_or_else(|| after.clone()),
            after,
            balances: snapshot.balances.clone(),
            trade: trade.cloned(),
        });
    }
}
