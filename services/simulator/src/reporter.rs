//! Tracing transcript of a simulation run

use curvesim_amm::{StepObserver, StepSnapshot, TradeAction, TradeRecord};
use curvesim_numeric::format_decimal;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Counters collected while the run progresses
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranscriptStats {
    pub steps: usize,
    pub bought: usize,
    pub sold: usize,
    pub clamped: usize,
    pub exhausted: usize,
}

/// Logs every step boundary and trade through `tracing`
#[derive(Debug, Default)]
pub struct TranscriptReporter {
    stats: TranscriptStats,
    step_started: Option<Instant>,
    elapsed: Duration,
}

impl TranscriptReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &TranscriptStats {
        &self.stats
    }

    /// Total time spent inside observed steps
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn log_summary(&self) {
        let stats = &self.stats;
        info!(
            "📊 Simulation summary: steps={}, bought={}, sold={}, clamped={}, exhausted={}, elapsed={:?}",
            stats.steps, stats.bought, stats.sold, stats.clamped, stats.exhausted, self.elapsed
        );
    }
}

impl StepObserver for TranscriptReporter {
    fn before_step(&mut self, snapshot: &StepSnapshot<'_>) {
        self.step_started = Some(Instant::now());
        debug!(
            step = snapshot.step,
            price = %snapshot.market_price,
            bid = %format_decimal(&snapshot.quote.bid),
            ask = %format_decimal(&snapshot.quote.ask),
            "Step opened"
        );
    }

    fn after_step(&mut self, snapshot: &StepSnapshot<'_>, trade: Option<&TradeRecord>) {
        let took = self
            .step_started
            .take()
            .map(|started| started.elapsed())
            .unwrap_or_default();
        self.elapsed += took;
        self.stats.steps += 1;

        let Some(trade) = trade else {
            debug!(step = snapshot.step, "No trade, market inside spread ({:?})", took);
            return;
        };

        match trade.action {
            TradeAction::Bought => self.stats.bought += 1,
            TradeAction::Sold => self.stats.sold += 1,
        }
        if trade.out_of_range.before {
            self.stats.clamped += 1;
        }
        if trade.out_of_range.after {
            self.stats.exhausted += 1;
        }

        info!(
            "🔁 Step {}: {} at {} | {} {} | {} {} | bid={} ask={} ({:?})",
            snapshot.step,
            trade.action,
            snapshot.market_price,
            trade.source,
            format_decimal(&trade.source_delta),
            trade.target,
            format_decimal(&trade.target_delta),
            format_decimal(&snapshot.quote.bid),
            format_decimal(&snapshot.quote.ask),
            took
        );
    }
}
