//! # Curvesim AMM Library - Concentrated-Liquidity Bonding Curves
//!
//! ## Purpose
//!
//! Simulation engine for a two-asset market maker whose liquidity sits on a pair of
//! concentrated bonding curves. CASH is offered over one price range, RISK over
//! another; each market price in a path is arbitraged against the curves and the
//! resulting balances, fees and portfolio metrics are recorded step by step.
//!
//! ## Integration Points
//!
//! - **Input Sources**: validated [`SimulationConfig`] from `curvesim-config`
//! - **Output Destinations**: [`SimulationOutput`] (serde) and [`StepObserver`] hooks
//! - **Arithmetic**: every value is a [`Dec`] in the fixed 100-digit context
//! - **Validation**: [`CurveFactory::build`] refuses invalid configurations before any
//!   curve exists
//!
//! ## Architecture Role
//!
//! ```text
//! SimulationConfig → CurveFactory → CurveSet ─┐
//!                                             ├→ Quote → Policy → Trade Executor
//! prices[i] ────────────── Simulation::step ──┘                        │
//!                                 ↑                                    ↓
//!                           StepObserver ←──────────── SimulationState
//! ```
//!
//! See [`architecture_diagram()`] for the rendered version.
//!
//! ## Conventions
//!
//! - **Orientation**: CASH curves use prices, RISK curves inverse prices, so `A >= 0`
//! - **Capacity**: the curve intercept `z`; grows when a balance exceeds it, never shrinks
//! - **Out of range**: exhausted liquidity is reported through trade flags, never an error

pub mod asset;
pub mod curve;
pub mod policy;
pub mod quote;
pub mod report;
pub mod simulation;
pub mod state;
pub mod trade;

#[cfg(test)]
pub(crate) mod fixtures;

pub use asset::{Asset, PerAsset};
pub use curve::{CurveFactory, CurveParameters, CurveSet, PriceBounds};
pub use policy::equilibrate;
pub use quote::Quote;
pub use report::{NullObserver, ObservedStep, RecordingObserver, StepObserver, StepSnapshot};
pub use simulation::{Simulation, SimulationOutput};
pub use state::{AssetSeries, SimulationState, StepMetrics};
pub use trade::{execute_trade, OutOfRange, TradeAction, TradeRecord, TradeRequest};

/// Common types for curve calculations
pub use curvesim_config::{ConfigError, SimulationConfig};
pub use curvesim_numeric::Dec;

/// Architecture diagram showing one simulation step
#[cfg_attr(doc, aquamarine::aquamarine)]
/// ```mermaid
/// graph LR
///     subgraph Setup["⚙️ Setup"]
///         CFG[SimulationConfig]
///         VAL[Validator]
///         CF[Curve Factory]
///     end
///
///     subgraph Step["🔁 Per Price"]
///         SNAP[Before Snapshot]
///         CARRY[Carry Forward]
///         QE[Quote Engine]
///         POL[Equilibration Policy]
///         TE[Trade Executor]
///     end
///
///     subgraph Record["📈 Recording"]
///         MET[Portfolio Metrics]
///         ST[SimulationState]
///         OBS[StepObserver]
///     end
///
///     CFG --> VAL
///     VAL --> CF
///     CF --> QE
///
///     SNAP --> CARRY
///     CARRY --> POL
///     QE --> POL
///     POL --> TE
///     TE --> QE
///
///     TE --> ST
///     QE --> MET
///     MET --> ST
///     ST --> OBS
///
///     style Setup fill:#e1f5fe
///     style Step fill:#fff3e0
///     style Record fill:#e8f5e9
/// ```
pub fn architecture_diagram() {
    // Rendered by aquamarine in rustdoc
}
