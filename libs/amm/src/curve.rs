//! Curve Factory: per-asset bonding-curve coefficients from price bounds
//!
//! For an asset with balance `y`, outside bound `pa`, inside bound `pb`, start
//! price `pm` and orientation `n`:
//!
//! ```text
//! H = sqrt(pa)^n   L = sqrt(pb)^n   M = sqrt(pm)^n
//! A = H - L        B = L
//! capacity    = y·(H - L)/(M - L)   if M > L, else y
//! reserveHint = capacity/(H·L)
//! ```
//!
//! CASH uses `pa = high, pb = low, n = +1`; RISK uses `pa = low, pb = high,
//! n = -1`, which keeps `A >= 0` on both sides. A side whose capacity comes out
//! zero (an empty side) is seeded with the other side's reserve hint.

use crate::asset::{Asset, PerAsset};
use curvesim_config::{ConfigError, SimulationConfig};
use curvesim_numeric::Dec;
use serde::Serialize;
use tracing::debug;

/// Coefficients of one asset's bonding curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveParameters {
    #[serde(rename = "A")]
    pub a: Dec,
    #[serde(rename = "B")]
    pub b: Dec,
    /// Liquidity depth (the curve's y-intercept); only ever grows
    pub capacity: Dec,
}

/// Both curves plus the shared `1 - fee` factor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSet {
    pub inverse_fee: Dec,
    #[serde(flatten)]
    pub params: PerAsset<CurveParameters>,
}

/// Theoretical quote range, fixed at construction and used only for reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBounds {
    pub min_bid: Dec,
    pub max_bid: Dec,
    pub min_ask: Dec,
    pub max_ask: Dec,
}

/// Builds curves from a validated configuration
pub struct CurveFactory;

impl CurveFactory {
    /// Validate `config`, then derive both curves and the static bounds
    pub fn build(config: &SimulationConfig) -> Result<(CurveSet, PriceBounds), ConfigError> {
        config.validate()?;

        let inverse_fee = config.inverse_fee();
        if inverse_fee.is_zero() {
            return Err(ConfigError::invalid(
                "fee of 1 leaves no quotable spread (ask bounds divide by 1 - fee)",
            ));
        }

        let (mut cash, cash_hint) = derive_side(
            &config.portfolio_cash_value,
            &config.cash.high,
            &config.cash.low,
            &config.cash.start,
            Asset::Cash.orientation(),
        );
        let (mut risk, risk_hint) = derive_side(
            &config.portfolio_risk_value,
            &config.risk.low,
            &config.risk.high,
            &config.risk.start,
            Asset::Risk.orientation(),
        );

        if cash.capacity.is_zero() {
            debug!(seed = %risk_hint, "Seeding empty CASH curve from RISK");
            cash.capacity = risk_hint;
        }
        if risk.capacity.is_zero() {
            debug!(seed = %cash_hint, "Seeding empty RISK curve from CASH");
            risk.capacity = cash_hint;
        }

        let bounds = PriceBounds {
            min_bid: &config.cash.low * &inverse_fee,
            max_bid: &config.cash.high * &inverse_fee,
            min_ask: &config.risk.low / &inverse_fee,
            max_ask: &config.risk.high / &inverse_fee,
        };

        debug!(
            cash_a = %cash.a,
            cash_b = %cash.b,
            cash_capacity = %cash.capacity,
            risk_a = %risk.a,
            risk_b = %risk.b,
            risk_capacity = %risk.capacity,
            "Derived curve parameters"
        );

        Ok((
            CurveSet {
                inverse_fee,
                params: PerAsset::new(cash, risk),
            },
            bounds,
        ))
    }
}

fn derive_side(
    balance: &Dec,
    outside: &Dec,
    inside: &Dec,
    start: &Dec,
    orientation: i32,
) -> (CurveParameters, Dec) {
    let outer_root = outside.sqrt().powi(orientation);
    let inner_root = inside.sqrt().powi(orientation);
    let start_root = start.sqrt().powi(orientation);

    let capacity = if start_root > inner_root {
        balance * (&outer_root - &inner_root) / (&start_root - &inner_root)
    } else {
        balance.clone()
    };
    let reserve_hint = &capacity / (&outer_root * &inner_root);

    (
        CurveParameters {
            a: &outer_root - &inner_root,
            b: inner_root,
            capacity,
        },
        reserve_hint,
    )
}
