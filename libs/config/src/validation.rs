//! Configuration validation
//!
//! All-or-nothing: a configuration is either valid as a whole or rejected with
//! the first rule it breaks. No curve may be constructed from a rejected config.

use crate::error::ConfigError;
use crate::simulation::{PriceRange, SimulationConfig};
use curvesim_numeric::Dec;

impl PriceRange {
    /// `0 < low <= start <= high`
    fn validate(&self, side: &str) -> Result<(), ConfigError> {
        if !self.low.is_positive() {
            return Err(ConfigError::invalid(format!(
                "{side} low price {} must be positive",
                self.low
            )));
        }
        if self.start < self.low || self.start > self.high {
            return Err(ConfigError::invalid(format!(
                "{side} start price {} outside [{}, {}]",
                self.start, self.low, self.high
            )));
        }
        Ok(())
    }
}

impl SimulationConfig {
    /// Check every range, balance and price invariant
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fee.is_negative() || self.fee > Dec::one() {
            return Err(ConfigError::invalid(format!(
                "fee {} outside [0, 1]",
                self.fee
            )));
        }

        if self.portfolio_cash_value.is_negative() || self.portfolio_risk_value.is_negative() {
            return Err(ConfigError::invalid(format!(
                "balances must be non-negative (CASH {}, RISK {})",
                self.portfolio_cash_value, self.portfolio_risk_value
            )));
        }
        if !(&self.portfolio_cash_value + &self.portfolio_risk_value).is_positive() {
            return Err(ConfigError::invalid("portfolio holds no CASH and no RISK"));
        }

        self.cash.validate("CASH")?;
        self.risk.validate("RISK")?;

        // An empty side must not start on the bound its curve grows from
        if self.portfolio_cash_value.is_zero()
            && !(self.cash.is_degenerate() || self.cash.start != self.cash.low)
        {
            return Err(ConfigError::invalid(
                "empty CASH side cannot start at its low price",
            ));
        }
        if self.portfolio_risk_value.is_zero()
            && !(self.risk.is_degenerate() || self.risk.start != self.risk.high)
        {
            return Err(ConfigError::invalid(
                "empty RISK side cannot start at its high price",
            ));
        }

        if let Some((step, price)) = self
            .prices
            .iter()
            .enumerate()
            .find(|(_, price)| !price.is_positive())
        {
            return Err(ConfigError::invalid(format!(
                "market price {price} at step {step} must be positive"
            )));
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
