//! Configuration loading
//!
//! Loads a [`SimulationConfig`] from a JSON or TOML file, layers an optional
//! environment-specific overlay and `CURVESIM__*` environment variables on top,
//! then validates the result.

use crate::simulation::SimulationConfig;
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Prefix for environment variable overrides (`CURVESIM__FEE=0.002`)
pub const ENV_PREFIX: &str = "CURVESIM";

impl SimulationConfig {
    /// Load configuration from a file with environment overrides
    ///
    /// The overlay for `environment` is looked up as
    /// `<config dir>/environments/<environment>.{json,toml}`.
    pub fn load(path: &Path, environment: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder().add_source(File::from(path).required(true));

        if let Some(env) = environment {
            match find_overlay(path, env) {
                Some(overlay) => {
                    info!("Loading environment config: {:?}", overlay);
                    builder = builder.add_source(File::from(overlay));
                }
                None => warn!("Environment config not found for '{}'", env),
            }
        }

        // String values only: decimals must never pass through a float parse
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

        let config = builder
            .build()
            .with_context(|| format!("Failed to build configuration from {:?}", path))?;

        let simulation: Self = config
            .try_deserialize()
            .context("Failed to deserialize simulation configuration")?;
        debug!(steps = simulation.prices.len(), "Loaded simulation configuration");
        Ok(simulation)
    }

    /// Parse configuration from an in-memory JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Config::builder()
            .add_source(File::from_str(json, FileFormat::Json))
            .build()
            .context("Failed to parse JSON configuration")?
            .try_deserialize()
            .context("Failed to deserialize simulation configuration")
    }
}

fn find_overlay(base: &Path, environment: &str) -> Option<PathBuf> {
    let dir = base.parent().unwrap_or_else(|| Path::new("."));
    ["json", "toml"]
        .iter()
        .map(|ext| dir.join("environments").join(format!("{environment}.{ext}")))
        .find(|candidate| candidate.exists())
}

/// Convenience function: load, then validate
pub fn load_config(path: &Path, environment: Option<&str>) -> Result<SimulationConfig> {
    let config = SimulationConfig::load(path, environment)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use curvesim_numeric::Dec;
    use std::fs;
    use tempfile::tempdir;

    const BASE_JSON: &str = r#"{
        "fee": "0.002",
        "portfolio_cash_value": "1000",
        "portfolio_risk_value": "0",
        "cash": { "low": "0.5", "high": "1", "start": "0.75" },
        "risk": { "low": "1", "high": "2", "start": "1" },
        "prices": ["1", "1.25", "0.6"]
    }"#;

    fn dec(text: &str) -> Dec {
        text.parse().unwrap()
    }

    #[test]
    fn test_load_json_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, BASE_JSON).unwrap();

        let config = SimulationConfig::load(&path, None).unwrap();

        assert_eq!(config.fee, dec("0.002"));
        assert_eq!(config.portfolio_risk_value, Dec::zero());
        assert_eq!(config.cash.start, dec("0.75"));
        assert_eq!(config.prices, vec![dec("1"), dec("1.25"), dec("0.6")]);
        assert!(config.is_valid());
    }

    #[test]
    fn test_environment_overlay_overrides_base() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, BASE_JSON).unwrap();
        fs::create_dir(dir.path().join("environments")).unwrap();
        fs::write(
            dir.path().join("environments").join("stress.json"),
            r#"{ "fee": "0.01" }"#,
        )
        .unwrap();

        let config = SimulationConfig::load(&path, Some("stress")).unwrap();
        assert_eq!(config.fee, dec("0.01"));
        assert_eq!(config.portfolio_cash_value, dec("1000"));

        // Unknown environments fall back to the base file
        let config = SimulationConfig::load(&path, Some("missing")).unwrap();
        assert_eq!(config.fee, dec("0.002"));
    }

    #[test]
    fn test_from_json_str() {
        let config = SimulationConfig::from_json_str(BASE_JSON).unwrap();
        assert_eq!(config.risk.high, dec("2"));
    }

    #[test]
    fn test_float_values_are_refused() {
        let json = BASE_JSON.replace("\"0.002\"", "0.002");
        let error = SimulationConfig::from_json_str(&json).unwrap_err();
        assert!(format!("{error:#}").contains("Illegal value"));
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, BASE_JSON.replace("\"0.6\"", "\"0\"")).unwrap();

        let error = load_config(&path, None).unwrap_err();
        assert!(error.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(SimulationConfig::load(&dir.path().join("absent.json"), None).is_err());
    }
}
