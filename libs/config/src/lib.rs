//! # Curvesim Configuration
//!
//! Typed configuration for a curve simulation run, its validation rules, and the
//! file/environment loader.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use curvesim_config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config/run.json"), None).unwrap();
//! assert!(config.is_valid());
//! ```

pub mod error;
pub mod loader;
pub mod simulation;
pub mod validation;

// Re-export commonly used types
pub use error::ConfigError;
pub use loader::{load_config, ENV_PREFIX};
pub use simulation::{PriceRange, SimulationConfig};
