pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::clock::{FixedClock, SystemClock};
pub use config::{toml_config::TomlConfig, ServerConfig};
pub use crate::core::engine::CardEngine;
pub use domain::model::{CardDetails, CardType, HealthStatus, NormalizedDigits};
pub use utils::error::{AppError, CardError, Result};
