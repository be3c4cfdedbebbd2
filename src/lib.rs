pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::storage::LocalStorage;
pub use config::{toml_config::TomlConfig, ReplayConfig};
pub use crate::core::normalizer::{normalize, normalize_text, try_normalize};
pub use crate::core::{engine::ScanEngine, pipeline::ReplayPipeline};
pub use domain::model::{HealthAnalysis, ScoreBand};
pub use utils::error::{Result, ScanError};
