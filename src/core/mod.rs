pub mod completion;
pub mod engine;
pub mod envelope;
pub mod normalizer;
pub mod pipeline;

pub use crate::domain::model::{CapturedResponse, HealthAnalysis, ScanReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
