#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{InputFormat, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_output_formats, validate_path, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};

/// Settings for one replay run, however they were supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayConfig {
    pub input_path: String,
    pub output_path: String,
    pub input_format: InputFormat,
    pub output_formats: Vec<OutputFormat>,
    pub max_records: Option<usize>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            input_path: "./captures".to_string(),
            output_path: "./output".to_string(),
            input_format: InputFormat::Auto,
            output_formats: vec![OutputFormat::Json, OutputFormat::Csv],
            max_records: None,
        }
    }
}

impl ConfigProvider for ReplayConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn input_format(&self) -> InputFormat {
        self.input_format
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.output_formats
    }

    fn max_records(&self) -> Option<usize> {
        self.max_records
    }
}

impl Validate for ReplayConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input.path", &self.input_path)?;
        validate_path("output.path", &self.output_path)?;
        validate_output_formats("output.formats", &self.output_formats)?;

        if let Some(max) = self.max_records {
            validate_positive_number("input.max_records", max, 1)?;
        }

        Ok(())
    }
}
