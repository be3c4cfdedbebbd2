use crate::core::completion::raw_response_from_text;
use crate::core::normalizer::try_normalize;
use crate::core::{CapturedResponse, ConfigProvider, Pipeline, ScanReport, Storage};
use crate::domain::model::{OutputFormat, ScanOutcome};
use crate::utils::error::{Result, ScanError};
use std::path::Path;

const CAPTURE_EXTENSIONS: [&str; 3] = ["json", "txt", "md"];

/// Replays captured model responses through the normalizer.
pub struct ReplayPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReplayPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Capture files a replay would read: known extensions only, sorted by
    /// name and capped at `max_records`.
    pub async fn pending_captures(&self) -> Result<Vec<String>> {
        let input_path = self.config.input_path();
        tracing::debug!("Listing captures under: {}", input_path);

        let mut files: Vec<String> = self
            .storage
            .list_files(input_path)
            .await?
            .into_iter()
            .filter(|path| is_capture_file(path))
            .collect();
        files.sort();

        if let Some(max) = self.config.max_records() {
            if files.len() > max {
                tracing::info!("Limiting replay to the first {} of {} captures", max, files.len());
                files.truncate(max);
            }
        }

        Ok(files)
    }

    fn analyze(&self, capture: &CapturedResponse) -> ScanOutcome {
        let raw = match raw_response_from_text(&capture.body, self.config.input_format()) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Skipping analysis of {}: {}", capture.source, e);
                return ScanOutcome::fallback(&capture.source);
            }
        };

        match try_normalize(&raw) {
            Ok(analysis) => {
                tracing::debug!("{} scored {}/10", capture.source, analysis.score);
                ScanOutcome::analyzed(&capture.source, analysis)
            }
            Err(e) => {
                tracing::warn!("Failed to parse health analysis in {}: {}", capture.source, e);
                ScanOutcome::fallback(&capture.source)
            }
        }
    }
}

fn is_capture_file(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            CAPTURE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

fn render_csv(report: &ScanReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["source", "score", "band", "pros", "cons"])?;

    for outcome in &report.outcomes {
        let score = outcome.analysis.score.to_string();
        let band = outcome.band.to_string();
        let pros = outcome.analysis.pros.join("; ");
        let cons = outcome.analysis.cons.join("; ");
        writer.write_record([
            outcome.source.as_str(),
            score.as_str(),
            band.as_str(),
            pros.as_str(),
            cons.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ScanError::IoError(e.into_error()))
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReplayPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<CapturedResponse>> {
        let input_path = self.config.input_path();
        let files = self.pending_captures().await?;

        let mut captures = Vec::with_capacity(files.len());
        for path in files {
            let data = self.storage.read_file(&path).await?;
            captures.push(CapturedResponse {
                body: String::from_utf8_lossy(&data).into_owned(),
                source: path,
            });
        }

        if captures.is_empty() {
            tracing::warn!("No captures found under {}", input_path);
        }

        Ok(captures)
    }

    async fn transform(&self, data: Vec<CapturedResponse>) -> Result<ScanReport> {
        let outcomes: Vec<ScanOutcome> = data.iter().map(|capture| self.analyze(capture)).collect();
        let report = ScanReport::new(outcomes);

        if report.fallback_count > 0 {
            tracing::warn!(
                "{} of {} captures fell back to the neutral analysis",
                report.fallback_count,
                report.outcomes.len()
            );
        }

        Ok(report)
    }

    async fn load(&self, report: ScanReport) -> Result<String> {
        let output_path = self.config.output_path();

        for format in self.config.output_formats() {
            let data = match format {
                OutputFormat::Json => serde_json::to_vec_pretty(&report)?,
                OutputFormat::Csv => render_csv(&report)?,
            };

            let path = Path::new(output_path)
                .join(format.file_name())
                .to_string_lossy()
                .into_owned();
            tracing::debug!("Writing {} report ({} bytes) to {}", format, data.len(), path);
            self.storage.write_file(&path, &data).await?;
        }

        Ok(output_path.to_string())
    }
}
