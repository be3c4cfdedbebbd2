use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ScanEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScanEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting replay...");

        let captures = self.pipeline.extract().await?;
        tracing::info!("Read {} captured responses", captures.len());

        let report = self.pipeline.transform(captures).await?;
        tracing::info!(
            "Normalized {} responses ({} fallbacks)",
            report.outcomes.len(),
            report.fallback_count
        );

        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Reports saved to: {}", output_path);

        Ok(output_path)
    }
}
