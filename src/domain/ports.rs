use crate::domain::model::{CapturedResponse, InputFormat, OutputFormat, ScanReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// Names of the files directly under `dir`, relative to the storage root.
    fn list_files(
        &self,
        dir: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn input_format(&self) -> InputFormat;
    fn output_formats(&self) -> &[OutputFormat];
    fn max_records(&self) -> Option<usize>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<CapturedResponse>>;
    async fn transform(&self, data: Vec<CapturedResponse>) -> Result<ScanReport>;
    async fn load(&self, report: ScanReport) -> Result<String>;
}
