use crate::domain::model::StatsReport;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn processor_name(&self) -> &str;
    fn input_file(&self) -> Option<&str>;
    fn initial_data(&self) -> &[i64];
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<i64>>;
    async fn transform(&self, data: Vec<i64>) -> Result<StatsReport>;
    async fn load(&self, report: StatsReport) -> Result<String>;
}
