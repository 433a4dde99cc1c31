use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct StatsEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> StatsEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting statistics run");

        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} values", raw_data.len());

        let report = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Summary for '{}': total={}, count={}, average={}, max={}",
            report.name,
            report.statistics.total,
            report.statistics.count,
            report.statistics.average,
            report.statistics.max
        );

        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Report saved to: {}", output_path);

        Ok(output_path)
    }
}
