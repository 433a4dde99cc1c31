use crate::core::processor::create_processor;
use crate::core::{ConfigProvider, Pipeline, StatsReport, Storage};
use crate::utils::error::{AppError, Result};
use std::path::Path;

pub struct StatsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> StatsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

/// 解析以逗號、空白或換行分隔的整數清單
pub fn parse_numbers(raw: &[u8]) -> Result<Vec<i64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw);

    let mut numbers = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

        for field in record.iter() {
            for token in field.split_whitespace() {
                let value = token.parse::<i64>().map_err(|e| AppError::DataParseError {
                    line,
                    message: format!("'{}' is not an integer: {}", token, e),
                })?;
                numbers.push(value);
            }
        }
    }

    Ok(numbers)
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for StatsPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<i64>> {
        let mut numbers = self.config.initial_data().to_vec();

        if let Some(input) = self.config.input_file() {
            tracing::debug!("Reading numbers from: {}", input);
            let raw = self.storage.read_file(input).await?;
            numbers.extend(parse_numbers(&raw)?);
        }

        if numbers.is_empty() {
            tracing::warn!("No input values, statistics will be empty");
        }

        Ok(numbers)
    }

    async fn transform(&self, data: Vec<i64>) -> Result<StatsReport> {
        let mut processor =
            create_processor(self.config.processor_name(), Some(data.as_slice()));

        let processed = processor.process_data();
        let statistics = processor.statistics();

        tracing::info!("Processed {} items", processed.len());
        tracing::debug!("Statistics: {:?}", statistics);

        Ok(StatsReport {
            name: processor.name().to_string(),
            processed,
            statistics,
        })
    }

    async fn load(&self, report: StatsReport) -> Result<String> {
        let json = serde_json::to_vec_pretty(&report)?;
        let output_file = Path::new(self.config.output_path()).join(self.config.output_file());
        let output_file = output_file.to_string_lossy().into_owned();
        self.storage.write_file(&output_file, &json).await?;
        Ok(output_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers_mixed_separators() {
        let raw = b"1, 2,3\n4 5\n\n-6\n";
        assert_eq!(parse_numbers(raw).unwrap(), vec![1, 2, 3, 4, 5, -6]);
    }

    #[test]
    fn test_parse_numbers_skips_blank_fields() {
        let raw = b"7,,8,\n";
        assert_eq!(parse_numbers(raw).unwrap(), vec![7, 8]);
    }

    #[test]
    fn test_parse_numbers_reports_line() {
        let raw = b"1,2\n3,abc\n";
        match parse_numbers(raw) {
            Err(AppError::DataParseError { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
