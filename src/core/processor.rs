use crate::domain::model::Statistics;

/// A named list of integers plus a flag recording whether `process_data` ran.
#[derive(Debug, Clone, PartialEq)]
pub struct DataProcessor {
    name: String,
    data: Vec<i64>,
    processed: bool,
}

impl DataProcessor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
            processed: false,
        }
    }

    pub fn add_item(&mut self, item: i64) {
        self.data.push(item);
    }

    /// Returns every positive item doubled, in input order.
    ///
    /// Stored data is left untouched. An empty processor returns an empty
    /// vec without being marked processed.
    pub fn process_data(&mut self) -> Vec<i64> {
        if self.data.is_empty() {
            return Vec::new();
        }

        let result: Vec<i64> = self
            .data
            .iter()
            .filter(|&&item| item > 0)
            .map(|&item| item.saturating_mul(2))
            .collect();

        self.processed = true;
        tracing::debug!(
            processor = %self.name,
            input = self.data.len(),
            output = result.len(),
            "processed data"
        );
        result
    }

    /// Summary over the raw (undoubled) data.
    pub fn statistics(&mut self) -> Statistics {
        if !self.processed {
            self.process_data();
        }

        let total = self
            .data
            .iter()
            .fold(0i64, |acc, &item| acc.saturating_add(item));
        let count = self.data.len();
        let average = if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        };

        Statistics {
            total,
            count,
            average,
            max: self.data.iter().copied().max().unwrap_or(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[i64] {
        &self.data
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }
}

pub fn create_processor(name: impl Into<String>, initial_data: Option<&[i64]>) -> DataProcessor {
    let mut processor = DataProcessor::new(name);

    if let Some(items) = initial_data {
        for &item in items {
            processor.add_item(item);
        }
    }

    processor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_data_doubles_positive_entries() {
        let mut processor = create_processor("Main Processor", Some(&[1, 2, 3, 4, 5]));
        assert_eq!(processor.process_data(), vec![2, 4, 6, 8, 10]);
        assert!(processor.is_processed());
        assert_eq!(processor.data(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_process_data_length_matches_positive_count() {
        let input = [3, -1, 0, 7, -9, 2];
        let mut processor = create_processor("mixed", Some(&input));
        let positives = input.iter().filter(|&&n| n > 0).count();
        let result = processor.process_data();
        assert_eq!(result.len(), positives);
        assert_eq!(result, vec![6, 14, 4]);
    }

    #[test]
    fn test_process_data_empty_leaves_flag_unset() {
        let mut processor = DataProcessor::new("empty");
        assert!(processor.process_data().is_empty());
        assert!(!processor.is_processed());
    }

    #[test]
    fn test_statistics_uses_raw_data() {
        let mut processor = create_processor("Main Processor", Some(&[1, 2, 3, 4, 5]));
        let stats = processor.statistics();
        assert!(processor.is_processed());
        assert_eq!(
            stats,
            Statistics {
                total: 15,
                count: 5,
                average: 3.0,
                max: 5,
            }
        );
    }

    #[test]
    fn test_statistics_with_negatives() {
        let mut processor = create_processor("neg", Some(&[-4, -10, -1]));
        let stats = processor.statistics();
        assert_eq!(stats.total, -15);
        assert_eq!(stats.max, -1);
        assert!((stats.average + 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_statistics_empty() {
        let mut processor = create_processor("none", None);
        let stats = processor.statistics();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.max, 0);
        assert!(!processor.is_processed());
    }

    #[test]
    fn test_add_item_after_creation() {
        let mut processor = create_processor("grow", Some(&[1]));
        processor.add_item(8);
        assert_eq!(processor.name(), "grow");
        assert_eq!(processor.data(), &[1, 8]);
    }
}
