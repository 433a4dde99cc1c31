use serde::{Deserialize, Serialize};

/// Summary computed over a processor's raw data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: i64,
    pub count: usize,
    pub average: f64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub name: String,
    pub processed: Vec<i64>,
    pub statistics: Statistics,
}
