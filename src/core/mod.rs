pub mod arith;
pub mod calculator;
pub mod engine;
pub mod expr;
pub mod pipeline;
pub mod processor;

pub use crate::domain::model::{Statistics, StatsReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
