pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::AppConfig, StatsOverrides, StatsSettings};

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use core::{
    arith::{calculate_sum, process_list, Accumulator},
    calculator::{keypad_layout, Calculator, Key, KeyPosition},
    engine::StatsEngine,
    expr::{evaluate, Value},
    pipeline::StatsPipeline,
    processor::{create_processor, DataProcessor},
};
pub use domain::model::{Statistics, StatsReport};
pub use utils::error::{AppError, Result};
