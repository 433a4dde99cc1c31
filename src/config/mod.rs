pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use toml_config::AppConfig;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "small-calc")]
#[command(about = "Arithmetic helpers, list statistics and a keypad calculator")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add two integers
    Sum {
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
    },
    /// Sort a list of integers and print its sum
    List {
        #[arg(required = true, allow_negative_numbers = true)]
        numbers: Vec<i64>,
    },
    /// Feed amounts into an accumulator
    Accumulate {
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        initial: i64,
        #[arg(allow_negative_numbers = true)]
        amounts: Vec<i64>,
    },
    /// Double positive values and write a statistics report
    Stats {
        #[arg(long)]
        name: Option<String>,
        /// File of integers separated by commas, whitespace or newlines
        #[arg(long)]
        input: Option<String>,
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        output_file: Option<String>,
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
    },
    /// Evaluate an arithmetic expression
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Interactive keypad calculator reading keys from stdin
    Calc,
    /// Print the keypad layout
    Keypad,
}

/// Resolved settings for a statistics run: file values overridden by flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSettings {
    pub name: String,
    pub initial_data: Vec<i64>,
    pub input_file: Option<String>,
    pub output_path: String,
    pub output_file: String,
}

#[derive(Debug, Clone, Default)]
pub struct StatsOverrides {
    pub name: Option<String>,
    pub input_file: Option<String>,
    pub output_path: Option<String>,
    pub output_file: Option<String>,
    pub values: Vec<i64>,
}

impl StatsSettings {
    /// Command-line values replace the file's, except `values` which are
    /// appended to the configured initial data.
    pub fn resolve(config: &AppConfig, overrides: StatsOverrides) -> Result<Self> {
        let mut initial_data = config.processor.initial_data.clone();
        initial_data.extend(overrides.values);

        let settings = Self {
            name: overrides
                .name
                .unwrap_or_else(|| config.processor.name.clone()),
            initial_data,
            input_file: overrides
                .input_file
                .or_else(|| config.processor.input_file.clone()),
            output_path: overrides
                .output_path
                .unwrap_or_else(|| config.output.path.clone()),
            output_file: overrides
                .output_file
                .unwrap_or_else(|| config.output.file_name.clone()),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for StatsSettings {
    fn validate(&self) -> Result<()> {
        let mut config = AppConfig::default();
        config.processor.name = self.name.clone();
        config.processor.input_file = self.input_file.clone();
        config.output.path = self.output_path.clone();
        config.output.file_name = self.output_file.clone();
        config.validate()
    }
}

impl ConfigProvider for StatsSettings {
    fn processor_name(&self) -> &str {
        &self.name
    }

    fn input_file(&self) -> Option<&str> {
        self.input_file.as_deref()
    }

    fn initial_data(&self) -> &[i64] {
        &self.initial_data
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = AppConfig::default();
        config.processor.initial_data = vec![1, 2];
        config.output.path = "./from-file".to_string();

        let settings = StatsSettings::resolve(
            &config,
            StatsOverrides {
                name: Some("cli".to_string()),
                output_path: Some("./from-cli".to_string()),
                values: vec![3],
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(settings.name, "cli");
        assert_eq!(settings.initial_data, vec![1, 2, 3]);
        assert_eq!(settings.output_path, "./from-cli");
        assert_eq!(settings.output_file, toml_config::DEFAULT_OUTPUT_FILE);
    }

    #[test]
    fn test_resolve_validates() {
        let config = AppConfig::default();
        let result = StatsSettings::resolve(
            &config,
            StatsOverrides {
                output_file: Some("report.txt".to_string()),
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_subcommands() {
        let cli = CliConfig::parse_from(["small-calc", "sum", "2", "-5"]);
        assert!(matches!(cli.command, Command::Sum { a: 2, b: -5 }));

        let cli = CliConfig::parse_from([
            "small-calc",
            "--verbose",
            "stats",
            "--name",
            "demo",
            "1",
            "2",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Stats { name, values, .. } => {
                assert_eq!(name.as_deref(), Some("demo"));
                assert_eq!(values, vec![1, 2]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
