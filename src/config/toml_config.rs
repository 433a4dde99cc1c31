use crate::utils::error::{AppError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PROCESSOR_NAME: &str = "Main Processor";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_OUTPUT_FILE: &str = "statistics.json";
pub const DEFAULT_ERROR_TITLE: &str = "Error";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub processor: ProcessorConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub calculator: CalculatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    #[serde(default = "default_processor_name")]
    pub name: String,
    #[serde(default)]
    pub initial_data: Vec<i64>,
    pub input_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_output_file")]
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default = "default_error_title")]
    pub error_title: String,
}

fn default_processor_name() -> String {
    DEFAULT_PROCESSOR_NAME.to_string()
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

fn default_output_file() -> String {
    DEFAULT_OUTPUT_FILE.to_string()
}

fn default_error_title() -> String {
    DEFAULT_ERROR_TITLE.to_string()
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            name: default_processor_name(),
            initial_data: Vec::new(),
            input_file: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            file_name: default_output_file(),
        }
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            error_title: default_error_title(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("processor.name", &self.processor.name)?;
        if let Some(input) = &self.processor.input_file {
            validate_path("processor.input_file", input)?;
        }
        validate_path("output.path", &self.output.path)?;
        validate_file_extension("output.file_name", &self.output.file_name, &["json"])?;
        validate_non_empty_string("calculator.error_title", &self.calculator.error_title)?;
        Ok(())
    }
}
