use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Invalid input at line {line}: {message}")]
    DataParseError { line: usize, message: String },

    #[error("Invalid expression at position {position}: {reason}")]
    EvalError { position: usize, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Input,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn processing(message: impl Into<String>) -> Self {
        AppError::ProcessingError {
            message: message.into(),
        }
    }

    pub fn eval(position: usize, reason: impl Into<String>) -> Self {
        AppError::EvalError {
            position,
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ConfigError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::TomlError(_) => ErrorCategory::Config,
            AppError::DataParseError { .. } | AppError::CsvError(_) | AppError::EvalError { .. } => {
                ErrorCategory::Input
            }
            AppError::ProcessingError { .. } | AppError::SerializationError(_) => {
                ErrorCategory::Processing
            }
            AppError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Config | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::IoError(_) => "檢查檔案路徑與權限是否正確",
            AppError::CsvError(_) | AppError::DataParseError { .. } => {
                "輸入檔案只能包含以逗號、空白或換行分隔的整數"
            }
            AppError::SerializationError(_) => "檢查輸出資料是否可序列化為 JSON",
            AppError::TomlError(_) | AppError::ConfigError { .. } => {
                "確認設定檔為有效的 TOML 格式"
            }
            AppError::InvalidConfigValueError { .. } => "修正設定值後重新執行",
            AppError::ProcessingError { .. } => "縮小輸入數值的範圍以避免溢位",
            AppError::EvalError { .. } => "只使用數字、+ - * / // % ** 與括號",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::EvalError { .. } => "Invalid expression".to_string(),
            AppError::IoError(e) => format!("無法存取檔案: {}", e),
            AppError::DataParseError { line, .. } => format!("輸入資料第 {} 行格式錯誤", line),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_error_hides_reason_from_user() {
        let err = AppError::eval(3, "unexpected character 'x'");
        assert_eq!(err.user_friendly_message(), "Invalid expression");
        assert!(err.to_string().contains("position 3"));
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_config_errors_are_high() {
        let err = AppError::ConfigError {
            message: "processor.name".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
