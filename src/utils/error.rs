use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Catalog payload could not be decoded: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Unknown {family} bucket '{label}'")]
    UnknownBucket { family: String, label: String },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Could not render output: {message}")]
    OutputError { message: String },
}

pub type Result<T> = std::result::Result<T, ToolkitError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Catalog,
    Input,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依嚴重程度決定 CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ToolkitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ToolkitError::ApiError(_) => ErrorCategory::Network,
            ToolkitError::IoError(_) => ErrorCategory::System,
            ToolkitError::SerializationError(_) | ToolkitError::CatalogError { .. } => {
                ErrorCategory::Catalog
            }
            ToolkitError::InvalidConfigValueError { .. }
            | ToolkitError::ConfigValidationError { .. }
            | ToolkitError::UnknownBucket { .. } => ErrorCategory::Configuration,
            ToolkitError::ValidationError { .. } => ErrorCategory::Input,
            ToolkitError::OutputError { .. } => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Catalog => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ToolkitError::ApiError(e) if e.is_timeout() => {
                "The catalog endpoint timed out; raise catalog.timeout_seconds or try again later"
                    .to_string()
            }
            ToolkitError::ApiError(_) => {
                "Check network connectivity and the catalog.endpoint setting".to_string()
            }
            ToolkitError::IoError(_) => "Check file paths and permissions".to_string(),
            ToolkitError::SerializationError(_) | ToolkitError::CatalogError { .. } => {
                "The catalog returned an unexpected payload; verify the endpoint serves the hostings query"
                    .to_string()
            }
            ToolkitError::UnknownBucket { family, .. } => format!(
                "Run `hosting-toolkit buckets` to list the defined {} buckets",
                family
            ),
            ToolkitError::InvalidConfigValueError { .. }
            | ToolkitError::ConfigValidationError { .. } => {
                "Review the TOML configuration file".to_string()
            }
            ToolkitError::ValidationError { .. } => "Check the command arguments".to_string(),
            ToolkitError::OutputError { .. } => {
                "Retry without --json to get the plain text output".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the plan catalog: {}", self),
            ErrorCategory::Catalog => format!("The plan catalog could not be read: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Output => format!("The result could not be printed: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}
