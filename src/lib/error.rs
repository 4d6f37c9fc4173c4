use thiserror::Error;

/// Main error type for the lifecycle calculator
#[derive(Error, Debug)]
pub enum CalculatorError {
    /// Negative or non-finite sizes, or durations that run backwards
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Tier absent from the pricing table, or missing the pricing an operation needs
    #[error("Unknown tier: {0}")]
    UnknownTier(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing errors
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Configuration file error
    #[error("File error: {0}")]
    FileError(String),
}

impl From<serde_yaml::Error> for CalculatorError {
    fn from(err: serde_yaml::Error) -> Self {
        CalculatorError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for CalculatorError {
    fn from(err: serde_json::Error) -> Self {
        CalculatorError::Parse(err.to_string())
    }
}

/// Helper type alias for Results
pub type Result<T> = std::result::Result<T, CalculatorError>;
