//! CLI error types and result alias.

use contoso_db_config::ConfigError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(contoso_db::io))]
    Io(#[from] std::io::Error),

    /// Resolution or parsing error
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// Invalid combination of arguments
    #[error("Usage error: {0}")]
    #[diagnostic(code(contoso_db::usage))]
    Usage(String),

    /// Output formatting error
    #[error("Output error: {0}")]
    #[diagnostic(code(contoso_db::output))]
    Output(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(format!("Failed to serialize JSON: {}", err))
    }
}
