//! Error types for source resolution and connection string parsing.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while resolving or parsing a connection configuration.
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    /// The configuration source name is not one of the recognized names.
    #[error("invalid configuration source `{0}`")]
    #[diagnostic(
        code(contoso_db::config::invalid_source_name),
        help("supported sources are MSSQL_CONNECTION_STRING and POSTGRES_CONNECTION_STRING")
    )]
    InvalidSourceName(String),

    /// The source resolved, but to an empty value.
    #[error("connection string for `{0}` is empty")]
    #[diagnostic(code(contoso_db::config::empty_connection_string))]
    EmptyConnectionString(String),

    /// None of the candidate sources yielded a connection string.
    #[error("no connection string configured, set one of: {candidates}")]
    #[diagnostic(code(contoso_db::config::no_configuration_found))]
    NoConfigurationFound {
        /// The candidate sources that were tried.
        candidates: String,
    },

    /// More than one candidate source is defined and the resolver rejects ambiguity.
    #[error("ambiguous configuration, more than one source is defined: {sources}")]
    #[diagnostic(
        code(contoso_db::config::ambiguous_configuration),
        help("remove all but one source, or use the `first-match` ambiguity policy")
    )]
    AmbiguousConfiguration {
        /// The sources that resolved.
        sources: String,
    },

    /// The allow-list handed to the parser is malformed.
    #[error("invalid allow-list: {0}")]
    #[diagnostic(code(contoso_db::config::invalid_allow_list))]
    InvalidAllowList(String),

    /// A secret file exists but could not be read.
    #[error("failed to read secret file: {path}")]
    #[diagnostic(code(contoso_db::config::secret_read))]
    SecretRead {
        /// Path of the secret file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The resolver settings file could not be loaded.
    #[error("invalid resolver settings: {0}")]
    #[diagnostic(code(contoso_db::config::settings))]
    Settings(String),
}

impl ConfigError {
    /// Create an invalid allow-list error.
    pub fn invalid_allow_list(message: impl Into<String>) -> Self {
        Self::InvalidAllowList(message.into())
    }

    /// Check whether this error only means "this source is not set".
    ///
    /// Used by the fallback chain to tell missing sources apart from broken ones
    /// when reporting.
    pub fn is_missing_source(&self) -> bool {
        matches!(self, Self::EmptyConnectionString(_))
    }
}
