//! Backend selection and the resolved startup configuration.

use crate::env::EnvSource;
use crate::error::ConfigResult;
use crate::parser::{AllowList, ConnectionParams, ConnectionStringParser, REDACTED, SplitMode};
use crate::source::{SourceName, SourceResolver};
use tracing::info;

/// Database backend implied by the source that resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Microsoft SQL Server
    Mssql,
    /// PostgreSQL
    Postgres,
}

impl Backend {
    /// Backend served by a configuration source.
    pub fn from_source(source: SourceName) -> Self {
        match source {
            SourceName::Mssql => Self::Mssql,
            SourceName::Postgres => Self::Postgres,
        }
    }

    /// Get the backend name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mssql => "mssql",
            Self::Postgres => "postgres",
        }
    }

    /// Keys the backend accepts in its connection string, with value patterns.
    pub fn allow_list(&self) -> AllowList {
        match self {
            Self::Mssql => AllowList::patterns([
                ("driver", ""),
                ("server", ""),
                ("database", ""),
                ("uid", ""),
                ("pwd", ""),
                ("encrypt", r"(?i:yes|no|true|false|mandatory|optional|strict)$"),
                ("trustservercertificate", r"(?i:yes|no|true|false)$"),
                ("connection timeout", r"\d+$"),
                ("authentication", ""),
                ("app", ""),
            ]),
            Self::Postgres => AllowList::patterns([
                ("host", ""),
                ("hostaddr", ""),
                ("port", r"\d+$"),
                ("dbname", ""),
                ("user", ""),
                ("password", ""),
                ("sslmode", r"(?:disable|allow|prefer|require|verify-ca|verify-full)$"),
                ("connect_timeout", r"\d+$"),
                ("application_name", ""),
            ]),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Backend {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mssql" | "sqlserver" => Ok(Self::Mssql),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => s.parse::<SourceName>().map(Self::from_source),
        }
    }
}

/// The connection configuration resolved at startup.
///
/// Built once and handed to whatever dispatches database operations to the
/// backend. It is never stored globally.
#[derive(Clone)]
pub struct ResolvedConnection {
    source: SourceName,
    backend: Backend,
    connection_string: String,
    params: ConnectionParams,
}

impl ResolvedConnection {
    /// Resolve the defined source and parse it with the backend's allow-list.
    pub fn load<E: EnvSource>(resolver: &SourceResolver<E>) -> ConfigResult<Self> {
        Self::load_with(resolver, SplitMode::default())
    }

    /// Like [`load`](Self::load) with an explicit split mode.
    pub fn load_with<E: EnvSource>(
        resolver: &SourceResolver<E>,
        split_mode: SplitMode,
    ) -> ConfigResult<Self> {
        let (connection_string, source) = resolver.resolve_defined_source()?;
        Self::from_parts_with(source, connection_string, split_mode)
    }

    /// Build from an already resolved source and connection string.
    pub fn from_parts(source: SourceName, connection_string: impl Into<String>) -> ConfigResult<Self> {
        Self::from_parts_with(source, connection_string, SplitMode::default())
    }

    fn from_parts_with(
        source: SourceName,
        connection_string: impl Into<String>,
        split_mode: SplitMode,
    ) -> ConfigResult<Self> {
        let connection_string = connection_string.into();
        let backend = Backend::from_source(source);
        let params = ConnectionStringParser::new(&backend.allow_list())?
            .split_mode(split_mode)
            .extract(&connection_string);

        info!(
            source = %source,
            backend = %backend,
            params = params.len(),
            "Database configuration loaded"
        );

        Ok(Self {
            source,
            backend,
            connection_string,
            params,
        })
    }

    /// The source that held the connection string.
    pub fn source(&self) -> SourceName {
        self.source
    }

    /// The selected backend.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// The raw connection string.
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// The validated parameters.
    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// Split into the `(connection_string, source)` pair.
    pub fn into_parts(self) -> (String, SourceName) {
        (self.connection_string, self.source)
    }
}

impl std::fmt::Debug for ResolvedConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConnection")
            .field("source", &self.source)
            .field("backend", &self.backend)
            .field("connection_string", &REDACTED)
            .field("params", &self.params)
            .finish()
    }
}
