//! Connection string source resolution.
//!
//! A connection string lives in exactly one of a small, closed set of named
//! sources. Each name is looked up first as a file in the application's
//! secret store and then as an environment variable of the same name.
//!
//! ```text
//! <app-root>/secrets-store/MSSQL_CONNECTION_STRING     (file, trimmed)
//! $MSSQL_CONNECTION_STRING                             (environment)
//! ```
//!
//! # Example
//!
//! ```rust
//! use contoso_db_config::{MapEnvSource, SourceName, SourceResolver};
//!
//! let env = MapEnvSource::new().set("POSTGRES_CONNECTION_STRING", "host=db;port=5432");
//! let resolver = SourceResolver::new("/nonexistent").with_env(env);
//!
//! let (value, source) = resolver.resolve_defined_source().unwrap();
//! assert_eq!(source, SourceName::Postgres);
//! assert_eq!(value, "host=db;port=5432");
//! ```

use crate::env::{EnvSource, StdEnvSource};
use crate::error::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Directory under the application root that holds secret files.
pub const SECRETS_DIR: &str = "secrets-store";

/// Environment variable naming the application root.
pub const APP_ROOT_ENV: &str = "CONTOSO_APP_ROOT";

/// A recognized configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum SourceName {
    /// SQL Server connection string.
    Mssql,
    /// PostgreSQL connection string.
    Postgres,
}

impl SourceName {
    /// All recognized sources, in default priority order.
    pub const ALL: [SourceName; 2] = [SourceName::Mssql, SourceName::Postgres];

    /// The canonical name, used both as secret file name and environment variable.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mssql => "MSSQL_CONNECTION_STRING",
            Self::Postgres => "POSTGRES_CONNECTION_STRING",
        }
    }
}

impl std::fmt::Display for SourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|source| source.as_str() == normalized)
            .ok_or(ConfigError::InvalidSourceName(normalized))
    }
}

impl TryFrom<String> for SourceName {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// What to do when more than one candidate source is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbiguityPolicy {
    /// Use the first candidate that resolves and ignore the rest.
    #[default]
    FirstMatch,
    /// Fail if more than one candidate resolves.
    Reject,
}

/// Resolves connection strings from the secret store or the environment.
#[derive(Debug, Clone)]
pub struct SourceResolver<E: EnvSource = StdEnvSource> {
    app_root: PathBuf,
    secrets_dir: PathBuf,
    env: E,
    candidates: Vec<SourceName>,
    ambiguity: AmbiguityPolicy,
}

impl SourceResolver<StdEnvSource> {
    /// Create a resolver rooted at `app_root`, reading the process environment.
    pub fn new(app_root: impl Into<PathBuf>) -> Self {
        Self {
            app_root: app_root.into(),
            secrets_dir: PathBuf::from(SECRETS_DIR),
            env: StdEnvSource,
            candidates: SourceName::ALL.to_vec(),
            ambiguity: AmbiguityPolicy::default(),
        }
    }

    /// Create a resolver whose root comes from `CONTOSO_APP_ROOT`,
    /// falling back to the current directory.
    pub fn from_env() -> Self {
        Self::new(default_app_root(&StdEnvSource))
    }
}

impl<E: EnvSource> SourceResolver<E> {
    /// Replace the environment source.
    pub fn with_env<F: EnvSource>(self, env: F) -> SourceResolver<F> {
        SourceResolver {
            app_root: self.app_root,
            secrets_dir: self.secrets_dir,
            env,
            candidates: self.candidates,
            ambiguity: self.ambiguity,
        }
    }

    /// Set the secret directory, relative to the application root.
    pub fn secrets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.secrets_dir = dir.into();
        self
    }

    /// Set the ordered list of sources tried by [`resolve_defined_source`](Self::resolve_defined_source).
    pub fn candidates(mut self, candidates: impl IntoIterator<Item = SourceName>) -> Self {
        self.candidates = candidates.into_iter().collect();
        self
    }

    /// Set the ambiguity policy.
    pub fn ambiguity(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity = policy;
        self
    }

    /// The application root.
    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    /// The candidate sources, in priority order.
    pub fn candidate_sources(&self) -> &[SourceName] {
        &self.candidates
    }

    /// The configured ambiguity policy.
    pub fn ambiguity_policy(&self) -> AmbiguityPolicy {
        self.ambiguity
    }

    /// Path of the secret file for a source.
    pub fn secret_path(&self, source: SourceName) -> PathBuf {
        self.app_root.join(&self.secrets_dir).join(source.as_str())
    }

    /// Resolve a connection string by free-form source name.
    ///
    /// The name is trimmed and upper-cased before matching.
    pub fn resolve_connection_string(&self, name: &str) -> ConfigResult<String> {
        let source: SourceName = name.parse()?;
        self.resolve(source)
    }

    /// Resolve the connection string for a known source.
    ///
    /// A secret file takes precedence over the environment variable.
    /// Nothing is cached; every call reads the source again.
    pub fn resolve(&self, source: SourceName) -> ConfigResult<String> {
        let path = self.secret_path(source);

        let value = if path.is_file() {
            debug!(source = %source, path = %path.display(), "Reading connection string from secret store");
            std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::SecretRead {
                    path: path.display().to_string(),
                    source: e,
                })?
                .trim()
                .to_string()
        } else {
            debug!(source = %source, "Reading connection string from environment");
            self.env.get(source.as_str()).unwrap_or_default()
        };

        if value.is_empty() {
            return Err(ConfigError::EmptyConnectionString(source.to_string()));
        }

        Ok(value)
    }

    /// Find the source that holds a connection string.
    ///
    /// Candidates are tried in order and failures are not reported unless
    /// every candidate fails.
    pub fn resolve_defined_source(&self) -> ConfigResult<(String, SourceName)> {
        let mut found: Vec<(String, SourceName)> = Vec::new();

        for &source in &self.candidates {
            match self.resolve(source) {
                Ok(value) => {
                    if self.ambiguity == AmbiguityPolicy::FirstMatch {
                        info!(source = %source, "Connection string resolved");
                        return Ok((value, source));
                    }
                    found.push((value, source));
                }
                Err(e) if e.is_missing_source() => {
                    debug!(source = %source, "Source not set, trying next");
                }
                Err(e) => {
                    warn!(source = %source, error = %e, "Source failed, trying next");
                }
            }
        }

        if found.len() > 1 {
            let sources = found
                .iter()
                .map(|(_, source)| source.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ConfigError::AmbiguousConfiguration { sources });
        }

        if let Some((value, source)) = found.pop() {
            info!(source = %source, "Connection string resolved");
            return Ok((value, source));
        }

        Err(ConfigError::NoConfigurationFound {
            candidates: self
                .candidates
                .iter()
                .map(SourceName::as_str)
                .collect::<Vec<_>>()
                .join(" or "),
        })
    }
}

/// Application root from `CONTOSO_APP_ROOT`, else the current directory.
pub(crate) fn default_app_root(env: &impl EnvSource) -> PathBuf {
    env.get(APP_ROOT_ENV)
        .filter(|root| !root.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve a connection string by name using the process environment.
pub fn resolve_connection_string(name: &str) -> ConfigResult<String> {
    SourceResolver::from_env().resolve_connection_string(name)
}

/// Find the defined source using the process environment and default candidates.
pub fn resolve_defined_source() -> ConfigResult<(String, SourceName)> {
    SourceResolver::from_env().resolve_defined_source()
}
