//! Resolver settings file (`contoso-db.toml`).
//!
//! Every field is optional; an empty file yields the default behavior.
//!
//! ```toml
//! app_root = "/srv/contoso"
//! secrets_dir = "secrets-store"
//! sources = ["MSSQL_CONNECTION_STRING", "POSTGRES_CONNECTION_STRING"]
//! ambiguity = "first-match"
//! split_mode = "strict"
//! ```

use crate::env::{EnvSource, StdEnvSource};
use crate::error::{ConfigError, ConfigResult};
use crate::parser::SplitMode;
use crate::source::{AmbiguityPolicy, SECRETS_DIR, SourceName, SourceResolver, default_app_root};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default settings file name.
pub const SETTINGS_FILE_NAME: &str = "contoso-db.toml";

/// Settings controlling how the connection configuration is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverSettings {
    /// Application root; secret files live below it.
    pub app_root: Option<PathBuf>,

    /// Secret directory relative to the application root.
    pub secrets_dir: Option<PathBuf>,

    /// Candidate sources in priority order.
    pub sources: Option<Vec<SourceName>>,

    /// Behavior when several sources are defined.
    pub ambiguity: AmbiguityPolicy,

    /// How connection string tokens are split.
    pub split_mode: SplitMode,
}

impl ResolverSettings {
    /// Load settings from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Settings(format!("failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml(&content)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Settings(e.to_string()))
    }

    /// Load `contoso-db.toml` from `dir` if present, else defaults.
    pub fn discover(dir: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = dir.as_ref().join(SETTINGS_FILE_NAME);
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Build a resolver over the process environment.
    pub fn resolver(&self) -> SourceResolver<StdEnvSource> {
        self.resolver_with_env(StdEnvSource)
    }

    /// Build a resolver over a custom environment source.
    ///
    /// Without an explicit `app_root`, `CONTOSO_APP_ROOT` is read from `env`.
    pub fn resolver_with_env<E: EnvSource>(&self, env: E) -> SourceResolver<E> {
        let app_root = self
            .app_root
            .clone()
            .unwrap_or_else(|| default_app_root(&env));

        SourceResolver::new(app_root)
            .secrets_dir(
                self.secrets_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(SECRETS_DIR)),
            )
            .candidates(self.sources.clone().unwrap_or_else(|| SourceName::ALL.to_vec()))
            .ambiguity(self.ambiguity)
            .with_env(env)
    }
}

impl SourceResolver<StdEnvSource> {
    /// Build a resolver from settings over the process environment.
    pub fn from_settings(settings: &ResolverSettings) -> Self {
        settings.resolver()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnvSource;
    use crate::source::APP_ROOT_ENV;
    use tempfile::TempDir;

    #[test]
    fn test_empty_settings() {
        let settings = ResolverSettings::from_toml("").unwrap();
        assert_eq!(settings, ResolverSettings::default());
        assert_eq!(settings.ambiguity, AmbiguityPolicy::FirstMatch);
        assert_eq!(settings.split_mode, SplitMode::Strict);
    }

    #[test]
    fn test_full_settings() {
        let settings = ResolverSettings::from_toml(
            r#"
            app_root = "/srv/contoso"
            secrets_dir = "vault"
            sources = ["postgres_connection_string", " MSSQL_CONNECTION_STRING "]
            ambiguity = "reject"
            split_mode = "first-equals"
            "#,
        )
        .unwrap();

        assert_eq!(settings.app_root, Some(PathBuf::from("/srv/contoso")));
        assert_eq!(
            settings.sources,
            Some(vec![SourceName::Postgres, SourceName::Mssql])
        );
        assert_eq!(settings.ambiguity, AmbiguityPolicy::Reject);
        assert_eq!(settings.split_mode, SplitMode::FirstEquals);

        let resolver = settings.resolver_with_env(MapEnvSource::new());
        assert_eq!(resolver.app_root(), Path::new("/srv/contoso"));
        assert_eq!(
            resolver.secret_path(SourceName::Mssql),
            PathBuf::from("/srv/contoso/vault/MSSQL_CONNECTION_STRING")
        );
        assert_eq!(
            resolver.candidate_sources(),
            &[SourceName::Postgres, SourceName::Mssql]
        );
        assert_eq!(resolver.ambiguity_policy(), AmbiguityPolicy::Reject);
    }

    #[test]
    fn test_unknown_source_rejected() {
        let result = ResolverSettings::from_toml(r#"sources = ["ORACLE_CONNECTION_STRING"]"#);
        assert!(matches!(result, Err(ConfigError::Settings(_))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ResolverSettings::from_toml("database_url = \"x\"");
        assert!(matches!(result, Err(ConfigError::Settings(_))));
    }

    #[test]
    fn test_app_root_from_env() {
        let env = MapEnvSource::new().set(APP_ROOT_ENV, "/opt/hotel");
        let resolver = ResolverSettings::default().resolver_with_env(env);
        assert_eq!(resolver.app_root(), Path::new("/opt/hotel"));
    }

    #[test]
    fn test_discover() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            ResolverSettings::discover(dir.path()).unwrap(),
            ResolverSettings::default()
        );

        std::fs::write(dir.path().join(SETTINGS_FILE_NAME), "ambiguity = \"reject\"\n").unwrap();
        let settings = ResolverSettings::discover(dir.path()).unwrap();
        assert_eq!(settings.ambiguity, AmbiguityPolicy::Reject);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = ResolverSettings::from_file(dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Settings(_))));
    }
}
