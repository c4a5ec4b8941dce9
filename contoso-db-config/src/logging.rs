//! Logging bootstrap.
//!
//! Structured logging is controlled through environment variables:
//!
//! - `CONTOSO_DB_DEBUG=true|1|yes` - Enable debug logging
//! - `CONTOSO_DB_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific level
//! - `CONTOSO_DB_LOG_FORMAT=json|pretty|compact` - Output format (default: json)
//!
//! Installing a subscriber requires the `tracing-subscriber` feature. Without
//! it, [`init`] is a no-op and the host application is expected to install
//! its own subscriber.
//!
//! ```rust,no_run
//! use contoso_db_config::logging;
//!
//! logging::init();
//! ```
//!
//! Connection string contents are never logged; only source names, keys and
//! counts are.

use crate::env::{EnvSource, StdEnvSource};
use std::sync::Once;

/// Enables debug logging.
pub const DEBUG_ENV: &str = "CONTOSO_DB_DEBUG";

/// Overrides the log level.
pub const LOG_LEVEL_ENV: &str = "CONTOSO_DB_LOG_LEVEL";

/// Selects the output format.
pub const LOG_FORMAT_ENV: &str = "CONTOSO_DB_LOG_FORMAT";

static INIT: Once = Once::new();

/// Check if `CONTOSO_DB_DEBUG` is set to "true", "1", or "yes" (case-insensitive).
pub fn debug_enabled_in(env: &impl EnvSource) -> bool {
    env.get(DEBUG_ENV)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level.
///
/// Defaults to "debug" if debug logging is enabled, otherwise "warn".
pub fn log_level_in(env: &impl EnvSource) -> &'static str {
    let fallback = if debug_enabled_in(env) { "debug" } else { "warn" };

    match env.get(LOG_LEVEL_ENV) {
        Some(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => fallback,
        },
        None => fallback,
    }
}

/// Get the configured log format. Defaults to "json".
pub fn log_format_in(env: &impl EnvSource) -> &'static str {
    env.get(LOG_FORMAT_ENV)
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Initialize logging from the process environment.
///
/// Nothing is installed unless debug logging or a level is requested.
/// Subsequent calls are no-ops.
pub fn init() {
    let env = StdEnvSource;
    if !debug_enabled_in(&env) && env.get(LOG_LEVEL_ENV).is_none() {
        return;
    }
    install(log_level_in(&env), log_format_in(&env));
}

fn install(level: &'static str, format: &'static str) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(format!(
                "contoso_db={},contoso_db_config={},contoso_db_cli={}",
                level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            let registry = tracing_subscriber::registry().with(filter);
            let installed = match format {
                "pretty" => registry.with(fmt::layer().pretty()).try_init(),
                "compact" => registry.with(fmt::layer().compact()).try_init(),
                _ => registry.with(fmt::layer().json()).try_init(),
            };

            if installed.is_ok() {
                tracing::info!(level = level, format = format, "Logging initialized");
            }
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            let _ = (level, format);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnvSource;

    #[test]
    fn test_debug_disabled_by_default() {
        assert!(!debug_enabled_in(&MapEnvSource::new()));
        assert!(!debug_enabled_in(&MapEnvSource::new().set(DEBUG_ENV, "no")));
        assert!(debug_enabled_in(&MapEnvSource::new().set(DEBUG_ENV, "YES")));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level_in(&MapEnvSource::new()), "warn");
        assert_eq!(log_level_in(&MapEnvSource::new().set(DEBUG_ENV, "1")), "debug");
        assert_eq!(
            log_level_in(&MapEnvSource::new().set(LOG_LEVEL_ENV, "TRACE")),
            "trace"
        );
        assert_eq!(
            log_level_in(&MapEnvSource::new().set(LOG_LEVEL_ENV, "loud")),
            "warn"
        );
    }

    #[test]
    fn test_log_format() {
        assert_eq!(log_format_in(&MapEnvSource::new()), "json");
        assert_eq!(
            log_format_in(&MapEnvSource::new().set(LOG_FORMAT_ENV, "Pretty")),
            "pretty"
        );
        assert_eq!(
            log_format_in(&MapEnvSource::new().set(LOG_FORMAT_ENV, "xml")),
            "json"
        );
    }
}
