//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use contoso_db_config::{AmbiguityPolicy, Backend, ResolverSettings};
use std::path::PathBuf;

use crate::error::CliResult;

/// contoso-db - Inspect database connection configuration
#[derive(Parser, Debug)]
#[command(name = "contoso-db")]
#[command(author = "Contoso Hotel Engineering")]
#[command(version)]
#[command(about = "contoso-db - Inspect database connection configuration", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show which configuration source resolves
    Resolve(ResolveArgs),

    /// Parse a connection string against an allow-list
    Parse(ParseArgs),

    /// Resolve and parse the startup configuration
    Check(CheckArgs),

    /// Display version information
    Version,
}

// =============================================================================
// Shared source arguments
// =============================================================================

/// Where to look for connection strings
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Settings file (defaults to ./contoso-db.toml when present)
    #[arg(short, long, env = "CONTOSO_DB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Application root containing the secrets-store directory
    #[arg(long)]
    pub app_root: Option<PathBuf>,

    /// Fail when more than one source is defined
    #[arg(long)]
    pub reject_ambiguous: bool,
}

impl SourceArgs {
    /// Load settings and apply command-line overrides.
    pub fn settings(&self) -> CliResult<ResolverSettings> {
        let mut settings = match &self.config {
            Some(path) => ResolverSettings::from_file(path)?,
            None => ResolverSettings::discover(std::env::current_dir()?)?,
        };

        if let Some(root) = &self.app_root {
            settings.app_root = Some(root.clone());
        }
        if self.reject_ambiguous {
            settings.ambiguity = AmbiguityPolicy::Reject;
        }

        Ok(settings)
    }
}

// =============================================================================
// Resolve Command
// =============================================================================

/// Arguments for the `resolve` command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub source_args: SourceArgs,

    /// Resolve a single named source instead of the fallback chain
    #[arg(short, long)]
    pub source: Option<String>,

    /// Print the connection string instead of hiding it
    #[arg(long)]
    pub show_secret: bool,
}

// =============================================================================
// Parse Command
// =============================================================================

/// Arguments for the `parse` command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Raw connection string
    pub raw: String,

    /// Allowed key with no value constraint (repeatable)
    #[arg(short, long)]
    pub allow: Vec<String>,

    /// Allowed key with a value pattern, as KEY=REGEX (repeatable)
    #[arg(short, long = "pattern", value_parser = parse_pattern)]
    pub patterns: Vec<(String, String)>,

    /// Use the default allow-list of a backend
    #[arg(short, long, conflicts_with_all = ["allow", "patterns"])]
    pub backend: Option<BackendArg>,

    /// Split tokens at the first `=` so values may contain `=`
    #[arg(long)]
    pub first_equals: bool,

    /// Print secret values instead of masking them
    #[arg(long)]
    pub show_secret: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// =============================================================================
// Check Command
// =============================================================================

/// Arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source_args: SourceArgs,

    /// Split tokens at the first `=` so values may contain `=`
    #[arg(long)]
    pub first_equals: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Supported backends
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum BackendArg {
    Mssql,
    Postgres,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Mssql => Backend::Mssql,
            BackendArg::Postgres => Backend::Postgres,
        }
    }
}

fn parse_pattern(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, pattern)| (key.to_string(), pattern.to_string()))
        .ok_or_else(|| format!("expected KEY=REGEX, got `{}`", s))
}
