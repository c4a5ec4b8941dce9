//! `contoso-db check` command - Resolve and parse the startup configuration.

use contoso_db_config::{ResolvedConnection, SourceResolver, SplitMode};

use crate::cli::CheckArgs;
use crate::error::CliResult;
use crate::output::{self, kv, success, warn};

/// Run the check command
pub fn run(args: CheckArgs) -> CliResult<()> {
    let settings = args.source_args.settings()?;
    let split_mode = if args.first_equals {
        SplitMode::FirstEquals
    } else {
        settings.split_mode
    };

    let resolver = SourceResolver::from_settings(&settings);
    let conn = ResolvedConnection::load_with(&resolver, split_mode)?;

    if args.json {
        let report = serde_json::json!({
            "source": conn.source().as_str(),
            "backend": conn.backend().name(),
            "params": conn.params().redacted(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::header("Check Configuration");

    kv("Source", conn.source().as_str());
    kv("Backend", conn.backend().name());
    output::newline();

    if conn.params().is_empty() {
        warn("Connection string has no recognized parameters");
        return Ok(());
    }

    output::section("Parameters");
    let redacted = conn.params().redacted();
    output::params(redacted.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    output::newline();
    success(&format!("{} configuration is ready", conn.backend()));

    Ok(())
}
