//! `contoso-db resolve` command - Show which configuration source resolves.

use contoso_db_config::{Backend, SourceName, SourceResolver};
use tracing::debug;

use crate::cli::ResolveArgs;
use crate::error::CliResult;
use crate::output::{self, kv, success};

/// Run the resolve command
pub fn run(args: ResolveArgs) -> CliResult<()> {
    output::header("Resolve Connection");

    let settings = args.source_args.settings()?;
    let resolver = SourceResolver::from_settings(&settings);
    debug!(app_root = %resolver.app_root().display(), "Resolver configured");

    kv("App root", &resolver.app_root().display().to_string());
    output::newline();

    let (value, source) = match args.source.as_deref() {
        Some(name) => {
            let source: SourceName = name.parse()?;
            (resolver.resolve(source)?, source)
        }
        None => resolver.resolve_defined_source()?,
    };

    let secret_path = resolver.secret_path(source);
    let origin = if secret_path.is_file() {
        format!("secret store ({})", secret_path.display())
    } else {
        "environment".to_string()
    };

    kv("Source", source.as_str());
    kv("Backend", Backend::from_source(source).name());
    kv("Origin", &origin);
    if args.show_secret {
        kv("Connection string", &value);
    } else {
        kv("Connection string", &output::hidden(&value));
    }

    output::newline();
    success("Connection string resolved");

    Ok(())
}
