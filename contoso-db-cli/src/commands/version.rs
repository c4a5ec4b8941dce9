//! `contoso-db version` command - Display version information.

use contoso_db_config::SourceName;

use crate::error::CliResult;
use crate::output::{self, kv};

/// Package version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
const NAME: &str = env!("CARGO_PKG_NAME");

/// Run the version command
pub fn run() -> CliResult<()> {
    output::header("contoso-db");

    kv("Version", VERSION);
    kv("Binary", NAME);

    #[cfg(debug_assertions)]
    let build_mode = "debug";
    #[cfg(not(debug_assertions))]
    let build_mode = "release";

    kv("Build", build_mode);

    output::newline();

    output::section("Sources");
    for source in SourceName::ALL {
        kv(source.as_str(), "secrets-store file or environment variable");
    }

    output::newline();
    output::dim("https://github.com/contoso-hotel/contoso-db");

    Ok(())
}
