//! contoso-db CLI - Inspect database connection configuration.

use clap::Parser;

use contoso_db_cli::cli::{Cli, Command};
use contoso_db_cli::commands;
use contoso_db_cli::error::CliResult;
use contoso_db_cli::output;
use contoso_db_config::logging;

fn main() {
    logging::init();

    // Run the CLI and handle errors
    if let Err(e) = run() {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Resolve(args) => commands::resolve::run(args),
        Command::Parse(args) => commands::parse::run(args),
        Command::Check(args) => commands::check::run(args),
        Command::Version => commands::version::run(),
    }
}
