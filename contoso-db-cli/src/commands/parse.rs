//! `contoso-db parse` command - Parse a connection string against an allow-list.

use contoso_db_config::{AllowList, Backend, ConnectionStringParser, SplitMode, tokenize};

use crate::cli::ParseArgs;
use crate::error::{CliError, CliResult};
use crate::output::{self, kv, success, warn};

/// Run the parse command
pub fn run(args: ParseArgs) -> CliResult<()> {
    let allow_list = allow_list(&args)?;
    let split_mode = if args.first_equals {
        SplitMode::FirstEquals
    } else {
        SplitMode::Strict
    };

    let parser = ConnectionStringParser::new(&allow_list)?.split_mode(split_mode);
    let params = parser.extract(&args.raw);

    if args.json {
        let json = if args.show_secret {
            serde_json::to_string_pretty(&params)?
        } else {
            serde_json::to_string_pretty(&params.redacted())?
        };
        println!("{}", json);
        return Ok(());
    }

    output::header("Parse Connection String");

    let tokens = tokenize(&args.raw);
    kv("Tokens", &tokens.len().to_string());
    kv("Accepted", &params.len().to_string());
    output::newline();

    if params.is_empty() {
        warn("No parameters accepted");
        return Ok(());
    }

    output::section("Parameters");
    if args.show_secret {
        output::params(params.iter());
    } else {
        let redacted = params.redacted();
        output::params(redacted.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    output::newline();
    success("Connection string parsed");

    Ok(())
}

fn allow_list(args: &ParseArgs) -> CliResult<AllowList> {
    if let Some(backend) = args.backend {
        return Ok(Backend::from(backend).allow_list());
    }

    if !args.patterns.is_empty() {
        let entries = args
            .allow
            .iter()
            .map(|key| (key.clone(), String::new()))
            .chain(args.patterns.iter().cloned());
        return Ok(AllowList::patterns(entries));
    }

    if !args.allow.is_empty() {
        return Ok(AllowList::names(args.allow.iter().cloned()));
    }

    Err(CliError::Usage(
        "no allow-list given, use --allow, --pattern or --backend".to_string(),
    ))
}
