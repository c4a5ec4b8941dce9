//! Fuzz target for allow-list extraction.
//!
//! Feeds arbitrary connection strings and allow-lists to the extractor.
//! Invalid patterns may be rejected, but nothing may panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_extract
//! ```

#![no_main]

use arbitrary::Arbitrary;
use contoso_db_config::{AllowList, ConnectionStringParser, SplitMode};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    raw: String,
    names: Vec<String>,
    patterns: Vec<(String, String)>,
    first_equals: bool,
}

fuzz_target!(|input: FuzzInput| {
    let allow_list = if input.patterns.is_empty() {
        AllowList::names(input.names)
    } else {
        AllowList::patterns(input.patterns)
    };

    let mode = if input.first_equals {
        SplitMode::FirstEquals
    } else {
        SplitMode::Strict
    };

    if let Ok(parser) = ConnectionStringParser::new(&allow_list) {
        let parser = parser.split_mode(mode);
        let first = parser.extract(&input.raw);
        let second = parser.extract(&input.raw);
        assert_eq!(first, second);

        for key in first.keys() {
            assert!(parser.allows(key));
        }
    }
});
