//! Fuzz target for the resolver settings parser.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_settings
//! ```

#![no_main]

use contoso_db_config::ResolverSettings;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // The parser should never panic, only return errors
        let _ = ResolverSettings::from_toml(input);
    }
});
