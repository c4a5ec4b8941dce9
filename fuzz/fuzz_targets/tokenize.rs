//! Fuzz target for the connection string tokenizer.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_tokenize
//! ```

#![no_main]

use contoso_db_config::tokenize;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let tokens = tokenize(input);

        // Unescaping only ever shortens a segment
        assert!(!tokens.is_empty());
        assert!(tokens.iter().map(String::len).sum::<usize>() <= input.len());

        if !input.contains(';') {
            assert_eq!(tokens, vec![input.to_string()]);
        }
    }
});
