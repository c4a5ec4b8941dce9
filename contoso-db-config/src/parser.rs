//! Connection string tokenizer and allow-list extraction.
//!
//! Connection strings are `key=value` pairs separated by `;`. A `;` that is
//! directly preceded by a backslash does not split, so values can carry a
//! literal semicolon:
//!
//! ```text
//! Server=db;Password=se\;cret;Encrypt=yes
//! ```
//!
//! Extraction is permissive about the input and strict about the keys: only
//! keys named by the [`AllowList`] are kept, values are checked against the
//! key's pattern when one is given, and everything else is dropped without
//! failing the parse.
//!
//! ```rust
//! use contoso_db_config::{AllowList, extract};
//!
//! let allow = AllowList::patterns([("host", ""), ("port", r"\d+$")]);
//! let params = extract("host=x;port=abc;extra=1", &allow).unwrap();
//! assert_eq!(params.get("host"), Some("x"));
//! assert_eq!(params.get("port"), None);
//! assert_eq!(params.len(), 1);
//! ```

use crate::error::{ConfigError, ConfigResult};
use indexmap::IndexMap;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Pair delimiter.
pub const DELIMITER: char = ';';

/// Escape character for the delimiter.
pub const ESCAPE: char = '\\';

/// Keys whose values are never displayed.
const SECRET_KEYS: &[&str] = &["password", "pwd"];

/// Placeholder shown instead of secret values.
pub const REDACTED: &str = "********";

/// Split a raw connection string into unescaped segments.
///
/// Every `;` not directly preceded by `\` ends a segment. Each segment then
/// has `\;` replaced by `;`, followed by `\\;` replaced by `\;`, in that order.
/// Empty segments are kept.
pub fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev = None;

    for (idx, c) in raw.char_indices() {
        if c == DELIMITER && prev != Some(ESCAPE) {
            tokens.push(unescape(&raw[start..idx]));
            start = idx + c.len_utf8();
        }
        prev = Some(c);
    }
    tokens.push(unescape(&raw[start..]));

    tokens
}

fn unescape(segment: &str) -> String {
    segment.replace("\\;", ";").replace("\\\\;", "\\;")
}

/// How a token is split into key and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitMode {
    /// The token must contain exactly one `=`; anything else is skipped.
    #[default]
    Strict,
    /// Split at the first `=`; the value may contain more `=` characters.
    FirstEquals,
}

impl SplitMode {
    fn split<'a>(&self, token: &'a str) -> Option<(&'a str, &'a str)> {
        let (key, value) = token.split_once('=')?;
        match self {
            Self::Strict if value.contains('=') => None,
            _ => Some((key, value)),
        }
    }
}

/// The keys a parser accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowList {
    /// Accepted key names, with no constraint on values.
    Names(Vec<String>),
    /// Key names mapped to a pattern the value must match from its start.
    /// An empty pattern accepts any value.
    Patterns(IndexMap<String, String>),
}

impl AllowList {
    /// Build a name-only allow-list.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(names.into_iter().map(Into::into).collect())
    }

    /// Build a name-to-pattern allow-list.
    pub fn patterns<I, K, V>(patterns: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Patterns(
            patterns
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        match self {
            Self::Names(names) => names.len(),
            Self::Patterns(patterns) => patterns.len(),
        }
    }

    /// Check if no key is allowed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compiled allow-list parser, reusable across inputs.
#[derive(Debug, Clone)]
pub struct ConnectionStringParser {
    rules: IndexMap<String, Option<Regex>>,
    split_mode: SplitMode,
}

impl ConnectionStringParser {
    /// Compile an allow-list.
    ///
    /// Keys are lower-cased. Fails with [`ConfigError::InvalidAllowList`] if a
    /// pattern does not compile.
    pub fn new(allow_list: &AllowList) -> ConfigResult<Self> {
        let rules: IndexMap<String, Option<Regex>> = match allow_list {
            AllowList::Names(names) => names.iter().map(|n| (n.to_lowercase(), None)).collect(),
            AllowList::Patterns(patterns) => {
                let mut rules = IndexMap::with_capacity(patterns.len());
                for (key, pattern) in patterns {
                    let key = key.to_lowercase();
                    let rule = if pattern.is_empty() {
                        None
                    } else {
                        Some(compile_anchored(&key, pattern)?)
                    };
                    rules.insert(key, rule);
                }
                rules
            }
        };

        Ok(Self {
            rules,
            split_mode: SplitMode::default(),
        })
    }

    /// Set how tokens are split into key and value.
    pub fn split_mode(mut self, mode: SplitMode) -> Self {
        self.split_mode = mode;
        self
    }

    /// Check whether a key is allowed.
    pub fn allows(&self, key: &str) -> bool {
        self.rules.contains_key(&key.trim().to_lowercase())
    }

    /// Extract the allowed, valid pairs from a raw connection string.
    ///
    /// Malformed tokens, unknown keys and values rejected by a pattern are
    /// dropped. A later occurrence of a key replaces an earlier one.
    pub fn extract(&self, raw: &str) -> ConnectionParams {
        let mut entries = IndexMap::new();

        for token in tokenize(raw) {
            let Some((key, value)) = self.split_mode.split(&token) else {
                trace!(mode = ?self.split_mode, "Skipping malformed token");
                continue;
            };

            let key = key.trim().to_lowercase();
            let Some(rule) = self.rules.get(&key) else {
                debug!(key = %key, "Key is not in allow-list, skipping");
                continue;
            };

            if let Some(pattern) = rule {
                if !pattern.is_match(value) {
                    trace!(key = %key, "Value rejected by pattern");
                    continue;
                }
            }

            entries.insert(key, value.to_string());
        }

        debug!(accepted = entries.len(), "Connection string extracted");
        ConnectionParams { entries }
    }
}

fn compile_anchored(key: &str, pattern: &str) -> ConfigResult<Regex> {
    Regex::new(&format!("^(?:{})", pattern)).map_err(|e| {
        ConfigError::invalid_allow_list(format!("pattern for `{}` does not compile: {}", key, e))
    })
}

/// Extract the allowed, valid pairs from a raw connection string.
///
/// Only a malformed allow-list is an error; see [`ConnectionStringParser::extract`].
pub fn extract(raw: &str, allow_list: &AllowList) -> ConfigResult<ConnectionParams> {
    Ok(ConnectionStringParser::new(allow_list)?.extract(raw))
}

/// Validated connection parameters, keyed by lower-case name in input order.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConnectionParams {
    entries: IndexMap<String, String>,
}

impl ConnectionParams {
    /// Get a parameter value. The key is matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Check if a parameter is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parameter names in input order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Copy of the parameters with secret values masked.
    pub fn redacted(&self) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| {
                let value = if is_secret_key(k) {
                    REDACTED.to_string()
                } else {
                    v.clone()
                };
                (k.clone(), value)
            })
            .collect()
    }
}

impl std::fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.redacted()).finish()
    }
}

impl IntoIterator for ConnectionParams {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Check whether a parameter name holds a secret.
pub fn is_secret_key(key: &str) -> bool {
    let key = key.trim().to_lowercase();
    SECRET_KEYS.contains(&key.as_str())
}
