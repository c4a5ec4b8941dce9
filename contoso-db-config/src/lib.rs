//! # contoso-db-config
//!
//! Connection configuration for the Contoso hotel database layer.
//!
//! This crate answers two questions at startup:
//! - Which backend is configured? A fixed list of sources is tried in order,
//!   each read from the secret store or the environment.
//! - What does its connection string say? The string is tokenized on
//!   unescaped `;` and filtered through an allow-list with optional value
//!   patterns.
//!
//! The result is a [`ResolvedConnection`] that is passed to the code that
//! talks to the database. No database I/O happens here.
//!
//! ## Resolving a source
//!
//! ```rust
//! use contoso_db_config::{MapEnvSource, SourceName, SourceResolver};
//!
//! let env = MapEnvSource::new().set("MSSQL_CONNECTION_STRING", "Server=db;Database=hotel");
//! let resolver = SourceResolver::new("/srv/contoso").with_env(env);
//!
//! let (raw, source) = resolver.resolve_defined_source().unwrap();
//! assert_eq!(source, SourceName::Mssql);
//! assert_eq!(raw, "Server=db;Database=hotel");
//! ```
//!
//! ## Parsing a connection string
//!
//! ```rust
//! use contoso_db_config::{tokenize, extract, AllowList};
//!
//! assert_eq!(tokenize("a=1\\;b;c=2"), vec!["a=1;b", "c=2"]);
//!
//! let allow = AllowList::patterns([("host", ""), ("port", r"^\d+$")]);
//! let params = extract("host=x;port=5432", &allow).unwrap();
//! assert_eq!(params.get("port"), Some("5432"));
//! ```
//!
//! ## Startup configuration
//!
//! ```rust
//! use contoso_db_config::{Backend, MapEnvSource, ResolvedConnection, SourceResolver};
//!
//! let env = MapEnvSource::new().set("POSTGRES_CONNECTION_STRING", "host=db;port=5432;dbname=hotel");
//! let resolver = SourceResolver::new("/srv/contoso").with_env(env);
//!
//! let conn = ResolvedConnection::load(&resolver).unwrap();
//! assert_eq!(conn.backend(), Backend::Postgres);
//! assert_eq!(conn.params().get("dbname"), Some("hotel"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod backend;
pub mod env;
pub mod error;
pub mod logging;
pub mod parser;
pub mod settings;
pub mod source;

pub use backend::{Backend, ResolvedConnection};
pub use env::{EnvSource, MapEnvSource, StdEnvSource};
pub use error::{ConfigError, ConfigResult};
pub use parser::{
    AllowList, ConnectionParams, ConnectionStringParser, SplitMode, extract, is_secret_key,
    tokenize,
};
pub use settings::{ResolverSettings, SETTINGS_FILE_NAME};
pub use source::{
    AmbiguityPolicy, SourceName, SourceResolver, resolve_connection_string,
    resolve_defined_source,
};
