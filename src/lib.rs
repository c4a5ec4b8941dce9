//! # contoso-db
//!
//! Connection configuration for the Contoso hotel database layer.
//!
//! Exactly one backend is expected to be configured, either through a file in
//! `<app-root>/secrets-store/` or through an environment variable:
//!
//! - `MSSQL_CONNECTION_STRING`
//! - `POSTGRES_CONNECTION_STRING`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use contoso_db::prelude::*;
//!
//! fn main() -> Result<(), contoso_db::ConfigError> {
//!     contoso_db::logging::init();
//!
//!     let resolver = SourceResolver::from_env();
//!     let conn = ResolvedConnection::load(&resolver)?;
//!
//!     match conn.backend() {
//!         Backend::Mssql => { /* hand conn to the SQL Server layer */ }
//!         Backend::Postgres => { /* hand conn to the PostgreSQL layer */ }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Source resolution, parsing and settings.
pub mod config {
    pub use contoso_db_config::*;
}

pub use contoso_db_config::logging;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{
        AllowList, AmbiguityPolicy, Backend, ConnectionParams, ResolvedConnection,
        ResolverSettings, SourceName, SourceResolver, SplitMode, extract, tokenize,
    };
}

// Re-export key types at the crate root
pub use config::{ConfigError, ConfigResult, ResolvedConnection};
