//! contoso-db CLI - Inspect database connection configuration.
//!
//! This crate provides the `contoso-db` tool, which shows which configuration
//! source resolves on the current machine and what a connection string
//! parses to under a given allow-list.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
