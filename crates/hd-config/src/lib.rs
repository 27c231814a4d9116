//! Heredity probability tables loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the tables JSON file
//! - Embedded population-genetics defaults
//! - Semantic validation (ranges, rows summing to one, schema version)
//! - Tables resolution (CLI → env → XDG → defaults)

pub mod resolve;
pub mod tables;
pub mod validate;

pub use resolve::{resolve_tables, ConfigPaths, ResolvedTables, TablesSource, TABLES_ENV_VAR};
pub use tables::{GenePrior, ProbabilityTables, TraitParams, TraitTable};
pub use validate::{ValidationError, ValidationResult};
