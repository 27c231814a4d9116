//! Heredity common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the heredity crates:
//! - Arena indices for individuals in a pedigree
//! - The gene count domain {0, 1, 2}
//! - Common error types and their classification
//! - Output format and schema versioning

pub mod error;
pub mod gene;
pub mod id;
pub mod output;
pub mod schema;

pub use error::{Error, ErrorKind, Result};
pub use gene::GeneCount;
pub use id::PersonId;
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
