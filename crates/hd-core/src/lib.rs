//! Heredity core library.
//!
//! Exact posterior inference of gene counts and trait presence over a
//! pedigree. The binary in `main.rs` is a thin wrapper around:
//! - [`pedigree`]: the validated pedigree model and its CSV loader
//! - [`inference`]: enumeration, joint probabilities, accumulation
//! - [`report`]: JSON and text renderings of results
//! - [`exit_codes`]: process exit codes by error class

pub mod exit_codes;
pub mod inference;
pub mod pedigree;
pub mod report;

pub use hd_config as config;

pub use exit_codes::ExitCode;
pub use inference::{infer, Inference, InferenceConfig, InferenceStats, Posteriors};
pub use pedigree::{load_pedigree, Pedigree, PersonRecord};
