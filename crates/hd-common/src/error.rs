//! Error types for heredity.

use thiserror::Error;

/// Result type alias for heredity operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad error classes, used for exit codes and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or inconsistent pedigree input.
    Data,
    /// Invalid probability tables or configuration.
    Config,
    /// Degenerate computation (no admissible hypotheses, size limits).
    Computation,
    /// I/O and serialization failures.
    Io,
}

/// Unified error type for heredity.
#[derive(Error, Debug)]
pub enum Error {
    // Data errors (10-19)
    #[error("pedigree contains no individuals")]
    EmptyPedigree,

    #[error("duplicate individual '{name}'")]
    DuplicateIndividual { name: String },

    #[error("individual '{name}' must have both parents or neither")]
    IncompleteParentage { name: String },

    #[error("individual '{name}' references unknown parent '{parent}'")]
    UnknownParent { name: String, parent: String },

    #[error("individual '{name}' is listed as its own parent")]
    SelfParent { name: String },

    #[error("individual '{name}' has the same individual as mother and father")]
    SameParents { name: String },

    #[error("parentage cycle detected involving '{name}'")]
    ParentageCycle { name: String },

    #[error("row {row}: invalid trait value '{value}' (expected 0, 1, or blank)")]
    InvalidTrait { row: usize, value: String },

    #[error("row {row}: invalid gene count '{value}' (expected 0, 1, 2, or blank)")]
    InvalidGeneCount { row: usize, value: String },

    #[error("pedigree data error: {0}")]
    Pedigree(String),

    // Configuration errors (20-29)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid probability tables: {0}")]
    InvalidTables(String),

    // Computation errors (30-39)
    #[error("no hypothesis is compatible with the evidence (total probability mass is zero)")]
    EmptyHypothesisSpace,

    #[error("pedigree has {count} individuals; exhaustive enumeration is limited to {max}")]
    PedigreeTooLarge { count: usize, max: usize },

    #[error("numerical instability detected: {0}")]
    NumericalInstability(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::EmptyPedigree => 10,
            Error::DuplicateIndividual { .. } => 11,
            Error::IncompleteParentage { .. } => 12,
            Error::UnknownParent { .. } => 13,
            Error::SelfParent { .. } => 14,
            Error::SameParents { .. } => 15,
            Error::ParentageCycle { .. } => 16,
            Error::InvalidTrait { .. } => 17,
            Error::InvalidGeneCount { .. } => 18,
            Error::Pedigree(_) => 19,
            Error::Config(_) => 20,
            Error::InvalidTables(_) => 21,
            Error::EmptyHypothesisSpace => 30,
            Error::PedigreeTooLarge { .. } => 31,
            Error::NumericalInstability(_) => 32,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Classifies the error into its broad category.
    pub fn kind(&self) -> ErrorKind {
        match self.code() {
            10..=19 => ErrorKind::Data,
            20..=29 => ErrorKind::Config,
            30..=39 => ErrorKind::Computation,
            _ => ErrorKind::Io,
        }
    }
}
