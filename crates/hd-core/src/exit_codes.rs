//! Exit codes for the heredity CLI.
//!
//! Exit codes communicate the outcome class without requiring output parsing.

use hd_common::{Error, ErrorKind};

/// Exit codes for heredity operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    /// Invalid command-line arguments (emitted by clap)
    ArgsError = 2,

    /// Malformed or inconsistent pedigree
    DataError = 10,

    /// Invalid probability tables or configuration
    ConfigError = 11,

    /// Inference could not produce a distribution
    ComputationError = 12,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err.kind() {
            ErrorKind::Data => ExitCode::DataError,
            ErrorKind::Config => ExitCode::ConfigError,
            ErrorKind::Computation => ExitCode::ComputationError,
            ErrorKind::Io => ExitCode::IoError,
        }
    }
}
