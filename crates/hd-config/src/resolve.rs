//! Tables resolution: CLI → env → XDG → defaults.
//!
//! An explicitly named file (CLI flag or environment variable) must load and
//! validate. The XDG location is optional: if the file is absent the embedded
//! defaults are used, but a present-and-broken file is still an error.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::tables::ProbabilityTables;
use crate::validate::ValidationResult;

/// Environment variable naming a tables file.
pub const TABLES_ENV_VAR: &str = "HEREDITY_TABLES";

/// File name looked up under the user config directory.
pub const TABLES_FILE_NAME: &str = "tables.json";

/// Candidate locations for the tables file.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub cli: Option<PathBuf>,
    pub env: Option<PathBuf>,
    pub xdg: Option<PathBuf>,
}

impl ConfigPaths {
    /// Collect candidates from the CLI flag, the environment, and the user
    /// config directory (`$XDG_CONFIG_HOME/heredity/tables.json`).
    pub fn discover(cli: Option<&Path>) -> Self {
        let env = std::env::var_os(TABLES_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let xdg = dirs::config_dir().map(|d| d.join("heredity").join(TABLES_FILE_NAME));
        Self {
            cli: cli.map(Path::to_path_buf),
            env,
            xdg,
        }
    }
}

/// Where the resolved tables came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TablesSource {
    Cli(PathBuf),
    Env(PathBuf),
    Xdg(PathBuf),
    Defaults,
}

impl fmt::Display for TablesSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TablesSource::Cli(p) => write!(f, "cli:{}", p.display()),
            TablesSource::Env(p) => write!(f, "env:{}", p.display()),
            TablesSource::Xdg(p) => write!(f, "xdg:{}", p.display()),
            TablesSource::Defaults => write!(f, "defaults"),
        }
    }
}

/// Validated tables plus their provenance.
#[derive(Debug, Clone)]
pub struct ResolvedTables {
    pub tables: ProbabilityTables,
    pub source: TablesSource,
}

fn load_validated(path: &Path) -> ValidationResult<ProbabilityTables> {
    let tables = ProbabilityTables::from_file(path)?;
    tables.validate()?;
    Ok(tables)
}

/// Resolve the tables to use for this run.
pub fn resolve_tables(paths: &ConfigPaths) -> ValidationResult<ResolvedTables> {
    let (tables, source) = if let Some(path) = &paths.cli {
        (load_validated(path)?, TablesSource::Cli(path.clone()))
    } else if let Some(path) = &paths.env {
        (load_validated(path)?, TablesSource::Env(path.clone()))
    } else if let Some(path) = paths.xdg.as_ref().filter(|p| p.is_file()) {
        (load_validated(path)?, TablesSource::Xdg(path.clone()))
    } else {
        debug!("no tables file found, using embedded defaults");
        (ProbabilityTables::default(), TablesSource::Defaults)
    };

    info!(source = %source, fingerprint = %tables.fingerprint(), "probability tables resolved");
    Ok(ResolvedTables { tables, source })
}
