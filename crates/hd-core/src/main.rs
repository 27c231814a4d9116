//! heredity - exact pedigree inference CLI.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use hd_common::{Error, OutputFormat, Result, SCHEMA_VERSION};
use hd_config::{resolve_tables, ConfigPaths, ProbabilityTables, ResolvedTables};
use hd_core::exit_codes::ExitCode;
use hd_core::inference::{infer, InferenceConfig, DEFAULT_MAX_INDIVIDUALS};
use hd_core::pedigree::load_pedigree;
use hd_core::report::{CheckReport, InferenceReport, TablesReport};
use serde::Serialize;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exact posterior inference of gene counts and trait presence in a pedigree.
#[derive(Parser)]
#[command(name = "heredity", version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Probability tables file (overrides $HEREDITY_TABLES and the user config)
    #[arg(long, global = true, value_name = "PATH")]
    tables: Option<PathBuf>,

    /// Log level filter; RUST_LOG takes precedence when set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute posterior distributions for every individual
    Infer {
        /// Pedigree CSV (name,mother,father,trait[,gene])
        pedigree: PathBuf,

        /// Enumerate on the current thread only
        #[arg(long)]
        sequential: bool,

        /// Refuse pedigrees larger than this
        #[arg(long, env = "HEREDITY_MAX_INDIVIDUALS", default_value_t = DEFAULT_MAX_INDIVIDUALS)]
        max_individuals: usize,
    },

    /// Validate a pedigree and report its size without running inference
    Check {
        pedigree: PathBuf,

        #[arg(long, env = "HEREDITY_MAX_INDIVIDUALS", default_value_t = DEFAULT_MAX_INDIVIDUALS)]
        max_individuals: usize,
    },

    /// Inspect probability tables
    #[command(subcommand)]
    Tables(TablesCommand),
}

#[derive(Subcommand)]
enum TablesCommand {
    /// Print the resolved tables and where they came from
    Show,
    /// Parse and validate a tables file
    Validate { path: PathBuf },
    /// Print the JSON Schema for tables files
    Schema,
}

fn init_tracing(cli: &Cli) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    // Release builds abort on panic, so exit from the hook itself.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        default_hook(info);
        std::process::exit(ExitCode::InternalError.as_i32());
    }));

    let code = match run(&cli) {
        Ok(()) => ExitCode::Clean,
        Err(err) => {
            error!(code = err.code(), "{err}");
            report_error(cli.format, &err);
            ExitCode::from(&err)
        }
    };
    std::process::exit(code.as_i32());
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Infer {
            pedigree,
            sequential,
            max_individuals,
        } => run_infer(cli, pedigree, !sequential, *max_individuals),
        Commands::Check {
            pedigree,
            max_individuals,
        } => {
            let pedigree = load_pedigree(pedigree)?;
            let report = CheckReport::new(&pedigree, *max_individuals)?;
            emit(cli.format, &report, || report.render_text())
        }
        Commands::Tables(TablesCommand::Show) => {
            let resolved = resolve(cli)?;
            let report = TablesReport::from(&resolved);
            emit(cli.format, &report, || {
                let body = serde_json::to_string_pretty(&report.tables).unwrap_or_default();
                format!(
                    "source: {}\nfingerprint: {}\n{body}\n",
                    report.source, report.fingerprint
                )
            })
        }
        Commands::Tables(TablesCommand::Validate { path }) => {
            let tables = ProbabilityTables::from_file(path)?;
            tables.validate()?;
            let outcome = ValidateOutcome {
                path: path.display().to_string(),
                valid: true,
                fingerprint: tables.fingerprint(),
            };
            emit(cli.format, &outcome, || {
                format!("{}: valid ({})\n", outcome.path, outcome.fingerprint)
            })
        }
        Commands::Tables(TablesCommand::Schema) => {
            let schema = ProbabilityTables::json_schema();
            write_stdout(&format!("{}\n", serde_json::to_string_pretty(&schema)?))
        }
    }
}

fn run_infer(cli: &Cli, path: &Path, parallel: bool, max_individuals: usize) -> Result<()> {
    let pedigree = load_pedigree(path)?;
    let resolved = resolve(cli)?;
    let config = InferenceConfig {
        parallel,
        max_individuals,
        ..Default::default()
    };
    debug!(?config, "starting inference");

    let inference = infer(&pedigree, &resolved.tables, &config)?;
    let report = InferenceReport::new(&inference, &resolved);
    emit(cli.format, &report, || report.render_text())
}

fn resolve(cli: &Cli) -> Result<ResolvedTables> {
    let paths = ConfigPaths::discover(cli.tables.as_deref());
    Ok(resolve_tables(&paths)?)
}

#[derive(Serialize)]
struct ValidateOutcome {
    path: String,
    valid: bool,
    fingerprint: String,
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    schema_version: &'a str,
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: u32,
    kind: String,
    message: String,
}

fn emit<T, F>(format: OutputFormat, value: &T, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    let rendered = match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => text(),
    };
    write_stdout(&rendered)
}

fn write_stdout(s: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(s.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn report_error(format: OutputFormat, err: &Error) {
    match format {
        OutputFormat::Json => {
            let report = ErrorReport {
                schema_version: SCHEMA_VERSION,
                error: ErrorBody {
                    code: err.code(),
                    kind: format!("{:?}", err.kind()).to_lowercase(),
                    message: err.to_string(),
                },
            };
            if let Ok(json) = serde_json::to_string_pretty(&report) {
                println!("{json}");
            }
        }
        OutputFormat::Text => eprintln!("error: {err}"),
    }
}
