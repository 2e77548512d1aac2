#![forbid(unsafe_code)]

mod cmd;
mod output;
mod session;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use cablepath_core::config::{self, InvalidIdentifier};
use cablepath_core::error::ErrorCode;
use cablepath_core::path::PathGraphError;
use clap::{Parser, Subcommand};
use output::{CliError, OutputMode};
use session::{MissingDatabase, Session};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cablepath: connectivity queries over cable link lists",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging (debug level unless CABLEPATH_LOG is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// SQLite database holding the link list.
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Project config file (default: .cablepath/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Alias for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Queries",
        about = "List connections linked to a connection",
        long_about = "List every connection reachable from a connection, in breadth-first order.",
        after_help = "EXAMPLES:\n    # Connections wired to connection 42\n    cablepath --db harness.db linked 42\n\n    # Emit machine-readable output\n    cablepath --db harness.db linked 42 --json"
    )]
    Linked(cmd::linked::LinkedArgs),

    #[command(
        next_help_heading = "Queries",
        about = "List connectors linked to a connector",
        long_about = "List connectors reachable from any connection of a connector.",
        after_help = "EXAMPLES:\n    # Connectors wired to connector 7\n    cablepath --db harness.db connectors 7\n\n    # Skip member connection 70 of connector 7\n    cablepath --db harness.db connectors 7 --ignore 70"
    )]
    Connectors(cmd::connectors::ConnectorsArgs),

    #[command(
        next_help_heading = "Queries",
        about = "Show the cheapest route between two connections",
        after_help = "EXAMPLES:\n    # Route from 1 to 9\n    cablepath --db harness.db path 1 9"
    )]
    Path(cmd::path::PathArgs),

    #[command(
        next_help_heading = "Reporting",
        about = "Show link graph size",
        after_help = "EXAMPLES:\n    # Count links, connections and edges\n    cablepath --db harness.db stats"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Reporting",
        about = "Draw the wiring reached from a connection as Graphviz DOT",
        after_help = "EXAMPLES:\n    # Render to SVG\n    cablepath --db harness.db dot 42 | dot -Tsvg > path.svg"
    )]
    Dot(cmd::dot::DotArgs),
}

/// Filter used when `CABLEPATH_LOG` is unset.
const fn default_log_directive(verbose: bool, debug_env: bool) -> &'static str {
    if verbose || debug_env {
        "cablepath=debug,info"
    } else {
        "cablepath=info,warn"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CABLEPATH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(default_log_directive(verbose, env::var("DEBUG").is_ok()))
    });

    let format = env::var("CABLEPATH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Map a command failure onto its stable error code.
fn classify_error(err: &anyhow::Error) -> ErrorCode {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<PathGraphError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<InvalidIdentifier>() {
            return e.code();
        }
        if cause.downcast_ref::<toml::de::Error>().is_some() {
            return ErrorCode::ConfigParseError;
        }
        if cause.downcast_ref::<MissingDatabase>().is_some()
            || cause.downcast_ref::<rusqlite::Error>().is_some()
        {
            return ErrorCode::LinkSourceUnavailable;
        }
    }
    ErrorCode::InternalUnexpected
}

fn run(cli: &Cli, user: &config::UserConfig, output: OutputMode) -> anyhow::Result<()> {
    let project_root = env::current_dir()?;
    let session = Session::open(cli.db.as_deref(), cli.config.as_deref(), user, &project_root)?;

    match &cli.command {
        Commands::Linked(args) => cmd::linked::run_linked(args, output, &session),
        Commands::Connectors(args) => cmd::connectors::run_connectors(args, output, &session),
        Commands::Path(args) => cmd::path::run_path(args, output, &session),
        Commands::Stats(args) => cmd::stats::run_stats(args, output, &session),
        Commands::Dot(args) => cmd::dot::run_dot(args, output, &session),
    }
}

fn fail(output: OutputMode, err: &anyhow::Error) -> ExitCode {
    let code = classify_error(err);
    debug!(code = %code, "command failed");
    if let Err(io_err) = output::render_error(output, &CliError::new(code, err)) {
        eprintln!("error: {err:#} ({io_err})");
    }
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(verbose = cli.verbose, "logging initialised");

    let user = match config::load_user_config() {
        Ok(user) => user,
        Err(err) => return fail(output::resolve_output_mode(cli.format, cli.json, None), &err),
    };
    let output = output::resolve_output_mode(cli.format, cli.json, user.output.as_deref());

    match run(&cli, &user, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(output, &err),
    }
}
