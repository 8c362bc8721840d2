//! fdscan CLI entry point.
//!
//! Parses the command surface, validates the column selection before any
//! collection work, then runs the pipeline: user cache → collect →
//! project → render.

use clap::Parser;
use fdscan_common::{OutputMode, Result};
use fdscan_core::collect::{self, CollectOptions, DEFAULT_WORKERS};
use fdscan_core::column::{self, ColumnId};
use fdscan_core::exit_codes::ExitCode;
use fdscan_core::output::{self, RenderOptions};
use fdscan_core::project;
use fdscan_core::users::UserCache;
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// List file descriptors of running processes
#[derive(Parser, Debug)]
#[command(name = "fdscan")]
#[command(author, version, about, long_about = None)]
#[command(after_help = column_help())]
struct Cli {
    /// Output columns (comma-separated, case-insensitive)
    #[arg(short = 'o', long = "output", value_name = "list")]
    output: Option<String>,

    /// Don't print headings
    #[arg(short = 'n', long = "no-headings")]
    no_headings: bool,

    /// Use raw output format
    #[arg(short = 'r', long = "raw")]
    raw: bool,

    /// Use JSON output format
    #[arg(short = 'J', long = "json")]
    json: bool,

    /// Restrict the scan to specific PIDs (repeatable)
    #[arg(long = "pid", value_name = "pid")]
    pids: Vec<u32>,

    /// Worker-pool size for collection
    #[arg(long, hide = true, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Column catalog section of the usage screen.
fn column_help() -> String {
    let mut help = String::from("Available output columns:\n");
    for id in ColumnId::ALL {
        let info = id.info();
        help.push_str(&format!(" {:>11}  {}\n", info.name, info.help));
    }
    help
}

fn init_logging(verbose: u8, quiet: bool) {
    let default = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_env("FDSCAN_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    // Column selection is validated before any collection work starts.
    let columns = match &cli.output {
        Some(list) => column::parse_selection(list)?,
        None => column::default_columns(),
    };

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.raw {
        OutputMode::Raw
    } else {
        OutputMode::Plain
    };

    // The user cache lives for the whole run: created before collection,
    // queried only during projection, dropped after rendering.
    let users = UserCache::load();

    let procs = collect::collect(&CollectOptions {
        workers: cli.workers,
        pids: cli.pids.clone(),
    })?;

    let rows = project::project(&procs, &columns, &users);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::render(
        &mut out,
        &columns,
        &rows,
        &RenderOptions {
            mode,
            no_headings: cli.no_headings,
        },
    )?;
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let code = match run(&cli) {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            eprintln!("fdscan: {}", err);
            ExitCode::from_error(&err)
        }
    };
    std::process::exit(code.into());
}
