//! `uvt` command-line tool
//!
//! Runs unique view time analysis over a playback log file, or starts an
//! interactive shell when no subcommand is given.

#![deny(clippy::all)]
#![deny(unsafe_code)]

mod analyze;
mod shell;

use std::{io, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::error;
use uvt_core::report::ReportOptions;

use crate::{analyze::AnalyzeArgs, shell::Shell};

#[derive(Parser, Debug)]
#[command(name = "uvt", author, version, about = "Unique view time analysis for video playback logs", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a playback log and print the report
    Analyze {
        /// Log file with one VIDEO,START,END[,USER] record per line, `-` for stdin
        input: PathBuf,

        /// Start of the analysis window
        #[arg(long, requires = "end")]
        start: Option<String>,

        /// End of the analysis window
        #[arg(long, requires = "start")]
        end: Option<String>,

        /// User id for records without a user field
        #[arg(long, value_name = "USER")]
        default_user: Option<String>,

        /// Print durations as HH:MM:SS[.mmm]
        #[arg(long)]
        friendly: bool,

        /// List the merged viewing ranges under each video
        #[arg(long)]
        ranges: bool,

        /// Print the result as JSON
        #[arg(long, conflicts_with_all = ["friendly", "ranges"])]
        json: bool,
    },
    /// Start the interactive shell (default)
    Shell {
        /// Print durations as HH:MM:SS[.mmm]
        #[arg(long)]
        friendly: bool,

        /// List the merged viewing ranges under each video
        #[arg(long)]
        ranges: bool,
    },
}

/// Route `log` output to stderr, honouring `RUST_LOG`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Analyze {
            input,
            start,
            end,
            default_user,
            friendly,
            ranges,
            json,
        }) => {
            let args = AnalyzeArgs {
                input,
                start,
                end,
                default_user,
                options: ReportOptions {
                    friendly,
                    show_ranges: ranges,
                },
                json,
            };
            analyze::run(&args, &mut out)
        }
        Some(Commands::Shell { friendly, ranges }) => Shell::new(ReportOptions {
            friendly,
            show_ranges: ranges,
        })
        .run(io::stdin().lock(), &mut out)
        .context("Shell I/O failed"),
        None => Shell::default()
            .run(io::stdin().lock(), &mut out)
            .context("Shell I/O failed"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
