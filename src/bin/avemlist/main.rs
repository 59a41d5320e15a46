//! avemlist CLI - average the tracks of an Insight3 molecule list.

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use avemlist::{run_aggregation_with, AggregateOptions};
use tracing_subscriber::EnvFilter;

/// Verbosity selected on the command line.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    Info,
    Debug,
}

impl Verbosity {
    fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
        }
    }
}

fn init_logging(verbosity: Verbosity) {
    // RUST_LOG wins when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("avemlist");

    // Parse global flags
    let mut verbosity = Verbosity::Info;
    let mut opts = AggregateOptions::default();
    let mut paths: Vec<&str> = Vec::new();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => verbosity = Verbosity::Debug,
            "-q" | "--quiet" => verbosity = Verbosity::Quiet,
            "--check-tracks" => opts.check_track_ids = true,
            "-h" | "--help" => {
                print_usage(prog);
                return ExitCode::SUCCESS;
            }
            "-V" | "--version" => {
                println!("avemlist {} (built {})", env!("CARGO_PKG_VERSION"), avemlist::build_date());
                return ExitCode::SUCCESS;
            }
            _ => paths.push(arg),
        }
    }

    if paths.len() != 2 {
        eprint_usage(prog);
        return ExitCode::FAILURE;
    }

    init_logging(verbosity);

    match run(paths[0], paths[1], &opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("avemlist: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(input: &str, output: &str, opts: &AggregateOptions) -> anyhow::Result<()> {
    let summary = run_aggregation_with(input, output, opts)
        .with_context(|| format!("averaging {} into {}", input, output))?;

    tracing::debug!(
        molecules = summary.molecules,
        noise = summary.noise,
        linked = summary.linked,
        "scan complete"
    );
    if summary.id_mismatches > 0 {
        tracing::warn!("{} linked records disagree with their track id", summary.id_mismatches);
    }
    Ok(())
}

fn print_usage(prog: &str) {
    println!("{}", usage(prog));
}

fn eprint_usage(prog: &str) {
    eprintln!("{}", usage(prog));
}

fn usage(prog: &str) -> String {
    format!(
        "usage: {} [OPTIONS] <input file> <output file>\n\
         \n\
         Averages every track of a tracked molecule list. The input file is\n\
         modified in place (records are marked as visited).\n\
         \n\
         OPTIONS:\n    \
             -v, --verbose     Show debug output\n    \
             -q, --quiet       Only show warnings and errors\n    \
             --check-tracks    Warn about linked records with a different track id\n    \
             -h, --help        Show this help\n    \
             -V, --version     Show version",
        prog
    )
}
