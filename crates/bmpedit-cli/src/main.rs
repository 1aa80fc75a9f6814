//! bmpedit - console BMP editor
//!
//! Starts the interactive menu, or runs a single job when `--filter` or
//! `--config` is given.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use bmpedit_cli::{batch, Args, Console, Session};

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Log to stderr; `-v` forces debug, otherwise `RUST_LOG` applies (default `warn`).
fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn run(args: Args) -> Result<()> {
    if args.is_batch() {
        let job = batch::job_from_args(&args)?;
        return batch::run_job(&job);
    }

    if args.output.is_some() {
        log::warn!("--output is only used together with --filter or --config");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let console = Console::new(stdin.lock(), stdout.lock());
    let current = args.input.map(|path| path.display().to_string());
    Session::new(console, current)
        .run()
        .context("Console I/O failed")
}
