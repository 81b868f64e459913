// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, build a client and hand the
//   entries to the batch loop in `ui`.
// - Usage errors are reported by clap, which exits with a non-zero status.

use anyhow::{Context, Result};
use clap::Parser;
use jebio::{api::IoClient, cli, cli::Args, config::ClientConfig, ui};
use log::LevelFilter;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let Some(op) = args.mode.operation(args.extract) else {
        ui::configure()?;
        return Ok(ExitCode::SUCCESS);
    };

    let mut config = ClientConfig::from_env();
    if let Some(url) = &args.base_url {
        config = config.with_base_url(url);
    }
    let client = IoClient::new(config).context("Failed to build HTTP client")?;

    // Fail once up front rather than once per entry.
    let apikey = client.api_key(args.apikey.as_deref())?;

    let entries = cli::collect_entries(&args).context("Failed to read entry list")?;

    let summary = ui::run_batch(&client, op, &entries, Some(&apikey));
    Ok(if summary.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

// Verbose raises this crate to debug; RUST_LOG still wins.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("jebio", level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .init();
}
