use clap::Parser;
use extsort::cli::{Args, run_cli};
use extsort::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Captured once so every log line of this run shares the same header.
    let run_started = chrono::Local::now().naive_local();

    match run_cli(&args, run_started) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "extsort=debug" } else { "extsort=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
