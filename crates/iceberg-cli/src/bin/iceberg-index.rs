use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use iceberg_cli::{run, write_report, Args, CliError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Load .env before parsing so env-backed flags and CENSUS_API_KEY see it.
    let dotenv = dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.verbosity);
    if let Some(path) = dotenv {
        debug!(path = %path.display(), "loaded environment file");
    }

    let color = !args.no_color && io::stdout().is_terminal();
    colored::control::set_override(color);

    let outcome = run(&args).and_then(|report| {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_report(&report, args.format, color, &mut out).map_err(CliError::Output)
    });

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr(), "error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env("ICEBERG_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
