//! git-sweep CLI - Delete merged branches duplicated locally and on remotes

mod cli;
mod colors;
mod commands;
mod output;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use commands::SweepArgs;

fn main() -> ExitCode {
    let cli = cli::parse();
    init_logging(cli.verbose);

    let args = SweepArgs {
        dry_run: cli.dry_run_flag(),
        remotes: cli.remotes,
        repo: cli.repo,
        config: cli.config,
    };

    match commands::run_sweep(args, cli.json, cli.quiet) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(commands::exit_code_for(&e) as u8)
        }
    }
}

/// Level used when `RUST_LOG` is unset
///
/// Warnings already reach stdout as `Warning:` lines, so the quiet default
/// keeps them from being printed twice.
fn default_log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "error" }
}

/// Log to stderr; `RUST_LOG` overrides the level picked from --verbose
fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose))),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
