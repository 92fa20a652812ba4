use clap::Parser;
use passman::cli::interrupt::{self, ExitHooks};
use passman::cli::{normalize_args, Cli};
use passman::constants;
use passman::error::VaultError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let hooks = ExitHooks::default();
    if let Err(e) = interrupt::install(hooks.clone()) {
        eprintln!("warning: Ctrl-C will not exit cleanly: {:#}", e);
    }

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    match cli.run(&hooks) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if matches!(e.downcast_ref::<VaultError>(), Some(VaultError::Interrupted)) => {
            println!("\nExiting...");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
