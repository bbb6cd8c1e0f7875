//! ssm - a SealedSecret manager.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ssm::cli::output;
use ssm::cli::{execute, Cli};
use ssm::core::constants;
use ssm::error::{Error, InputError};

fn suggestion(e: &Error) -> Option<&'static str> {
    match e {
        Error::ToolMissing(_) => Some("install kubectl and kubeseal, or pass --skip-check"),
        Error::Sealing(_) => Some("check the controller with --controller-namespace"),
        Error::ObjectNotFound { .. } => Some("check the name and --namespace"),
        Error::Input(InputError::InvalidSelection(_)) => Some("select keys as '1,3', '1-3' or 'all'"),
        Error::Input(InputError::InvalidChoice(_)) => Some("answer 1 or 2"),
        _ => None,
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ssm=debug")
        } else {
            EnvFilter::new("ssm=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
