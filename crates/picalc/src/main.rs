//! PiCalc-rs: pi to any number of digits with the Chudnovsky series.

use std::process::ExitCode;

use picalc_cli::ui::print_error;
use picalc_lib::{app, config, errors};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let config = config::AppConfig::parse();
    match app::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&format!("{err:#}"));
            ExitCode::from(u8::try_from(errors::exit_code(&err)).unwrap_or(1))
        }
    }
}
