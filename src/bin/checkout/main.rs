//! Checkout CLI
//!
//! Reads a JSON checkout request from a file or stdin and prints the order summary.
//!
//! Exit status is `0` on success, `2` when the request is rejected and `1` for any other failure.

use std::{
    fs,
    io::{self, Read, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use tracing::{debug, info};

use checkout::prelude::*;

use crate::args::{Cli, OutputFormat};

mod args;
mod logging;

fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(err) => {
            // clap renders help/version through the same path
            _ = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = logging::init_subscriber(&cli.logging) {
        report(&anyhow::Error::new(err).context("failed to initialise logging"));

        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);

            if is_rejection(&err) {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => CheckoutConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => CheckoutConfig::default(),
    };

    let calculator = CheckoutCalculator::new(config);
    let config = calculator.config();

    debug!(
        default_currency = %config.default_currency,
        tax_rate = %config.tax_rate,
        coupons = ?config.coupons.codes().collect::<Vec<_>>(),
        "configuration loaded"
    );

    let request = read_request(cli)?;
    let summary = calculator.process_json(&request)?;

    info!(order_id = %summary.order_id, total = %summary.total, "checkout complete");

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.format {
        OutputFormat::Json => writeln!(handle, "{}", summary.to_json()?)?,
        OutputFormat::Table => summary.write_to(&mut handle)?,
    }

    Ok(())
}

fn read_request(cli: &Cli) -> Result<String> {
    match &cli.request {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read request from {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read request from stdin")?;

            Ok(buffer)
        }
    }
}

fn is_rejection(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<CheckoutError>(),
        Some(CheckoutError::Validation(_) | CheckoutError::Decode(_))
    )
}

#[expect(
    clippy::print_stderr,
    reason = "errors are reported to the terminal, logging may not be initialised"
)]
fn report(err: &anyhow::Error) {
    eprintln!("error: {err:#}");
}
