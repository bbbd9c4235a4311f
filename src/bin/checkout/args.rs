//! Command line arguments

use std::path::PathBuf;

use clap::{Args, Parser};

/// Compute an order checkout summary
#[derive(Debug, Parser)]
#[command(name = "checkout", about = "Compute an order checkout summary", long_about = None)]
pub(crate) struct Cli {
    /// JSON request file; reads stdin when omitted
    #[arg(short, long)]
    pub request: Option<PathBuf>,

    /// YAML configuration file; the built-in configuration is used when omitted
    #[arg(short, long, env = "CHECKOUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl Cli {
    /// Load arguments from the environment and command line
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Summary output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Pretty-printed JSON.
    Json,

    /// Human-readable table.
    Table,
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingArgs {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_to_stdin_and_json() -> TestResult {
        let cli = Cli::try_parse_from(["checkout"])?;

        assert_eq!(cli.request, None);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.logging.log_format, LogFormat::Compact);

        Ok(())
    }

    #[test]
    fn parses_all_flags() -> TestResult {
        let cli = Cli::try_parse_from([
            "checkout",
            "--request",
            "order.json",
            "--config",
            "checkout.yml",
            "--format",
            "table",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])?;

        assert_eq!(cli.request, Some(PathBuf::from("order.json")));
        assert_eq!(cli.config, Some(PathBuf::from("checkout.yml")));
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.logging.log_level, "debug");
        assert_eq!(cli.logging.log_format, LogFormat::Json);

        Ok(())
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["checkout", "--format", "xml"]).is_err());
    }
}
