use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub mod formatters;
pub mod runner;

#[derive(Parser, Debug)]
#[command(name = "capital-gains")]
#[command(
    version,
    about = "Capital gains tax calculator for stock operations"
)]
#[command(
    long_about = "Reads one simulation per line (a JSON list of buy/sell operations) and prints the tax due on each operation, using weighted average cost, loss carryforward and the R$ 20.000,00 per-sale exemption. Processing stops at the first empty line."
)]
pub struct Cli {
    /// Read simulations from this file instead of stdin
    pub input: Option<PathBuf>,

    /// Output format for each simulation
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Disable colorized/ANSI output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Settings file (defaults to <config dir>/capital-gains/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON array per line: [{"tax":0.00},...]
    Json,
    /// Human-readable table per simulation
    Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let cli = Cli::try_parse_from(["capital-gains"]).expect("parse failed");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.input.is_none());
        assert!(!cli.no_color);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_all_options() {
        let cli = Cli::try_parse_from([
            "capital-gains",
            "--format",
            "table",
            "--no-color",
            "--config",
            "settings.toml",
            "input.txt",
        ])
        .expect("parse failed");
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.input, Some(PathBuf::from("input.txt")));
        assert!(cli.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("settings.toml")));
    }

    #[test]
    fn reject_unknown_format() {
        assert!(Cli::try_parse_from(["capital-gains", "--format", "xml"]).is_err());
    }
}
