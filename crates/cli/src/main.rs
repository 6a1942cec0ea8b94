// Shipaudit CLI - courier billing audits, headless

mod audit;
mod chart;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;

#[derive(Parser)]
#[command(name = "shipaudit")]
#[command(about = "Reconcile courier-billed charges against a contracted rate card")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a billing audit from a TOML config file
    #[command(after_help = "\
Examples:
  shipaudit run audit.toml
  shipaudit run audit.toml --json
  shipaudit run audit.toml --output report.json --chart summary.svg")]
    Run {
        /// Path to the audit .toml config file
        config: PathBuf,

        /// Output the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to file (overrides [output].json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the summary pie chart as SVG (overrides [output].chart)
        #[arg(long)]
        chart: Option<PathBuf>,
    },

    /// Validate an audit config without running
    #[command(after_help = "\
Examples:
  shipaudit validate audit.toml")]
    Validate {
        /// Path to the audit .toml config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, json, output, chart } => {
            audit::cmd_run(config, json, output, chart)
        }
        Commands::Validate { config } => audit::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}
