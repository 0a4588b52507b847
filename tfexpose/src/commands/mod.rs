mod completions;
mod generate;
mod scan;

use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::{Result, ensure};
use generate::GenerateCommand;
use scan::ScanCommand;

/// Extension trait for exiting on configuration errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for tfexpose_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Reject a `--marker` the scanner could never match.
fn validate_marker(marker: &str) -> Result<()> {
    ensure!(!marker.is_empty(), "--marker must not be empty");
    ensure!(
        !marker.chars().any(char::is_whitespace),
        "--marker must not contain whitespace: '{marker}'"
    );
    Ok(())
}

#[derive(Parser)]
#[command(name = "tfexpose")]
#[command(version)]
#[command(about = "Generate the public read-only interface of Terraform projects")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Scan(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate data, output and provider files for annotated outputs
    Generate(GenerateCommand),

    /// List annotated outputs without running terraform
    Scan(ScanCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
