//! CLI module for Clarion
//!
//! This module provides the command-line interface around the scanner and the `clarinet` bridge.
//!
//! ## Commands
//!
//! - `check <PATH>...` - Scan `.clar` files (directories are searched recursively)
//! - `blocks <FILE>` - Render a saved block list to Clarity source
//! - `functions [ROOT]` - List the functions defined in a workspace
//! - `new [PATH]` - Create a Clarinet project
//! - `console` - Open the Clarinet console
//! - `deployment <NETWORK>` - Generate a deployment plan
//! - `test-gen [ROOT]` - Draft test files with a language model
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `report` - Diagnostic rendering (human, plain, json)
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod report;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CLARINET;
use crate::toolchain::{DEFAULT_PROJECT_PATH, Network};
use crate::version::CLARION_VERSION;
use report::OutputFormat;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self::new(message, ExitCode(code))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Editor tooling for Clarity smart contracts
#[derive(Parser, Debug)]
#[command(name = "clarion")]
#[command(version = CLARION_VERSION)]
#[command(about = "Syntax checks and Clarinet helpers for Clarity contracts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Clarinet executable
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_CLARINET)]
    pub clarinet: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan Clarity files for syntax problems
    Check {
        /// Files or directories to scan
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
        /// Flag operator atoms that are not on the allow-list
        #[arg(long)]
        strict_operators: bool,
        /// Enable every optional check
        #[arg(long)]
        all_checks: bool,
    },

    /// Render a saved block list (JSON) to Clarity source
    Blocks {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List public, private and read-only functions
    Functions {
        #[arg(value_name = "ROOT", default_value = ".")]
        root: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a new Clarinet project
    New {
        #[arg(value_name = "PATH", default_value = DEFAULT_PROJECT_PATH)]
        path: String,
    },

    /// Open the Clarinet console in the current project
    Console,

    /// Generate a deployment plan for a network
    Deployment {
        #[arg(value_name = "NETWORK", value_enum)]
        network: Network,
    },

    /// Draft a test file for every contract in the workspace
    TestGen {
        #[arg(value_name = "ROOT", default_value = ".")]
        root: PathBuf,
        /// Model name passed to the completion endpoint
        #[arg(long)]
        model: Option<String>,
        /// Base URL of an OpenAI-compatible API
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Check {
            paths,
            format,
            strict_operators,
            all_checks,
        } => commands::check_paths(&paths, format, strict_operators, all_checks),
        Command::Blocks { file } => commands::render_blocks(&file),
        Command::Functions { root, json } => commands::list_functions(&root, json),
        Command::New { path } => commands::new_project(&cli.clarinet, path),
        Command::Console => commands::console(&cli.clarinet),
        Command::Deployment { network } => commands::deployment(&cli.clarinet, network),
        Command::TestGen { root, model, base_url } => commands::generate_tests(&root, model, base_url),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["clarion", "check", "a.clar", "contracts/", "--format", "plain"]).unwrap();
        if let Command::Check { paths, format, .. } = cli.command {
            assert_eq!(paths, vec![PathBuf::from("a.clar"), PathBuf::from("contracts/")]);
            assert_eq!(format, OutputFormat::Plain);
        } else {
            panic!("Expected Check command");
        }
        assert_eq!(cli.clarinet, "clarinet");
    }

    #[test]
    fn test_cli_parse_check_requires_path() {
        assert!(Cli::try_parse_from(["clarion", "check"]).is_err());
    }

    #[test]
    fn test_cli_parse_deployment() {
        let cli = Cli::try_parse_from(["clarion", "deployment", "testnet", "--clarinet", "/opt/clarinet"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Deployment {
                network: Network::Testnet
            }
        ));
        assert_eq!(cli.clarinet, "/opt/clarinet");
        assert!(Cli::try_parse_from(["clarion", "deployment", "regtest"]).is_err());
    }

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::try_parse_from(["clarion", "new"]).unwrap();
        if let Command::New { path } = cli.command {
            assert_eq!(path, DEFAULT_PROJECT_PATH);
        } else {
            panic!("Expected New command");
        }

        let cli = Cli::try_parse_from(["clarion", "test-gen", "--model", "gpt-4o"]).unwrap();
        if let Command::TestGen { root, model, base_url } = cli.command {
            assert_eq!(root, PathBuf::from("."));
            assert_eq!(model.as_deref(), Some("gpt-4o"));
            assert_eq!(base_url, None);
        } else {
            panic!("Expected TestGen command");
        }
    }

    #[test]
    fn test_cli_error_codes() {
        assert_eq!(CliError::failure("x").exit_code, ExitCode::FAILURE);
        assert_eq!(CliError::with_code("x", 3).exit_code, ExitCode(3));
        assert_eq!(CliError::failure("boom").to_string(), "boom");
    }
}
