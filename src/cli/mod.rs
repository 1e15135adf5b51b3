//! CLI module for the Sprig front end.
//!
//! This module provides the command-line interface for the parser.
//!
//! ## Commands
//!
//! - `parse <file>` - Parse and print the syntax tree
//! - `check <file>` - Parse and report diagnostics only
//! - `tokens <file>` - Dump the raw token stream (debug)
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling
//! `process::exit`. Only the top-level `run()` function handles errors and
//! exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

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
    /// Create a new CLI error with a message and exit code.
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
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The Sprig expression-language front end
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(version = VERSION)]
#[command(about = "The Sprig expression-language front end", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a file and print the resolved syntax tree
    Parse {
        /// Source file to parse
        #[arg(value_name = "FILE", conflicts_with = "expr")]
        file: Option<PathBuf>,
        /// Parse an inline expression instead of a file
        #[arg(short = 'e', long = "expr", value_name = "SOURCE")]
        expr: Option<String>,
        /// Print one line per node (index, parent, role, span)
        #[arg(long)]
        nodes: bool,
    },

    /// Parse a file and report diagnostics only
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Dump the raw token stream with whitespace facts (debug)
    Tokens {
        /// Source file to tokenize
        #[arg(value_name = "FILE")]
        file: PathBuf,
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
        Some(Command::Parse { file, expr, nodes }) => match (file, expr) {
            (_, Some(source)) => commands::parse_source("<expr>", &source, nodes),
            (Some(file), None) => commands::parse_file(&file.to_string_lossy(), nodes),
            (None, None) => Err(CliError::failure("Error: `parse` needs a FILE or --expr")),
        },
        Some(Command::Check { file }) => commands::check_file(&file.to_string_lossy()),
        Some(Command::Tokens { file }) => commands::tokens_file(&file.to_string_lossy()),
        None => {
            // Default: check the file if provided
            if let Some(file) = cli.file {
                commands::check_file(&file.to_string_lossy())
            } else {
                // No command and no file - fail with a hint
                Err(CliError::failure("Error: no input; try `sprig --help`"))
            }
        }
    }
}
