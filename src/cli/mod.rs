//! CLI module for the Huayu compiler.
//!
//! ## Commands
//!
//! - `build <file> [-o <out.js>]` - Compile a `.hua` source file to JavaScript
//! - `check <file>` - Lex, parse, and resolve without emitting code
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros. Command
//! functions return `CliResult<ExitCode>` instead of calling `process::exit`;
//! only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI error handling
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
    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::FAILURE,
        }
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

/// The Huayu programming language compiler
#[derive(Parser, Debug)]
#[command(name = "huayu")]
#[command(version)]
#[command(about = "The Huayu programming language compiler", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a .hua source file to JavaScript
    Build {
        /// Source file to compile
        file: PathBuf,
        /// Output path (defaults to the input with a .js extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Lex, parse, and resolve a .hua source file without emitting code
    Check {
        /// Source file to check
        file: PathBuf,
    },
}

/// Parse arguments, dispatch, and exit with the resulting code.
pub fn run() {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Build { file, output } => commands::build_file(&file, output.as_deref()),
        Command::Check { file } => commands::check_file(&file),
    };
    match result {
        Ok(code) => process::exit(code.0),
        Err(err) => {
            eprintln!("{err}");
            process::exit(err.exit_code.0);
        }
    }
}
