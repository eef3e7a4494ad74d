//! CLI command implementations.
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//!
//! Lex and parse errors are reported with the offending source line and a
//! caret; semantic and emit errors print their message.

use std::fs;
use std::path::{Path, PathBuf};

use huayu_syntax::{lexer, parser};

use crate::backend;
use crate::frontend::ast::Ast;
use crate::frontend::diagnostics::format_error_at;
use crate::frontend::resolver;

use super::{CliError, CliResult, ExitCode};

/// Compile a source file and write the JavaScript next to it (or to `output`).
pub fn build_file(file: &Path, output: Option<&Path>) -> CliResult<ExitCode> {
    let ast = compile(file)?;

    let out_path: PathBuf = match output {
        Some(path) => path.to_path_buf(),
        None => file.with_extension("js"),
    };
    let mut buffer = Vec::new();
    backend::emit(&ast, &mut buffer)
        .map_err(|e| CliError::failure(format!("error: {e}")))?;
    fs::write(&out_path, &buffer)
        .map_err(|e| CliError::failure(format!("error writing '{}': {e}", out_path.display())))?;

    tracing::debug!(output = %out_path.display(), bytes = buffer.len(), "wrote JavaScript");
    Ok(ExitCode::SUCCESS)
}

/// Lex, parse, and resolve a source file without emitting code.
pub fn check_file(file: &Path) -> CliResult<ExitCode> {
    compile(file)?;
    Ok(ExitCode::SUCCESS)
}

/// Run the shared frontend pipeline: read, lex, parse, resolve.
fn compile(file: &Path) -> CliResult<Ast> {
    let display = file.display().to_string();
    let source = fs::read_to_string(file)
        .map_err(|e| CliError::failure(format!("error reading '{display}': {e}")))?;

    let tokens = lexer::lex(&source).map_err(|e| {
        CliError::failure(format_error_at(&display, &source, &e.to_string(), e.line, e.offset))
    })?;

    let file_def = parser::parse(&tokens).map_err(|e| {
        CliError::failure(format_error_at(
            &display,
            &source,
            &e.to_string(),
            e.token.line,
            e.token.offset,
        ))
    })?;

    resolver::resolve(&file_def).map_err(|e| CliError::failure(format!("error: {e}")))
}
