//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use sprig_syntax::{LineMap, lexer, parse, pretty};

use crate::report;

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (16 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions.
const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// Read a source file, enforcing the size limit.
fn read_source(path: &str) -> CliResult<String> {
    let meta = fs::metadata(Path::new(path))
        .map_err(|e| CliError::failure(format!("Error reading '{path}': {e}")))?;
    if meta.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Error: '{path}' is larger than {MAX_SOURCE_SIZE} bytes"
        )));
    }
    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading '{path}': {e}")))
}

/// Parse a file and print the resolved tree.
pub fn parse_file(path: &str, nodes: bool) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    parse_source(path, &source, nodes)
}

/// Parse a source string and print the resolved tree.
pub fn parse_source(name: &str, source: &str, nodes: bool) -> CliResult<ExitCode> {
    match parse(source) {
        Ok(parsed) => {
            if nodes {
                print_nodes(&parsed.tree, source);
            } else {
                println!("{}", pretty::tree_to_string(&parsed.tree, source));
            }
            if parsed.errors.is_empty() {
                Ok(ExitCode::SUCCESS)
            } else {
                eprint!("{}", report::render_errors(name, source, &parsed.errors));
                Ok(ExitCode::FAILURE)
            }
        }
        Err(errors) => Err(CliError::failure(report::render_errors(
            name, source, &errors,
        ))),
    }
}

/// Parse a file and report diagnostics only.
pub fn check_file(path: &str) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    match parse(&source) {
        Ok(parsed) if parsed.errors.is_empty() => {
            println!("{path}: ok");
            Ok(ExitCode::SUCCESS)
        }
        Ok(parsed) => {
            eprint!("{}", report::render_errors(path, &source, &parsed.errors));
            Ok(ExitCode::FAILURE)
        }
        Err(errors) => Err(CliError::failure(report::render_errors(
            path, &source, &errors,
        ))),
    }
}

/// Dump the raw token stream with spans and whitespace facts.
pub fn tokens_file(path: &str) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let (tokens, errors) = lexer::lex(&source);
    let map = LineMap::new(&source);

    for tok in &tokens {
        let (line, col) = map.offset_to_line_col(tok.span.start);
        let mut facts = Vec::new();
        if tok.ws.newline_before.is_some() {
            facts.push("newline");
        }
        if tok.ws.space_before {
            facts.push("space-before");
        }
        if tok.ws.space_after {
            facts.push("space-after");
        }
        println!(
            "{line}:{col} {:?} [{}..{}] {}",
            tok.kind,
            tok.span.start,
            tok.span.end,
            facts.join(",")
        );
    }

    if errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprint!("{}", report::render_errors(path, &source, &errors));
        Ok(ExitCode::FAILURE)
    }
}

fn print_nodes(tree: &sprig_syntax::SyntaxTree, source: &str) {
    for (id, node) in tree.iter() {
        let role = node
            .def
            .map(|d| format!("{:?} {}", d.role, sprig_core::grammar::name(d.key)))
            .unwrap_or_else(|| "atom".to_string());
        let parent = node
            .parent
            .map(|p| p.index().to_string())
            .unwrap_or_else(|| "-".to_string());
        let span = tree.token_span(id);
        let text = &source[span.start..span.end];
        println!(
            "{:>4} parent={:>3} {:<20} [{}..{}] {:?}",
            id.index(),
            parent,
            role,
            span.start,
            span.end,
            text
        );
    }
}
