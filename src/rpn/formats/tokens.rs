//! Token listings, detokenizing, and the token dump file
//!
//! The dump file holds one JSON array of tokens per source line, so a dump can be
//! read back line for line without re-lexing.

use super::registry::{FormatError, Formatter};
use crate::rpn::token::{Token, TokenKind};
use std::io::{BufRead, Write};
use thiserror::Error;

/// One `KIND 'text' @pos` line per token.
pub struct SimpleTokenFormatter;

impl Formatter<[Token]> for SimpleTokenFormatter {
    fn name(&self) -> &str {
        "simple"
    }

    fn serialize(&self, tokens: &[Token]) -> Result<String, FormatError> {
        Ok(tokens.iter().map(|t| format!("{}\n", t)).collect())
    }

    fn description(&self) -> &str {
        "One token per line with kind, text and position"
    }
}

/// Numbered listing, `  1. OPEN_PAREN         -> '('`.
pub struct TableTokenFormatter;

impl Formatter<[Token]> for TableTokenFormatter {
    fn name(&self) -> &str {
        "table"
    }

    fn serialize(&self, tokens: &[Token]) -> Result<String, FormatError> {
        Ok(tokens
            .iter()
            .enumerate()
            .map(|(i, t)| format!("  {:2}. {:18} -> '{}'\n", i + 1, t.kind().name(), t.text()))
            .collect())
    }

    fn description(&self) -> &str {
        "Numbered table of kinds and lexemes"
    }
}

/// Rebuild a canonical source line: single spaces between lexemes, none just inside
/// parentheses.
pub fn detokenize(tokens: &[Token]) -> String {
    let mut result = String::new();
    let mut previous: Option<TokenKind> = None;

    for token in tokens {
        let glued = matches!(previous, None | Some(TokenKind::OpenParen))
            || token.is(TokenKind::CloseParen);
        if !glued {
            result.push(' ');
        }
        result.push_str(token.text());
        previous = Some(token.kind());
    }

    result
}

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid token dump at line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Write one JSON array per token line.
pub fn write_dump<W: Write>(mut writer: W, lines: &[Vec<Token>]) -> Result<(), DumpError> {
    for (index, tokens) in lines.iter().enumerate() {
        let encoded = serde_json::to_string(tokens).map_err(|source| DumpError::Json {
            line: index + 1,
            source,
        })?;
        writeln!(writer, "{}", encoded)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a dump written by [write_dump]. Blank lines are skipped.
pub fn read_dump<R: BufRead>(reader: R) -> Result<Vec<Vec<Token>>, DumpError> {
    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let tokens = serde_json::from_str(&line).map_err(|source| DumpError::Json {
            line: index + 1,
            source,
        })?;
        lines.push(tokens);
    }
    Ok(lines)
}
