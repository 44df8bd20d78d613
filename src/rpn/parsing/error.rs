//! Parser error type, and the error of a whole line (lex then parse)

use crate::rpn::lexing::LexError;
use crate::rpn::token::Token;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token did not fit any alternative at this point.
    UnexpectedToken,
    /// The tokens ran out while something was still required.
    UnexpectedEnd,
    /// A complete expression was followed by more tokens.
    TrailingTokens,
    /// A relational operator not followed by `(...) (...) IF` or `(...) WHILE`.
    MalformedControl,
    /// A memory command whose second symbol is not an identifier.
    MalformedCommand,
    /// `N RES` where N is not a non-negative integer, or does not fit one.
    InvalidHistoryIndex,
    /// Brackets nested past the parser's limit.
    NestingTooDeep,
    EmptyTokens,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error{}: {message}", at(.position))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub position: Option<usize>,
}

fn at(position: &Option<usize>) -> String {
    match position {
        Some(position) => format!(" at position {}", position),
        None => String::new(),
    }
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }

    pub fn unexpected_token(token: &Token, expected: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken,
            format!("expected {}, found '{}'", expected, token.text()),
            Some(token.position()),
        )
    }

    pub fn unexpected_end(expected: &str, position: Option<usize>) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEnd,
            format!("expected {}, found end of input", expected),
            position,
        )
    }

    pub fn trailing(token: &Token) -> Self {
        Self::new(
            ParseErrorKind::TrailingTokens,
            format!("unexpected '{}' after complete expression", token.text()),
            Some(token.position()),
        )
    }
}

/// Failure of one source line, from whichever stage caught it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ProcessError {
    pub fn position(&self) -> Option<usize> {
        match self {
            ProcessError::Lex(err) => err.position,
            ProcessError::Parse(err) => err.position,
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            ProcessError::Lex(_) => "lexer",
            ProcessError::Parse(_) => "parser",
        }
    }
}
