//! Lexer error type

use thiserror::Error;

/// What went wrong while lexing, independent of the rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    EmptyInput,
    InvalidCharacter,
    UnmatchedCloseParen,
    MultipleDecimalPoints,
    TrailingDecimalPoint,
    InvalidRelationalOperator,
    UnbalancedParentheses { unclosed: usize },
    MissingOpenParen,
    MissingCloseParen,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lexical error{}: {message}", at(.position))]
pub struct LexError {
    pub kind: LexErrorKind,
    pub message: String,
    /// 1-based character offset, when the error can be pinned to one.
    pub position: Option<usize>,
}

fn at(position: &Option<usize>) -> String {
    match position {
        Some(position) => format!(" at position {}", position),
        None => String::new(),
    }
}

impl LexError {
    pub fn new(kind: LexErrorKind, message: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }

    pub(crate) fn at(kind: LexErrorKind, message: impl Into<String>, position: usize) -> Self {
        Self::new(kind, message, Some(position))
    }

    pub fn is_malformed_number(&self) -> bool {
        matches!(
            self.kind,
            LexErrorKind::MultipleDecimalPoints | LexErrorKind::TrailingDecimalPoint
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_position() {
        let err = LexError::at(LexErrorKind::InvalidCharacter, "invalid character 'a'", 3);
        assert_eq!(
            err.to_string(),
            "lexical error at position 3: invalid character 'a'"
        );
    }

    #[test]
    fn test_display_without_position() {
        let err = LexError::new(LexErrorKind::EmptyInput, "empty input", None);
        assert_eq!(err.to_string(), "lexical error: empty input");
    }
}
