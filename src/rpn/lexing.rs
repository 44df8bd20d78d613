//! Lexing
//!
//!     Turns a single line of source text into tokens. The heavy lifting is done by the
//!     finite-state machine in [dfa]; this module drives it over the characters of the
//!     line and then applies the line-level checks:
//!
//!         1. flush any pending lexeme at end of input
//!         2. the open-paren depth must be back to zero
//!         3. the token sequence must open with `(` and close with `)`
//!
//!     Errors are fail-fast: the first problem aborts the line and no partial token
//!     sequence is ever handed out.

pub mod dfa;
pub mod error;

pub use dfa::{Dfa, State, Step};
pub use error::{LexError, LexErrorKind};

use crate::rpn::token::{Token, TokenKind};
use tracing::{debug, trace};

/// Tokenize one line of RPN source.
pub fn tokenize(line: &str) -> Result<Vec<Token>, LexError> {
    if line.trim().is_empty() {
        return Err(LexError::new(
            LexErrorKind::EmptyInput,
            "empty line or whitespace only",
            None,
        ));
    }

    let mut dfa = Dfa::new();
    let mut state = State::Start;
    let mut tokens = Vec::new();

    for (index, c) in line.chars().enumerate() {
        let position = index + 1;
        loop {
            let step = dfa.step(state, c, position)?;
            trace!(%state, next = %step.next, ch = ?c, consumed = step.consumed, "lexer step");
            state = step.next;
            tokens.extend(step.emitted);
            if step.consumed {
                break;
            }
        }
    }

    tokens.extend(dfa.finish(state)?);

    if dfa.depth() != 0 {
        return Err(LexError::new(
            LexErrorKind::UnbalancedParentheses {
                unclosed: dfa.depth(),
            },
            format!(
                "unbalanced parentheses: {} parentheses not closed",
                dfa.depth()
            ),
            None,
        ));
    }

    validate_shape(&tokens)?;
    debug!(count = tokens.len(), "tokenized line");
    Ok(tokens)
}

/// Tokenize every non-blank line of `source`.
///
/// Each entry pairs the 1-based line number with that line's result, so one bad line
/// does not hide the others.
pub fn tokenize_lines(source: &str) -> Vec<(usize, Result<Vec<Token>, LexError>)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, tokenize(line)))
        .collect()
}

fn validate_shape(tokens: &[Token]) -> Result<(), LexError> {
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Err(LexError::new(
            LexErrorKind::EmptyInput,
            "no tokens in line",
            None,
        ));
    };
    if !first.is(TokenKind::OpenParen) {
        return Err(LexError::at(
            LexErrorKind::MissingOpenParen,
            "expression must start with an open paren",
            first.position(),
        ));
    }
    if !last.is(TokenKind::CloseParen) {
        return Err(LexError::at(
            LexErrorKind::MissingCloseParen,
            "expression must end with a close paren",
            last.position(),
        ));
    }
    Ok(())
}
