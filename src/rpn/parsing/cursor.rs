//! Token cursor with bounded lookahead.

use super::error::ParseError;
use crate::rpn::token::Token;

/// Largest `n` accepted by [TokenCursor::peek]. The grammar never needs to look further
/// than one token past the current one.
pub const MAX_LOOKAHEAD: usize = 1;

/// Forward-only view over one line's tokens.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    index: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, index: 0 }
    }

    /// `peek(0)` is the token the next call to [TokenCursor::next] returns.
    pub fn peek(&self, n: usize) -> Option<&'a Token> {
        debug_assert!(n <= MAX_LOOKAHEAD, "lookahead {} exceeds {}", n, MAX_LOOKAHEAD);
        self.tokens.get(self.index + n)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        Some(token)
    }

    /// Consume one token that must satisfy `predicate`.
    pub fn expect<P>(&mut self, predicate: P, expected: &str) -> Result<&'a Token, ParseError>
    where
        P: Fn(&Token) -> bool,
    {
        let Some(token) = self.peek(0) else {
            return Err(ParseError::unexpected_end(expected, self.end_position()));
        };
        if !predicate(token) {
            return Err(ParseError::unexpected_token(token, expected));
        }
        self.index += 1;
        Ok(token)
    }

    pub fn is_at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    pub fn consumed(&self) -> usize {
        self.index
    }

    /// Position just past the last token, reported for errors at end of input.
    pub fn end_position(&self) -> Option<usize> {
        self.tokens
            .last()
            .map(|t| t.position() + t.text().chars().count())
    }
}
