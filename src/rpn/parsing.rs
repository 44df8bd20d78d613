//! Parsing
//!
//!     Turns one line's tokens into an [Expression]. The grammar is passed in by
//!     reference; it is built once and shared by every parse.
//!
//!     Parsing is fail-fast: the first mismatch aborts the line with a [ParseError] and
//!     no partial tree is returned. The whole token sequence must be consumed.

pub mod content;
pub mod cursor;
pub mod error;
pub mod parser;

pub use content::disambiguate_content;
pub use cursor::{TokenCursor, MAX_LOOKAHEAD};
pub use error::{ParseError, ParseErrorKind, ProcessError};
pub use parser::{Parser, MAX_NESTING_DEPTH};

use crate::rpn::ast::Expression;
use crate::rpn::grammar::Grammar;
use crate::rpn::lexing::tokenize;
use crate::rpn::token::Token;
use tracing::debug;

/// Parse exactly one bracketed expression spanning all of `tokens`.
pub fn parse(tokens: &[Token], grammar: &Grammar) -> Result<Expression, ParseError> {
    let expression = Parser::new(tokens, grammar).parse_program()?;
    debug!(
        kind = expression.node.kind_name(),
        depth = expression.depth(),
        "parsed expression"
    );
    Ok(expression)
}

/// Tokenize then parse one line of source.
pub fn parse_line(line: &str, grammar: &Grammar) -> Result<Expression, ProcessError> {
    let tokens = tokenize(line)?;
    Ok(parse(&tokens, grammar)?)
}
