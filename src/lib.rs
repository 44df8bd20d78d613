//! # rpn
//!
//! Front end for a small parenthesized postfix ("RPN") expression language.
//!
//! The crate turns one line of source text into a token sequence and then into a
//! typed derivation tree:
//!
//!     text -> [lexing] -> Vec<Token> -> [parsing] (consults [grammar]) -> Expression
//!
//! Evaluation and code generation are left to downstream consumers of the tree.
//! See the [rpn] module for the individual stages.

pub mod rpn;

pub use rpn::ast::Expression;
pub use rpn::grammar::Grammar;
pub use rpn::lexing::{tokenize, LexError};
pub use rpn::parsing::{parse, parse_line, ParseError};
pub use rpn::token::{Token, TokenKind};
