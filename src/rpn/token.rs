//! Core token types shared across the lexer, parser, and tooling.
//!
//!     A token is the triple (kind, text, position). `text` is the exact lexeme and
//!     `position` the 1-based character offset of its first character within the line.
//!     Token sequences are produced once per input line and never mutated afterwards,
//!     so tokens expose their parts through accessors only.
//!
//! Terminals
//!
//!     The grammar speaks in terminals, not token kinds. Numbers and identifiers map to
//!     the class terminals `number` and `identifier`; every other token (parens,
//!     operators, reserved words) is its own terminal, named by its literal text. See
//!     [Token::terminal].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grammar terminal for any number literal.
pub const NUMBER: &str = "number";
/// Grammar terminal for any identifier.
pub const IDENTIFIER: &str = "identifier";

/// Reserved words recognized by the lexer.
pub const RESERVED_WORDS: &[&str] = &[RES, IF, WHILE];

pub const RES: &str = "RES";
pub const IF: &str = "IF";
pub const WHILE: &str = "WHILE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    Number,
    Identifier,
    Reserved,
    ArithmeticOperator,
    RelationalOperator,
}

impl TokenKind {
    /// Stable upper-case name used by the text renderers.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::OpenParen => "OPEN_PAREN",
            TokenKind::CloseParen => "CLOSE_PAREN",
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Reserved => "RESERVED",
            TokenKind::ArithmeticOperator => "ARITH_OP",
            TokenKind::RelationalOperator => "REL_OP",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    kind: TokenKind,
    text: String,
    position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based offset of the first character of the lexeme.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The grammar terminal this token stands for.
    pub fn terminal(&self) -> &str {
        match self.kind {
            TokenKind::Number => NUMBER,
            TokenKind::Identifier => IDENTIFIER,
            _ => &self.text,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// True for a reserved-word token spelling `word`.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Reserved && self.text == word
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' @{}", self.kind, self.text, self.position)
    }
}

/// Arithmetic operators, each a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl ArithOp {
    pub const ALL: [ArithOp; 6] = [
        ArithOp::Add,
        ArithOp::Sub,
        ArithOp::Mul,
        ArithOp::Div,
        ArithOp::Mod,
        ArithOp::Pow,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "%",
            ArithOp::Pow => "^",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.symbol().starts_with(c))
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Relational operators, one or two characters long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelOp {
    Gt,
    Lt,
    Eq,
    Ne,
    Ge,
    Le,
}

impl RelOp {
    pub const ALL: [RelOp; 6] = [
        RelOp::Gt,
        RelOp::Lt,
        RelOp::Eq,
        RelOp::Ne,
        RelOp::Ge,
        RelOp::Le,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            RelOp::Gt => ">",
            RelOp::Lt => "<",
            RelOp::Eq => "==",
            RelOp::Ne => "!=",
            RelOp::Ge => ">=",
            RelOp::Le => "<=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_for_class_tokens() {
        assert_eq!(Token::new(TokenKind::Number, "3.14", 2).terminal(), NUMBER);
        assert_eq!(
            Token::new(TokenKind::Identifier, "MEM", 2).terminal(),
            IDENTIFIER
        );
    }

    #[test]
    fn test_terminal_for_literal_tokens() {
        assert_eq!(Token::new(TokenKind::OpenParen, "(", 1).terminal(), "(");
        assert_eq!(Token::new(TokenKind::Reserved, "RES", 4).terminal(), "RES");
        assert_eq!(
            Token::new(TokenKind::RelationalOperator, ">=", 6).terminal(),
            ">="
        );
    }

    #[test]
    fn test_operator_symbols_round_trip() {
        for op in ArithOp::ALL {
            assert_eq!(ArithOp::from_symbol(op.symbol()), Some(op));
        }
        for op in RelOp::ALL {
            assert_eq!(RelOp::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(ArithOp::from_char('%'), Some(ArithOp::Mod));
        assert_eq!(ArithOp::from_char('='), None);
        assert_eq!(RelOp::from_symbol("=<"), None);
    }

    #[test]
    fn test_keyword_check_requires_reserved_kind() {
        let reserved = Token::new(TokenKind::Reserved, "IF", 10);
        let ident = Token::new(TokenKind::Identifier, "IFX", 10);
        assert!(reserved.is_keyword(IF));
        assert!(!ident.is_keyword(IF));
    }

    #[test]
    fn test_display() {
        let token = Token::new(TokenKind::Number, "42", 2);
        assert_eq!(token.to_string(), "NUMBER '42' @2");
    }
}
