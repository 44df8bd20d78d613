//! Deterministic finite-state scanner
//!
//!     States: Start, InNumber, InDecimal, InIdentifier, InRelational.
//!
//!     Each call to [Dfa::step] looks at exactly one character and reports whether the
//!     character was consumed. A terminator that ends a lexeme (the space after `42`, the
//!     `)` after `MEM`) is NOT consumed: the lexeme is emitted, the machine drops back to
//!     Start, and the driver feeds the very same character again. No character is ever
//!     read twice from the input and no lookahead buffer is needed.
//!
//!     The scanner also keeps the running open-paren depth, which can never go negative.

use super::error::{LexError, LexErrorKind};
use crate::rpn::token::{is_reserved_word, ArithOp, Token, TokenKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Start,
    InNumber,
    InDecimal,
    InIdentifier,
    /// Holds the first character of a possibly two-character operator.
    InRelational(char),
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Start => write!(f, "Start"),
            State::InNumber => write!(f, "InNumber"),
            State::InDecimal => write!(f, "InDecimal"),
            State::InIdentifier => write!(f, "InIdentifier"),
            State::InRelational(c) => write!(f, "InRelational({})", c),
        }
    }
}

/// Outcome of a single transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub next: State,
    pub emitted: Option<Token>,
    /// `false` asks the driver to feed the same character again in `next`.
    pub consumed: bool,
}

impl Step {
    fn stay(next: State) -> Self {
        Self {
            next,
            emitted: None,
            consumed: true,
        }
    }

    fn emit(next: State, token: Token) -> Self {
        Self {
            next,
            emitted: Some(token),
            consumed: true,
        }
    }

    /// Emit the pending lexeme and hand the terminator back to Start.
    fn finish(token: Token) -> Self {
        Self {
            next: State::Start,
            emitted: Some(token),
            consumed: false,
        }
    }
}

const RELATIONAL_STARTS: [char; 4] = ['>', '<', '=', '!'];

/// Lexeme buffer and paren bookkeeping shared by all states.
#[derive(Debug, Default)]
pub struct Dfa {
    buffer: String,
    /// Position of the first buffered character.
    start: usize,
    depth: usize,
}

impl Dfa {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current open-paren depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Feed one character, at 1-based `position`, to the machine in `state`.
    pub fn step(&mut self, state: State, c: char, position: usize) -> Result<Step, LexError> {
        match state {
            State::Start => self.start_state(c, position),
            State::InNumber => Ok(self.number_state(c)),
            State::InDecimal => self.decimal_state(c),
            State::InIdentifier => Ok(self.identifier_state(c)),
            State::InRelational(first) => self.relational_state(first, c),
        }
    }

    /// Flush whatever lexeme is pending when input runs out.
    pub fn finish(&mut self, state: State) -> Result<Option<Token>, LexError> {
        match state {
            State::Start => Ok(None),
            State::InNumber => Ok(Some(self.take(TokenKind::Number))),
            State::InDecimal => {
                self.check_decimal_tail()?;
                Ok(Some(self.take(TokenKind::Number)))
            }
            State::InIdentifier => Ok(Some(self.take_word())),
            State::InRelational(first @ ('>' | '<')) => Ok(Some(Token::new(
                TokenKind::RelationalOperator,
                first.to_string(),
                self.start,
            ))),
            State::InRelational(first) => Err(LexError::at(
                LexErrorKind::InvalidRelationalOperator,
                format!("invalid relational operator '{}'", first),
                self.start,
            )),
        }
    }

    fn start_state(&mut self, c: char, position: usize) -> Result<Step, LexError> {
        if c.is_ascii_whitespace() {
            return Ok(Step::stay(State::Start));
        }
        if c.is_ascii_digit() {
            self.begin(c, position);
            return Ok(Step::stay(State::InNumber));
        }
        if c.is_ascii_uppercase() {
            self.begin(c, position);
            return Ok(Step::stay(State::InIdentifier));
        }
        if let Some(op) = ArithOp::from_char(c) {
            let token = Token::new(TokenKind::ArithmeticOperator, op.symbol(), position);
            return Ok(Step::emit(State::Start, token));
        }
        match c {
            '(' => {
                self.depth += 1;
                Ok(Step::emit(
                    State::Start,
                    Token::new(TokenKind::OpenParen, "(", position),
                ))
            }
            ')' => {
                if self.depth == 0 {
                    return Err(LexError::at(
                        LexErrorKind::UnmatchedCloseParen,
                        "close paren without matching open",
                        position,
                    ));
                }
                self.depth -= 1;
                Ok(Step::emit(
                    State::Start,
                    Token::new(TokenKind::CloseParen, ")", position),
                ))
            }
            c if RELATIONAL_STARTS.contains(&c) => {
                self.start = position;
                Ok(Step::stay(State::InRelational(c)))
            }
            c => Err(LexError::at(
                LexErrorKind::InvalidCharacter,
                format!("invalid character '{}'", c),
                position,
            )),
        }
    }

    fn number_state(&mut self, c: char) -> Step {
        if c.is_ascii_digit() {
            self.buffer.push(c);
            return Step::stay(State::InNumber);
        }
        if c == '.' {
            self.buffer.push(c);
            return Step::stay(State::InDecimal);
        }
        Step::finish(self.take(TokenKind::Number))
    }

    fn decimal_state(&mut self, c: char) -> Result<Step, LexError> {
        if c.is_ascii_digit() {
            self.buffer.push(c);
            return Ok(Step::stay(State::InDecimal));
        }
        if c == '.' {
            return Err(LexError::at(
                LexErrorKind::MultipleDecimalPoints,
                format!(
                    "malformed number: multiple decimal points in '{}{}'",
                    self.buffer, c
                ),
                self.start,
            ));
        }
        self.check_decimal_tail()?;
        Ok(Step::finish(self.take(TokenKind::Number)))
    }

    fn identifier_state(&mut self, c: char) -> Step {
        if c.is_ascii_uppercase() {
            self.buffer.push(c);
            return Step::stay(State::InIdentifier);
        }
        Step::finish(self.take_word())
    }

    fn relational_state(&mut self, first: char, c: char) -> Result<Step, LexError> {
        match (first, c) {
            ('=' | '!' | '>' | '<', '=') => {
                let token = Token::new(
                    TokenKind::RelationalOperator,
                    format!("{}{}", first, c),
                    self.start,
                );
                Ok(Step::emit(State::Start, token))
            }
            ('>' | '<', _) => Ok(Step::finish(Token::new(
                TokenKind::RelationalOperator,
                first.to_string(),
                self.start,
            ))),
            _ => Err(LexError::at(
                LexErrorKind::InvalidRelationalOperator,
                format!("invalid relational operator '{}{}'", first, c),
                self.start,
            )),
        }
    }

    fn begin(&mut self, c: char, position: usize) {
        self.buffer.clear();
        self.buffer.push(c);
        self.start = position;
    }

    fn check_decimal_tail(&self) -> Result<(), LexError> {
        if self.buffer.ends_with('.') {
            return Err(LexError::at(
                LexErrorKind::TrailingDecimalPoint,
                format!(
                    "malformed number: decimal point with no following digit in '{}'",
                    self.buffer
                ),
                self.start,
            ));
        }
        Ok(())
    }

    fn take(&mut self, kind: TokenKind) -> Token {
        Token::new(kind, std::mem::take(&mut self.buffer), self.start)
    }

    fn take_word(&mut self) -> Token {
        let kind = if is_reserved_word(&self.buffer) {
            TokenKind::Reserved
        } else {
            TokenKind::Identifier
        };
        self.take(kind)
    }
}
