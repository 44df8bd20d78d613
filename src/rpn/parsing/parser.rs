//! Table-guided recursive descent
//!
//!     One method per non-terminal. Every method first asks the grammar which
//!     productions are predicted for the current token:
//!
//!         none       the token cannot start this non-terminal: UnexpectedToken
//!         one        follow it
//!         several    only legal for `Content`, settled by [disambiguate_content]
//!
//!     The parser never backtracks; the cursor only moves forward. Bracket nesting is
//!     capped at [MAX_NESTING_DEPTH] so that recursion stays within the stack.

use super::content::disambiguate_content;
use super::cursor::TokenCursor;
use super::error::{ParseError, ParseErrorKind};
use crate::rpn::ast::{Condition, Expression, Leaf, Node, Operand};
use crate::rpn::grammar::{Grammar, NonTerminal, Production, ProductionId, Symbol};
use crate::rpn::token::{ArithOp, RelOp, Token, TokenKind, IDENTIFIER, IF, NUMBER, RES, WHILE};
use std::num::IntErrorKind;
use tracing::trace;

/// Deepest bracket nesting accepted on one line.
pub const MAX_NESTING_DEPTH: usize = 64;

pub struct Parser<'a> {
    cursor: TokenCursor<'a>,
    grammar: &'a Grammar,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], grammar: &'a Grammar) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            grammar,
            depth: 0,
        }
    }

    /// Program -> Expression, then nothing.
    pub fn parse_program(&mut self) -> Result<Expression, ParseError> {
        if self.cursor.is_at_end() {
            return Err(ParseError::new(
                ParseErrorKind::EmptyTokens,
                "no tokens to parse",
                None,
            ));
        }
        self.follow(NonTerminal::Program)?;
        let expression = self.parse_expression()?;
        if let Some(token) = self.cursor.peek(0) {
            return Err(ParseError::trailing(token));
        }
        Ok(expression)
    }

    /// Expression -> ( Content )
    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.follow(NonTerminal::Expression)?;
        let open = self.cursor.expect(|t| t.is(TokenKind::OpenParen), "'('")?;
        if self.depth == MAX_NESTING_DEPTH {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep,
                format!("expressions nested more than {} levels deep", MAX_NESTING_DEPTH),
                Some(open.position()),
            ));
        }

        self.depth += 1;
        let node = self.parse_content();
        self.depth -= 1;

        let node = node?;
        self.cursor.expect(|t| t.is(TokenKind::CloseParen), "')'")?;
        Ok(Expression {
            position: open.position(),
            node,
        })
    }

    fn parse_content(&mut self) -> Result<Node, ParseError> {
        let grammar = self.grammar;
        let candidates = self.predict(NonTerminal::Content)?;

        let target = match candidates {
            [only] => grammar.production(*only).unit_target(),
            _ => {
                let (Some(current), next) = (self.cursor.peek(0), self.cursor.peek(1)) else {
                    return Err(self.end_error(NonTerminal::Content));
                };
                let choice = disambiguate_content(current, next);
                let production = grammar.unit_production(NonTerminal::Content, choice);
                trace!(
                    current = current.text(),
                    next = ?next.map(Token::text),
                    %choice,
                    "content disambiguation"
                );
                production
                    .filter(|id| candidates.contains(id))
                    .map(|_| choice)
            }
        };

        match target {
            Some(NonTerminal::Operation) => self.parse_operation(),
            Some(NonTerminal::StoreCommand) => self.parse_store(),
            Some(NonTerminal::RecallCommand) => self.parse_recall(),
            Some(NonTerminal::HistoryCommand) => self.parse_history(),
            _ => Err(self.mismatch("an operation or memory command")),
        }
    }

    /// Operation -> Operand Operand OperatorTail
    fn parse_operation(&mut self) -> Result<Node, ParseError> {
        self.follow(NonTerminal::Operation)?;
        let left = self.parse_operand()?;
        let right = self.parse_operand()?;

        let tail = self.follow(NonTerminal::OperatorTail)?;
        match tail.body.first() {
            Some(Symbol::NonTerminal(NonTerminal::RelOperator)) => self.parse_control(left, right),
            _ => {
                let (operator, operator_position) = self.parse_arith_operator()?;
                Ok(Node::Operation {
                    left,
                    right,
                    operator,
                    operator_position,
                })
            }
        }
    }

    /// Operand -> number | identifier | Expression
    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        let production = self.follow(NonTerminal::Operand)?;
        match production.body.first() {
            Some(Symbol::NonTerminal(NonTerminal::Expression)) => {
                Ok(Operand::Expression(Box::new(self.parse_expression()?)))
            }
            Some(Symbol::Terminal(terminal)) if *terminal == IDENTIFIER => {
                let token = self.cursor.expect(|t| t.is(TokenKind::Identifier), "an identifier")?;
                Ok(Operand::Identifier(leaf(token)))
            }
            _ => {
                let token = self.cursor.expect(|t| t.is(TokenKind::Number), "a number")?;
                Ok(Operand::Number(leaf(token)))
            }
        }
    }

    fn parse_arith_operator(&mut self) -> Result<(ArithOp, usize), ParseError> {
        self.follow(NonTerminal::ArithOperator)?;
        let token = self
            .cursor
            .expect(|t| t.is(TokenKind::ArithmeticOperator), "an arithmetic operator")?;
        let op = ArithOp::from_symbol(token.text())
            .ok_or_else(|| ParseError::unexpected_token(token, "an arithmetic operator"))?;
        Ok((op, token.position()))
    }

    fn parse_rel_operator(&mut self) -> Result<(RelOp, usize), ParseError> {
        self.follow(NonTerminal::RelOperator)?;
        let token = self
            .cursor
            .expect(|t| t.is(TokenKind::RelationalOperator), "a relational operator")?;
        let op = RelOp::from_symbol(token.text())
            .ok_or_else(|| ParseError::unexpected_token(token, "a relational operator"))?;
        Ok((op, token.position()))
    }

    /// OperatorTail -> RelOperator Expression ControlTail
    /// ControlTail  -> Expression IF | WHILE
    fn parse_control(&mut self, left: Operand, right: Operand) -> Result<Node, ParseError> {
        let (operator, operator_position) = self.parse_rel_operator()?;
        let condition = Condition {
            left,
            right,
            operator,
            operator_position,
        };
        let first_block = Box::new(self.parse_expression()?);

        let grammar = self.grammar;
        let tail: &[ProductionId] = match self.cursor.peek(0) {
            Some(token) => grammar.predict(NonTerminal::ControlTail, token.terminal()),
            None => &[],
        };
        let Some(tail) = tail.first().map(|id| grammar.production(*id)) else {
            return Err(self.malformed_control(
                "expected a second block followed by IF, or WHILE, after the condition body",
            ));
        };
        trace!(non_terminal = %NonTerminal::ControlTail, production = %tail, "predict");

        if tail.body.first() == Some(&Symbol::Terminal(WHILE)) {
            let keyword = self.cursor.expect(|t| t.is_keyword(WHILE), "WHILE")?;
            return Ok(Node::Loop {
                condition,
                body: first_block,
                keyword_position: keyword.position(),
            });
        }

        let second_block = Box::new(self.parse_expression()?);
        let Some(keyword) = self.cursor.peek(0).filter(|t| t.is_keyword(IF)) else {
            return Err(self.malformed_control("expected IF after the false branch"));
        };
        self.cursor.next();
        Ok(Node::Decision {
            condition,
            when_true: first_block,
            when_false: second_block,
            keyword_position: keyword.position(),
        })
    }

    /// StoreCommand -> number identifier
    fn parse_store(&mut self) -> Result<Node, ParseError> {
        self.follow(NonTerminal::StoreCommand)?;
        let value = self.cursor.expect(|t| t.is(TokenKind::Number), "a number")?;
        let name = match self.cursor.peek(0) {
            Some(token) if token.is(TokenKind::Identifier) => token,
            Some(token) => {
                return Err(ParseError::new(
                    ParseErrorKind::MalformedCommand,
                    format!(
                        "memory store needs a variable name, found '{}'",
                        token.text()
                    ),
                    Some(token.position()),
                ))
            }
            None => return Err(self.end_error(NonTerminal::StoreCommand)),
        };
        self.cursor.next();
        Ok(Node::StoreMemory {
            value: leaf(value),
            name: leaf(name),
        })
    }

    /// RecallCommand -> identifier
    fn parse_recall(&mut self) -> Result<Node, ParseError> {
        self.follow(NonTerminal::RecallCommand)?;
        let name = self.cursor.expect(|t| t.is(TokenKind::Identifier), "an identifier")?;
        Ok(Node::RecallMemory { name: leaf(name) })
    }

    /// HistoryCommand -> number RES
    fn parse_history(&mut self) -> Result<Node, ParseError> {
        self.follow(NonTerminal::HistoryCommand)?;
        let literal = self.cursor.expect(|t| t.is(TokenKind::Number), "a number")?;
        let index = literal.text().parse::<usize>().map_err(|err| {
            let message = match err.kind() {
                IntErrorKind::PosOverflow => {
                    format!("history index '{}' is too large", literal.text())
                }
                _ => format!(
                    "history index must be a non-negative integer, found '{}'",
                    literal.text()
                ),
            };
            ParseError::new(
                ParseErrorKind::InvalidHistoryIndex,
                message,
                Some(literal.position()),
            )
        })?;
        let keyword = self.cursor.expect(|t| t.is_keyword(RES), RES)?;
        Ok(Node::HistoryRecall {
            index,
            literal: leaf(literal),
            keyword_position: keyword.position(),
        })
    }

    /// Candidate productions for `nt` at the current token; never empty.
    fn predict(&self, nt: NonTerminal) -> Result<&'a [ProductionId], ParseError> {
        let grammar = self.grammar;
        let Some(token) = self.cursor.peek(0) else {
            return Err(self.end_error(nt));
        };
        let candidates = grammar.predict(nt, token.terminal());
        if candidates.is_empty() {
            return Err(ParseError::unexpected_token(token, &self.expected(nt)));
        }
        Ok(candidates)
    }

    /// The single production predicted for `nt`. An uncontrolled conflict falls back to
    /// declaration order.
    fn follow(&self, nt: NonTerminal) -> Result<&'a Production, ParseError> {
        let grammar = self.grammar;
        let candidates = self.predict(nt)?;
        let production = grammar.production(candidates[0]);
        trace!(non_terminal = %nt, %production, candidates = candidates.len(), "predict");
        Ok(production)
    }

    /// Human-readable FIRST(nt).
    fn expected(&self, nt: NonTerminal) -> String {
        let names: Vec<String> = self
            .grammar
            .first(nt)
            .into_iter()
            .flatten()
            .map(|l| match l.name() {
                NUMBER => "a number".to_string(),
                IDENTIFIER => "an identifier".to_string(),
                other => format!("'{}'", other),
            })
            .collect();
        match names.as_slice() {
            [] => nt.to_string(),
            [one] => one.clone(),
            _ => format!("one of {}", names.join(", ")),
        }
    }

    fn end_error(&self, nt: NonTerminal) -> ParseError {
        ParseError::unexpected_end(&self.expected(nt), self.cursor.end_position())
    }

    fn mismatch(&self, expected: &str) -> ParseError {
        match self.cursor.peek(0) {
            Some(token) => ParseError::unexpected_token(token, expected),
            None => ParseError::unexpected_end(expected, self.cursor.end_position()),
        }
    }

    fn malformed_control(&self, message: &str) -> ParseError {
        let position = self
            .cursor
            .peek(0)
            .map(Token::position)
            .or(self.cursor.end_position());
        ParseError::new(ParseErrorKind::MalformedControl, message, position)
    }
}

fn leaf(token: &Token) -> Leaf {
    Leaf::new(token.text(), token.position())
}
