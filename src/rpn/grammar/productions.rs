//! The fixed production set
//!
//!     Program        -> Expression
//!     Expression     -> ( Content )
//!     Content        -> Operation | StoreCommand | RecallCommand | HistoryCommand
//!     Operation      -> Operand Operand OperatorTail
//!     OperatorTail   -> ArithOperator | RelOperator Expression ControlTail
//!     ControlTail    -> Expression IF | WHILE
//!     StoreCommand   -> number identifier
//!     RecallCommand  -> identifier
//!     HistoryCommand -> number RES
//!     Operand        -> number | identifier | Expression
//!     ArithOperator  -> + | - | * | / | % | ^
//!     RelOperator    -> > | < | == | != | >= | <=
//!
//!     Content is not LL(1): on `number` it could start an operation, a store or a
//!     history recall, and on `identifier` an operation or a recall. That is the only
//!     place the table holds more than one candidate; the parser settles it with one
//!     extra token of lookahead. See [AMBIGUOUS_BY_DESIGN].

use super::symbols::NonTerminal::{self, *};
use super::symbols::Symbol;
use crate::rpn::token::{IDENTIFIER, IF, NUMBER, RES, WHILE};
use serde::Serialize;
use std::fmt;

/// Non-terminals whose table conflicts are resolved procedurally by the parser.
pub const AMBIGUOUS_BY_DESIGN: &[NonTerminal] = &[Content];

const fn t(name: &'static str) -> Symbol {
    Symbol::Terminal(name)
}

const fn n(nt: NonTerminal) -> Symbol {
    Symbol::NonTerminal(nt)
}

/// Rules as (head, body) pairs; an empty body is ε.
pub type Rule = (NonTerminal, &'static [Symbol]);

pub const RULES: &[Rule] = &[
    (Program, &[n(Expression)]),
    (Expression, &[t("("), n(Content), t(")")]),
    (Content, &[n(Operation)]),
    (Content, &[n(StoreCommand)]),
    (Content, &[n(RecallCommand)]),
    (Content, &[n(HistoryCommand)]),
    (Operation, &[n(Operand), n(Operand), n(OperatorTail)]),
    (OperatorTail, &[n(ArithOperator)]),
    (OperatorTail, &[n(RelOperator), n(Expression), n(ControlTail)]),
    (ControlTail, &[n(Expression), t(IF)]),
    (ControlTail, &[t(WHILE)]),
    (StoreCommand, &[t(NUMBER), t(IDENTIFIER)]),
    (RecallCommand, &[t(IDENTIFIER)]),
    (HistoryCommand, &[t(NUMBER), t(RES)]),
    (Operand, &[t(NUMBER)]),
    (Operand, &[t(IDENTIFIER)]),
    (Operand, &[n(Expression)]),
    (ArithOperator, &[t("+")]),
    (ArithOperator, &[t("-")]),
    (ArithOperator, &[t("*")]),
    (ArithOperator, &[t("/")]),
    (ArithOperator, &[t("%")]),
    (ArithOperator, &[t("^")]),
    (RelOperator, &[t(">")]),
    (RelOperator, &[t("<")]),
    (RelOperator, &[t("==")]),
    (RelOperator, &[t("!=")]),
    (RelOperator, &[t(">=")]),
    (RelOperator, &[t("<=")]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProductionId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Production {
    pub id: ProductionId,
    pub head: NonTerminal,
    pub body: Vec<Symbol>,
}

impl Production {
    pub fn is_epsilon(&self) -> bool {
        self.body.is_empty()
    }

    /// For a unit production `A -> B`, the non-terminal `B`.
    pub fn unit_target(&self) -> Option<NonTerminal> {
        match self.body.as_slice() {
            [Symbol::NonTerminal(nt)] => Some(*nt),
            _ => None,
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.head)?;
        if self.body.is_empty() {
            return write!(f, " ε");
        }
        for symbol in &self.body {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

/// Number the rules in declaration order.
pub fn from_rules(rules: &[Rule]) -> Vec<Production> {
    rules
        .iter()
        .enumerate()
        .map(|(index, (head, body))| Production {
            id: ProductionId(index),
            head: *head,
            body: body.to_vec(),
        })
        .collect()
}
