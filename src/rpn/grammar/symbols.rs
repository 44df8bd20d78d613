//! Grammar symbols
//!
//!     Non-terminals are a closed enum. Terminals are named by `&'static str`: the class
//!     terminals `number` and `identifier` are lowercase, every other terminal is the
//!     literal text of its token (`(`, `+`, `>=`, `RES`, ...).
//!
//!     FIRST and FOLLOW sets hold [Lookahead] values, which add the two markers that
//!     are not real terminals: ε (the empty string) and `$` (end of input).

use serde::Serialize;
use std::fmt;

pub const EPSILON: &str = "ε";
pub const END_MARK: &str = "$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NonTerminal {
    Program,
    Expression,
    Content,
    Operation,
    OperatorTail,
    ControlTail,
    StoreCommand,
    RecallCommand,
    HistoryCommand,
    Operand,
    ArithOperator,
    RelOperator,
}

impl NonTerminal {
    pub const ALL: [NonTerminal; 12] = [
        NonTerminal::Program,
        NonTerminal::Expression,
        NonTerminal::Content,
        NonTerminal::Operation,
        NonTerminal::OperatorTail,
        NonTerminal::ControlTail,
        NonTerminal::StoreCommand,
        NonTerminal::RecallCommand,
        NonTerminal::HistoryCommand,
        NonTerminal::Operand,
        NonTerminal::ArithOperator,
        NonTerminal::RelOperator,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NonTerminal::Program => "Program",
            NonTerminal::Expression => "Expression",
            NonTerminal::Content => "Content",
            NonTerminal::Operation => "Operation",
            NonTerminal::OperatorTail => "OperatorTail",
            NonTerminal::ControlTail => "ControlTail",
            NonTerminal::StoreCommand => "StoreCommand",
            NonTerminal::RecallCommand => "RecallCommand",
            NonTerminal::HistoryCommand => "HistoryCommand",
            NonTerminal::Operand => "Operand",
            NonTerminal::ArithOperator => "ArithOperator",
            NonTerminal::RelOperator => "RelOperator",
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Symbol {
    Terminal(&'static str),
    NonTerminal(NonTerminal),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(name) => f.write_str(name),
            Symbol::NonTerminal(nt) => write!(f, "{}", nt),
        }
    }
}

/// An element of a FIRST or FOLLOW set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Lookahead {
    Terminal(&'static str),
    Epsilon,
    End,
}

impl Lookahead {
    /// Column name used by the prediction table; ε never appears as a column.
    pub fn name(&self) -> &'static str {
        match self {
            Lookahead::Terminal(name) => name,
            Lookahead::Epsilon => EPSILON,
            Lookahead::End => END_MARK,
        }
    }
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
