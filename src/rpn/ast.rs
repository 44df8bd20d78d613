//! Derivation tree
//!
//!     The parser's output: one [Expression] per bracketed group, whose [Node] says what
//!     the group contains. Operands are numbers, identifiers, or nested expressions.
//!
//!     Every terminal the parser consumed (except the parentheses themselves) survives in
//!     the tree with its source position, so [Expression::leaves] can hand back the
//!     original lexemes in source order. Evaluators and code generators pattern-match on
//!     [Node]; the tree is never mutated after parsing.
//!
//!     `Display` renders the canonical single-spaced source form, e.g. `((2 3 *) 4 +)`.

use crate::rpn::token::{ArithOp, RelOp, IF, RES, WHILE};
use serde::Serialize;
use std::fmt;

/// A number or identifier lexeme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaf {
    pub text: String,
    pub position: usize,
}

impl Leaf {
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    pub fn view(&self) -> LeafRef<'_> {
        LeafRef {
            text: &self.text,
            position: self.position,
        }
    }
}

/// A borrowed view of one terminal in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafRef<'a> {
    pub text: &'a str,
    pub position: usize,
}

/// One bracketed group, `(` at `position`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expression {
    pub position: usize,
    pub node: Node,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    Operation {
        left: Operand,
        right: Operand,
        operator: ArithOp,
        operator_position: usize,
    },
    StoreMemory {
        value: Leaf,
        name: Leaf,
    },
    RecallMemory {
        name: Leaf,
    },
    HistoryRecall {
        index: usize,
        literal: Leaf,
        keyword_position: usize,
    },
    Decision {
        condition: Condition,
        when_true: Box<Expression>,
        when_false: Box<Expression>,
        keyword_position: usize,
    },
    Loop {
        condition: Condition,
        body: Box<Expression>,
        keyword_position: usize,
    },
}

/// `left right relop`, the head of a decision or loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub left: Operand,
    pub right: Operand,
    pub operator: RelOp,
    pub operator_position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Operand {
    Number(Leaf),
    Identifier(Leaf),
    Expression(Box<Expression>),
}

impl Node {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Operation { .. } => "Operation",
            Node::StoreMemory { .. } => "StoreMemory",
            Node::RecallMemory { .. } => "RecallMemory",
            Node::HistoryRecall { .. } => "HistoryRecall",
            Node::Decision { .. } => "Decision",
            Node::Loop { .. } => "Loop",
        }
    }
}

impl Operand {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Operand::Number(_) => "Number",
            Operand::Identifier(_) => "Identifier",
            Operand::Expression(_) => "Expression",
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Operand::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<LeafRef<'a>>) {
        match self {
            Operand::Number(leaf) | Operand::Identifier(leaf) => out.push(leaf.view()),
            Operand::Expression(expr) => expr.collect_leaves(out),
        }
    }
}

impl Condition {
    fn collect_leaves<'a>(&'a self, out: &mut Vec<LeafRef<'a>>) {
        self.left.collect_leaves(out);
        self.right.collect_leaves(out);
        out.push(LeafRef {
            text: self.operator.symbol(),
            position: self.operator_position,
        });
    }
}

impl Expression {
    /// Every terminal except the parentheses, in source order.
    pub fn leaves(&self) -> Vec<LeafRef<'_>> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    /// Nesting depth; a group with no nested groups has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().map(Expression::depth).max().unwrap_or(0)
    }

    /// Directly nested expressions, in source order.
    pub fn children(&self) -> impl Iterator<Item = &Expression> {
        let nested: Vec<&Expression> = match &self.node {
            Node::Operation { left, right, .. } => {
                [left, right].into_iter().filter_map(Operand::as_expression).collect()
            }
            Node::Decision {
                condition,
                when_true,
                when_false,
                ..
            } => [&condition.left, &condition.right]
                .into_iter()
                .filter_map(Operand::as_expression)
                .chain([&**when_true, &**when_false])
                .collect(),
            Node::Loop {
                condition, body, ..
            } => [&condition.left, &condition.right]
                .into_iter()
                .filter_map(Operand::as_expression)
                .chain([&**body])
                .collect(),
            Node::StoreMemory { .. } | Node::RecallMemory { .. } | Node::HistoryRecall { .. } => {
                Vec::new()
            }
        };
        nested.into_iter()
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<LeafRef<'a>>) {
        match &self.node {
            Node::Operation {
                left,
                right,
                operator,
                operator_position,
            } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
                out.push(LeafRef {
                    text: operator.symbol(),
                    position: *operator_position,
                });
            }
            Node::StoreMemory { value, name } => {
                out.push(value.view());
                out.push(name.view());
            }
            Node::RecallMemory { name } => out.push(name.view()),
            Node::HistoryRecall {
                literal,
                keyword_position,
                ..
            } => {
                out.push(literal.view());
                out.push(LeafRef {
                    text: RES,
                    position: *keyword_position,
                });
            }
            Node::Decision {
                condition,
                when_true,
                when_false,
                keyword_position,
            } => {
                condition.collect_leaves(out);
                when_true.collect_leaves(out);
                when_false.collect_leaves(out);
                out.push(LeafRef {
                    text: IF,
                    position: *keyword_position,
                });
            }
            Node::Loop {
                condition,
                body,
                keyword_position,
            } => {
                condition.collect_leaves(out);
                body.collect_leaves(out);
                out.push(LeafRef {
                    text: WHILE,
                    position: *keyword_position,
                });
            }
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(leaf) | Operand::Identifier(leaf) => f.write_str(&leaf.text),
            Operand::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.right, self.operator)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            Node::Operation {
                left,
                right,
                operator,
                ..
            } => write!(f, "({} {} {})", left, right, operator),
            Node::StoreMemory { value, name } => write!(f, "({} {})", value.text, name.text),
            Node::RecallMemory { name } => write!(f, "({})", name.text),
            Node::HistoryRecall { literal, .. } => write!(f, "({} {})", literal.text, RES),
            Node::Decision {
                condition,
                when_true,
                when_false,
                ..
            } => write!(f, "({} {} {} {})", condition, when_true, when_false, IF),
            Node::Loop {
                condition, body, ..
            } => write!(f, "({} {} {})", condition, body, WHILE),
        }
    }
}
