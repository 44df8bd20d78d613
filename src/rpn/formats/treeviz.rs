//! Treeviz formatter for derivation trees
//!
//! One line per node, nesting drawn with box connectors:
//!
//!     <prefix><connector> <icon> <label>
//!
//! Example, for `((2 3 *) X +)`:
//!
//!     ⧉ ((2 3 *) X +)
//!     └─ ƒ Operation +
//!       ├─ ⧉ (2 3 *)
//!       │ └─ ƒ Operation *
//!       │   ├─ # 2
//!       │   └─ # 3
//!       └─ ◦ X
//!
//! Labels are truncated to 30 characters.
//!
//! Icons
//!     Expression: ⧉
//!     Operation: ƒ
//!     StoreMemory: ⇥
//!     RecallMemory: ↦
//!     HistoryRecall: ↺
//!     Decision: ⑂
//!     Loop: ⟳
//!     Condition: ?
//!     Number: #
//!     Identifier: ◦

use super::registry::{FormatError, Formatter};
use crate::rpn::ast::{Condition, Expression, Node, Operand};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Expression" => "⧉",
        "Operation" => "ƒ",
        "StoreMemory" => "⇥",
        "RecallMemory" => "↦",
        "HistoryRecall" => "↺",
        "Decision" => "⑂",
        "Loop" => "⟳",
        "Condition" => "?",
        "Number" => "#",
        "Identifier" => "◦",
        _ => "○",
    }
}

/// Display-ready view of one tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSnapshot {
    pub node_type: &'static str,
    pub label: String,
    pub position: usize,
    pub children: Vec<TreeSnapshot>,
}

impl TreeSnapshot {
    fn leaf(node_type: &'static str, label: impl Into<String>, position: usize) -> Self {
        Self {
            node_type,
            label: label.into(),
            position,
            children: Vec::new(),
        }
    }
}

/// Flatten an expression into snapshot nodes. `role` prefixes the label of branch and
/// body blocks.
pub fn snapshot_expression(expr: &Expression, role: Option<&str>) -> TreeSnapshot {
    let label = match role {
        Some(role) => format!("{} {}", role, expr),
        None => expr.to_string(),
    };
    TreeSnapshot {
        node_type: "Expression",
        label,
        position: expr.position,
        children: vec![snapshot_node(expr)],
    }
}

fn snapshot_node(expr: &Expression) -> TreeSnapshot {
    let node_type = expr.node.kind_name();
    match &expr.node {
        Node::Operation {
            left,
            right,
            operator,
            operator_position,
        } => TreeSnapshot {
            node_type,
            label: format!("{} {}", node_type, operator),
            position: *operator_position,
            children: vec![snapshot_operand(left), snapshot_operand(right)],
        },
        Node::StoreMemory { value, name } => TreeSnapshot::leaf(
            node_type,
            format!("{} {} -> {}", node_type, value.text, name.text),
            value.position,
        ),
        Node::RecallMemory { name } => {
            TreeSnapshot::leaf(node_type, format!("{} {}", node_type, name.text), name.position)
        }
        Node::HistoryRecall { index, literal, .. } => {
            TreeSnapshot::leaf(node_type, format!("{} {}", node_type, index), literal.position)
        }
        Node::Decision {
            condition,
            when_true,
            when_false,
            keyword_position,
        } => TreeSnapshot {
            node_type,
            label: node_type.to_string(),
            position: *keyword_position,
            children: vec![
                snapshot_condition(condition),
                snapshot_expression(when_true, Some("then")),
                snapshot_expression(when_false, Some("else")),
            ],
        },
        Node::Loop {
            condition,
            body,
            keyword_position,
        } => TreeSnapshot {
            node_type,
            label: node_type.to_string(),
            position: *keyword_position,
            children: vec![
                snapshot_condition(condition),
                snapshot_expression(body, Some("body")),
            ],
        },
    }
}

fn snapshot_condition(condition: &Condition) -> TreeSnapshot {
    TreeSnapshot {
        node_type: "Condition",
        label: format!("Condition {}", condition.operator),
        position: condition.operator_position,
        children: vec![
            snapshot_operand(&condition.left),
            snapshot_operand(&condition.right),
        ],
    }
}

fn snapshot_operand(operand: &Operand) -> TreeSnapshot {
    match operand {
        Operand::Number(leaf) => TreeSnapshot::leaf("Number", &leaf.text, leaf.position),
        Operand::Identifier(leaf) => TreeSnapshot::leaf("Identifier", &leaf.text, leaf.position),
        Operand::Expression(expr) => snapshot_expression(expr, None),
    }
}

fn format_snapshot(
    snapshot: &TreeSnapshot,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    show_positions: bool,
) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {}\n",
        prefix,
        connector,
        format_label(snapshot, show_positions)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(
            child,
            &child_prefix,
            i,
            child_count,
            show_positions,
        ));
    }

    output
}

fn format_label(snapshot: &TreeSnapshot, show_positions: bool) -> String {
    let icon = get_icon(snapshot.node_type);
    let label = truncate(&snapshot.label, 30);
    if show_positions {
        format!("{} {} @{}", icon, label, snapshot.position)
    } else {
        format!("{} {}", icon, label)
    }
}

/// Render a whole tree.
pub fn to_treeviz_str(expr: &Expression, show_positions: bool) -> String {
    let root = snapshot_expression(expr, None);
    let mut output = format!("{}\n", format_label(&root, show_positions));
    let child_count = root.children.len();
    for (i, child) in root.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i, child_count, show_positions));
    }
    output
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizFormatter {
    pub show_positions: bool,
}

impl Formatter<Expression> for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, expr: &Expression) -> Result<String, FormatError> {
        Ok(to_treeviz_str(expr, self.show_positions))
    }

    fn description(&self) -> &str {
        "Visual tree, one node per line"
    }
}
