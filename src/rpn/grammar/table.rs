//! Prediction table
//!
//! For every production `A -> α`: each terminal in FIRST(α) gets `A -> α` as a
//! candidate at `table[A][t]`, and when α can vanish every terminal of FOLLOW(A) does
//! too. A cell that ends up with more than one candidate is a conflict.

use super::productions::{Production, ProductionId};
use super::sets::{first_of_sequence, SetMap};
use super::symbols::{Lookahead, NonTerminal};
use serde::Serialize;
use std::collections::BTreeMap;

/// Cells keyed by terminal name (`$` for end of input).
pub type Row = BTreeMap<&'static str, Vec<ProductionId>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PredictionTable {
    rows: BTreeMap<NonTerminal, Row>,
}

/// A table cell with more than one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub non_terminal: NonTerminal,
    pub terminal: &'static str,
    pub candidates: Vec<ProductionId>,
    /// Whether the parser resolves this cell with extra lookahead.
    pub controlled: bool,
}

impl PredictionTable {
    pub fn build(productions: &[Production], first: &SetMap, follow: &SetMap) -> Self {
        let mut table = PredictionTable::default();

        for production in productions {
            let row = table.rows.entry(production.head).or_default();
            let first_alpha = first_of_sequence(&production.body, first);

            for lookahead in &first_alpha {
                if let Lookahead::Terminal(name) = lookahead {
                    push_candidate(row, *name, production.id);
                }
            }

            if first_alpha.contains(&Lookahead::Epsilon) {
                for lookahead in follow.get(&production.head).into_iter().flatten() {
                    push_candidate(row, lookahead.name(), production.id);
                }
            }
        }

        table
    }

    /// Candidates at `table[nt][terminal]`; empty when the cell is blank.
    pub fn get(&self, nt: NonTerminal, terminal: &str) -> &[ProductionId] {
        self.rows
            .get(&nt)
            .and_then(|row| row.get(terminal))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn row(&self, nt: NonTerminal) -> Option<&Row> {
        self.rows.get(&nt)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&NonTerminal, &Row)> {
        self.rows.iter()
    }

    /// Every multi-candidate cell, flagged against the designated exception list.
    pub fn conflicts(&self, ambiguous_by_design: &[NonTerminal]) -> Vec<Conflict> {
        self.rows
            .iter()
            .flat_map(|(nt, row)| {
                row.iter()
                    .filter(|(_, candidates)| candidates.len() > 1)
                    .map(move |(terminal, candidates)| Conflict {
                        non_terminal: *nt,
                        terminal: *terminal,
                        candidates: candidates.clone(),
                        controlled: ambiguous_by_design.contains(nt),
                    })
            })
            .collect()
    }
}

fn push_candidate(row: &mut Row, terminal: &'static str, id: ProductionId) {
    let cell = row.entry(terminal).or_default();
    if !cell.contains(&id) {
        cell.push(id);
    }
}
