//! Grammar compiler
//!
//!     A static analysis over the fixed production set in [productions]: FIRST and
//!     FOLLOW sets ([sets]) and the prediction table ([table]). It depends on neither the
//!     lexer nor the parser.
//!
//!     The result is immutable. Build it once and hand `&Grammar` to every parse; it is
//!     `Send + Sync`, so concurrent parses can share one instance. [Grammar::shared]
//!     offers a lazily built process-wide instance for callers that want one.
//!
//! Conflicts
//!
//!     The table is allowed to hold several candidates only for the non-terminals listed
//!     in [AMBIGUOUS_BY_DESIGN]; the parser picks among those with one extra token of
//!     lookahead. Any other conflict is a defect in the grammar: [Grammar::build] logs it
//!     as a warning, [Grammar::build_strict] refuses it.

pub mod productions;
pub mod sets;
pub mod symbols;
pub mod table;

pub use productions::{Production, ProductionId, Rule, AMBIGUOUS_BY_DESIGN, RULES};
pub use sets::{LookaheadSet, SetMap};
pub use symbols::{Lookahead, NonTerminal, Symbol, END_MARK, EPSILON};
pub use table::{Conflict, PredictionTable};

use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error(
        "grammar error: uncontrolled conflict at [{non_terminal}, {terminal}] between {candidates} productions"
    )]
    UncontrolledConflict {
        non_terminal: NonTerminal,
        terminal: &'static str,
        candidates: usize,
    },
    #[error("grammar error: {0} is used but has no productions")]
    MissingProductions(NonTerminal),
}

#[derive(Debug, Clone)]
pub struct Grammar {
    start: NonTerminal,
    productions: Vec<Production>,
    first: SetMap,
    follow: SetMap,
    table: PredictionTable,
    ambiguous_by_design: Vec<NonTerminal>,
}

static SHARED: Lazy<Grammar> = Lazy::new(Grammar::build);

impl Grammar {
    /// Compile the fixed production set. Never fails; conflicts are only logged.
    pub fn build() -> Self {
        Self::from_rules(NonTerminal::Program, RULES, AMBIGUOUS_BY_DESIGN)
    }

    /// Like [Grammar::build], but any conflict outside the exception list is an error.
    pub fn build_strict() -> Result<Self, GrammarError> {
        let grammar = Self::build();
        grammar.validate()?;
        Ok(grammar)
    }

    /// Lazily built instance shared by the whole process.
    pub fn shared() -> &'static Grammar {
        &SHARED
    }

    /// Compile an arbitrary rule set.
    pub fn from_rules(
        start: NonTerminal,
        rules: &[Rule],
        ambiguous_by_design: &[NonTerminal],
    ) -> Self {
        let productions = productions::from_rules(rules);
        let first = sets::compute_first(&productions);
        let follow = sets::compute_follow(&productions, &first, start);
        let table = PredictionTable::build(&productions, &first, &follow);

        let grammar = Self {
            start,
            productions,
            first,
            follow,
            table,
            ambiguous_by_design: ambiguous_by_design.to_vec(),
        };

        let conflicts = grammar.conflicts();
        for conflict in &conflicts {
            if conflict.controlled {
                debug!(
                    non_terminal = %conflict.non_terminal,
                    terminal = conflict.terminal,
                    candidates = conflict.candidates.len(),
                    "controlled conflict"
                );
            } else {
                warn!(
                    non_terminal = %conflict.non_terminal,
                    terminal = conflict.terminal,
                    candidates = conflict.candidates.len(),
                    "uncontrolled conflict in prediction table"
                );
            }
        }
        debug!(
            productions = grammar.productions.len(),
            conflicts = conflicts.len(),
            "grammar compiled"
        );

        grammar
    }

    /// Check the compiled grammar against the conflict policy.
    pub fn validate(&self) -> Result<(), GrammarError> {
        for production in &self.productions {
            for symbol in &production.body {
                if let Symbol::NonTerminal(nt) = symbol {
                    if self.productions_for(*nt).next().is_none() {
                        return Err(GrammarError::MissingProductions(*nt));
                    }
                }
            }
        }
        if let Some(conflict) = self.conflicts().into_iter().find(|c| !c.controlled) {
            return Err(GrammarError::UncontrolledConflict {
                non_terminal: conflict.non_terminal,
                terminal: conflict.terminal,
                candidates: conflict.candidates.len(),
            });
        }
        Ok(())
    }

    pub fn start(&self) -> NonTerminal {
        self.start
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, id: ProductionId) -> &Production {
        &self.productions[id.0]
    }

    pub fn productions_for(&self, nt: NonTerminal) -> impl Iterator<Item = &Production> {
        self.productions.iter().filter(move |p| p.head == nt)
    }

    /// The production `head -> target` for a unit alternative, if there is one.
    pub fn unit_production(&self, head: NonTerminal, target: NonTerminal) -> Option<ProductionId> {
        self.productions_for(head)
            .find(|p| p.unit_target() == Some(target))
            .map(|p| p.id)
    }

    pub fn first(&self, nt: NonTerminal) -> Option<&LookaheadSet> {
        self.first.get(&nt)
    }

    pub fn follow(&self, nt: NonTerminal) -> Option<&LookaheadSet> {
        self.follow.get(&nt)
    }

    pub fn first_sets(&self) -> &SetMap {
        &self.first
    }

    pub fn follow_sets(&self) -> &SetMap {
        &self.follow
    }

    pub fn first_of_sequence(&self, symbols: &[Symbol]) -> LookaheadSet {
        sets::first_of_sequence(symbols, &self.first)
    }

    pub fn table(&self) -> &PredictionTable {
        &self.table
    }

    /// Candidate productions for `nt` with `terminal` as the next input.
    pub fn predict(&self, nt: NonTerminal, terminal: &str) -> &[ProductionId] {
        self.table.get(nt, terminal)
    }

    pub fn is_ambiguous_by_design(&self, nt: NonTerminal) -> bool {
        self.ambiguous_by_design.contains(&nt)
    }

    pub fn ambiguous_by_design(&self) -> &[NonTerminal] {
        &self.ambiguous_by_design
    }

    pub fn conflicts(&self) -> Vec<Conflict> {
        self.table.conflicts(&self.ambiguous_by_design)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpn::token::{IDENTIFIER, NUMBER, RES, WHILE};
    use NonTerminal::*;

    fn terminals(items: &[&'static str]) -> LookaheadSet {
        items.iter().map(|t| Lookahead::Terminal(*t)).collect()
    }

    #[test]
    fn test_first_sets() {
        let grammar = Grammar::build();
        assert_eq!(grammar.first(Program), Some(&terminals(&["("])));
        assert_eq!(
            grammar.first(Content),
            Some(&terminals(&["(", IDENTIFIER, NUMBER]))
        );
        assert_eq!(grammar.first(HistoryCommand), Some(&terminals(&[NUMBER])));
        assert_eq!(grammar.first(ControlTail), Some(&terminals(&["(", WHILE])));
        assert_eq!(
            grammar.first(OperatorTail).map(|s| s.len()),
            Some(12),
            "six arithmetic and six relational operators"
        );
    }

    #[test]
    fn test_follow_sets() {
        let grammar = Grammar::build();
        assert_eq!(grammar.follow(Program), Some(&[Lookahead::End].into()));
        assert_eq!(grammar.follow(Content), Some(&terminals(&[")"])));
        assert_eq!(grammar.follow(RelOperator), Some(&terminals(&["("])));

        let expression = grammar.follow(Expression).unwrap();
        assert!(expression.contains(&Lookahead::End));
        assert!(expression.contains(&Lookahead::Terminal("IF")));
        assert!(expression.contains(&Lookahead::Terminal(WHILE)));
        assert!(expression.contains(&Lookahead::Terminal("+")));
        assert!(expression.contains(&Lookahead::Terminal(">=")));
        assert!(!expression.contains(&Lookahead::Epsilon));
    }

    #[test]
    fn test_no_set_contains_epsilon() {
        let grammar = Grammar::build();
        for set in grammar.first_sets().values() {
            assert!(!set.contains(&Lookahead::Epsilon));
        }
    }

    #[test]
    fn test_content_conflicts_are_controlled() {
        let grammar = Grammar::build();
        let conflicts = grammar.conflicts();
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts.iter().all(|c| c.non_terminal == Content));
        assert!(conflicts.iter().all(|c| c.controlled));

        assert_eq!(grammar.predict(Content, NUMBER).len(), 3);
        assert_eq!(grammar.predict(Content, IDENTIFIER).len(), 2);
        assert_eq!(grammar.predict(Content, "(").len(), 1);
        assert!(grammar.validate().is_ok());
    }

    #[test]
    fn test_prediction_for_history_command() {
        let grammar = Grammar::build();
        let history = grammar.unit_production(Content, HistoryCommand).unwrap();
        assert!(grammar.predict(Content, NUMBER).contains(&history));
        assert!(!grammar.predict(Content, IDENTIFIER).contains(&history));
        assert_eq!(grammar.predict(HistoryCommand, NUMBER).len(), 1);
        assert!(grammar.predict(HistoryCommand, RES).is_empty());
    }

    #[test]
    fn test_strict_build_rejects_uncontrolled_conflict() {
        let grammar = Grammar::from_rules(Program, RULES, &[]);
        let err = grammar.validate().unwrap_err();
        assert!(matches!(
            err,
            GrammarError::UncontrolledConflict {
                non_terminal: Content,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_productions() {
        const BROKEN: &[Rule] = &[(Program, &[Symbol::NonTerminal(Expression)])];
        let grammar = Grammar::from_rules(Program, BROKEN, &[]);
        assert_eq!(
            grammar.validate(),
            Err(GrammarError::MissingProductions(Expression))
        );
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let a = Grammar::build();
        let b = Grammar::build();
        assert_eq!(a.first_sets(), b.first_sets());
        assert_eq!(a.follow_sets(), b.follow_sets());
        assert_eq!(a.table(), b.table());
    }
}
