//! FIRST and FOLLOW sets
//!
//! Both are computed by fixed-point iteration: every pass re-derives each set from the
//! current approximation and the loop stops once a full pass adds nothing. This makes
//! the order in which non-terminals are visited irrelevant, and mutual recursion in
//! FOLLOW (`FOLLOW(A)` needing `FOLLOW(B)` needing `FOLLOW(A)`) needs no special care.
//!
//! Sets are `BTreeSet`s so recomputation yields identical, ordered results.

use super::productions::Production;
use super::symbols::{Lookahead, NonTerminal, Symbol};
use std::collections::{BTreeMap, BTreeSet};

pub type LookaheadSet = BTreeSet<Lookahead>;
pub type SetMap = BTreeMap<NonTerminal, LookaheadSet>;

/// FIRST of every non-terminal that heads a production.
pub fn compute_first(productions: &[Production]) -> SetMap {
    let mut first: SetMap = productions
        .iter()
        .map(|p| (p.head, LookaheadSet::new()))
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        for production in productions {
            let derived = first_of_sequence(&production.body, &first);
            let entry = first.entry(production.head).or_default();
            for lookahead in derived {
                changed |= entry.insert(lookahead);
            }
        }
    }

    first
}

/// FIRST of a symbol string under the given FIRST map.
///
/// Contains ε exactly when every symbol of the string can vanish, which includes the
/// empty string itself.
pub fn first_of_sequence(symbols: &[Symbol], first: &SetMap) -> LookaheadSet {
    let mut result = LookaheadSet::new();
    for symbol in symbols {
        match symbol {
            Symbol::Terminal(name) => {
                result.insert(Lookahead::Terminal(*name));
                return result;
            }
            Symbol::NonTerminal(nt) => {
                let Some(set) = first.get(nt) else {
                    // A non-terminal without productions derives nothing.
                    return result;
                };
                result.extend(set.iter().filter(|l| **l != Lookahead::Epsilon));
                if !set.contains(&Lookahead::Epsilon) {
                    return result;
                }
            }
        }
    }
    result.insert(Lookahead::Epsilon);
    result
}

/// FOLLOW of every non-terminal that heads a production, seeded with `$` on `start`.
pub fn compute_follow(productions: &[Production], first: &SetMap, start: NonTerminal) -> SetMap {
    let mut follow: SetMap = productions
        .iter()
        .map(|p| (p.head, LookaheadSet::new()))
        .collect();
    follow.entry(start).or_default().insert(Lookahead::End);

    let mut changed = true;
    while changed {
        changed = false;
        for production in productions {
            for (index, symbol) in production.body.iter().enumerate() {
                let Symbol::NonTerminal(target) = symbol else {
                    continue;
                };
                let beta = first_of_sequence(&production.body[index + 1..], first);

                let mut additions: Vec<Lookahead> = beta
                    .iter()
                    .copied()
                    .filter(|l| *l != Lookahead::Epsilon)
                    .collect();
                if beta.contains(&Lookahead::Epsilon) {
                    if let Some(head_follow) = follow.get(&production.head) {
                        additions.extend(head_follow.iter().copied());
                    }
                }

                let entry = follow.entry(*target).or_default();
                for lookahead in additions {
                    changed |= entry.insert(lookahead);
                }
            }
        }
    }

    follow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpn::grammar::productions::{from_rules, Rule};
    use crate::rpn::grammar::symbols::NonTerminal::*;

    // Expression -> Operand OperatorTail ; Operand -> number | ε ; OperatorTail -> + | ε
    const NULLABLE: &[Rule] = &[
        (Expression, &[Symbol::NonTerminal(Operand), Symbol::NonTerminal(OperatorTail)]),
        (Operand, &[Symbol::Terminal("number")]),
        (Operand, &[]),
        (OperatorTail, &[Symbol::Terminal("+")]),
        (OperatorTail, &[]),
    ];

    fn set(items: &[Lookahead]) -> LookaheadSet {
        items.iter().copied().collect()
    }

    #[test]
    fn test_first_with_nullable_prefix() {
        let productions = from_rules(NULLABLE);
        let first = compute_first(&productions);
        assert_eq!(
            first[&Expression],
            set(&[
                Lookahead::Terminal("number"),
                Lookahead::Terminal("+"),
                Lookahead::Epsilon
            ])
        );
    }

    #[test]
    fn test_first_of_empty_sequence_is_epsilon() {
        let first = SetMap::new();
        assert_eq!(first_of_sequence(&[], &first), set(&[Lookahead::Epsilon]));
    }

    #[test]
    fn test_follow_propagates_through_vanishing_suffix() {
        let productions = from_rules(NULLABLE);
        let first = compute_first(&productions);
        let follow = compute_follow(&productions, &first, Expression);

        assert_eq!(follow[&Expression], set(&[Lookahead::End]));
        // OperatorTail can vanish, so Operand also sees what follows Expression.
        assert_eq!(
            follow[&Operand],
            set(&[Lookahead::Terminal("+"), Lookahead::End])
        );
        assert_eq!(follow[&OperatorTail], set(&[Lookahead::End]));
    }
}
