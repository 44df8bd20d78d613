//! Plain-text report of the compiled grammar
//!
//! Sections can be rendered one at a time or all together:
//!
//!     productions   numbered production list
//!     first         FIRST set per non-terminal
//!     follow        FOLLOW set per non-terminal
//!     table         non-empty prediction cells, one row per non-terminal
//!     conflicts     multi-candidate cells, flagged controlled or not

use crate::rpn::grammar::{Grammar, LookaheadSet, ProductionId, SetMap};
use std::fmt::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarSection {
    Productions,
    First,
    Follow,
    Table,
    Conflicts,
    All,
}

impl GrammarSection {
    pub const NAMES: [&'static str; 6] =
        ["productions", "first", "follow", "table", "conflicts", "all"];
}

impl FromStr for GrammarSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "productions" => Ok(GrammarSection::Productions),
            "first" => Ok(GrammarSection::First),
            "follow" => Ok(GrammarSection::Follow),
            "table" => Ok(GrammarSection::Table),
            "conflicts" => Ok(GrammarSection::Conflicts),
            "all" => Ok(GrammarSection::All),
            other => Err(format!("unknown grammar section '{}'", other)),
        }
    }
}

pub fn render_grammar(grammar: &Grammar, section: GrammarSection) -> String {
    match section {
        GrammarSection::Productions => render_productions(grammar),
        GrammarSection::First => render_sets("FIRST", grammar.first_sets()),
        GrammarSection::Follow => render_sets("FOLLOW", grammar.follow_sets()),
        GrammarSection::Table => render_table(grammar),
        GrammarSection::Conflicts => render_conflicts(grammar),
        GrammarSection::All => [
            render_productions(grammar),
            render_sets("FIRST", grammar.first_sets()),
            render_sets("FOLLOW", grammar.follow_sets()),
            render_table(grammar),
            render_conflicts(grammar),
        ]
        .join("\n"),
    }
}

fn render_productions(grammar: &Grammar) -> String {
    let mut out = String::from("Productions\n");
    for production in grammar.productions() {
        let _ = writeln!(out, "  {:2}. {}", production.id.0, production);
    }
    out
}

fn format_set(set: &LookaheadSet) -> String {
    let names: Vec<&str> = set.iter().map(|l| l.name()).collect();
    format!("{{ {} }}", names.join(", "))
}

fn render_sets(title: &str, sets: &SetMap) -> String {
    let mut out = format!("{}\n", title);
    for (nt, set) in sets {
        let _ = writeln!(out, "  {:14} {}", nt.name(), format_set(set));
    }
    out
}

fn format_candidates(candidates: &[ProductionId]) -> String {
    candidates
        .iter()
        .map(|id| id.0.to_string())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_table(grammar: &Grammar) -> String {
    let mut out = String::from("Prediction table\n");
    for (nt, row) in grammar.table().rows() {
        let _ = writeln!(out, "  {}", nt);
        for (terminal, candidates) in row {
            let marker = if candidates.len() > 1 { "  [conflict]" } else { "" };
            let _ = writeln!(
                out,
                "    {:12} -> {}{}",
                terminal,
                format_candidates(candidates),
                marker
            );
        }
    }
    out
}

fn render_conflicts(grammar: &Grammar) -> String {
    let mut out = String::from("Conflicts\n");
    let conflicts = grammar.conflicts();
    if conflicts.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }
    for conflict in conflicts {
        let status = if conflict.controlled {
            "resolved by lookahead"
        } else {
            "UNCONTROLLED"
        };
        let _ = writeln!(
            out,
            "  [{}, {}] {}",
            conflict.non_terminal, conflict.terminal, status
        );
        for id in &conflict.candidates {
            let _ = writeln!(out, "      {}", grammar.production(*id));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicts_section() {
        let report = render_grammar(&Grammar::build(), GrammarSection::Conflicts);
        insta::assert_snapshot!(report, @r"
        Conflicts
          [Content, identifier] resolved by lookahead
              Content -> Operation
              Content -> RecallCommand
          [Content, number] resolved by lookahead
              Content -> Operation
              Content -> StoreCommand
              Content -> HistoryCommand
        ");
    }

    #[test]
    fn test_first_section_lists_every_non_terminal() {
        let grammar = Grammar::build();
        let report = render_grammar(&grammar, GrammarSection::First);
        assert!(report.starts_with("FIRST\n"));
        assert_eq!(report.lines().count(), 1 + grammar.first_sets().len());
        assert!(report.contains("HistoryCommand { number }"));
    }

    #[test]
    fn test_all_sections() {
        let report = render_grammar(&Grammar::build(), GrammarSection::All);
        for heading in ["Productions", "FIRST", "FOLLOW", "Prediction table", "Conflicts"] {
            assert!(report.contains(heading), "missing {}", heading);
        }
        assert!(report.contains("  1. Expression -> ( Content )"));
    }

    #[test]
    fn test_section_names_parse() {
        for name in GrammarSection::NAMES {
            assert!(name.parse::<GrammarSection>().is_ok());
        }
        assert!("rules".parse::<GrammarSection>().is_err());
    }
}
