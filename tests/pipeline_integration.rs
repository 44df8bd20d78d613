//! Integration tests for multi-line processing and the token dump file

use rpn::rpn::formats::{read_dump, write_dump, FormatRegistry};
use rpn::rpn::parsing::{ParseErrorKind, ProcessError, MAX_NESTING_DEPTH};
use rpn::rpn::pipeline::{Pipeline, PipelineOptions, Summary};
use rpn::{Expression, Grammar, Token};
use std::fs;
use std::io::BufReader;

fn read_fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{}", name)).expect("Failed to read fixture")
}

#[test]
fn test_valid_fixture_parses_every_line() {
    let grammar = Grammar::build();
    let reports = Pipeline::new(&grammar).process(&read_fixture("valid.rpn"));
    let summary = Summary::from_reports(&reports);
    assert_eq!(summary.to_string(), "8 lines: 8 ok, 0 failed, 57 tokens");
    assert!(summary.all_succeeded());

    let kinds: Vec<&str> = reports
        .iter()
        .filter_map(|r| r.result.as_ref().ok())
        .map(|parsed| parsed.tree.node.kind_name())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "Operation",
            "StoreMemory",
            "RecallMemory",
            "HistoryRecall",
            "Operation",
            "Operation",
            "Decision",
            "Loop",
        ]
    );
}

#[test]
fn test_mixed_fixture_isolates_failures() {
    let grammar = Grammar::build();
    let pipeline = Pipeline::new(&grammar);
    let reports = pipeline.process(&read_fixture("mixed.rpn"));

    let outcome: Vec<(usize, Option<&str>)> = reports
        .iter()
        .map(|r| (r.line, r.result.as_ref().err().map(|e| e.stage())))
        .collect();
    assert_eq!(
        outcome,
        vec![
            (1, None),
            (3, Some("lexer")),
            (4, None),
            (5, Some("parser")),
            (6, Some("lexer")),
            (7, None),
        ]
    );
    assert_eq!(
        Summary::from_reports(&reports).to_string(),
        "6 lines: 3 ok, 3 failed, 18 tokens"
    );

    let tokenized = pipeline.tokenize(&read_fixture("mixed.rpn"));
    assert_eq!(
        Summary::from_reports(&tokenized).to_string(),
        "6 lines: 4 ok, 2 failed, 22 tokens"
    );
}

#[test]
fn test_deep_nesting_fails_only_its_own_line() {
    let depth = 5_000;
    let deep = format!("{}1 2 +){}", "(".repeat(depth), " 1 +)".repeat(depth - 1));
    let source = format!("(1 2 +)\n{}\n(X)\n", deep);

    let grammar = Grammar::build();
    let reports = Pipeline::new(&grammar).process(&source);
    let ok: Vec<bool> = reports.iter().map(|r| r.is_ok()).collect();
    assert_eq!(ok, vec![true, false, true]);
    match &reports[1].result {
        Err(ProcessError::Parse(err)) => {
            assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
            assert_eq!(err.position, Some(MAX_NESTING_DEPTH + 1));
        }
        other => panic!("expected a nesting error, got {:?}", other),
    }
}

#[test]
fn test_stop_at_first_failure() {
    let grammar = Grammar::build();
    let options = PipelineOptions {
        continue_on_error: false,
        ..PipelineOptions::default()
    };
    let reports = Pipeline::with_options(&grammar, options).process(&read_fixture("mixed.rpn"));
    let lines: Vec<usize> = reports.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![1, 3]);
    assert!(!reports[1].is_ok());
}

#[test]
fn test_blank_lines_can_be_reported() {
    let grammar = Grammar::build();
    let options = PipelineOptions {
        skip_blank_lines: false,
        ..PipelineOptions::default()
    };
    let reports = Pipeline::with_options(&grammar, options).process("(1 2 +)\n   \n(X)\n");
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[1].line, 2);
    assert_eq!(reports[1].result.as_ref().err().map(|e| e.stage()), Some("lexer"));
}

#[test]
fn test_reports_render_through_registries() {
    let grammar = Grammar::build();
    let reports = Pipeline::new(&grammar).process("(1 RES)\n(MEM)\n");
    let trees = FormatRegistry::<Expression>::trees();
    let rendered: Vec<String> = reports
        .iter()
        .filter_map(|r| r.result.as_ref().ok())
        .map(|parsed| trees.serialize(&parsed.tree, "treeviz").unwrap())
        .collect();
    assert_eq!(
        rendered,
        vec![
            "⧉ (1 RES)\n└─ ↺ HistoryRecall 1\n",
            "⧉ (MEM)\n└─ ↦ RecallMemory MEM\n",
        ]
    );

    let tokens = FormatRegistry::<[Token]>::tokens();
    let first = reports[0].result.as_ref().unwrap();
    assert_eq!(
        tokens.serialize(&first.tokens, "table").unwrap(),
        concat!(
            "   1. OPEN_PAREN         -> '('\n",
            "   2. NUMBER             -> '1'\n",
            "   3. RESERVED           -> 'RES'\n",
            "   4. CLOSE_PAREN        -> ')'\n",
        )
    );
}

#[test]
fn test_token_dump_round_trips_through_a_file() {
    let grammar = Grammar::build();
    let reports = Pipeline::new(&grammar).tokenize(&read_fixture("mixed.rpn"));
    let lines: Vec<Vec<Token>> = reports
        .iter()
        .filter_map(|r| r.result.as_ref().ok().cloned())
        .collect();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.jsonl");
    write_dump(fs::File::create(&path).unwrap(), &lines).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 4);

    let restored = read_dump(BufReader::new(fs::File::open(&path).unwrap())).unwrap();
    assert_eq!(restored, lines);
}
