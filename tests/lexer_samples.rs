//! Integration tests for the lexer over sample lines
//!
//! Covers every token kind, the operator alphabet, and each way a line can be
//! rejected, with the position the error is pinned to.

use rpn::rpn::lexing::{tokenize, tokenize_lines, LexErrorKind};
use rpn::rpn::token::ArithOp;
use rpn::{Token, TokenKind};
use rstest::rstest;
use std::fs;

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(Token::text).collect()
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{}", name)).expect("Failed to read fixture")
}

#[test]
fn test_simple_decimal_expression() {
    let tokens = tokenize("(3.14 2.0 +)").unwrap();
    insta::assert_snapshot!(
        tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>().join("\n"),
        @r"
    OPEN_PAREN '(' @1
    NUMBER '3.14' @2
    NUMBER '2.0' @7
    ARITH_OP '+' @11
    CLOSE_PAREN ')' @12
    "
    );
}

#[test]
fn test_every_arithmetic_operator() {
    for op in ArithOp::ALL {
        let line = format!("(1 2 {})", op.symbol());
        let tokens = tokenize(&line).unwrap();
        assert_eq!(tokens[3].kind(), TokenKind::ArithmeticOperator);
        assert_eq!(tokens[3].text(), op.symbol());
    }
}

#[rstest]
#[case("(5 RES)", 2, TokenKind::Reserved, "RES")]
#[case("(10.5 MEM)", 2, TokenKind::Identifier, "MEM")]
#[case("(A B != (A) WHILE)", 3, TokenKind::RelationalOperator, "!=")]
#[case("(A B == (A) WHILE)", 3, TokenKind::RelationalOperator, "==")]
#[case("(A B <= (A) (B) IF)", 3, TokenKind::RelationalOperator, "<=")]
#[case("(A B > (A) (B) IF)", 10, TokenKind::Reserved, "IF")]
#[case("(RESULT)", 1, TokenKind::Identifier, "RESULT")]
fn test_token_kinds(
    #[case] line: &str,
    #[case] index: usize,
    #[case] kind: TokenKind,
    #[case] text: &str,
) {
    let tokens = tokenize(line).unwrap();
    assert_eq!(tokens[index].kind(), kind, "kind of token {} in {}", index, line);
    assert_eq!(tokens[index].text(), text);
}

#[test]
fn test_nested_expression() {
    let tokens = tokenize("((1.5 2.0 *) (3.0 4.0 *) /)").unwrap();
    assert_eq!(tokens.len(), 13);
    assert!(tokens[0].is(TokenKind::OpenParen));
    assert!(tokens[12].is(TokenKind::CloseParen));
}

#[test]
fn test_whitespace_is_only_a_separator() {
    let spaced = tokenize("(  7\t8   *  )").unwrap();
    assert_eq!(texts(&spaced), vec!["(", "7", "8", "*", ")"]);
    assert_eq!(spaced[1].position(), 4);
    assert_eq!(spaced[2].position(), 6);
}

#[rstest]
#[case("(3.14 2.0 &)", LexErrorKind::InvalidCharacter, Some(11))]
#[case("(3,45 2.0 +)", LexErrorKind::InvalidCharacter, Some(3))]
#[case("(3.14.5 2.0 +)", LexErrorKind::MultipleDecimalPoints, Some(2))]
#[case("(3. 2.0 +)", LexErrorKind::TrailingDecimalPoint, Some(2))]
#[case("(.5 1 +)", LexErrorKind::InvalidCharacter, Some(2))]
#[case("((3.14 2.0 +)", LexErrorKind::UnbalancedParentheses { unclosed: 1 }, None)]
#[case("(1 2 +))", LexErrorKind::UnmatchedCloseParen, Some(8))]
#[case("(A B ! (A) WHILE)", LexErrorKind::InvalidRelationalOperator, Some(6))]
#[case("(mem)", LexErrorKind::InvalidCharacter, Some(2))]
#[case("", LexErrorKind::EmptyInput, None)]
#[case("1 2 +", LexErrorKind::MissingOpenParen, Some(1))]
fn test_rejected_lines(
    #[case] line: &str,
    #[case] kind: LexErrorKind,
    #[case] position: Option<usize>,
) {
    let err = tokenize(line).unwrap_err();
    assert_eq!(err.kind, kind, "kind for {:?}", line);
    assert_eq!(err.position, position, "position for {:?}", line);
}

#[test]
fn test_error_message_names_position() {
    let err = tokenize("(3.14 2.0 &)").unwrap_err();
    assert_eq!(
        err.to_string(),
        "lexical error at position 11: invalid character '&'"
    );
}

#[test]
fn test_valid_fixture_tokenizes_completely() {
    let source = read_fixture("valid.rpn");
    let results = tokenize_lines(&source);
    assert_eq!(results.len(), 8);
    for (line, result) in &results {
        assert!(result.is_ok(), "line {} failed: {:?}", line, result);
    }
    let total: usize = results
        .iter()
        .map(|(_, r)| r.as_ref().map(Vec::len).unwrap_or(0))
        .sum();
    assert_eq!(total, 57);
}
