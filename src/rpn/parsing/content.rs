//! Disambiguation of `Content`
//!
//!     `Content` is the one non-terminal whose table cells hold several candidates. The
//!     current token alone cannot tell an operation from a memory command, so the choice
//!     looks one token further:
//!
//!         number RES          -> HistoryCommand
//!         number identifier   -> StoreCommand
//!         number IF | WHILE   -> StoreCommand (rejected there as a malformed command)
//!         number )            -> StoreCommand (likewise)
//!         number <other>      -> Operation
//!         identifier )        -> RecallCommand
//!         identifier <other>  -> Operation
//!         (                   -> Operation
//!
//!     The second rule wins over an operation whose operands are a number then an
//!     identifier: `(5 X +)` is read as a store and fails at `+`.

use crate::rpn::grammar::NonTerminal;
use crate::rpn::token::{Token, TokenKind, RES};

/// The `Content` alternative for `current`, given the token after it.
pub fn disambiguate_content(current: &Token, next: Option<&Token>) -> NonTerminal {
    match current.kind() {
        TokenKind::Number => match next {
            Some(t) if t.is_keyword(RES) => NonTerminal::HistoryCommand,
            Some(t) if t.is(TokenKind::Identifier) => NonTerminal::StoreCommand,
            Some(t) if t.is(TokenKind::Reserved) || t.is(TokenKind::CloseParen) => {
                NonTerminal::StoreCommand
            }
            _ => NonTerminal::Operation,
        },
        TokenKind::Identifier => match next {
            Some(t) if t.is(TokenKind::CloseParen) => NonTerminal::RecallCommand,
            _ => NonTerminal::Operation,
        },
        _ => NonTerminal::Operation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn token(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, 1)
    }

    #[rstest]
    #[case(TokenKind::Number, "1", Some((TokenKind::Reserved, "RES")), NonTerminal::HistoryCommand)]
    #[case(TokenKind::Number, "42", Some((TokenKind::Identifier, "MEM")), NonTerminal::StoreCommand)]
    #[case(TokenKind::Number, "3", Some((TokenKind::Number, "4")), NonTerminal::Operation)]
    #[case(TokenKind::Number, "3", Some((TokenKind::OpenParen, "(")), NonTerminal::Operation)]
    #[case(TokenKind::Number, "5", Some((TokenKind::ArithmeticOperator, "+")), NonTerminal::Operation)]
    #[case(TokenKind::Number, "5", Some((TokenKind::Reserved, "WHILE")), NonTerminal::StoreCommand)]
    #[case(TokenKind::Number, "42", Some((TokenKind::Reserved, "IF")), NonTerminal::StoreCommand)]
    #[case(TokenKind::Number, "42", Some((TokenKind::CloseParen, ")")), NonTerminal::StoreCommand)]
    #[case(TokenKind::Number, "42", None, NonTerminal::Operation)]
    #[case(TokenKind::Identifier, "MEM", Some((TokenKind::CloseParen, ")")), NonTerminal::RecallCommand)]
    #[case(TokenKind::Identifier, "A", Some((TokenKind::Identifier, "B")), NonTerminal::Operation)]
    #[case(TokenKind::Identifier, "A", None, NonTerminal::Operation)]
    #[case(TokenKind::OpenParen, "(", Some((TokenKind::Number, "2")), NonTerminal::Operation)]
    fn test_disambiguate_content(
        #[case] kind: TokenKind,
        #[case] text: &str,
        #[case] next: Option<(TokenKind, &str)>,
        #[case] expected: NonTerminal,
    ) {
        let current = token(kind, text);
        let next = next.map(|(kind, text)| token(kind, text));
        assert_eq!(disambiguate_content(&current, next.as_ref()), expected);
    }
}
