//! Format registry
//!
//! Renderers are looked up by name. Each one implements [Formatter] for the value it
//! renders (`[Token]` for a token listing, [Expression] for a tree), and a
//! [FormatRegistry] keyed by that value type holds the built-in set.

use crate::rpn::ast::Expression;
use crate::rpn::token::Token;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Renders a `T` to text.
pub trait Formatter<T: ?Sized>: Send + Sync {
    /// The name of this format (e.g., "treeviz", "json")
    fn name(&self) -> &str;

    fn serialize(&self, value: &T) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

pub struct FormatRegistry<T: ?Sized> {
    formatters: HashMap<String, Box<dyn Formatter<T>>>,
}

impl<T: ?Sized> FormatRegistry<T> {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any previous one with the same name.
    pub fn register<F: Formatter<T> + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter<T>> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, value: &T, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(value)
    }

    /// All registered names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }
}

impl<T: ?Sized> Default for FormatRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry<[Token]> {
    /// simple, json, table
    pub fn tokens() -> Self {
        let mut registry = Self::new();
        registry.register(super::SimpleTokenFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::TableTokenFormatter);
        registry
    }
}

impl FormatRegistry<Expression> {
    /// treeviz, json, yaml
    pub fn trees() -> Self {
        let mut registry = Self::new();
        registry.register(super::TreevizFormatter::default());
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpn::token::TokenKind;

    struct CountFormatter;
    impl Formatter<[Token]> for CountFormatter {
        fn name(&self) -> &str {
            "count"
        }

        fn serialize(&self, value: &[Token]) -> Result<String, FormatError> {
            Ok(value.len().to_string())
        }
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(
            FormatRegistry::<[Token]>::tokens().list_formats(),
            vec!["json", "simple", "table"]
        );
        assert_eq!(
            FormatRegistry::<Expression>::trees().list_formats(),
            vec!["json", "treeviz", "yaml"]
        );
    }

    #[test]
    fn test_register_and_serialize() {
        let mut registry = FormatRegistry::<[Token]>::new();
        registry.register(CountFormatter);
        assert!(registry.has("count"));

        let tokens = vec![Token::new(TokenKind::OpenParen, "(", 1)];
        assert_eq!(registry.serialize(&tokens, "count").unwrap(), "1");
        assert_eq!(
            registry.serialize(&tokens, "xml"),
            Err(FormatError::FormatNotFound("xml".to_string()))
        );
    }
}
