//! Multi-line processing
//!
//!     Runs each line of a source text through the lexer and parser independently. A
//!     failing line produces a [LineReport] carrying its error; it never affects other
//!     lines, and with `continue_on_error` (the default) processing carries on.
//!
//!     Line numbers are 1-based and refer to the original source, blank lines included.

use crate::rpn::ast::Expression;
use crate::rpn::grammar::Grammar;
use crate::rpn::lexing::tokenize;
use crate::rpn::parsing::{parse, ProcessError};
use crate::rpn::token::Token;
use rpn_config::PipelineConfig;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub continue_on_error: bool,
    pub skip_blank_lines: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            continue_on_error: true,
            skip_blank_lines: true,
        }
    }
}

impl From<&PipelineConfig> for PipelineOptions {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            continue_on_error: config.continue_on_error,
            skip_blank_lines: config.skip_blank_lines,
        }
    }
}

/// A successfully parsed line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedLine {
    pub tokens: Vec<Token>,
    pub tree: Expression,
}

/// Outcome of one source line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineReport<T> {
    pub line: usize,
    pub text: String,
    pub result: Result<T, ProcessError>,
}

impl<T> LineReport<T> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Anything a line report can hold that still has its tokens.
pub trait HasTokens {
    fn tokens(&self) -> &[Token];
}

impl HasTokens for Vec<Token> {
    fn tokens(&self) -> &[Token] {
        self
    }
}

impl HasTokens for ParsedLine {
    fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

pub struct Pipeline<'g> {
    grammar: &'g Grammar,
    options: PipelineOptions,
}

impl<'g> Pipeline<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self::with_options(grammar, PipelineOptions::default())
    }

    pub fn with_options(grammar: &'g Grammar, options: PipelineOptions) -> Self {
        Self { grammar, options }
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Tokenize and parse every line of `source`.
    pub fn process(&self, source: &str) -> Vec<LineReport<ParsedLine>> {
        self.run(source, |line| {
            let tokens = tokenize(line)?;
            let tree = parse(&tokens, self.grammar)?;
            Ok(ParsedLine { tokens, tree })
        })
    }

    /// Tokenize every line of `source` without parsing.
    pub fn tokenize(&self, source: &str) -> Vec<LineReport<Vec<Token>>> {
        self.run(source, |line| Ok(tokenize(line)?))
    }

    fn run<T, F>(&self, source: &str, mut stage: F) -> Vec<LineReport<T>>
    where
        F: FnMut(&str) -> Result<T, ProcessError>,
    {
        let mut reports = Vec::new();
        for (index, text) in source.lines().enumerate() {
            if self.options.skip_blank_lines && text.trim().is_empty() {
                continue;
            }
            let line = index + 1;
            let result = stage(text);
            match &result {
                Ok(_) => debug!(line, "line processed"),
                Err(err) => warn!(line, stage = err.stage(), error = %err, "line failed"),
            }
            let failed = result.is_err();
            reports.push(LineReport {
                line,
                text: text.to_string(),
                result,
            });
            if failed && !self.options.continue_on_error {
                info!(line, "stopping at first failing line");
                break;
            }
        }
        reports
    }
}

/// Counts over a batch of line reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub lines: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub tokens: usize,
}

impl Summary {
    pub fn from_reports<T: HasTokens>(reports: &[LineReport<T>]) -> Self {
        reports.iter().fold(Summary::default(), |mut summary, report| {
            summary.lines += 1;
            match &report.result {
                Ok(value) => {
                    summary.succeeded += 1;
                    summary.tokens += value.tokens().len();
                }
                Err(_) => summary.failed += 1,
            }
            summary
        })
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines: {} ok, {} failed, {} tokens",
            self.lines, self.succeeded, self.failed, self.tokens
        )
    }
}
