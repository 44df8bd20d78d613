//! Output format implementations
//!
//! This module contains the renderers for:
//! - token sequences (simple, json, table) and the token dump file
//! - derivation trees (treeviz, json, yaml)
//! - the compiled grammar (plain-text report)

pub mod grammar_report;
pub mod registry;
pub mod structured;
pub mod tokens;
pub mod treeviz;

pub use grammar_report::{render_grammar, GrammarSection};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use structured::{JsonFormatter, YamlFormatter};
pub use tokens::{
    detokenize, read_dump, write_dump, DumpError, SimpleTokenFormatter, TableTokenFormatter,
};
pub use treeviz::{to_treeviz_str, TreeSnapshot, TreevizFormatter};
