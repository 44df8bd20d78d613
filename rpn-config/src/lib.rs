//! Configuration loader for the rpn toolchain.
//!
//! `defaults/rpn.default.toml` is embedded into the binary so that the documented
//! defaults and runtime behavior stay in sync. Callers layer user files and key
//! overrides on top of it via [`Loader`] before deserializing into [`RpnConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/rpn.default.toml");

/// Top-level configuration consumed by rpn applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RpnConfig {
    pub output: OutputConfig,
    pub pipeline: PipelineConfig,
    pub grammar: GrammarConfig,
    pub logging: LoggingConfig,
}

/// Default renderers when the command line does not pick one.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub tokens: TokenFormat,
    pub tree: TreeFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenFormat {
    Simple,
    Json,
    Table,
}

impl TokenFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenFormat::Simple => "simple",
            TokenFormat::Json => "json",
            TokenFormat::Table => "table",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreeFormat {
    Treeviz,
    Json,
    Yaml,
}

impl TreeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeFormat::Treeviz => "treeviz",
            TreeFormat::Json => "json",
            TreeFormat::Yaml => "yaml",
        }
    }
}

/// Multi-line processing behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub continue_on_error: bool,
    pub skip_blank_lines: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrammarConfig {
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for command-line flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<RpnConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = Loader::new().build().expect("defaults to deserialize");
        assert_eq!(config.output.tokens, TokenFormat::Simple);
        assert_eq!(config.output.tree, TreeFormat::Treeviz);
        assert!(config.pipeline.continue_on_error);
        assert!(config.pipeline.skip_blank_lines);
        assert!(!config.grammar.strict);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.tree", "yaml")
            .expect("override to apply")
            .set_override("grammar.strict", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.tree, TreeFormat::Yaml);
        assert!(config.grammar.strict);
    }

    #[test]
    fn layers_user_file_over_defaults() {
        let path = std::env::temp_dir().join(format!("rpn-config-test-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("temp file");
        writeln!(file, "[output]\ntokens = \"table\"").expect("write temp file");

        let config = Loader::new().with_file(&path).build().expect("config to build");
        std::fs::remove_file(&path).ok();

        assert_eq!(config.output.tokens, TokenFormat::Table);
        assert_eq!(config.output.tree, TreeFormat::Treeviz);
    }

    #[test]
    fn log_level_override_beats_user_file() {
        let path = std::env::temp_dir().join(format!("rpn-config-level-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("temp file");
        writeln!(file, "[logging]\nlevel = \"error\"").expect("write temp file");

        let config = Loader::new()
            .with_file(&path)
            .set_override("logging.level", "debug")
            .expect("override to apply")
            .build()
            .expect("config to build");
        std::fs::remove_file(&path).ok();

        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Loader::new()
            .set_override("output.tokens", "xml")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
