//! Shared configuration loader for the codecanon tools.
//!
//! `defaults/codecanon.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`CanonConfig`].

use codecanon_parser::{ParseOptions, ScopeBoundaries, TokenizerOptions, WalkOptions};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/codecanon.default.toml");

/// Top-level configuration consumed by codecanon applications.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CanonConfig {
    pub parsing: ParsingConfig,
    pub canonicalization: CanonicalizationConfig,
    pub output: OutputConfig,
}

/// Limits of the two parse attempts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParsingConfig {
    pub fast_timeout_ms: u64,
    pub forgiving_timeout_ms: u64,
    pub max_error_nodes: usize,
    pub max_error_ratio: f64,
}

/// Knobs of the canonicalizing walk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CanonicalizationConfig {
    pub scope_boundaries: ScopeBoundaries,
    pub distinguish_numbers: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// How the CLI prints token sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One JSON object per file
    Json,
    /// One token per line
    Lines,
    /// Space separated tokens, one file per line
    Text,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Json, OutputFormat::Lines, OutputFormat::Text];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Lines => "lines",
            OutputFormat::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| format!("unknown output format '{}'", s))
    }
}

impl CanonConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            fast_timeout: Duration::from_millis(self.parsing.fast_timeout_ms),
            forgiving_timeout: Duration::from_millis(self.parsing.forgiving_timeout_ms),
            max_error_nodes: self.parsing.max_error_nodes,
            max_error_ratio: self.parsing.max_error_ratio,
        }
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            boundaries: self.canonicalization.scope_boundaries,
            distinguish_numbers: self.canonicalization.distinguish_numbers,
        }
    }

    /// Options for a [`codecanon_parser::Tokenizer`].
    pub fn tokenizer_options(&self) -> TokenizerOptions {
        TokenizerOptions {
            parsing: self.parse_options(),
            walk: self.walk_options(),
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        let ratio = self.parsing.max_error_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigError::Message(format!(
                "parsing.max_error_ratio must be between 0 and 1, got {}",
                ratio
            )));
        }
        Ok(self)
    }
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CanonConfig, ConfigError> {
        let config: CanonConfig = self.builder.build()?.try_deserialize()?;
        config.validate()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CanonConfig, ConfigError> {
    Loader::new().build()
}
