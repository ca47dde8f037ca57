//! Tokenizer facade
//!
//!     [`tokenize`] is the primary operation: canonical tokens for a source text, or an empty
//!     vector when the text cannot be parsed. A [`Tokenizer`] carries non-default options and
//!     also offers [`Tokenizer::tokenize_with_report`], which keeps the parse strategy, the
//!     syntax report and the scope trace, and returns the failure instead of hiding it.
//!
//!     Every call is independent: its own parser, scope stack and output. A `Tokenizer` can
//!     be shared between threads.

use crate::canon::error::CanonError;
use crate::canon::language::Language;
use crate::canon::parsing::{ParseOptions, SourceFile, Strategy, SyntaxReport};
use crate::canon::scope::ScopeTrace;
use crate::canon::transforms::standard::{tokenize_pipeline, TokenizeTransform, TOKENIZE};
use crate::canon::walker::WalkOptions;
use serde::Serialize;
use tracing::{debug, trace};

/// Options for parsing and walking
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TokenizerOptions {
    pub parsing: ParseOptions,
    pub walk: WalkOptions,
}

/// Canonical tokens of one source text, with how they were obtained
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tokenized {
    pub language: Language,
    pub tokens: Vec<String>,
    pub strategy: Strategy,
    pub report: SyntaxReport,
    pub trace: ScopeTrace,
}

/// Canonicalize `source` with default options.
///
/// Returns an empty vector when neither parse strategy yields an acceptable tree.
pub fn tokenize(language: Language, source: &str) -> Vec<String> {
    tokens_or_empty(TOKENIZE.run(SourceFile::new(language, source)))
}

/// A tokenizer with fixed options
pub struct Tokenizer {
    options: TokenizerOptions,
    pipeline: TokenizeTransform,
}

impl Tokenizer {
    pub fn new(options: TokenizerOptions) -> Self {
        Tokenizer {
            options,
            pipeline: tokenize_pipeline(options),
        }
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Canonical tokens of `source`, empty when it cannot be parsed.
    pub fn tokenize(&self, language: Language, source: &str) -> Vec<String> {
        tokens_or_empty(self.tokenize_with_report(language, source))
    }

    /// Canonical tokens of `source` together with the strategy, syntax report and scope trace.
    pub fn tokenize_with_report(
        &self,
        language: Language,
        source: &str,
    ) -> Result<Tokenized, CanonError> {
        let tokenized = self.pipeline.run(SourceFile::new(language, source))?;
        trace!(
            %language,
            strategy = %tokenized.strategy,
            tokens = tokenized.tokens.len(),
            scopes = tokenized.trace.opened,
            "tokenized"
        );
        Ok(tokenized)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer::new(TokenizerOptions::default())
    }
}

fn tokens_or_empty(result: Result<Tokenized, CanonError>) -> Vec<String> {
    match result {
        Ok(tokenized) => tokenized.tokens,
        Err(err) => {
            debug!(reason = %err, "source could not be tokenized");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::adapters::ScopeBoundaries;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_tokenizer_is_send_and_sync() {
        assert_send_sync::<Tokenizer>();
    }

    #[test]
    fn test_tokenize_primary_contract() {
        assert_eq!(
            tokenize(Language::Python, "x = 5\n"),
            vec!["VARIABLE", "=", "FLOAT_LITERAL"]
        );
        assert!(tokenize(Language::Go, "}}}} {{{{ )))) ((((").is_empty());
    }

    #[test]
    fn test_report_carries_strategy_and_trace() {
        let tokenizer = Tokenizer::default();
        let tokenized = tokenizer
            .tokenize_with_report(Language::Python, "def f(a):\n    return a\n")
            .unwrap();
        assert_eq!(tokenized.strategy, Strategy::Fast);
        assert_eq!(tokenized.trace.opened, 1);
        assert!(tokenized.trace.is_balanced());
    }

    #[test]
    fn test_report_returns_the_failure() {
        let err = Tokenizer::default()
            .tokenize_with_report(Language::CSharp, "}}}} {{{{ )))) ((((")
            .unwrap_err();
        assert!(matches!(err, CanonError::Parse(_)));
    }

    #[test]
    fn test_options_reach_the_walk() {
        let tokenizer = Tokenizer::new(TokenizerOptions {
            walk: WalkOptions {
                boundaries: ScopeBoundaries::Structural,
                distinguish_numbers: true,
            },
            ..TokenizerOptions::default()
        });
        assert_eq!(
            tokenizer.tokenize(Language::Python, "x = 5\n"),
            vec!["VARIABLE", "=", "INT_LITERAL"]
        );
        assert_eq!(
            tokenizer.options().walk.boundaries,
            ScopeBoundaries::Structural
        );
    }
}
