//! Standard transform definitions
//!
//! The default pipeline, defined as a static using `once_cell::sync::Lazy`.

use crate::canon::parsing::SourceFile;
use crate::canon::tokenizer::{Tokenized, TokenizerOptions};
use crate::canon::transforms::stages::{ParseStage, WalkStage};
use crate::canon::transforms::Transform;
use once_cell::sync::Lazy;

/// Type alias for the full tokenization transform
pub type TokenizeTransform = Transform<SourceFile, Tokenized>;

/// Tokenize transform: SourceFile → Tokenized
///
/// Parse followed by the canonicalizing walk, both with default options.
///
/// ```rust,ignore
/// let tokenized = TOKENIZE.run(SourceFile::new(Language::Python, "x = 5\n"))?;
/// assert_eq!(tokenized.tokens, ["VARIABLE", "=", "FLOAT_LITERAL"]);
/// ```
pub static TOKENIZE: Lazy<TokenizeTransform> =
    Lazy::new(|| tokenize_pipeline(TokenizerOptions::default()));

/// Build a tokenize transform with non-default options.
pub fn tokenize_pipeline(options: TokenizerOptions) -> TokenizeTransform {
    Transform::from_fn(Ok)
        .then(ParseStage::new(options.parsing))
        .then(WalkStage::new(options.walk))
}
