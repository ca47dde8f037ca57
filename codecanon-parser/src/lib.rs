//! # codecanon
//!
//! Canonicalizing tokenizer for C++, C#, Go and Python source.
//!
//! Literals become `STRING_LITERAL`, `INT_LITERAL`, `FLOAT_LITERAL` or `BOOL_LITERAL`,
//! identifiers declared in an enclosing scope become `VARIABLE`, and every other token is
//! kept verbatim. Comments are dropped. Two snippets that differ only in literal values and
//! local names produce the same sequence.
//!
//! ```rust,ignore
//! use codecanon_parser::{tokenize, Language};
//!
//! assert_eq!(
//!     tokenize(Language::Cpp, "int x = 3;"),
//!     ["int", "VARIABLE", "=", "INT_LITERAL", ";"]
//! );
//! ```
//!
//! File Layout
//!
//!     src/canon
//!       ├── language      Supported languages, aliases, extensions, grammars
//!       ├── literals      Placeholders and literal rules
//!       ├── scope         The scope stack
//!       ├── adapters      Per-language rules, one submodule per language
//!       ├── walker        The generic tree walk
//!       ├── parsing       The two-tier parse driver
//!       ├── transforms    Composable stages and the standard pipelines
//!       ├── tokenizer     The public facade
//!       └── testing       Token assertions and curated samples
//!
//! For testing guidelines, see the [testing module](canon::testing).

pub mod canon;

pub use canon::error::{CanonError, RecoverableParseError, UnrecoverableParseError};
pub use canon::language::{Language, UnknownLanguage};
pub use canon::literals::Placeholder;
pub use canon::parsing::{ParseOptions, Strategy, SyntaxReport};
pub use canon::scope::ScopeTrace;
pub use canon::adapters::ScopeBoundaries;
pub use canon::tokenizer::{tokenize, Tokenized, Tokenizer, TokenizerOptions};
pub use canon::walker::WalkOptions;
