//! Testing utilities for token assertions
//!
//!     Canonical output is only as trustworthy as the inputs it was checked against. A made
//!     up snippet that does not actually parse silently exercises the forgiving strategy (or
//!     the empty result) instead of the rules under test. Tests therefore follow two rules:
//!
//!         1. Prefer curated sample files (via [`Samples`]) over inline source strings
//!         2. Check output with the fluent token assertions (via [`assert_tokens`])
//!
//! Rule 1: Curated Samples
//!
//!     Sample files live under `codecanon-parser/samples/<language>/<name>.<ext>`. Every sample
//!     parses cleanly with its grammar, so a test loading one knows it is testing the walk and
//!     not error recovery:
//!
//!     ```rust,ignore
//!     use codecanon_parser::canon::testing::Samples;
//!
//!     let source = Samples::python("scopes").source();
//!     let tokens = Samples::go("literals").tokenize();
//!     ```
//!
//!     Short inline strings are fine for the one-line cases that document a single rule.
//!
//! Rule 2: Fluent Assertions
//!
//!     Asserting whole token vectors is brittle and hides intent. The fluent API states what
//!     matters:
//!
//!     ```rust,ignore
//!     use codecanon_parser::canon::testing::assert_tokens;
//!
//!     assert_tokens(&tokens)
//!         .not_empty()
//!         .contains_sequence(&["VARIABLE", ":=", "INT_LITERAL"])
//!         .never_contains("x")
//!         .balanced("{", "}");
//!     ```

mod samples;
mod token_assertions;

pub use samples::{SampleLoader, Samples};
pub use token_assertions::{assert_tokens, TokenAssertion};
