//! Canonical placeholders and literal rules
//!
//!     Literal values never reach the output. Each adapter maps the node kinds of its grammar
//!     to a [`LiteralRule`], and the rule decides which of the four literal placeholders
//!     replaces the whole literal (including any children, such as the pieces of an
//!     interpolated string).
//!
//!     Languages are free to collapse distinctions other languages keep. Python maps every
//!     number to `FLOAT_LITERAL` unless numbers are explicitly distinguished, and C++ has a
//!     single `number_literal` kind whose placeholder is decided from the literal text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

/// One of the five fixed output tokens replacing a literal value or a scoped variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    StringLiteral,
    IntLiteral,
    FloatLiteral,
    BoolLiteral,
    Variable,
}

impl Placeholder {
    pub const ALL: [Placeholder; 5] = [
        Placeholder::StringLiteral,
        Placeholder::IntLiteral,
        Placeholder::FloatLiteral,
        Placeholder::BoolLiteral,
        Placeholder::Variable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Placeholder::StringLiteral => "STRING_LITERAL",
            Placeholder::IntLiteral => "INT_LITERAL",
            Placeholder::FloatLiteral => "FLOAT_LITERAL",
            Placeholder::BoolLiteral => "BOOL_LITERAL",
            Placeholder::Variable => "VARIABLE",
        }
    }

    /// True for the four literal placeholders.
    pub fn is_literal(self) -> bool {
        !matches!(self, Placeholder::Variable)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single output token: a placeholder or a verbatim slice of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonToken<'src> {
    Placeholder(Placeholder),
    Verbatim(&'src str),
}

impl<'src> CanonToken<'src> {
    pub fn as_str(&self) -> &'src str {
        match self {
            CanonToken::Placeholder(placeholder) => placeholder.as_str(),
            CanonToken::Verbatim(text) => text,
        }
    }
}

impl fmt::Display for CanonToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CanonToken<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// How a literal node kind turns into a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralRule {
    /// Always the same placeholder.
    Fixed(Placeholder),
    /// A number whose kind does not say whether it is integral; decided from the text.
    Numeric,
    /// `collapsed` by default, `distinct` when numbers are distinguished.
    Collapsible {
        collapsed: Placeholder,
        distinct: Placeholder,
    },
}

impl LiteralRule {
    pub fn resolve(self, text: &str, distinguish_numbers: bool) -> Placeholder {
        match self {
            LiteralRule::Fixed(placeholder) => placeholder,
            LiteralRule::Numeric => classify_number(text),
            LiteralRule::Collapsible { collapsed, distinct } => {
                if distinguish_numbers {
                    distinct
                } else {
                    collapsed
                }
            }
        }
    }
}

// Hex floats need a binary exponent; decimal floats need a point or an exponent.
static FLOATING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:0[xX][0-9a-fA-F']*(?:\.[0-9a-fA-F']*)?[pP]|[0-9']*\.|[0-9']+[eE])")
        .expect("floating number pattern is valid")
});

/// Classify the text of a numeric literal as integral or floating point.
pub fn classify_number(text: &str) -> Placeholder {
    if FLOATING_NUMBER.is_match(text) {
        Placeholder::FloatLiteral
    } else {
        Placeholder::IntLiteral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_number() {
        for text in ["0", "42", "42u", "0x1F", "0XE", "0b1011", "10'000", "077", "1ULL"] {
            assert_eq!(classify_number(text), Placeholder::IntLiteral, "{}", text);
        }
        for text in ["3.0", ".5", "1.", "1e10", "2E-3", "3.14f", "0x1p3", "0x1.8P1"] {
            assert_eq!(classify_number(text), Placeholder::FloatLiteral, "{}", text);
        }
    }

    #[test]
    fn test_collapsible_rule() {
        let rule = LiteralRule::Collapsible {
            collapsed: Placeholder::FloatLiteral,
            distinct: Placeholder::IntLiteral,
        };
        assert_eq!(rule.resolve("5", false), Placeholder::FloatLiteral);
        assert_eq!(rule.resolve("5", true), Placeholder::IntLiteral);
    }

    #[test]
    fn test_token_serializes_as_plain_string() {
        let tokens = [
            CanonToken::Verbatim("int"),
            CanonToken::Placeholder(Placeholder::Variable),
        ];
        assert_eq!(
            serde_json::to_string(&tokens).unwrap(),
            r#"["int","VARIABLE"]"#
        );
    }

    #[test]
    fn test_only_variable_is_not_a_literal() {
        let literals: Vec<_> = Placeholder::ALL.iter().filter(|p| p.is_literal()).collect();
        assert_eq!(literals.len(), 4);
    }
}
