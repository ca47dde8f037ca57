//! Error types for parsing and canonicalization
//!
//!     A [`RecoverableParseError`] only ever travels from the fast attempt to the forgiving
//!     attempt of the parse driver. An [`UnrecoverableParseError`] means both attempts are
//!     exhausted; the primary API turns it into an empty token sequence, the report API hands
//!     it to the caller.

use crate::canon::parsing::SyntaxReport;
use std::fmt;
use std::time::Duration;

/// Why the fast attempt rejected the input
#[derive(Debug, Clone)]
pub enum RecoverableParseError {
    /// The parse finished but the tree contains errors. The tree is kept so the forgiving
    /// attempt can judge it without parsing again.
    SyntaxErrors {
        report: SyntaxReport,
        tree: tree_sitter::Tree,
    },
    /// The fast budget ran out before the parse finished.
    TimedOut { budget: Duration },
}

impl fmt::Display for RecoverableParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoverableParseError::SyntaxErrors { report, .. } => {
                write!(f, "syntax errors: {}", report)
            }
            RecoverableParseError::TimedOut { budget } => {
                write!(f, "fast parse exceeded {}ms", budget.as_millis())
            }
        }
    }
}

impl std::error::Error for RecoverableParseError {}

/// Both parse strategies failed
#[derive(Debug, Clone, PartialEq)]
pub enum UnrecoverableParseError {
    /// The forgiving attempt produced a tree, but with more damage than it tolerates.
    TooManyErrors(SyntaxReport),
    /// The forgiving budget ran out before the parse finished.
    TimedOut { budget: Duration },
    /// The grammar could not be loaded into the parser.
    Grammar(String),
}

impl fmt::Display for UnrecoverableParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnrecoverableParseError::TooManyErrors(report) => {
                write!(f, "too many syntax errors: {}", report)
            }
            UnrecoverableParseError::TimedOut { budget } => {
                write!(f, "forgiving parse exceeded {}ms", budget.as_millis())
            }
            UnrecoverableParseError::Grammar(message) => {
                write!(f, "grammar could not be loaded: {}", message)
            }
        }
    }
}

impl std::error::Error for UnrecoverableParseError {}

/// Error surfaced by the transform pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum CanonError {
    Parse(UnrecoverableParseError),
}

impl fmt::Display for CanonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonError::Parse(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CanonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CanonError::Parse(err) => Some(err),
        }
    }
}

impl From<UnrecoverableParseError> for CanonError {
    fn from(err: UnrecoverableParseError) -> Self {
        CanonError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UnrecoverableParseError::TimedOut {
            budget: Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "forgiving parse exceeded 1500ms");

        let rejected = RecoverableParseError::TimedOut {
            budget: Duration::from_millis(250),
        };
        assert_eq!(rejected.to_string(), "fast parse exceeded 250ms");
    }

    #[test]
    fn test_parse_error_is_the_source() {
        use std::error::Error;

        let err = CanonError::from(UnrecoverableParseError::Grammar("abi".to_string()));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "grammar could not be loaded: abi");
    }
}
