//! Parse driver
//!
//!     Obtains a syntax tree in at most two attempts with a fresh `tree_sitter::Parser`:
//!
//!         1. Fast: parse within `fast_timeout`. Any error or missing node in the result, or
//!            running out of time, rejects the attempt.
//!         2. Forgiving: judge the fast tree again under looser acceptance rules. When the fast
//!            attempt timed out there is no tree, so the parser is reset and the source parsed
//!            once more within `forgiving_timeout`.
//!
//!     The forgiving attempt accepts a tree whose root is not an error node, with at most
//!     `max_error_nodes` error and missing nodes together, and with at most `max_error_ratio`
//!     of the source bytes covered by error nodes. Damage must also be followed by more source:
//!     an error or missing node with nothing but whitespace after it marks truncated input,
//!     whose repair would invent the end of the file. Anything else is unrecoverable.
//!
//!     A zero budget means the attempt is unbounded.

use crate::canon::error::{RecoverableParseError, UnrecoverableParseError};
use crate::canon::language::Language;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

/// Limits applied by the two parse attempts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions {
    pub fast_timeout: Duration,
    pub forgiving_timeout: Duration,
    pub max_error_nodes: usize,
    pub max_error_ratio: f64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            fast_timeout: Duration::from_millis(250),
            forgiving_timeout: Duration::from_millis(5000),
            max_error_nodes: 32,
            max_error_ratio: 0.25,
        }
    }
}

/// Which attempt produced the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Fast,
    Forgiving,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Fast => write!(f, "fast"),
            Strategy::Forgiving => write!(f, "forgiving"),
        }
    }
}

/// Zero-based row and column of a node start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

/// Error statistics of a parsed tree
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyntaxReport {
    pub error_nodes: usize,
    pub missing_nodes: usize,
    /// Bytes covered by outermost error nodes.
    pub error_bytes: usize,
    pub source_bytes: usize,
    pub first_error: Option<Position>,
    pub root_is_error: bool,
    /// An error or missing node is followed by whitespace only.
    pub truncated: bool,
}

impl SyntaxReport {
    /// Collect the statistics of `tree`, parsed from `source`.
    pub fn of(tree: &tree_sitter::Tree, source: &str) -> Self {
        let root = tree.root_node();
        let mut report = SyntaxReport {
            source_bytes: source.len(),
            root_is_error: root.is_error(),
            ..SyntaxReport::default()
        };
        if !root.has_error() {
            return report;
        }

        // Subtrees without errors are never entered
        let mut cursor = tree.walk();
        'nodes: loop {
            if report.record(cursor.node(), source) && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'nodes;
                }
                if !cursor.goto_parent() {
                    break 'nodes;
                }
            }
        }
        report
    }

    /// Count `node`, returning whether its children still need a look.
    fn record(&mut self, node: tree_sitter::Node<'_>, source: &str) -> bool {
        if node.is_missing() {
            self.missing_nodes += 1;
        } else if node.is_error() {
            self.error_nodes += 1;
            self.error_bytes += node.byte_range().len();
        } else {
            return node.has_error();
        }
        self.note_damage(node, source);
        false
    }

    fn note_damage(&mut self, node: tree_sitter::Node<'_>, source: &str) {
        let rest = source.get(node.end_byte()..).unwrap_or("");
        if rest.trim().is_empty() {
            self.truncated = true;
        }
        if self.first_error.is_none() {
            let point = node.start_position();
            self.first_error = Some(Position {
                row: point.row,
                column: point.column,
            });
        }
    }

    pub fn has_errors(&self) -> bool {
        self.root_is_error || self.error_nodes + self.missing_nodes > 0
    }

    /// Share of the source covered by error nodes, in `0.0..=1.0`.
    pub fn error_ratio(&self) -> f64 {
        if self.source_bytes == 0 {
            return 0.0;
        }
        (self.error_bytes as f64 / self.source_bytes as f64).min(1.0)
    }
}

impl fmt::Display for SyntaxReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error nodes, {} missing nodes, {} of {} bytes in errors",
            self.error_nodes, self.missing_nodes, self.error_bytes, self.source_bytes
        )?;
        if self.truncated {
            write!(f, ", input ends inside a construct")?;
        }
        if let Some(position) = self.first_error {
            write!(
                f,
                ", first at line {} column {}",
                position.row + 1,
                position.column + 1
            )?;
        }
        Ok(())
    }
}

/// Source text waiting to be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub language: Language,
    pub source: String,
}

impl SourceFile {
    pub fn new(language: Language, source: impl Into<String>) -> Self {
        SourceFile {
            language,
            source: source.into(),
        }
    }
}

/// A tree accepted by one of the two attempts, together with the text it was parsed from
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub language: Language,
    pub source: String,
    pub tree: tree_sitter::Tree,
    pub strategy: Strategy,
    pub report: SyntaxReport,
}

/// Two-tier parse driver
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseDriver {
    options: ParseOptions,
}

impl ParseDriver {
    pub fn new(options: ParseOptions) -> Self {
        ParseDriver { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `source` as `language`.
    ///
    /// A failed fast attempt always leads to the forgiving one, so only the forgiving
    /// attempt's failure is returned.
    #[instrument(level = "debug", skip_all, fields(language = %language))]
    pub fn parse(
        &self,
        language: Language,
        source: impl Into<String>,
    ) -> Result<ParsedSource, UnrecoverableParseError> {
        let source = source.into();
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&language.grammar())
            .map_err(|err| UnrecoverableParseError::Grammar(err.to_string()))?;

        let rejected = match self.attempt_fast(&mut parser, &source) {
            Ok((tree, report)) => {
                return Ok(ParsedSource {
                    language,
                    source,
                    tree,
                    strategy: Strategy::Fast,
                    report,
                })
            }
            Err(rejected) => rejected,
        };
        debug!(reason = %rejected, "fast parse rejected, retrying with forgiving strategy");

        match self.attempt_forgiving(&mut parser, &source, rejected) {
            Ok((tree, report)) => Ok(ParsedSource {
                language,
                source,
                tree,
                strategy: Strategy::Forgiving,
                report,
            }),
            Err(err) => {
                debug!(reason = %err, "forgiving parse failed");
                Err(err)
            }
        }
    }

    fn attempt_fast(
        &self,
        parser: &mut tree_sitter::Parser,
        source: &str,
    ) -> Result<(tree_sitter::Tree, SyntaxReport), RecoverableParseError> {
        let budget = self.options.fast_timeout;
        parser.set_timeout_micros(micros(budget));
        let tree = parser
            .parse(source, None)
            .ok_or(RecoverableParseError::TimedOut { budget })?;
        let report = SyntaxReport::of(&tree, source);
        if report.has_errors() {
            return Err(RecoverableParseError::SyntaxErrors { report, tree });
        }
        Ok((tree, report))
    }

    fn attempt_forgiving(
        &self,
        parser: &mut tree_sitter::Parser,
        source: &str,
        rejected: RecoverableParseError,
    ) -> Result<(tree_sitter::Tree, SyntaxReport), UnrecoverableParseError> {
        let (tree, report) = match rejected {
            RecoverableParseError::SyntaxErrors { report, tree } => (tree, report),
            RecoverableParseError::TimedOut { .. } => {
                let budget = self.options.forgiving_timeout;
                // A timed out parser resumes its previous parse unless reset
                parser.reset();
                parser.set_timeout_micros(micros(budget));
                let tree = parser
                    .parse(source, None)
                    .ok_or(UnrecoverableParseError::TimedOut { budget })?;
                let report = SyntaxReport::of(&tree, source);
                (tree, report)
            }
        };
        if self.tolerates(&report) {
            Ok((tree, report))
        } else {
            Err(UnrecoverableParseError::TooManyErrors(report))
        }
    }

    fn tolerates(&self, report: &SyntaxReport) -> bool {
        !report.root_is_error
            && !report.truncated
            && report.error_nodes + report.missing_nodes <= self.options.max_error_nodes
            && report.error_ratio() <= self.options.max_error_ratio
    }
}

fn micros(budget: Duration) -> u64 {
    u64::try_from(budget.as_micros()).unwrap_or(u64::MAX)
}
