//! Output formats
//!
//! Turns tokenization results into the text printed by `codecanon tokenize`. Results are
//! rendered in input order whatever order they were computed in.

use codecanon_config::OutputFormat;
use codecanon_parser::{CanonError, Language, Tokenized};
use serde_json::json;

/// One source text read by the CLI
#[derive(Debug, Clone)]
pub struct Input {
    /// Path as given on the command line, `-` for standard input
    pub label: String,
    pub language: Language,
    pub source: String,
}

pub struct FileResult {
    pub input: Input,
    pub result: Result<Tokenized, CanonError>,
}

impl FileResult {
    fn tokens(&self) -> &[String] {
        match &self.result {
            Ok(tokenized) => &tokenized.tokens,
            Err(_) => &[],
        }
    }
}

/// Render every result in `format`. `report` only affects JSON output.
pub fn render(
    results: &[FileResult],
    format: OutputFormat,
    report: bool,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => render_json(results, report),
        OutputFormat::Lines => Ok(render_lines(results)),
        OutputFormat::Text => Ok(render_text(results)),
    }
}

/// One JSON object per line
fn render_json(results: &[FileResult], report: bool) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    for file in results {
        let mut value = json!({
            "path": file.input.label,
            "language": file.input.language.name(),
            "tokens": file.tokens(),
        });
        if report {
            let (strategy, error) = match &file.result {
                Ok(tokenized) => (Some(tokenized.strategy.to_string()), None),
                Err(err) => (None, Some(err.to_string())),
            };
            value["strategy"] = json!(strategy);
            value["error"] = json!(error);
        }
        out.push_str(&serde_json::to_string(&value)?);
        out.push('\n');
    }
    Ok(out)
}

/// One token per line, a blank line between files
fn render_lines(results: &[FileResult]) -> String {
    results
        .iter()
        .map(|file| {
            file.tokens()
                .iter()
                .map(|token| format!("{}\n", token))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Space separated tokens, one file per line
fn render_text(results: &[FileResult]) -> String {
    results
        .iter()
        .map(|file| format!("{}\n", file.tokens().join(" ")))
        .collect()
}
