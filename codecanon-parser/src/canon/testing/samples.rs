//! Curated sample loader
//!
//! Samples are found relative to this crate: `samples/<language name>/<name>.<extension>`,
//! where the extension is the first one listed for the language.

use crate::canon::error::CanonError;
use crate::canon::language::Language;
use crate::canon::tokenizer::{Tokenized, Tokenizer};
use std::fs;
use std::path::PathBuf;

const SAMPLES_ROOT: &str = "samples";

/// Entry point for loading samples
pub struct Samples;

impl Samples {
    pub fn load(language: Language, name: &str) -> SampleLoader {
        SampleLoader {
            language,
            name: name.to_string(),
        }
    }

    pub fn cpp(name: &str) -> SampleLoader {
        Samples::load(Language::Cpp, name)
    }

    pub fn csharp(name: &str) -> SampleLoader {
        Samples::load(Language::CSharp, name)
    }

    pub fn go(name: &str) -> SampleLoader {
        Samples::load(Language::Go, name)
    }

    pub fn python(name: &str) -> SampleLoader {
        Samples::load(Language::Python, name)
    }

    /// Directory holding the samples of `language`
    pub fn dir(language: Language) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join(SAMPLES_ROOT)
            .join(language.name())
    }

    /// Every sample of `language`, sorted by name
    pub fn all(language: Language) -> Vec<SampleLoader> {
        let dir = Samples::dir(language);
        let entries = fs::read_dir(&dir)
            .unwrap_or_else(|e| panic!("Failed to list {}: {}", dir.display(), e));
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| Language::from_path(path) == Some(language))
            .filter_map(|path| Some(path.file_stem()?.to_str()?.to_string()))
            .collect();
        names.sort();
        names
            .iter()
            .map(|name| Samples::load(language, name))
            .collect()
    }
}

/// Fluent loader for one sample
#[derive(Debug, Clone)]
pub struct SampleLoader {
    language: Language,
    name: String,
}

impl SampleLoader {
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> PathBuf {
        let extension = self.language.extensions()[0];
        Samples::dir(self.language).join(format!("{}.{}", self.name, extension))
    }

    /// Get the raw source string
    pub fn source(&self) -> String {
        let path = self.path();
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Tokenize with default options
    pub fn tokenize(&self) -> Vec<String> {
        crate::canon::tokenizer::tokenize(self.language, &self.source())
    }

    pub fn tokenize_with(&self, tokenizer: &Tokenizer) -> Vec<String> {
        tokenizer.tokenize(self.language, &self.source())
    }

    pub fn report_with(&self, tokenizer: &Tokenizer) -> Result<Tokenized, CanonError> {
        tokenizer.tokenize_with_report(self.language, &self.source())
    }

    /// Report with default options
    pub fn report(&self) -> Result<Tokenized, CanonError> {
        self.report_with(&Tokenizer::default())
    }
}
