//! Supported source languages
//!
//!     A [`Language`] names one of the four grammars the engine understands. It knows its
//!     canonical name, the aliases accepted on the command line and in configuration files, the
//!     file extensions used to detect it, and how to obtain its tree-sitter grammar.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A language with a grammar and an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(alias = "c++")]
    Cpp,
    #[serde(alias = "c#", alias = "cs")]
    CSharp,
    #[serde(alias = "golang")]
    Go,
    #[serde(alias = "python3", alias = "py", alias = "py3")]
    Python,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Cpp,
        Language::CSharp,
        Language::Go,
        Language::Python,
    ];

    /// Canonical lowercase name, as accepted by [`FromStr`] and serde.
    pub fn name(self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Python => "python",
        }
    }

    /// Every spelling [`FromStr`] accepts, canonical name first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Language::Cpp => &["cpp", "c++"],
            Language::CSharp => &["csharp", "c#", "cs"],
            Language::Go => &["go", "golang"],
            Language::Python => &["python", "python3", "py", "py3"],
        }
    }

    /// File extensions, without the dot. Matching is case sensitive (`.C` is C++).
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Language::Cpp => &["cpp", "hpp", "cxx", "hxx", "cc", "hh", "C", "H", "c", "h"],
            Language::CSharp => &["cs"],
            Language::Go => &["go"],
            Language::Python => &["py", "py3"],
        }
    }

    pub fn from_extension(extension: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|language| language.extensions().contains(&extension))
    }

    /// Detect the language of a file from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Language> {
        let extension = path.as_ref().extension()?.to_str()?;
        Language::from_extension(extension)
    }

    /// The tree-sitter grammar for this language.
    pub fn grammar(self) -> tree_sitter::Language {
        match self {
            Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Language::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display = match self {
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Python => "Python",
        };
        write!(f, "{}", display)
    }
}

/// Error returned when a language name matches no alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown language: {} (expected one of cpp, csharp, go, python)",
            self.0
        )
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|language| language.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_aliases_case_insensitively() {
        assert_eq!("Python3".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("golang".parse::<Language>().unwrap(), Language::Go);
        assert_eq!("C#".parse::<Language>().unwrap(), Language::CSharp);
        assert_eq!("c++".parse::<Language>().unwrap(), Language::Cpp);
        assert!("kotlin".parse::<Language>().is_err());
    }

    #[test]
    fn test_detects_from_path() {
        assert_eq!(Language::from_path("src/main.go"), Some(Language::Go));
        assert_eq!(Language::from_path("lib/util.hxx"), Some(Language::Cpp));
        assert_eq!(Language::from_path("Widget.C"), Some(Language::Cpp));
        assert_eq!(Language::from_path("script.py3"), Some(Language::Python));
        assert_eq!(Language::from_path("Program.cs"), Some(Language::CSharp));
        assert_eq!(Language::from_path("README"), None);
        assert_eq!(Language::from_path("notes.txt"), None);
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        for language in Language::ALL {
            assert_eq!(language.name().parse::<Language>().unwrap(), language);
        }
    }

    #[test]
    fn test_serde_accepts_aliases() {
        let parsed: Language = serde_json::from_str("\"c#\"").unwrap();
        assert_eq!(parsed, Language::CSharp);
        assert_eq!(serde_json::to_string(&Language::Cpp).unwrap(), "\"cpp\"");
    }

    #[test]
    fn test_grammars_load() {
        let supported =
            tree_sitter::MIN_COMPATIBLE_LANGUAGE_VERSION..=tree_sitter::LANGUAGE_VERSION;
        for language in Language::ALL {
            let grammar = language.grammar();
            assert!(
                supported.contains(&grammar.version()),
                "{} grammar has ABI {}, runtime supports {:?}",
                language,
                grammar.version(),
                supported
            );
            let mut parser = tree_sitter::Parser::new();
            assert!(parser.set_language(&grammar).is_ok(), "{}", language);
        }
    }
}
