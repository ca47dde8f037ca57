//! Language adapters
//!
//!     Everything language specific lives in an [`AdapterRules`] value: which node kinds are
//!     literals, which are identifiers, which constructs open a scope, and which constructs
//!     declare names (together with a function extracting those names). The walker is generic
//!     and only ever consults a [`LanguageAdapter`], the indexed form of those rules.
//!
//!     Scope boundaries come in two flavours. Rule-based boundaries push a scope when a node of
//!     a listed kind is entered and pop it when the node is left. Brace boundaries push on every
//!     `{` terminal and pop on every `}` terminal, regardless of what the braces belong to. Go
//!     and C# historically used braces; [`ScopeBoundaries::Structural`] switches them to their
//!     rule-based kinds so all four languages agree.
//!
//!     Adapters are built lazily once and shared read-only, see [`adapter`].

pub mod cpp;
pub mod csharp;
pub mod go;
pub mod python;

use crate::canon::language::Language;
use crate::canon::literals::LiteralRule;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tree_sitter::Node;

/// Appends the names a declaring node introduces.
pub type NameExtractor = for<'t, 's> fn(Node<'t>, &'s str, &mut Vec<&'s str>);

/// A node kind that introduces names into the innermost scope
#[derive(Clone, Copy)]
pub struct DeclarationRule {
    pub kind: &'static str,
    pub names: NameExtractor,
}

/// Terminals used as scope delimiters in brace mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Braces {
    pub open: &'static str,
    pub close: &'static str,
}

pub const CURLY_BRACES: Braces = Braces {
    open: "{",
    close: "}",
};

/// Declarative per-language rules
pub struct AdapterRules {
    pub language: Language,
    pub literals: &'static [(&'static str, LiteralRule)],
    pub identifiers: &'static [&'static str],
    pub skipped: &'static [&'static str],
    /// Rule-based scope kinds. For languages with `braces`, only used in structural mode.
    pub scopes: &'static [&'static str],
    pub braces: Option<Braces>,
    pub declarations: &'static [DeclarationRule],
}

/// Which boundary signal languages with brace rules use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeBoundaries {
    /// Go and C# count every `{` / `}` terminal, whatever the braces belong to.
    #[default]
    Legacy,
    /// Every language uses rule-based scope kinds.
    Structural,
}

/// The boundary signal resolved for one walk
#[derive(Debug, Clone, Copy)]
pub enum Boundary<'a> {
    Rules(&'a HashSet<&'static str>),
    Braces(Braces),
}

/// Indexed, immutable form of [`AdapterRules`]
pub struct LanguageAdapter {
    language: Language,
    literals: HashMap<&'static str, LiteralRule>,
    identifiers: HashSet<&'static str>,
    skipped: HashSet<&'static str>,
    scopes: HashSet<&'static str>,
    braces: Option<Braces>,
    declarations: HashMap<&'static str, NameExtractor>,
}

impl LanguageAdapter {
    pub fn from_rules(rules: &AdapterRules) -> Self {
        LanguageAdapter {
            language: rules.language,
            literals: rules.literals.iter().copied().collect(),
            identifiers: rules.identifiers.iter().copied().collect(),
            skipped: rules.skipped.iter().copied().collect(),
            scopes: rules.scopes.iter().copied().collect(),
            braces: rules.braces,
            declarations: rules
                .declarations
                .iter()
                .map(|rule| (rule.kind, rule.names))
                .collect(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn literal_rule(&self, kind: &str) -> Option<LiteralRule> {
        self.literals.get(kind).copied()
    }

    pub fn is_identifier(&self, kind: &str) -> bool {
        self.identifiers.contains(kind)
    }

    pub fn is_skipped(&self, kind: &str) -> bool {
        self.skipped.contains(kind)
    }

    pub fn boundary(&self, mode: ScopeBoundaries) -> Boundary<'_> {
        match (self.braces, mode) {
            (Some(braces), ScopeBoundaries::Legacy) => Boundary::Braces(braces),
            _ => Boundary::Rules(&self.scopes),
        }
    }

    /// Names introduced by `node`, empty when its kind declares nothing.
    pub fn declared_names<'s>(&self, node: Node<'_>, source: &'s str) -> Vec<&'s str> {
        let mut names = Vec::new();
        if let Some(extract) = self.declarations.get(node.kind()) {
            extract(node, source, &mut names);
        }
        names
    }
}

static CPP: Lazy<LanguageAdapter> = Lazy::new(|| LanguageAdapter::from_rules(&cpp::RULES));
static CSHARP: Lazy<LanguageAdapter> = Lazy::new(|| LanguageAdapter::from_rules(&csharp::RULES));
static GO: Lazy<LanguageAdapter> = Lazy::new(|| LanguageAdapter::from_rules(&go::RULES));
static PYTHON: Lazy<LanguageAdapter> = Lazy::new(|| LanguageAdapter::from_rules(&python::RULES));

/// The shared adapter for `language`.
pub fn adapter(language: Language) -> &'static LanguageAdapter {
    match language {
        Language::Cpp => &CPP,
        Language::CSharp => &CSHARP,
        Language::Go => &GO,
        Language::Python => &PYTHON,
    }
}

// ============================================================================
// Name extraction helpers shared by the adapters
// ============================================================================

/// Source text covered by `node`.
pub(crate) fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Push `node` if its kind is one of `kinds`, otherwise search its named children.
pub(crate) fn collect_kinds<'s>(
    node: Node<'_>,
    kinds: &[&str],
    source: &'s str,
    out: &mut Vec<&'s str>,
) {
    if kinds.contains(&node.kind()) {
        out.push(text(node, source));
        return;
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_kinds(child, kinds, source, out);
    }
}

/// [`collect_kinds`] over every child stored under `field`.
pub(crate) fn collect_field<'s>(
    node: Node<'_>,
    field: &str,
    kinds: &[&str],
    source: &'s str,
    out: &mut Vec<&'s str>,
) {
    let mut cursor = node.walk();
    for child in node.children_by_field_name(field, &mut cursor) {
        collect_kinds(child, kinds, source, out);
    }
}

/// Identifiers under the `name` field.
pub(crate) fn name_field<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    collect_field(node, "name", &["identifier"], source, out);
}

/// The `name` field if present, else the first named child of kind `identifier`.
pub(crate) fn name_or_first_identifier<'s>(
    node: Node<'_>,
    source: &'s str,
    out: &mut Vec<&'s str>,
) {
    if node.child_by_field_name("name").is_some() {
        name_field(node, source, out);
        return;
    }
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == "identifier");
    if let Some(identifier) = first {
        out.push(text(identifier, source));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapters_are_registered_per_language() {
        for language in Language::ALL {
            assert_eq!(adapter(language).language(), language);
        }
    }

    #[test]
    fn test_boundary_modes() {
        let go = adapter(Language::Go);
        assert!(matches!(
            go.boundary(ScopeBoundaries::Legacy),
            Boundary::Braces(CURLY_BRACES)
        ));
        match go.boundary(ScopeBoundaries::Structural) {
            Boundary::Rules(kinds) => assert!(kinds.contains("block")),
            Boundary::Braces(_) => panic!("structural mode must use rule-based scopes"),
        }

        // Without brace rules the mode makes no difference
        let python = adapter(Language::Python);
        for mode in [ScopeBoundaries::Legacy, ScopeBoundaries::Structural] {
            match python.boundary(mode) {
                Boundary::Rules(kinds) => assert!(kinds.contains("function_definition")),
                Boundary::Braces(_) => panic!("python has no brace boundary"),
            }
        }
    }

    #[test]
    fn test_rule_tables_have_no_duplicates() {
        for rules in [&cpp::RULES, &csharp::RULES, &go::RULES, &python::RULES] {
            let indexed = LanguageAdapter::from_rules(rules);
            assert_eq!(indexed.literals.len(), rules.literals.len());
            assert_eq!(indexed.declarations.len(), rules.declarations.len());
            assert_eq!(indexed.scopes.len(), rules.scopes.len());
        }
    }

    #[test]
    fn test_literal_kinds_are_never_identifiers() {
        for language in Language::ALL {
            let adapter = adapter(language);
            for kind in adapter.literals.keys() {
                assert!(!adapter.is_identifier(kind), "{} in {}", kind, language);
            }
        }
    }
}
