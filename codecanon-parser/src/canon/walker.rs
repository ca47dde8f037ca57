//! Tree walker
//!
//!     One traversal serves every language. Nodes are visited in document order with a tree
//!     cursor (no recursion, so deeply nested input cannot exhaust the stack). On entry a node
//!     is checked, in this order:
//!
//!         1. Skipped kinds (comments, preprocessor lines) emit nothing.
//!         2. A literal kind emits its placeholder and its children are not visited.
//!         3. An identifier kind emits `VARIABLE` when the name is declared in any active
//!            scope, its own text otherwise.
//!         4. A rule-based scope kind pushes a scope.
//!         5. A declaring kind adds its names to the innermost scope.
//!         6. A leaf emits its text. In brace mode, the open delimiter pushes and the close
//!            delimiter pops, both after the brace itself is emitted.
//!
//!     Leaving a rule-based scope node pops its scope. Internal nodes emit nothing of their
//!     own. Nodes inserted by error recovery and leaves made only of whitespace (Go's newline
//!     statement terminators) are dropped.

use crate::canon::adapters::{Boundary, LanguageAdapter, ScopeBoundaries};
use crate::canon::literals::{CanonToken, Placeholder};
use crate::canon::scope::{ScopeStack, ScopeTrace};
use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Tree};

/// Knobs that change which tokens a walk produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WalkOptions {
    pub boundaries: ScopeBoundaries,
    /// Map Python integers to `INT_LITERAL` rather than `FLOAT_LITERAL`.
    pub distinguish_numbers: bool,
}

/// Result of walking one tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walked<'src> {
    pub tokens: Vec<CanonToken<'src>>,
    pub trace: ScopeTrace,
}

impl Walked<'_> {
    pub fn to_strings(&self) -> Vec<String> {
        self.tokens.iter().map(|token| token.to_string()).collect()
    }
}

enum Visit {
    Children,
    Skip,
}

/// Walk `tree`, parsed from `source`, with the rules of `adapter`.
pub fn walk<'src>(
    tree: &Tree,
    source: &'src str,
    adapter: &LanguageAdapter,
    options: WalkOptions,
) -> Walked<'src> {
    let mut walker = Walker {
        adapter,
        boundary: adapter.boundary(options.boundaries),
        distinguish_numbers: options.distinguish_numbers,
        source,
        scopes: ScopeStack::new(),
        tokens: Vec::new(),
    };
    walker.run(tree);
    Walked {
        tokens: walker.tokens,
        trace: walker.scopes.trace(),
    }
}

struct Walker<'a, 'src> {
    adapter: &'a LanguageAdapter,
    boundary: Boundary<'a>,
    distinguish_numbers: bool,
    source: &'src str,
    scopes: ScopeStack<'src>,
    tokens: Vec<CanonToken<'src>>,
}

impl<'a, 'src> Walker<'a, 'src> {
    fn run(&mut self, tree: &Tree) {
        let mut cursor = tree.walk();
        'nodes: loop {
            let node = cursor.node();
            if let Visit::Children = self.enter(node) {
                if cursor.goto_first_child() {
                    continue;
                }
                self.exit(node);
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'nodes;
                }
                if !cursor.goto_parent() {
                    break 'nodes;
                }
                self.exit(cursor.node());
            }
        }
    }

    fn enter(&mut self, node: Node<'_>) -> Visit {
        let kind = node.kind();
        if node.is_missing() || self.adapter.is_skipped(kind) {
            return Visit::Skip;
        }

        if node.is_named() {
            if let Some(rule) = self.adapter.literal_rule(kind) {
                let placeholder = rule.resolve(self.text(node), self.distinguish_numbers);
                self.tokens.push(CanonToken::Placeholder(placeholder));
                return Visit::Skip;
            }
            if self.adapter.is_identifier(kind) {
                let name = self.text(node);
                self.emit_identifier(name);
                return Visit::Skip;
            }
        }

        if self.opens_rule_scope(node) {
            self.scopes.push();
        }
        for name in self.adapter.declared_names(node, self.source) {
            self.scopes.declare(name);
        }

        if node.child_count() == 0 {
            self.emit_leaf(node);
        }
        Visit::Children
    }

    fn exit(&mut self, node: Node<'_>) {
        if self.opens_rule_scope(node) {
            self.scopes.pop();
        }
    }

    fn opens_rule_scope(&self, node: Node<'_>) -> bool {
        match self.boundary {
            Boundary::Rules(kinds) => kinds.contains(node.kind()),
            Boundary::Braces(_) => false,
        }
    }

    fn emit_identifier(&mut self, name: &'src str) {
        if name.is_empty() {
            return;
        }
        if self.scopes.is_declared(name) {
            self.tokens.push(CanonToken::Placeholder(Placeholder::Variable));
        } else {
            self.tokens.push(CanonToken::Verbatim(name));
        }
    }

    fn emit_leaf(&mut self, node: Node<'_>) {
        let text = self.text(node);
        if text.trim().is_empty() {
            return;
        }
        self.tokens.push(CanonToken::Verbatim(text));

        if let Boundary::Braces(braces) = self.boundary {
            if node.is_named() {
                return;
            }
            if text == braces.open {
                self.scopes.push();
            } else if text == braces.close {
                self.scopes.pop();
            }
        }
    }

    fn text(&self, node: Node<'_>) -> &'src str {
        self.source.get(node.byte_range()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::adapters::adapter;
    use crate::canon::language::Language;

    fn parse(language: Language, source: &str) -> Tree {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&language.grammar()).unwrap();
        parser.parse(source, None).unwrap()
    }

    fn walk_strings(language: Language, source: &str, options: WalkOptions) -> Vec<String> {
        let tree = parse(language, source);
        walk(&tree, source, adapter(language), options).to_strings()
    }

    #[test]
    fn test_literal_subtree_is_replaced_once() {
        let tokens = walk_strings(
            Language::Python,
            "s = f\"{a} and {b}\"\n",
            WalkOptions::default(),
        );
        assert_eq!(tokens, vec!["VARIABLE", "=", "STRING_LITERAL"]);
    }

    #[test]
    fn test_comments_are_dropped() {
        let tokens = walk_strings(
            Language::Cpp,
            "// leading\nint x = 1; /* trailing */\n",
            WalkOptions::default(),
        );
        assert_eq!(tokens, vec!["int", "VARIABLE", "=", "INT_LITERAL", ";"]);
    }

    #[test]
    fn test_rule_scopes_are_balanced() {
        let source = "def f(a):\n    def g(b):\n        return a + b\n    return g\n";
        let tree = parse(Language::Python, source);
        let walked = walk(
            &tree,
            source,
            adapter(Language::Python),
            WalkOptions::default(),
        );
        assert!(walked.trace.is_balanced());
        assert_eq!(walked.trace.opened, 2);
        assert_eq!(walked.trace.max_depth, 3);
    }

    #[test]
    fn test_brace_scopes_count_every_brace() {
        let source = "package main\nfunc f() { if true { } }\n";
        let tree = parse(Language::Go, source);
        let walked = walk(&tree, source, adapter(Language::Go), WalkOptions::default());
        assert_eq!(walked.trace.opened, 2);
        assert!(walked.trace.is_balanced());
    }

    #[test]
    fn test_distinguish_numbers_only_affects_python_integers() {
        let options = WalkOptions {
            distinguish_numbers: true,
            ..WalkOptions::default()
        };
        let tokens = walk_strings(Language::Python, "x = 1 + 2.5\n", options);
        assert_eq!(
            tokens,
            vec!["VARIABLE", "=", "INT_LITERAL", "+", "FLOAT_LITERAL"]
        );
    }
}
