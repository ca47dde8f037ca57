//! Python rules
//!
//!     Python has no declaration keyword, so every assignment target counts as a declaration.
//!     Re-assigning a name is harmless (re-declaring is a no-op) but it means "variable" here
//!     is anything ever assigned, not anything truly local. Scopes follow functions, classes,
//!     lambdas, match statements and comprehensions.
//!
//!     Names resolve in document order: a name used before its assignment is kept verbatim.

use super::{collect_kinds, text, AdapterRules, DeclarationRule};
use crate::canon::language::Language;
use crate::canon::literals::{LiteralRule, Placeholder};
use tree_sitter::Node;

pub static RULES: AdapterRules = AdapterRules {
    language: Language::Python,
    literals: &[
        ("string", LiteralRule::Fixed(Placeholder::StringLiteral)),
        ("concatenated_string", LiteralRule::Fixed(Placeholder::StringLiteral)),
        (
            "integer",
            LiteralRule::Collapsible {
                collapsed: Placeholder::FloatLiteral,
                distinct: Placeholder::IntLiteral,
            },
        ),
        ("float", LiteralRule::Fixed(Placeholder::FloatLiteral)),
        ("true", LiteralRule::Fixed(Placeholder::BoolLiteral)),
        ("false", LiteralRule::Fixed(Placeholder::BoolLiteral)),
    ],
    identifiers: &["identifier"],
    skipped: &["comment", "line_continuation"],
    scopes: &[
        "function_definition",
        "class_definition",
        "lambda",
        "match_statement",
        "list_comprehension",
        "set_comprehension",
        "dictionary_comprehension",
        "generator_expression",
    ],
    braces: None,
    declarations: &[
        DeclarationRule {
            kind: "assignment",
            names: assignment_targets,
        },
        DeclarationRule {
            kind: "augmented_assignment",
            names: assignment_targets,
        },
        DeclarationRule {
            kind: "named_expression",
            names: walrus_name,
        },
        DeclarationRule {
            kind: "parameters",
            names: parameter_names,
        },
        DeclarationRule {
            kind: "lambda_parameters",
            names: parameter_names,
        },
        DeclarationRule {
            kind: "for_statement",
            names: loop_targets,
        },
        DeclarationRule {
            kind: "list_comprehension",
            names: comprehension_targets,
        },
        DeclarationRule {
            kind: "set_comprehension",
            names: comprehension_targets,
        },
        DeclarationRule {
            kind: "dictionary_comprehension",
            names: comprehension_targets,
        },
        DeclarationRule {
            kind: "generator_expression",
            names: comprehension_targets,
        },
        DeclarationRule {
            kind: "as_pattern",
            names: as_alias,
        },
        DeclarationRule {
            kind: "except_clause",
            names: except_alias,
        },
        DeclarationRule {
            kind: "case_pattern",
            names: capture_pattern,
        },
        DeclarationRule {
            kind: "keyword_pattern",
            names: keyword_capture,
        },
        DeclarationRule {
            kind: "splat_pattern",
            names: splat_capture,
        },
    ],
};

/// Names bound by an assignment-like target. An attribute target binds its last attribute
/// name; subscripts bind nothing.
fn target_names<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    match node.kind() {
        "identifier" => out.push(text(node, source)),
        "attribute" => {
            if let Some(attribute) = node.child_by_field_name("attribute") {
                out.push(text(attribute, source));
            }
        }
        "pattern_list"
        | "tuple_pattern"
        | "list_pattern"
        | "tuple"
        | "list"
        | "expression_list"
        | "parenthesized_expression"
        | "list_splat_pattern"
        | "list_splat"
        | "as_pattern_target" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                target_names(child, source, out);
            }
        }
        _ => {}
    }
}

fn assignment_targets<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    if let Some(left) = node.child_by_field_name("left") {
        target_names(left, source, out);
    }
}

fn loop_targets<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    assignment_targets(node, source, out)
}

/// The body of a comprehension comes before its `for` clauses, so their targets are declared
/// as soon as the comprehension scope opens.
fn comprehension_targets<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    let mut cursor = node.walk();
    for clause in node.named_children(&mut cursor) {
        if clause.kind() == "for_in_clause" {
            loop_targets(clause, source, out);
        }
    }
}

fn walrus_name<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    if let Some(name) = node.child_by_field_name("name") {
        target_names(name, source, out);
    }
}

fn parameter_names<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    let mut cursor = node.walk();
    for parameter in node.named_children(&mut cursor) {
        parameter_name(parameter, source, out);
    }
}

fn parameter_name<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    match node.kind() {
        "identifier" => out.push(text(node, source)),
        // `x: int`, `*args: int`: the name comes before the annotation
        "typed_parameter" => {
            let mut cursor = node.walk();
            let first = node.named_children(&mut cursor).next();
            if let Some(name) = first {
                parameter_name(name, source, out);
            }
        }
        "default_parameter" | "typed_default_parameter" => {
            if let Some(name) = node.child_by_field_name("name") {
                collect_kinds(name, &["identifier"], source, out);
            }
        }
        "list_splat_pattern" | "dictionary_splat_pattern" | "tuple_pattern" => {
            collect_kinds(node, &["identifier"], source, out);
        }
        _ => {}
    }
}

/// `with open(p) as f`, `case [x] as pair`
fn as_alias<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    if let Some(alias) = node.child_by_field_name("alias") {
        target_names(alias, source, out);
    }
}

/// `except E as e` in grammars that do not wrap the alias in an `as_pattern`.
fn except_alias<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    let mut cursor = node.walk();
    let mut after_as = false;
    for child in node.children(&mut cursor) {
        if after_as && child.is_named() {
            target_names(child, source, out);
            return;
        }
        after_as = !child.is_named() && child.kind() == "as";
    }
}

/// A bare name (`dotted_name` of one identifier), as opposed to a value pattern like
/// `Color.RED`.
fn bare_capture<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    if node.kind() != "dotted_name" {
        return;
    }
    let mut cursor = node.walk();
    let parts: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    if let [name] = parts.as_slice() {
        if name.kind() == "identifier" {
            out.push(text(*name, source));
        }
    }
}

fn capture_pattern<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    if let [only] = children.as_slice() {
        bare_capture(*only, source, out);
    }
}

/// `Point(x=px)` binds `px`
fn keyword_capture<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    if let [_, .., value] = children.as_slice() {
        bare_capture(*value, source, out);
    }
}

fn splat_capture<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    collect_kinds(node, &["identifier"], source, out);
}
