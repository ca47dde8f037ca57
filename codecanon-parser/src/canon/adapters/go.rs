//! Go rules
//!
//!     In legacy mode every `{` opens and every `}` closes a scope, including the braces of
//!     struct types and composite literals. Parameters are declared before the body brace, so
//!     they land in the enclosing scope. Structural mode scopes them to their function.
//!
//!     Integer, imaginary and rune literals all become `INT_LITERAL`.

use super::{collect_field, AdapterRules, DeclarationRule, CURLY_BRACES};
use crate::canon::language::Language;
use crate::canon::literals::{LiteralRule, Placeholder};
use tree_sitter::Node;

const NAMES: &[&str] = &["identifier", "field_identifier"];

pub static RULES: AdapterRules = AdapterRules {
    language: Language::Go,
    literals: &[
        ("interpreted_string_literal", LiteralRule::Fixed(Placeholder::StringLiteral)),
        ("raw_string_literal", LiteralRule::Fixed(Placeholder::StringLiteral)),
        ("int_literal", LiteralRule::Fixed(Placeholder::IntLiteral)),
        ("imaginary_literal", LiteralRule::Fixed(Placeholder::IntLiteral)),
        ("rune_literal", LiteralRule::Fixed(Placeholder::IntLiteral)),
        ("float_literal", LiteralRule::Fixed(Placeholder::FloatLiteral)),
        ("true", LiteralRule::Fixed(Placeholder::BoolLiteral)),
        ("false", LiteralRule::Fixed(Placeholder::BoolLiteral)),
    ],
    identifiers: NAMES,
    skipped: &["comment"],
    scopes: &[
        "function_declaration",
        "method_declaration",
        "func_literal",
        "block",
        "for_statement",
        "if_statement",
        "expression_switch_statement",
        "type_switch_statement",
        "select_statement",
        "expression_case",
        "type_case",
        "communication_case",
        "default_case",
        "field_declaration_list",
    ],
    braces: Some(CURLY_BRACES),
    declarations: &[
        DeclarationRule {
            kind: "const_spec",
            names: named,
        },
        DeclarationRule {
            kind: "var_spec",
            names: named,
        },
        DeclarationRule {
            kind: "field_declaration",
            names: named,
        },
        DeclarationRule {
            kind: "parameter_declaration",
            names: named,
        },
        DeclarationRule {
            kind: "variadic_parameter_declaration",
            names: named,
        },
        DeclarationRule {
            kind: "short_var_declaration",
            names: left_hand_side,
        },
        DeclarationRule {
            kind: "range_clause",
            names: left_hand_side,
        },
        DeclarationRule {
            kind: "receive_statement",
            names: left_hand_side,
        },
        DeclarationRule {
            kind: "type_switch_statement",
            names: switch_alias,
        },
    ],
};

/// Every `name` field: `var a, b int`, `func(x, y int)`, `struct { p, q T }`
fn named<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    collect_field(node, "name", NAMES, source, out);
}

/// `a, b := ...`, `for i, v := range xs`, `case v := <-ch`
fn left_hand_side<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    collect_field(node, "left", &["identifier"], source, out);
}

/// `switch v := x.(type)`
fn switch_alias<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    collect_field(node, "alias", &["identifier"], source, out);
}
