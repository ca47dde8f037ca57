//! C# rules
//!
//!     Locals, constants, fields, fixed pointers and `using` resources all reach the walker as
//!     a `variable_declarator`, so one rule covers them. Legacy mode scopes by `{` / `}`
//!     terminals; interpolated strings are replaced as a whole, so their braces never count.

use super::{
    collect_kinds, name_field, name_or_first_identifier, text, AdapterRules, DeclarationRule,
    CURLY_BRACES,
};
use crate::canon::language::Language;
use crate::canon::literals::{LiteralRule, Placeholder};
use tree_sitter::Node;

pub static RULES: AdapterRules = AdapterRules {
    language: Language::CSharp,
    literals: &[
        ("character_literal", LiteralRule::Fixed(Placeholder::StringLiteral)),
        ("string_literal", LiteralRule::Fixed(Placeholder::StringLiteral)),
        ("verbatim_string_literal", LiteralRule::Fixed(Placeholder::StringLiteral)),
        ("raw_string_literal", LiteralRule::Fixed(Placeholder::StringLiteral)),
        (
            "interpolated_string_expression",
            LiteralRule::Fixed(Placeholder::StringLiteral),
        ),
        ("integer_literal", LiteralRule::Fixed(Placeholder::IntLiteral)),
        ("real_literal", LiteralRule::Fixed(Placeholder::FloatLiteral)),
        ("boolean_literal", LiteralRule::Fixed(Placeholder::BoolLiteral)),
    ],
    identifiers: &["identifier"],
    skipped: &["comment"],
    scopes: &[
        "block",
        "declaration_list",
        "method_declaration",
        "constructor_declaration",
        "local_function_statement",
        "lambda_expression",
        "anonymous_method_expression",
        "accessor_declaration",
        "switch_section",
        "for_statement",
        "foreach_statement",
        "using_statement",
        "catch_clause",
    ],
    braces: Some(CURLY_BRACES),
    declarations: &[
        DeclarationRule {
            kind: "variable_declarator",
            names: declarator_name,
        },
        DeclarationRule {
            kind: "parameter",
            names: name_field,
        },
        DeclarationRule {
            kind: "implicit_parameter",
            names: implicit_parameter,
        },
        DeclarationRule {
            kind: "foreach_statement",
            names: loop_variable,
        },
        DeclarationRule {
            kind: "catch_declaration",
            names: name_field,
        },
        DeclarationRule {
            kind: "declaration_expression",
            names: name_field,
        },
        DeclarationRule {
            kind: "declaration_pattern",
            names: name_field,
        },
        DeclarationRule {
            kind: "anonymous_object_creation_expression",
            names: anonymous_members,
        },
    ],
};

/// `x = 1` or a deconstructing `(a, b) = t`
fn declarator_name<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    let mut cursor = node.walk();
    let tuple = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == "tuple_pattern");
    match tuple {
        Some(pattern) => collect_kinds(pattern, &["identifier"], source, out),
        None => name_or_first_identifier(node, source, out),
    }
}

/// `x => x + 1`
fn implicit_parameter<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    if node.named_child_count() == 0 {
        out.push(text(node, source));
    } else {
        collect_kinds(node, &["identifier"], source, out);
    }
}

/// `foreach (var item in items)`, `foreach (var (k, v) in pairs)`
fn loop_variable<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    if let Some(left) = node.child_by_field_name("left") {
        collect_kinds(left, &["identifier"], source, out);
    }
}

/// `new { Name = value, other.Field }` declares `Name`; a member copied from an expression
/// declares nothing.
fn anonymous_members<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    for pair in children.windows(2) {
        if let [name, equals] = pair {
            if name.kind() == "identifier" && !equals.is_named() && equals.kind() == "=" {
                out.push(text(*name, source));
            }
        }
    }
}
