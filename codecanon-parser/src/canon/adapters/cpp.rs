//! C++ rules
//!
//!     A declaration with a decl-specifier introduces the name at the bottom of each of its
//!     declarators (`int *p = 0, &r = x;` declares `p` and `r`). Function declarators are not
//!     followed, so prototypes and function definitions do not turn function names into
//!     variables. Member fields are not declared.
//!
//!     The grammar has a single `number_literal` kind, so integral and floating point numbers
//!     are told apart by their text.

use super::{collect_kinds, text, AdapterRules, DeclarationRule};
use crate::canon::language::Language;
use crate::canon::literals::{LiteralRule, Placeholder};
use tree_sitter::Node;

pub static RULES: AdapterRules = AdapterRules {
    language: Language::Cpp,
    literals: &[
        ("string_literal", LiteralRule::Fixed(Placeholder::StringLiteral)),
        ("raw_string_literal", LiteralRule::Fixed(Placeholder::StringLiteral)),
        ("concatenated_string", LiteralRule::Fixed(Placeholder::StringLiteral)),
        ("char_literal", LiteralRule::Fixed(Placeholder::StringLiteral)),
        ("number_literal", LiteralRule::Numeric),
        ("true", LiteralRule::Fixed(Placeholder::BoolLiteral)),
        ("false", LiteralRule::Fixed(Placeholder::BoolLiteral)),
    ],
    identifiers: &["identifier"],
    skipped: &[
        "comment",
        "preproc_include",
        "preproc_def",
        "preproc_function_def",
        "preproc_call",
    ],
    scopes: &[
        "compound_statement",
        "function_definition",
        "lambda_expression",
        "for_statement",
        "for_range_loop",
        "catch_clause",
    ],
    braces: None,
    declarations: &[
        DeclarationRule {
            kind: "declaration",
            names: declarators,
        },
        DeclarationRule {
            kind: "parameter_declaration",
            names: declarators,
        },
        DeclarationRule {
            kind: "optional_parameter_declaration",
            names: declarators,
        },
        DeclarationRule {
            kind: "for_range_loop",
            names: declarators,
        },
    ],
};

fn declarators<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    let mut cursor = node.walk();
    for declarator in node.children_by_field_name("declarator", &mut cursor) {
        declarator_name(declarator, source, out);
    }
}

fn declarator_name<'s>(node: Node<'_>, source: &'s str, out: &mut Vec<&'s str>) {
    match node.kind() {
        "identifier" => out.push(text(node, source)),
        "structured_binding_declarator" => collect_kinds(node, &["identifier"], source, out),
        "init_declarator"
        | "pointer_declarator"
        | "reference_declarator"
        | "array_declarator"
        | "parenthesized_declarator"
        | "attributed_declarator" => match node.child_by_field_name("declarator") {
            Some(inner) => declarator_name(inner, source, out),
            // `&x` has no field for the inner declarator
            None => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    declarator_name(child, source, out);
                }
            }
        },
        _ => {}
    }
}
