//! End-to-end canonicalization scenarios
//!
//! One short snippet per rule, run through the public `tokenize` entry point.

use codecanon_parser::canon::testing::assert_tokens;
use codecanon_parser::{tokenize, Language};
use rstest::rstest;

#[rstest]
#[case::python_assignment(Language::Python, "x = 5", &["VARIABLE", "=", "FLOAT_LITERAL"])]
#[case::cpp_declaration(
    Language::Cpp,
    "int x = 3;",
    &["int", "VARIABLE", "=", "INT_LITERAL", ";"]
)]
#[case::csharp_boolean(
    Language::CSharp,
    "bool b = true;",
    &["bool", "VARIABLE", "=", "BOOL_LITERAL", ";"]
)]
#[case::python_string(Language::Python, "s = 'hi'\n", &["VARIABLE", "=", "STRING_LITERAL"])]
#[case::cpp_float(
    Language::Cpp,
    "double d = 2.5;",
    &["double", "VARIABLE", "=", "FLOAT_LITERAL", ";"]
)]
#[case::python_typed_parameters(
    Language::Python,
    "def f(x: int, *rest: str):\n    return x, rest\n",
    &[
        "def", "f", "(", "VARIABLE", ":", "int", ",", "*", "VARIABLE", ":", "str", ")", ":",
        "return", "VARIABLE", ",", "VARIABLE",
    ]
)]
#[case::csharp_anonymous_member(
    Language::CSharp,
    "var a = new { Name = 1 };",
    &["var", "VARIABLE", "=", "new", "{", "VARIABLE", "=", "INT_LITERAL", "}", ";"]
)]
fn test_single_statement(
    #[case] language: Language,
    #[case] source: &str,
    #[case] expected: &[&str],
) {
    let tokens = tokenize(language, source);
    assert_tokens(&tokens).context(source).equals(expected);
}

#[test]
fn test_go_function_body() {
    let tokens = tokenize(
        Language::Go,
        "package main\nfunc f() int { x := 3; return x }",
    );
    let body_start = tokens
        .iter()
        .position(|token| token == "{")
        .expect("function body brace");

    assert_tokens(&tokens)
        .starts_with(&["package", "main", "func", "f", "(", ")", "int"])
        .balanced("{", "}");
    assert_tokens(&tokens[body_start..]).equals(&[
        "{",
        "VARIABLE",
        ":=",
        "INT_LITERAL",
        ";",
        "return",
        "VARIABLE",
        "}",
    ]);
}

#[rstest]
#[case::cpp(Language::Cpp)]
#[case::csharp(Language::CSharp)]
#[case::go(Language::Go)]
#[case::python(Language::Python)]
fn test_garbled_input_yields_nothing(#[case] language: Language) {
    let tokens = tokenize(language, "))))(((( ]]]] }}}} {{{{ ;;;; ))))");
    assert_tokens(&tokens).context(language.to_string()).is_empty();
}

#[rstest]
#[case::cpp(Language::Cpp, "int main() { int x = 3;")]
#[case::csharp(Language::CSharp, "class C { void M() { int x = 3;")]
#[case::go(Language::Go, "package main\nfunc f() { x := 3")]
#[case::python(Language::Python, "def f(a):\n    return (a +")]
fn test_truncated_input_yields_nothing(#[case] language: Language, #[case] source: &str) {
    assert_tokens(&tokenize(language, source))
        .context(source)
        .is_empty();
}

#[rstest]
#[case::cpp(Language::Cpp)]
#[case::csharp(Language::CSharp)]
#[case::go(Language::Go)]
#[case::python(Language::Python)]
fn test_empty_input_yields_nothing(#[case] language: Language) {
    assert_tokens(&tokenize(language, "")).is_empty();
    assert_tokens(&tokenize(language, "   \n\n")).is_empty();
}

#[test]
fn test_undeclared_names_stay_verbatim() {
    let tokens = tokenize(Language::Python, "print(len(items))\n");
    assert_tokens(&tokens).equals(&["print", "(", "len", "(", "items", ")", ")"]);
}

#[test]
fn test_declared_names_become_variables_after_declaration() {
    let tokens = tokenize(Language::Python, "print(a)\na = 1\nprint(a)\n");
    assert_tokens(&tokens).equals(&[
        "print",
        "(",
        "a",
        ")",
        "VARIABLE",
        "=",
        "FLOAT_LITERAL",
        "print",
        "(",
        "VARIABLE",
        ")",
    ]);
}

#[test]
fn test_names_do_not_leak_out_of_their_scope() {
    let source = "def f():\n    local = 1\n    return local\n\nprint(local)\n";
    let tokens = tokenize(Language::Python, source);
    assert_tokens(&tokens)
        .contains_sequence(&["return", "VARIABLE"])
        .contains_sequence(&["print", "(", "local", ")"]);
}

#[test]
fn test_comments_never_reach_the_output() {
    let cases = [
        (Language::Cpp, "// note\nint a = 1; /* block */"),
        (Language::CSharp, "// note\nint a = 1; /* block */"),
        (Language::Go, "package main // note\n/* block */"),
        (Language::Python, "# note\na = 1  # trailing\n"),
    ];
    for (language, source) in cases {
        let tokens = tokenize(language, source);
        assert_tokens(&tokens).context(source).not_empty().well_formed();
        for token in &tokens {
            assert!(!token.contains("note"), "{}: {:?}", language, tokens);
            assert!(!token.contains("block"), "{}: {:?}", language, tokens);
        }
    }
}
