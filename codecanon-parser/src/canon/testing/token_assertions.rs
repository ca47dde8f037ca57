//! Fluent assertion API for token sequences

use crate::canon::literals::Placeholder;

/// Create an assertion builder for a token sequence
pub fn assert_tokens<S: AsRef<str>>(tokens: &[S]) -> TokenAssertion<'_, S> {
    TokenAssertion {
        tokens,
        context: "tokens".to_string(),
    }
}

pub struct TokenAssertion<'a, S> {
    tokens: &'a [S],
    context: String,
}

impl<'a, S: AsRef<str>> TokenAssertion<'a, S> {
    /// Label used in failure messages
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    fn strings(&self) -> Vec<&str> {
        self.tokens.iter().map(AsRef::as_ref).collect()
    }

    pub fn is_empty(self) -> Self {
        assert!(
            self.tokens.is_empty(),
            "{}: expected no tokens, found {:?}",
            self.context,
            self.strings()
        );
        self
    }

    pub fn not_empty(self) -> Self {
        assert!(
            !self.tokens.is_empty(),
            "{}: expected tokens, found none",
            self.context
        );
        self
    }

    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.tokens.len(),
            expected,
            "{}: expected {} tokens, found {:?}",
            self.context,
            expected,
            self.strings()
        );
        self
    }

    pub fn equals(self, expected: &[&str]) -> Self {
        assert_eq!(self.strings(), expected, "{}", self.context);
        self
    }

    pub fn starts_with(self, expected: &[&str]) -> Self {
        let tokens = self.strings();
        assert!(
            tokens.starts_with(expected),
            "{}: expected prefix {:?}, found {:?}",
            self.context,
            expected,
            tokens
        );
        self
    }

    /// `expected` appears as a contiguous run somewhere in the sequence
    pub fn contains_sequence(self, expected: &[&str]) -> Self {
        let tokens = self.strings();
        let found = expected.is_empty()
            || tokens
                .windows(expected.len())
                .any(|window| window == expected);
        assert!(
            found,
            "{}: expected run {:?} in {:?}",
            self.context, expected, tokens
        );
        self
    }

    pub fn never_contains(self, token: &str) -> Self {
        let tokens = self.strings();
        assert!(
            !tokens.contains(&token),
            "{}: did not expect {:?} in {:?}",
            self.context,
            token,
            tokens
        );
        self
    }

    pub fn occurrences(self, token: &str, expected: usize) -> Self {
        let tokens = self.strings();
        let found = tokens.iter().filter(|t| **t == token).count();
        assert_eq!(
            found, expected,
            "{}: expected {} x {:?} in {:?}",
            self.context, expected, token, tokens
        );
        self
    }

    pub fn placeholder_count(self, placeholder: Placeholder, expected: usize) -> Self {
        self.occurrences(placeholder.as_str(), expected)
    }

    /// Every `open` is matched by a later `close`, and none is left open
    pub fn balanced(self, open: &str, close: &str) -> Self {
        let mut depth = 0usize;
        for token in self.strings() {
            if token == open {
                depth += 1;
            } else if token == close {
                assert!(
                    depth > 0,
                    "{}: unmatched {:?}",
                    self.context,
                    close
                );
                depth -= 1;
            }
        }
        assert_eq!(depth, 0, "{}: {} unclosed {:?}", self.context, depth, open);
        self
    }

    /// No token is empty or contains whitespace
    pub fn well_formed(self) -> Self {
        for token in self.strings() {
            assert!(!token.is_empty(), "{}: empty token", self.context);
            assert!(
                !token.chars().any(char::is_whitespace),
                "{}: token {:?} contains whitespace",
                self.context,
                token
            );
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluent_chain() {
        let tokens = vec!["{", "VARIABLE", ":=", "INT_LITERAL", "}"];
        assert_tokens(&tokens)
            .not_empty()
            .count(5)
            .starts_with(&["{"])
            .contains_sequence(&["VARIABLE", ":=", "INT_LITERAL"])
            .never_contains("x")
            .placeholder_count(Placeholder::Variable, 1)
            .balanced("{", "}")
            .well_formed();
    }

    #[test]
    #[should_panic(expected = "main: unmatched \"}\"")]
    fn test_unbalanced_close_fails() {
        let tokens = vec!["}".to_string()];
        assert_tokens(&tokens).context("main").balanced("{", "}");
    }

    #[test]
    #[should_panic(expected = "expected run")]
    fn test_missing_sequence_fails() {
        assert_tokens(&["a", "b"]).contains_sequence(&["b", "a"]);
    }
}
