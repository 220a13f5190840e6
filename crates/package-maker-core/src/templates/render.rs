//! Literal placeholder substitution
//!
//! Stubs contain fixed tokens such as `{PACKAGE_NAME}`. Every token is replaced
//! in one simultaneous pass: text inserted by a replacement is never scanned
//! again, so a description containing `{NAME}` stays as typed.
//!
//! Re-rendering an already rendered text with the same tokens is only a no-op
//! when no replacement value itself contains a placeholder.

use regex::Regex;

/// Ordered placeholder -> replacement pairs
///
/// When two placeholders could match at the same position, the one inserted
/// first wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    pairs: Vec<(String, String)>,
}

impl Tokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token; re-adding a placeholder replaces its value but keeps its position
    pub fn with(mut self, placeholder: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.insert(placeholder, replacement);
        self
    }

    pub fn insert(&mut self, placeholder: impl Into<String>, replacement: impl Into<String>) {
        let placeholder = placeholder.into();
        let replacement = replacement.into();

        if placeholder.is_empty() {
            return;
        }

        match self.pairs.iter_mut().find(|(p, _)| *p == placeholder) {
            Some(pair) => pair.1 = replacement,
            None => self.pairs.push((placeholder, replacement)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    fn replacement_for(&self, placeholder: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(p, _)| p == placeholder)
            .map(|(_, r)| r.as_str())
    }

    /// One alternation of every placeholder, in insertion order
    fn pattern(&self) -> Result<Regex, regex::Error> {
        let alternation = self
            .pairs
            .iter()
            .map(|(placeholder, _)| regex::escape(placeholder))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternation)
    }
}

/// Replace every placeholder occurrence in `template`
///
/// Unknown placeholders are left verbatim.
pub fn render(template: &str, tokens: &Tokens) -> String {
    if tokens.is_empty() {
        return template.to_string();
    }

    let pattern = match tokens.pattern() {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::warn!(error = %e, "placeholder pattern rejected, leaving stub unrendered");
            return template.to_string();
        }
    };

    pattern
        .replace_all(template, |caps: &regex::Captures| {
            let matched = &caps[0];
            tokens.replacement_for(matched).unwrap_or(matched).to_string()
        })
        .into_owned()
}
