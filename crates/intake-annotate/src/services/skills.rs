//! Skill matching against a configured vocabulary.

use std::collections::HashSet;

/// Known skill terms, matched case-insensitively as substrings.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: Vec<String>,
}

impl SkillVocabulary {
    pub fn new(terms: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let terms = terms
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
            .collect();
        Self { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Matching terms in vocabulary order.
    pub fn matches<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let haystack = text.to_lowercase();
        self.terms
            .iter()
            .filter(|term| haystack.contains(&term.to_lowercase()))
            .map(String::as_str)
            .collect()
    }

    /// Matching terms joined with ", ".
    pub fn extract(&self, text: &str) -> String {
        self.matches(text).join(", ")
    }
}
