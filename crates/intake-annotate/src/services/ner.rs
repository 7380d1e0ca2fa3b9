//! Named entity recognition tuned for resumes.
//!
//! Provides a `NerBackend` trait for pluggable recognizers and a built-in
//! `PatternNerBackend` that finds person names and employer organizations
//! with pattern matching. Entities come back in document order.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single recognized entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Person,
    Organization,
}

/// Trait for pluggable NER backends.
///
/// Statistical models can implement this and be handed to the NER-assisted
/// field extractor in place of the pattern backend.
pub trait NerBackend: Send + Sync {
    /// Short backend identifier (e.g. "pattern").
    fn backend_id(&self) -> &str;

    /// Recognize entities in `text`, in the order they appear.
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

static LABELLED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?i:(?:full[ \t]+)?name)[ \t]*[:\-][ \t]*([A-Z][A-Za-z.'\-]*(?:[ \t]+[A-Z][A-Za-z.'\-]*){1,3})",
    )
    .expect("labelled name pattern should compile")
});

static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:Mr|Mrs|Ms|Miss|Dr|Prof)\.?[ \t]+([A-Z][a-z]+(?:[ \t]+[A-Z]\.?)?(?:[ \t]+[A-Z][a-z]+){1,2})",
    )
    .expect("title pattern should compile")
});

static CAPITALIZED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-z]+(?:[ \t]+[A-Z]\.?)?(?:[ \t]+[A-Z][a-z]+){1,2})\b")
        .expect("capitalized name pattern should compile")
});

static ORGANIZATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b((?:[A-Z][\w&'\-]*[ \t]+){1,4}(?:Inc|LLC|Ltd|Corp|Corporation|Company|Technologies|Solutions|Systems|Labs|Group|University|College|Institute)\b\.?)",
    )
    .expect("organization pattern should compile")
});

/// Capitalized words common in resumes that are never part of a name.
static NAME_STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "resume", "curriculum", "vitae", "profile", "summary", "experience", "education",
        "skills", "objective", "contact", "references", "projects", "certifications", "work",
        "professional", "personal", "details", "information", "career", "senior", "junior",
        "lead", "principal", "staff", "engineer", "engineering", "developer", "manager",
        "analyst", "consultant", "intern", "architect", "scientist", "designer", "software",
        "data", "bachelor", "master", "science", "arts", "university", "college", "institute",
        "school", "street", "road", "avenue", "present", "current", "january", "february",
        "march", "april", "june", "july", "august", "september", "october", "november",
        "december", "inc", "corp", "corporation", "company", "technologies", "solutions",
        "systems", "labs", "group", "phone", "email", "mobile", "address", "languages",
    ]
    .into_iter()
    .collect()
});

/// Pattern-based backend for resume text.
pub struct PatternNerBackend;

impl PatternNerBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PatternNerBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl NerBackend for PatternNerBackend {
    fn backend_id(&self) -> &str {
        "pattern"
    }

    fn recognize(&self, text: &str) -> Vec<Entity> {
        let organizations: Vec<(Range<usize>, String)> = ORGANIZATION
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .map(|m| (m.range(), m.as_str().trim().to_string()))
            .collect();

        let mut found: Vec<(usize, Entity)> = organizations
            .iter()
            .map(|(span, org)| (span.start, entity(org, EntityLabel::Organization)))
            .collect();

        let persons = [&*LABELLED_NAME, &*TITLE_PATTERN, &*CAPITALIZED_NAME]
            .into_iter()
            .flat_map(|pattern| pattern.captures_iter(text).filter_map(|cap| cap.get(1)));
        for m in persons {
            let name = m.as_str().trim();
            let inside_org = organizations
                .iter()
                .any(|(span, _)| span.start <= m.start() && m.end() <= span.end);
            if !inside_org && is_plausible_name(name) && !has_stopword(name) {
                found.push((m.start(), entity(name, EntityLabel::Person)));
            }
        }

        found.sort_by_key(|(start, _)| *start);

        let mut seen = HashSet::new();
        found
            .into_iter()
            .map(|(_, e)| e)
            .filter(|e| seen.insert((e.label, e.text.clone())))
            .collect()
    }
}

fn entity(text: &str, label: EntityLabel) -> Entity {
    Entity {
        text: text.to_string(),
        label,
    }
}

fn is_plausible_name(name: &str) -> bool {
    let parts: Vec<&str> = name.split_whitespace().collect();
    if parts.len() < 2 || parts.len() > 4 {
        return false;
    }
    parts
        .iter()
        .all(|p| p.chars().next().is_some_and(char::is_uppercase))
}

fn has_stopword(name: &str) -> bool {
    name.split_whitespace().any(|word| {
        let word = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
        NAME_STOPWORDS.contains(word.as_str())
    })
}
