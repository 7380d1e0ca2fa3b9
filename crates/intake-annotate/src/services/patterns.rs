//! Pattern recognizers for contact details and the candidate name.

use std::sync::LazyLock;

use regex::Regex;

use intake::models::join_sorted_unique;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+").expect("email pattern should compile")
});

// Runs of digits with common separators. Never spans a line break.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\d[\d\- ()]{6,}\d").expect("phone pattern should compile")
});

// Anchored at the start only: trailing digits (a grade, a page number) on the
// same line still make it a year range.
static YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:19|20)\d{2}-(?:19|20)\d{2}").expect("year range pattern should compile")
});

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("iso date pattern should compile")
});

static NAME_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:full\s+)?name\s*[:\-]\s*").expect("name label pattern should compile")
});

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Words that mark a line as a section heading rather than a name.
const HEADING_WORDS: &[&str] = &[
    "resume",
    "curriculum",
    "vitae",
    "profile",
    "summary",
    "experience",
    "education",
    "skills",
    "objective",
    "contact",
    "references",
    "projects",
    "certifications",
    "work",
    "professional",
    "personal",
    "details",
    "information",
    "career",
];

/// All distinct emails, lower-cased, sorted, and joined with ", ".
pub fn extract_emails(text: &str) -> String {
    join_sorted_unique(EMAIL.find_iter(text).map(|m| m.as_str().to_lowercase()))
}

/// All distinct phone numbers, sorted and joined with ", ".
pub fn extract_phones(text: &str) -> String {
    join_sorted_unique(
        text.lines()
            .flat_map(|line| PHONE.find_iter(line))
            .map(|m| m.as_str().trim())
            .filter(|candidate| is_phone(candidate))
            .map(str::to_string),
    )
}

fn is_phone(candidate: &str) -> bool {
    let digits = candidate.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return false;
    }
    let compact: String = candidate
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
        .collect();
    !YEAR_RANGE.is_match(&compact) && !ISO_DATE.is_match(&compact)
}

/// First line among the leading `scan_lines` that reads like a person's name.
pub fn guess_name<'a>(lines: impl IntoIterator<Item = &'a str>, scan_lines: usize) -> String {
    lines
        .into_iter()
        .take(scan_lines)
        .map(|line| NAME_LABEL.replace(line.trim(), "").trim().to_string())
        .find(|line| looks_like_name(line))
        .unwrap_or_default()
}

/// Two to four capitalized words with no digits, '@', or heading words.
pub fn looks_like_name(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if !(2..=4).contains(&words.len()) {
        return false;
    }
    if line.chars().any(|c| c.is_ascii_digit() || c == '@') {
        return false;
    }
    if !words
        .iter()
        .all(|w| w.chars().next().is_some_and(char::is_uppercase))
    {
        return false;
    }
    !words.iter().any(|w| {
        let lowered = w
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        HEADING_WORDS.contains(&lowered.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emails_sorted_and_deduplicated() {
        let text = "Contact: b@x.com or A@X.com\nalt a@x.com";
        assert_eq!(extract_emails(text), "a@x.com, b@x.com");
        assert_eq!(extract_emails("no contact here"), "");
    }

    #[test]
    fn test_email_with_subdomain_and_plus() {
        assert_eq!(
            extract_emails("jane.doe+jobs@mail.example.co.uk"),
            "jane.doe+jobs@mail.example.co.uk"
        );
    }

    #[test]
    fn test_year_range_with_trailing_number_is_not_a_phone() {
        assert_eq!(extract_phones("B.Sc 2012 - 2016 78%"), "");
        assert_eq!(extract_phones("Acme 1998-2004 12"), "");
        assert_eq!(extract_phones("Mobile 555 123 4567"), "555 123 4567");
    }

    #[test]
    fn test_phones() {
        let text = "Phone: +1 (555) 123-4567\nAlt: 555-987-6543";
        assert_eq!(extract_phones(text), "+1 (555) 123-4567, 555-987-6543");
    }

    #[test]
    fn test_phone_rejects_year_ranges_and_dates() {
        assert_eq!(extract_phones("Acme 2018 - 2021"), "");
        assert_eq!(extract_phones("(2015-2019) Globex"), "");
        assert_eq!(extract_phones("Joined 2019-04-01"), "");
    }

    #[test]
    fn test_phone_does_not_span_lines() {
        assert_eq!(extract_phones("Ref 1234\n5678 street"), "");
    }

    #[test]
    fn test_phone_digit_bounds() {
        assert_eq!(extract_phones("id 123 456"), "");
        assert_eq!(extract_phones("acct 1234567890123456789"), "");
    }

    #[test]
    fn test_guess_name_skips_headings() {
        let lines = ["CURRICULUM VITAE", "Jane Doe", "jane@x.com"];
        assert_eq!(guess_name(lines, 10), "Jane Doe");
    }

    #[test]
    fn test_guess_name_strips_label() {
        let lines = ["Name: John Q Public", "Phone 555 123 4567"];
        assert_eq!(guess_name(lines, 10), "John Q Public");
    }

    #[test]
    fn test_guess_name_respects_scan_window() {
        let lines = ["Professional Summary", "Jane Doe"];
        assert_eq!(guess_name(lines, 1), "");
        assert_eq!(guess_name(lines, 2), "Jane Doe");
    }

    #[test]
    fn test_looks_like_name() {
        assert!(looks_like_name("Mary Jane Watson"));
        assert!(!looks_like_name("Jane"));
        assert!(!looks_like_name("Jane Doe 2020"));
        assert!(!looks_like_name("jane doe"));
        assert!(!looks_like_name("Work Experience"));
        assert!(!looks_like_name("One Two Three Four Five"));
    }
}
