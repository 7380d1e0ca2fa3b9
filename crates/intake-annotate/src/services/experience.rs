//! Experience-duration inference from resume text.
//!
//! Resumes state experience in many ways. In order of precedence:
//! 1. an explicit total ("Total experience: 5 years")
//! 2. loose durations ("3+ years", "2 yrs"), largest wins
//! 3. employment date ranges ("Jan 2018 - Present"), longest wins

use std::sync::LazyLock;

use chrono::{Datelike, Local};
use regex::Regex;

use intake::models::{DurationCandidate, DurationSource};

static TOTAL_EXPERIENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:total\s+)?experience[:\s]*(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)\b")
        .expect("total experience pattern should compile")
});

static SIMPLE_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*\+?\s*(?:-\s*years?|years?|yrs?)\b")
        .expect("duration pattern should compile")
});

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?,?\s+";

static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let side = format!(r"(?:{month}|\d{{1,2}}/)?", month = MONTH);
    Regex::new(&format!(
        r"(?i)\b{side}((?:19|20)\d{{2}})\s*(?:-|–|—|\bto\b)\s*{side}((?:19|20)\d{{2}}|present|current|now)\b",
        side = side
    ))
    .expect("date range pattern should compile")
});

/// Infers years of experience from free text.
#[derive(Debug, Clone, Copy)]
pub struct ExperienceInferencer {
    current_year: i32,
}

impl Default for ExperienceInferencer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceInferencer {
    pub fn new() -> Self {
        Self {
            current_year: Local::now().year(),
        }
    }

    /// Fix the year that "present" resolves to.
    pub fn with_current_year(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Normalized duration, e.g. "5 years"; empty when nothing is found.
    pub fn infer(&self, text: &str) -> String {
        self.infer_candidate(text)
            .map(|c| c.display())
            .unwrap_or_default()
    }

    pub fn infer_candidate(&self, text: &str) -> Option<DurationCandidate> {
        if let Some(years) = TOTAL_EXPERIENCE
            .captures(text)
            .and_then(|c| c[1].parse::<f64>().ok())
        {
            return Some(DurationCandidate::new(years, DurationSource::ExplicitTotal));
        }

        if let Some(years) = max_of(
            SIMPLE_DURATION
                .captures_iter(text)
                .filter_map(|c| c[1].parse::<f64>().ok()),
        ) {
            return Some(DurationCandidate::new(years, DurationSource::ExplicitSimple));
        }

        max_of(DATE_RANGE.captures_iter(text).filter_map(|c| {
            let start: i32 = c[1].parse().ok()?;
            let end = self.resolve_end(&c[2])?;
            let span = end - start;
            (span >= 0).then_some(span as f64)
        }))
        .map(|years| DurationCandidate::new(years, DurationSource::DateRange))
    }

    fn resolve_end(&self, token: &str) -> Option<i32> {
        match token.to_lowercase().as_str() {
            "present" | "current" | "now" => Some(self.current_year),
            year => year.parse().ok(),
        }
    }
}

fn max_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.fold(None, |best, v| match best {
        Some(b) if b >= v => Some(b),
        _ => Some(v),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inferencer() -> ExperienceInferencer {
        ExperienceInferencer::with_current_year(2025)
    }

    #[test]
    fn test_explicit_total_wins() {
        let inf = inferencer();
        assert_eq!(inf.infer("Total experience: 5 years"), "5 years");
        assert_eq!(
            inf.infer("Total Experience 7.5 yrs\nIntern 2010 - 2011, 12 years of Linux"),
            "7.5 years"
        );
        let candidate = inf.infer_candidate("Experience: 4 years").unwrap();
        assert_eq!(candidate.source, DurationSource::ExplicitTotal);
    }

    #[test]
    fn test_simple_durations_take_the_maximum() {
        let inf = inferencer();
        assert_eq!(inf.infer("3 years experience, 1 year internship"), "3 years");
        assert_eq!(inf.infer("2 yrs at Acme and 4+ years at Globex"), "4 years");
        assert_eq!(inf.infer("led a 5-year migration"), "5 years");
        assert_eq!(
            inf.infer_candidate("1.5 years").unwrap().source,
            DurationSource::ExplicitSimple
        );
    }

    #[test]
    fn test_date_range_to_present() {
        let inf = inferencer();
        assert_eq!(inf.infer("Acme Corp 2018 - present"), "7 years");
        assert_eq!(inf.infer("Acme Corp Jan 2018 – Current"), "7 years");
        assert_eq!(
            inf.infer_candidate("2018 to now").unwrap().source,
            DurationSource::DateRange
        );
    }

    #[test]
    fn test_date_ranges_take_the_longest_and_drop_negatives() {
        let inf = inferencer();
        let text = "Globex March 2012 — June 2015\nAcme 2016-2017\nTypo 2020 - 2010";
        assert_eq!(inf.infer(text), "3 years");
        assert_eq!(inf.infer("03/2019 - 05/2023"), "4 years");
        assert_eq!(inf.infer("Typo 2020 - 2010"), "");
    }

    #[test]
    fn test_nothing_found() {
        let inf = inferencer();
        assert_eq!(inf.infer("Jane Doe\njane@x.com"), "");
        assert!(inf.infer_candidate("").is_none());
    }
}
