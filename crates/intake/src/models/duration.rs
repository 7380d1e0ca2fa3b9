//! Experience durations and their textual form.

use serde::Serialize;

/// Which phrasing a duration was inferred from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationSource {
    /// "Total experience: 5 years"
    ExplicitTotal,
    /// "3+ years", "2 yrs"
    ExplicitSimple,
    /// "Jan 2018 - Present"
    DateRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationCandidate {
    pub years: f64,
    pub source: DurationSource,
}

impl DurationCandidate {
    pub fn new(years: f64, source: DurationSource) -> Self {
        Self { years, source }
    }

    pub fn display(&self) -> String {
        format_years(self.years)
    }
}

/// Render a year count as "<n> years", dropping a trailing ".0".
pub fn format_years(years: f64) -> String {
    if years.fract() == 0.0 {
        format!("{} years", years as i64)
    } else {
        let rounded = (years * 100.0).round() / 100.0;
        format!("{} years", rounded)
    }
}

/// Leading numeric value of an experience string; anything unparseable is 0.
pub fn parse_years(value: &str) -> f64 {
    let number: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    number.parse().unwrap_or(0.0)
}
