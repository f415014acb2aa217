//! Date presentation for the theme.
//!
//! The theme supports a fixed set of five layout patterns. The three numeric
//! ones join their parts with a configurable separator; the two month-name
//! patterns always use spaces and ignore the separator.

use crate::config::DateSettings;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Layout pattern used when printing post dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "YYYY-MM-DD")]
    YearMonthDay,
    #[serde(rename = "MM-DD-YYYY")]
    MonthDayYear,
    #[serde(rename = "DD-MM-YYYY")]
    DayMonthYear,
    #[serde(rename = "MONTH DAY YYYY")]
    MonthNameDayYear,
    #[serde(rename = "DAY MONTH YYYY")]
    DayMonthNameYear,
}

impl DateFormat {
    pub const ALL: [DateFormat; 5] = [
        DateFormat::YearMonthDay,
        DateFormat::MonthDayYear,
        DateFormat::DayMonthYear,
        DateFormat::MonthNameDayYear,
        DateFormat::DayMonthNameYear,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DateFormat::YearMonthDay => "YYYY-MM-DD",
            DateFormat::MonthDayYear => "MM-DD-YYYY",
            DateFormat::DayMonthYear => "DD-MM-YYYY",
            DateFormat::MonthNameDayYear => "MONTH DAY YYYY",
            DateFormat::DayMonthNameYear => "DAY MONTH YYYY",
        }
    }

    /// Whether the pattern is made of numbers joined by a [DateSeparator].
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            DateFormat::YearMonthDay | DateFormat::MonthDayYear | DateFormat::DayMonthYear
        )
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown date format `{}`", s))
    }
}

/// Glyph placed between the parts of a numeric date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum DateSeparator {
    #[serde(rename = ".")]
    Dot,
    #[default]
    #[serde(rename = "-")]
    Dash,
    #[serde(rename = "/")]
    Slash,
}

impl DateSeparator {
    pub const ALL: [DateSeparator; 3] = [DateSeparator::Dot, DateSeparator::Dash, DateSeparator::Slash];

    pub fn as_char(self) -> char {
        match self {
            DateSeparator::Dot => '.',
            DateSeparator::Dash => '-',
            DateSeparator::Slash => '/',
        }
    }
}

impl fmt::Display for DateSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for DateSeparator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateSeparator::ALL
            .into_iter()
            .find(|sep| s.len() == 1 && s.starts_with(sep.as_char()))
            .ok_or_else(|| anyhow::anyhow!("unknown date separator `{}`", s))
    }
}

/// Formats `date` according to the theme's date settings.
pub fn format_date(date: NaiveDate, settings: &DateSettings) -> String {
    let sep = settings.date_separator.as_char();
    let pattern = match settings.date_format {
        DateFormat::YearMonthDay => format!("%Y{sep}%m{sep}%d"),
        DateFormat::MonthDayYear => format!("%m{sep}%d{sep}%Y"),
        DateFormat::DayMonthYear => format!("%d{sep}%m{sep}%Y"),
        DateFormat::MonthNameDayYear => "%B %-d %Y".to_string(),
        DateFormat::DayMonthNameYear => "%-d %B %Y".to_string(),
    };
    date.format(&pattern).to_string()
}

/// Parses a front matter date.
///
/// Accepts plain `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DD HH:MM[:SS]`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim().trim_matches('"');
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}
