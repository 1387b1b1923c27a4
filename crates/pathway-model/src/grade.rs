//! Relevance grades
//!
//! A grade says how strongly an outcome matters to one worldview. Grades are
//! ordered (`Low < Medium < High`); an absent grade is modelled as `None` and
//! never as a fourth variant, so "no opinion" cannot be confused with "low".

use crate::error::GradeParseError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// How strongly an outcome matters to a worldview
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RelevanceGrade {
    /// Weak relevance; treated as noise for discovery
    Low,
    /// Moderate relevance
    Medium,
    /// Strong relevance
    High,
}

impl RelevanceGrade {
    /// All grades, weakest first
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Canonical label
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parse a grade from user-submitted data
    ///
    /// Accepts the full names and their first letter, case-insensitively,
    /// with surrounding whitespace ignored. Anything else is absent.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Some(Self::High),
            "medium" | "med" | "m" => Some(Self::Medium),
            "low" | "l" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for RelevanceGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelevanceGrade {
    type Err = GradeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| GradeParseError(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for RelevanceGrade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Minimum grade an outcome needs to count as relevant
///
/// The default admits High and Medium and drops Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelevanceThreshold {
    /// Every graded outcome qualifies
    Low,
    /// High or Medium qualifies
    #[default]
    Medium,
    /// Only High qualifies
    High,
}

impl RelevanceThreshold {
    /// Weakest grade that passes this threshold
    #[inline]
    #[must_use]
    pub fn minimum(self) -> RelevanceGrade {
        match self {
            Self::Low => RelevanceGrade::Low,
            Self::Medium => RelevanceGrade::Medium,
            Self::High => RelevanceGrade::High,
        }
    }

    /// Check whether a grade passes
    #[inline]
    #[must_use]
    pub fn admits(self, grade: RelevanceGrade) -> bool {
        grade >= self.minimum()
    }
}
