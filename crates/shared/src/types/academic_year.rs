//! Academic year identifier in `YYYY/YYYY` form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced when parsing an academic year.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcademicYearError {
    /// The input was empty or whitespace only.
    #[error("Academic year is required")]
    Empty,

    /// The input is not two four-digit years separated by `/`.
    #[error("Academic year must have the form YYYY/YYYY, got '{0}'")]
    Malformed(String),

    /// The second year does not immediately follow the first.
    #[error("Academic year '{0}' must span two consecutive years")]
    NotConsecutive(String),
}

/// A yearly period scoping an enrollment, e.g. `2023/2024`.
///
/// Ordering follows the starting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AcademicYear {
    start: u16,
}

impl AcademicYear {
    /// Creates the academic year starting in `start`.
    #[must_use]
    pub const fn starting(start: u16) -> Self {
        Self { start }
    }

    /// Returns the first calendar year.
    #[must_use]
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// Returns the second calendar year.
    #[must_use]
    pub const fn end(&self) -> u16 {
        self.start.saturating_add(1)
    }
}

fn parse_year(part: &str) -> Option<u16> {
    if part.len() != 4 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for AcademicYear {
    type Err = AcademicYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AcademicYearError::Empty);
        }

        let (first, second) = trimmed
            .split_once('/')
            .ok_or_else(|| AcademicYearError::Malformed(trimmed.to_string()))?;

        let (Some(start), Some(end)) = (parse_year(first), parse_year(second)) else {
            return Err(AcademicYearError::Malformed(trimmed.to_string()));
        };

        if u32::from(end) != u32::from(start) + 1 {
            return Err(AcademicYearError::NotConsecutive(trimmed.to_string()));
        }

        Ok(Self { start })
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:04}", self.start, self.end())
    }
}

impl Serialize for AcademicYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AcademicYear {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
