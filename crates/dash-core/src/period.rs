//! Quarter tags such as `3Q25`.
//!
//! Periods order chronologically by (year, quarter). Lexical order of the
//! tags is wrong as soon as a year boundary is crossed (`4Q24` sorts after
//! `1Q25` as a string), so every view sorts through [`Period`] instead.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A fiscal quarter, e.g. `3Q25` = third quarter of 2025.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: u16,
    quarter: u8,
}

impl Period {
    /// Build a period from a two-digit year and a quarter in `1..=4`.
    pub fn new(year: u16, quarter: u8) -> Result<Self, CoreError> {
        if !(1..=4).contains(&quarter) {
            return Err(CoreError::Validation(format!(
                "quarter must be between 1 and 4, got {quarter}"
            )));
        }
        if year > 99 {
            return Err(CoreError::Validation(format!(
                "year must be two digits, got {year}"
            )));
        }
        Ok(Self { year, quarter })
    }

    #[must_use]
    pub const fn year(self) -> u16 {
        self.year
    }

    #[must_use]
    pub const fn quarter(self) -> u8 {
        self.quarter
    }

    /// The quarter immediately before this one (`1Q25` → `4Q24`).
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        if self.quarter > 1 {
            Some(Self {
                year: self.year,
                quarter: self.quarter - 1,
            })
        } else if self.year > 0 {
            Some(Self {
                year: self.year - 1,
                quarter: 4,
            })
        } else {
            None
        }
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then(self.quarter.cmp(&other.quarter))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("invalid period tag '{s}' (expected e.g. 3Q25)"));

        let (quarter, year) = s.split_once('Q').ok_or_else(invalid)?;
        if quarter.len() != 1 || year.len() != 2 {
            return Err(invalid());
        }
        let quarter = quarter.parse::<u8>().map_err(|_| invalid())?;
        let year = year.parse::<u16>().map_err(|_| invalid())?;
        Self::new(year, quarter)
    }
}

impl TryFrom<String> for Period {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{:02}", self.quarter, self.year)
    }
}

/// Compare two period tags chronologically.
///
/// Tags that fail to parse sort after every valid tag, in lexical order
/// among themselves.
#[must_use]
pub fn compare_tags(a: &str, b: &str) -> Ordering {
    match (a.parse::<Period>(), b.parse::<Period>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_round_trip() {
        let period: Period = "3Q25".parse().unwrap();
        assert_eq!(period.quarter(), 3);
        assert_eq!(period.year(), 25);
        assert_eq!(period.to_string(), "3Q25");
    }

    #[test]
    fn rejects_malformed_tags() {
        for tag in ["", "Q25", "5Q25", "0Q25", "3Q2025", "3q25", "33Q25", "FY24"] {
            assert!(tag.parse::<Period>().is_err(), "{tag} should not parse");
        }
    }

    #[test]
    fn order_is_chronological_not_lexical() {
        let mut tags = vec!["3Q25", "1Q25", "2Q25"];
        tags.sort_by(|a, b| compare_tags(a, b));
        assert_eq!(tags, vec!["1Q25", "2Q25", "3Q25"]);

        let mut across_years = vec!["1Q25", "4Q24"];
        across_years.sort_by(|a, b| compare_tags(a, b));
        assert_eq!(across_years, vec!["4Q24", "1Q25"]);
    }

    #[test]
    fn previous_wraps_year_boundary() {
        let first: Period = "1Q25".parse().unwrap();
        assert_eq!(first.previous().map(|p| p.to_string()).as_deref(), Some("4Q24"));
        let third: Period = "3Q25".parse().unwrap();
        assert_eq!(third.previous().map(|p| p.to_string()).as_deref(), Some("2Q25"));
    }
}
