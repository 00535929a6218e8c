//! Calendar month keys used by every monthly report

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Earliest year accepted from callers
pub const MIN_YEAR: i32 = 1900;

/// Latest year accepted from callers
pub const MAX_YEAR: i32 = 2100;

/// A validated (year, month) pair
///
/// Ordering is chronological, so sorting a list of `YearMonth` sorts it by time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Build a month key, rejecting implausible years and months outside 1-12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::InvalidMonth(format!(
                "year {} is outside {}-{}",
                year, MIN_YEAR, MAX_YEAR
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth(format!(
                "month {} is outside 1-12",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// Build from raw integers as received over HTTP or the CLI
    pub fn from_parts(year: i64, month: i64) -> Result<Self> {
        let year = i32::try_from(year)
            .map_err(|_| Error::InvalidMonth(format!("year {} is out of range", year)))?;
        let month = u32::try_from(month)
            .map_err(|_| Error::InvalidMonth(format!("month {} is out of range", month)))?;
        Self::new(year, month)
    }

    /// The month containing a date
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // Year and month were validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The following calendar month (December rolls into January)
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Half-open date range [first day, first day of next month)
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        let start = self.first_day();
        let end = NaiveDate::from_ymd_opt(self.next().year, self.next().month, 1)
            .unwrap_or(NaiveDate::MAX);
        (start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    /// Parse "YYYY-MM"
    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| Error::InvalidMonth(format!("expected YYYY-MM, got '{}'", s)))?;
        let year: i32 = year
            .parse()
            .map_err(|_| Error::InvalidMonth(format!("invalid year in '{}'", s)))?;
        let month: u32 = month
            .parse()
            .map_err(|_| Error::InvalidMonth(format!("invalid month in '{}'", s)))?;
        Self::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_months() {
        assert!(YearMonth::new(2024, 0).is_err());
        assert!(YearMonth::new(2024, 13).is_err());
        assert!(YearMonth::new(1899, 5).is_err());
        assert!(YearMonth::new(2101, 5).is_err());
        assert!(YearMonth::from_parts(2024, -1).is_err());
        assert!(matches!(
            YearMonth::new(2024, 13),
            Err(Error::InvalidMonth(_))
        ));
    }

    #[test]
    fn test_date_range_wraps_december() {
        let dec = YearMonth::new(2024, 12).unwrap();
        let (start, end) = dec.date_range();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(dec.next(), YearMonth::new(2025, 1).unwrap());
    }

    #[test]
    fn test_parse_and_display() {
        let ym: YearMonth = "2025-03".parse().unwrap();
        assert_eq!(ym.year(), 2025);
        assert_eq!(ym.month(), 3);
        assert_eq!(ym.to_string(), "2025-03");
        assert!("2025/03".parse::<YearMonth>().is_err());
        assert!("2025-13".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut months = vec![
            YearMonth::new(2025, 1).unwrap(),
            YearMonth::new(2024, 12).unwrap(),
            YearMonth::new(2024, 2).unwrap(),
        ];
        months.sort();
        assert_eq!(months[0].to_string(), "2024-02");
        assert_eq!(months[2].to_string(), "2025-01");
    }
}
