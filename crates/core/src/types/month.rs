//! Calendar month keys in `YYYY-MM` form.
//!
//! A drop is identified by the month it was released in. The key is what the
//! backend filters current products by and what archive records carry as
//! `release_month`.

use core::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`MonthKey`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MonthKeyError {
    /// The input is not shaped like `YYYY-MM`.
    #[error("month key must look like YYYY-MM (got {0:?})")]
    Format(String),
    /// The month component is outside `01..=12`.
    #[error("month must be between 01 and 12 (got {0})")]
    MonthOutOfRange(u32),
}

/// A zero-padded `YYYY-MM` calendar month.
///
/// ## Examples
///
/// ```
/// use limited_tees_core::MonthKey;
///
/// let key: MonthKey = "2024-03".parse().unwrap();
/// assert_eq!(key.to_string(), "2024-03");
/// assert_eq!(key.month(), 3);
///
/// assert!("2024-3".parse::<MonthKey>().is_err());
/// assert!("2024-13".parse::<MonthKey>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: u16,
    month: u8,
}

impl MonthKey {
    /// Length of the rendered key.
    pub const LEN: usize = 7;

    /// Build a key from a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // Keys are always four-digit years.
        let year = u16::try_from(date.year().clamp(0, 9999)).unwrap_or(0);
        let month = u8::try_from(date.month()).unwrap_or(1);
        Self { year, month }
    }

    /// The month the local clock currently reports.
    #[must_use]
    pub fn current_local() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Returns the four-digit year.
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the month, `1..=12`.
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || MonthKeyError::Format(s.to_owned());

        let (year, month) = s.split_once('-').ok_or_else(format_err)?;
        if year.len() != 4
            || month.len() != 2
            || !year.bytes().all(|b| b.is_ascii_digit())
            || !month.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(format_err());
        }

        let year: u16 = year.parse().map_err(|_| format_err())?;
        let month: u8 = month.parse().map_err(|_| format_err())?;
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError::MonthOutOfRange(u32::from(month)));
        }

        Ok(Self { year, month })
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn is_key_shaped(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() == MonthKey::LEN
            && bytes.iter().enumerate().all(|(i, b)| {
                if i == 4 {
                    *b == b'-'
                } else {
                    b.is_ascii_digit()
                }
            })
    }

    #[test]
    fn test_from_date_zero_pads() {
        assert_eq!(MonthKey::from_date(date(2024, 3, 15)).to_string(), "2024-03");
        assert_eq!(MonthKey::from_date(date(2024, 12, 31)).to_string(), "2024-12");
        assert_eq!(MonthKey::from_date(date(987, 1, 1)).to_string(), "0987-01");
    }

    #[test]
    fn test_every_month_of_a_year_is_well_formed() {
        for month in 1..=12 {
            let key = MonthKey::from_date(date(2025, month, 1));
            let rendered = key.to_string();
            assert!(is_key_shaped(&rendered), "{rendered}");
            assert!((1..=12).contains(&key.month()));
            assert_eq!(rendered.parse::<MonthKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_current_local_is_well_formed() {
        let key = MonthKey::current_local();
        assert!(is_key_shaped(&key.to_string()));
        assert!((1..=12).contains(&key.month()));
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for bad in ["", "2024", "2024-3", "24-03", "2024/03", "2024-03-01", "abcd-ef", "2024-+3"] {
            assert!(
                matches!(bad.parse::<MonthKey>(), Err(MonthKeyError::Format(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_month_out_of_range() {
        assert_eq!(
            "2024-00".parse::<MonthKey>(),
            Err(MonthKeyError::MonthOutOfRange(0))
        );
        assert_eq!(
            "2024-13".parse::<MonthKey>(),
            Err(MonthKeyError::MonthOutOfRange(13))
        );
    }

    #[test]
    fn test_serde_as_string() {
        let key: MonthKey = serde_json::from_str("\"2023-11\"").unwrap();
        assert_eq!(key.year(), 2023);
        assert_eq!(key.month(), 11);
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2023-11\"");
        assert!(serde_json::from_str::<MonthKey>("\"November\"").is_err());
    }
}
