//! Calendar month used as the aggregation key.

use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A (year, month) pair ordered by calendar order.
///
/// Field order matters: the derived `Ord` compares `year` first, then `month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a key, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month a date falls in
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

    /// The following calendar month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// Whole months from `self` to `other`; negative when `other` is earlier
    pub fn months_until(&self, other: &MonthKey) -> i64 {
        let from = self.year as i64 * 12 + (self.month as i64 - 1);
        let to = other.year as i64 * 12 + (other.month as i64 - 1);
        to - from
    }

    /// Presentation label, e.g., "August 2025"
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

/// Renders as "YYYY-MM"
impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid month key '{0}', expected YYYY-MM")]
pub struct ParseMonthKeyError(String);

impl FromStr for MonthKey {
    type Err = ParseMonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMonthKeyError(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_of_ignores_day() {
        assert_eq!(MonthKey::of(date(2025, 3, 1)), MonthKey::of(date(2025, 3, 31)));
        assert_eq!(MonthKey::of(date(2025, 3, 15)), MonthKey::new(2025, 3).unwrap());
    }

    #[test]
    fn test_new_rejects_out_of_range_month() {
        assert!(MonthKey::new(2025, 0).is_none());
        assert!(MonthKey::new(2025, 13).is_none());
        assert!(MonthKey::new(2025, 12).is_some());
    }

    #[test]
    fn test_next_rolls_over_year() {
        let december = MonthKey::new(2024, 12).unwrap();
        assert_eq!(december.next(), MonthKey::new(2025, 1).unwrap());
        assert_eq!(MonthKey::new(2025, 6).unwrap().next(), MonthKey::new(2025, 7).unwrap());
    }

    #[test]
    fn test_ordering_is_calendar_order() {
        let mut keys = vec![
            MonthKey::new(2025, 2).unwrap(),
            MonthKey::new(2024, 11).unwrap(),
            MonthKey::new(2025, 1).unwrap(),
            MonthKey::new(2024, 2).unwrap(),
        ];
        keys.sort();

        let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(rendered, vec!["2024-02", "2024-11", "2025-01", "2025-02"]);
    }

    #[test]
    fn test_months_until() {
        let jan = MonthKey::new(2025, 1).unwrap();
        assert_eq!(jan.months_until(&jan), 0);
        assert_eq!(jan.months_until(&MonthKey::new(2025, 4).unwrap()), 3);
        assert_eq!(jan.months_until(&MonthKey::new(2026, 1).unwrap()), 12);
        assert_eq!(jan.months_until(&MonthKey::new(2024, 11).unwrap()), -2);
    }

    #[test]
    fn test_display_and_label() {
        let key = MonthKey::new(2025, 8).unwrap();
        assert_eq!(key.to_string(), "2025-08");
        assert_eq!(key.label(), "August 2025");
    }

    #[test]
    fn test_parse() {
        assert_eq!("2025-08".parse::<MonthKey>().unwrap(), MonthKey::new(2025, 8).unwrap());
        assert!("2025-13".parse::<MonthKey>().is_err());
        assert!("2025-8".parse::<MonthKey>().is_err());
        assert!("August 2025".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_serde_uses_string_form() {
        let key = MonthKey::new(2025, 1).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2025-01\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
