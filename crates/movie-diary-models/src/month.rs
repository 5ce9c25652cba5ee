use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The month/year an import is filtered to. Always holds a valid month
/// number (1-12); construct through `new` or `current`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetMonth {
    year: i32,
    month: u32,
}

impl TargetMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The current local month, the default for diary imports.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The month number is validated at construction, so the first of the
        // month always exists.
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => write!(f, "{}", first.format("%B %Y")),
            None => write!(f, "{}-{:02}", self.year, self.month),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_month() {
        assert!(TargetMonth::new(2026, 0).is_none());
        assert!(TargetMonth::new(2026, 13).is_none());
        assert!(TargetMonth::new(2026, 12).is_some());
    }

    #[test]
    fn test_display_is_month_name_and_year() {
        let target = TargetMonth::new(2026, 1).unwrap();
        assert_eq!(target.to_string(), "January 2026");
    }

    #[test]
    fn test_contains_matches_exact_month_and_year() {
        let target = TargetMonth::new(2026, 1).unwrap();
        assert!(target.contains(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
        assert!(!target.contains(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
        assert!(!target.contains(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()));
    }
}
