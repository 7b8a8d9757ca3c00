// ABOUTME: Employment period model enforcing that an end date never precedes the start date
// ABOUTME: Construction returns EmploymentError instead of building an invalid period
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::EmploymentError;

/// Start and optional end of an employment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEmploymentPeriod")]
pub struct EmploymentPeriod {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

/// Unchecked wire form, validated through [`EmploymentPeriod::new`]
#[derive(Deserialize)]
struct RawEmploymentPeriod {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl TryFrom<RawEmploymentPeriod> for EmploymentPeriod {
    type Error = EmploymentError;

    fn try_from(raw: RawEmploymentPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl EmploymentPeriod {
    /// Build a period, rejecting an end date before the start date
    ///
    /// # Errors
    ///
    /// Returns [`EmploymentError::PeriodDatesRange`] when `end < start`
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self, EmploymentError> {
        match end {
            Some(end) if end < start => Err(EmploymentError::PeriodDatesRange { start, end }),
            _ => Ok(Self { start, end }),
        }
    }

    /// Check a probation end date against this period
    ///
    /// # Errors
    ///
    /// Returns [`EmploymentError::ProbationDatesRange`] when probation outlasts the period
    pub fn check_probation(&self, probation_end: NaiveDate) -> Result<(), EmploymentError> {
        match self.end {
            Some(end) if probation_end > end => {
                Err(EmploymentError::ProbationDatesRange { probation_end, end })
            }
            _ => Ok(()),
        }
    }

    /// First day of employment
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of employment, if known
    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Whether the employment covers the given day
    #[must_use]
    pub fn is_active(&self, on: NaiveDate) -> bool {
        on >= self.start && self.end.is_none_or(|end| on <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_open_ended_period() {
        let period = EmploymentPeriod::new(date(2023, 1, 1), None).unwrap();
        assert!(period.is_active(date(2030, 6, 1)));
        assert!(!period.is_active(date(2022, 12, 31)));
    }

    #[test]
    fn test_same_day_period_is_valid() {
        let period = EmploymentPeriod::new(date(2024, 3, 1), Some(date(2024, 3, 1))).unwrap();
        assert!(period.is_active(date(2024, 3, 1)));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let result = EmploymentPeriod::new(date(2024, 3, 1), Some(date(2024, 2, 28)));
        assert!(matches!(
            result,
            Err(EmploymentError::PeriodDatesRange { .. })
        ));
    }

    #[test]
    fn test_deserializing_inverted_period_fails() {
        let result =
            serde_json::from_str::<EmploymentPeriod>(r#"{"start":"2024-05-01","end":"2024-04-01"}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("cannot be before start date"));

        let period: EmploymentPeriod =
            serde_json::from_str(r#"{"start":"2024-05-01","end":null}"#).unwrap();
        assert_eq!(period.start(), date(2024, 5, 1));
        assert!(period.end().is_none());
    }

    #[test]
    fn test_probation_after_end_rejected() {
        let period = EmploymentPeriod::new(date(2024, 1, 1), Some(date(2024, 6, 30))).unwrap();
        assert!(period.check_probation(date(2024, 3, 31)).is_ok());
        assert!(period.check_probation(date(2024, 7, 1)).is_err());
    }
}
