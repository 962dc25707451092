//! Reporting period model.
//!
//! This module contains the [`ReportingPeriod`] type: the window a payroll
//! report covers, either a calendar month or an explicit week range.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The window of attendance a payroll report covers.
///
/// Both ends of a week range are inclusive. A week range is not required to
/// be exactly seven days; callers choose the range.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ReportingPeriod;
/// use chrono::NaiveDate;
///
/// let june = ReportingPeriod::Month { year: 2024, month: 6 };
/// assert!(june.contains_date(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()));
/// assert!(!june.contains_date(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));
/// assert_eq!(june.label(), "2024-06");
///
/// let week = ReportingPeriod::Week {
///     start_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(),
/// };
/// assert!(week.is_weekly());
/// assert_eq!(week.label(), "2024-06-03..2024-06-09");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportingPeriod {
    /// A calendar month.
    Month {
        /// The calendar year.
        year: i32,
        /// The month number, 1 through 12.
        month: u32,
    },
    /// An explicit date range, typically one working week.
    Week {
        /// The first date of the range (inclusive).
        start_date: NaiveDate,
        /// The last date of the range (inclusive).
        end_date: NaiveDate,
    },
}

impl ReportingPeriod {
    /// Checks that the period describes a real, non-empty window.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] when the month is outside 1..=12
    /// or the week range ends before it starts.
    pub fn validate(&self) -> EngineResult<()> {
        match self {
            Self::Month { month, .. } if !(1..=12).contains(month) => {
                Err(EngineError::InvalidPeriod {
                    message: format!("month must be between 1 and 12, got {}", month),
                })
            }
            Self::Week {
                start_date,
                end_date,
            } if end_date < start_date => Err(EngineError::InvalidPeriod {
                message: format!(
                    "week range ends on {} before it starts on {}",
                    end_date, start_date
                ),
            }),
            _ => Ok(()),
        }
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        match self {
            Self::Month { year, month } => date.year() == *year && date.month() == *month,
            Self::Week {
                start_date,
                end_date,
            } => date >= *start_date && date <= *end_date,
        }
    }

    /// Returns true for week ranges, whose allowances are pro-rated.
    pub fn is_weekly(&self) -> bool {
        matches!(self, Self::Week { .. })
    }

    /// Returns a stable, human-readable identifier for the period.
    pub fn label(&self) -> String {
        match self {
            Self::Month { year, month } => format!("{:04}-{:02}", year, month),
            Self::Week {
                start_date,
                end_date,
            } => format!("{}..{}", start_date, end_date),
        }
    }
}
