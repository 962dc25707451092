//! Monthly hours summary.
//!
//! Groups attendance by employee and calendar month and sums the regular and
//! overtime time each month's usable days produce under the shift policy.
//! Malformed days are counted but contribute no hours.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AttendanceEvent;

use super::shift_policy::{ShiftPolicy, WorkDurations, compute_work_durations};

/// Worked hours for one employee in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyHoursSummary {
    /// The employee the hours belong to.
    pub employee_id: String,
    /// The calendar year.
    pub year: i32,
    /// The calendar month, 1 through 12.
    pub month: u32,
    /// Summed regular hours.
    pub regular_hours: Decimal,
    /// Summed overtime hours.
    pub overtime_hours: Decimal,
    /// Regular plus overtime hours.
    pub total_hours: Decimal,
    /// Days that contributed hours.
    pub days_counted: u32,
    /// Days excluded as malformed.
    pub days_excluded: u32,
}

#[derive(Default)]
struct MonthTally {
    durations: WorkDurations,
    days_counted: u32,
    days_excluded: u32,
}

/// Summarizes attendance into one entry per employee per calendar month.
///
/// Entries are sorted by employee id, then by year and month.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{summarize_monthly_hours, ShiftPolicy};
/// use payroll_engine::models::AttendanceEvent;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let attendance = vec![
///     AttendanceEvent {
///         employee_id: "10001".to_string(),
///         date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///         time_in: NaiveTime::from_hms_opt(8, 0, 0),
///         time_out: NaiveTime::from_hms_opt(18, 0, 0),
///     },
/// ];
///
/// let summaries = summarize_monthly_hours(&attendance, &ShiftPolicy::default());
/// assert_eq!(summaries.len(), 1);
/// assert_eq!(summaries[0].regular_hours, Decimal::from(8));
/// assert_eq!(summaries[0].overtime_hours, Decimal::from(1));
/// ```
pub fn summarize_monthly_hours(
    attendance: &[AttendanceEvent],
    policy: &ShiftPolicy,
) -> Vec<MonthlyHoursSummary> {
    let mut months: BTreeMap<(&str, i32, u32), MonthTally> = BTreeMap::new();

    for event in attendance {
        let key = (event.employee_id.as_str(), event.date.year(), event.date.month());
        let tally = months.entry(key).or_default();
        let result = compute_work_durations(event.time_in, event.time_out, policy, 1);
        if result.anomaly.is_some() {
            tally.days_excluded += 1;
        } else {
            tally.days_counted += 1;
            tally.durations = tally.durations + result.durations;
        }
    }

    months
        .into_iter()
        .map(|((employee_id, year, month), tally)| {
            let regular_hours = tally.durations.regular_hours();
            let overtime_hours = tally.durations.overtime_hours();
            MonthlyHoursSummary {
                employee_id: employee_id.to_string(),
                year,
                month,
                regular_hours,
                overtime_hours,
                total_hours: regular_hours + overtime_hours,
                days_counted: tally.days_counted,
                days_excluded: tally.days_excluded,
            }
        })
        .collect()
}
