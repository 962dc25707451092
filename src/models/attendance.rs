//! Attendance event model.
//!
//! This module defines the [`AttendanceEvent`] struct, one day's clock-in and
//! clock-out punches for one employee, and the [`AttendanceAnomaly`] enum used
//! to report punches that cannot be turned into worked time.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A data-quality problem that excludes an attendance day from pay.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceAnomaly;
///
/// assert_eq!(
///     AttendanceAnomaly::TimeOutBeforeTimeIn.to_string(),
///     "clock-out precedes clock-in"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceAnomaly {
    /// The clock-in punch is missing.
    MissingTimeIn,
    /// The clock-out punch is missing.
    MissingTimeOut,
    /// Both punches are missing.
    MissingBoth,
    /// The clock-out punch is earlier than the clock-in punch.
    TimeOutBeforeTimeIn,
}

impl AttendanceAnomaly {
    /// Checks a pair of punches, returning the anomaly if the pair is unusable.
    pub fn detect(time_in: Option<NaiveTime>, time_out: Option<NaiveTime>) -> Option<Self> {
        match (time_in, time_out) {
            (None, None) => Some(Self::MissingBoth),
            (None, Some(_)) => Some(Self::MissingTimeIn),
            (Some(_), None) => Some(Self::MissingTimeOut),
            (Some(time_in), Some(time_out)) if time_out < time_in => {
                Some(Self::TimeOutBeforeTimeIn)
            }
            _ => None,
        }
    }
}

impl fmt::Display for AttendanceAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingTimeIn => "clock-in punch is missing",
            Self::MissingTimeOut => "clock-out punch is missing",
            Self::MissingBoth => "clock-in and clock-out punches are missing",
            Self::TimeOutBeforeTimeIn => "clock-out precedes clock-in",
        };
        f.write_str(text)
    }
}

/// One employee's punches for one calendar date.
///
/// Events are read-only input to the engine. A malformed event is never
/// corrected: the shift policy excludes it and reports why.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceEvent;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let event = AttendanceEvent {
///     employee_id: "10001".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     time_in: NaiveTime::from_hms_opt(8, 5, 0),
///     time_out: NaiveTime::from_hms_opt(17, 30, 0),
/// };
/// assert!(event.anomaly().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// The employee who punched.
    pub employee_id: String,
    /// The calendar date of the punches.
    pub date: NaiveDate,
    /// The clock-in time, if recorded.
    #[serde(default)]
    pub time_in: Option<NaiveTime>,
    /// The clock-out time, if recorded.
    #[serde(default)]
    pub time_out: Option<NaiveTime>,
}

impl AttendanceEvent {
    /// Returns the data-quality problem with this event, if any.
    pub fn anomaly(&self) -> Option<AttendanceAnomaly> {
        AttendanceAnomaly::detect(self.time_in, self.time_out)
    }

    /// Returns true if this event belongs to the given employee.
    pub fn belongs_to(&self, employee_id: &str) -> bool {
        self.employee_id == employee_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn event(time_in: Option<NaiveTime>, time_out: Option<NaiveTime>) -> AttendanceEvent {
        AttendanceEvent {
            employee_id: "10001".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            time_in,
            time_out,
        }
    }

    #[test]
    fn test_complete_event_has_no_anomaly() {
        assert_eq!(event(Some(time(8, 0)), Some(time(17, 0))).anomaly(), None);
    }

    #[test]
    fn test_zero_length_day_is_not_an_anomaly() {
        assert_eq!(event(Some(time(9, 0)), Some(time(9, 0))).anomaly(), None);
    }

    #[test]
    fn test_missing_punches_are_reported() {
        assert_eq!(
            event(None, Some(time(17, 0))).anomaly(),
            Some(AttendanceAnomaly::MissingTimeIn)
        );
        assert_eq!(
            event(Some(time(8, 0)), None).anomaly(),
            Some(AttendanceAnomaly::MissingTimeOut)
        );
        assert_eq!(event(None, None).anomaly(), Some(AttendanceAnomaly::MissingBoth));
    }

    #[test]
    fn test_time_out_before_time_in_is_reported() {
        assert_eq!(
            event(Some(time(17, 0)), Some(time(8, 0))).anomaly(),
            Some(AttendanceAnomaly::TimeOutBeforeTimeIn)
        );
    }

    #[test]
    fn test_belongs_to() {
        let e = event(None, None);
        assert!(e.belongs_to("10001"));
        assert!(!e.belongs_to("10002"));
    }

    #[test]
    fn test_deserialize_with_missing_time_out() {
        let json = r#"{
            "employee_id": "10001",
            "date": "2024-06-03",
            "time_in": "08:00:00"
        }"#;

        let event: AttendanceEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.time_in, Some(time(8, 0)));
        assert_eq!(event.time_out, None);
        assert_eq!(event.anomaly(), Some(AttendanceAnomaly::MissingTimeOut));
    }

    #[test]
    fn test_anomaly_serializes_snake_case() {
        let json = serde_json::to_string(&AttendanceAnomaly::TimeOutBeforeTimeIn).unwrap();
        assert_eq!(json, "\"time_out_before_time_in\"");
    }
}
