//! Shift policy classification.
//!
//! This module turns one day's clock-in/clock-out pair into regular and
//! overtime minutes under a fixed shift definition: a start time with a short
//! grace window, an end time, and an unpaid break.
//!
//! Overtime eligibility is gated on punctuality. An employee who arrives after
//! the grace window forfeits overtime for that day even when they stay past
//! the end of the shift.

use std::iter::Sum;
use std::ops::Add;

use chrono::{Duration, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceAnomaly, AuditStep};

/// The fixed working-day definition punches are classified against.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::ShiftPolicy;
/// use chrono::NaiveTime;
///
/// let policy = ShiftPolicy::default();
/// assert_eq!(policy.shift_start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
/// assert_eq!(policy.grace_end(), NaiveTime::from_hms_opt(8, 10, 0).unwrap());
/// assert_eq!(policy.shift_end, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
/// assert_eq!(policy.unpaid_break_minutes, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPolicy {
    /// When the shift starts.
    pub shift_start: NaiveTime,
    /// Minutes after `shift_start` during which an arrival counts as on time.
    pub grace_minutes: i64,
    /// When the shift ends; later punches are overtime candidates.
    pub shift_end: NaiveTime,
    /// Unpaid break deducted from regular time.
    pub unpaid_break_minutes: i64,
}

impl Default for ShiftPolicy {
    fn default() -> Self {
        Self {
            shift_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            grace_minutes: 10,
            shift_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
            unpaid_break_minutes: 60,
        }
    }
}

impl ShiftPolicy {
    /// Returns the last on-time arrival.
    pub fn grace_end(&self) -> NaiveTime {
        self.shift_start + Duration::minutes(self.grace_minutes)
    }

    /// Checks that the policy describes a usable working day.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when the shift ends before it
    /// starts, the grace window or break is negative, or the grace window
    /// runs past the end of the shift.
    pub fn validate(&self) -> EngineResult<()> {
        if self.shift_end <= self.shift_start {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "shift end {} must be after shift start {}",
                    self.shift_end, self.shift_start
                ),
            });
        }
        if self.grace_minutes < 0 || self.unpaid_break_minutes < 0 {
            return Err(EngineError::InvalidConfig {
                message: "grace and break minutes must not be negative".to_string(),
            });
        }
        if minutes_between(self.shift_start, self.shift_end) <= self.grace_minutes {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "grace window of {} minutes does not fit inside the shift",
                    self.grace_minutes
                ),
            });
        }
        Ok(())
    }
}

/// Regular and overtime time for one attendance day, in whole minutes.
///
/// Both values are non-negative. Durations add, so a period's totals are the
/// sum of its days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDurations {
    /// Minutes of regular time.
    pub regular_minutes: i64,
    /// Minutes of overtime.
    pub overtime_minutes: i64,
}

impl WorkDurations {
    /// No worked time.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Regular time in hours.
    pub fn regular_hours(&self) -> Decimal {
        minutes_to_hours(self.regular_minutes)
    }

    /// Overtime in hours.
    pub fn overtime_hours(&self) -> Decimal {
        minutes_to_hours(self.overtime_minutes)
    }

    /// Regular plus overtime minutes.
    pub fn total_minutes(&self) -> i64 {
        self.regular_minutes + self.overtime_minutes
    }
}

impl Add for WorkDurations {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            regular_minutes: self.regular_minutes + other.regular_minutes,
            overtime_minutes: self.overtime_minutes + other.overtime_minutes,
        }
    }
}

impl Sum for WorkDurations {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

/// The result of classifying one attendance day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftPolicyResult {
    /// The classified durations; zero when the day was excluded.
    pub durations: WorkDurations,
    /// Why the day was excluded, if it was.
    pub anomaly: Option<AttendanceAnomaly>,
    /// The audit step recording this classification.
    pub audit_step: AuditStep,
}

/// Converts whole minutes to hours.
pub(crate) fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}

fn minutes_between(from: NaiveTime, to: NaiveTime) -> i64 {
    (to - from).num_minutes()
}

/// Classifies one day's punches into regular and overtime minutes.
///
/// The rules, applied in order:
///
/// 1. A missing punch, or a clock-out before the clock-in, yields zero time
///    and an [`AttendanceAnomaly`] so the caller can flag the day.
/// 2. An arrival after the grace window is late.
/// 3. An arrival strictly inside the grace window is treated as arriving at
///    shift start. Any other arrival counts from the punch itself.
/// 4. Regular time stops at shift end.
/// 5. Regular time is the clipped span minus the unpaid break, never negative.
/// 6. Time past shift end is overtime only for punctual arrivals.
///
/// # Arguments
///
/// * `time_in` - The clock-in punch, if any
/// * `time_out` - The clock-out punch, if any
/// * `policy` - The shift definition
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ## Punctual arrival with overtime
///
/// ```
/// use payroll_engine::calculation::{compute_work_durations, ShiftPolicy};
/// use chrono::NaiveTime;
///
/// let result = compute_work_durations(
///     NaiveTime::from_hms_opt(7, 55, 0),
///     NaiveTime::from_hms_opt(19, 0, 0),
///     &ShiftPolicy::default(),
///     1,
/// );
/// // 07:55 to 17:00, less the one hour break
/// assert_eq!(result.durations.regular_minutes, 485);
/// assert_eq!(result.durations.overtime_minutes, 2 * 60);
/// ```
///
/// ## Late arrival forfeits overtime
///
/// ```
/// use payroll_engine::calculation::{compute_work_durations, ShiftPolicy};
/// use chrono::NaiveTime;
///
/// let result = compute_work_durations(
///     NaiveTime::from_hms_opt(8, 15, 0),
///     NaiveTime::from_hms_opt(18, 0, 0),
///     &ShiftPolicy::default(),
///     1,
/// );
/// assert_eq!(result.durations.overtime_minutes, 0);
/// ```
pub fn compute_work_durations(
    time_in: Option<NaiveTime>,
    time_out: Option<NaiveTime>,
    policy: &ShiftPolicy,
    step_number: u32,
) -> ShiftPolicyResult {
    match (time_in, time_out) {
        (Some(time_in), Some(time_out)) if time_out >= time_in => {
            classify(time_in, time_out, policy, step_number)
        }
        _ => excluded(
            time_in,
            time_out,
            AttendanceAnomaly::detect(time_in, time_out),
            step_number,
        ),
    }
}

fn classify(
    time_in: NaiveTime,
    time_out: NaiveTime,
    policy: &ShiftPolicy,
    step_number: u32,
) -> ShiftPolicyResult {
    let grace_end = policy.grace_end();
    let is_late = time_in > grace_end;

    // Only an arrival inside the grace window is pulled back to shift start
    let within_grace = time_in > policy.shift_start && time_in < grace_end;
    let effective_start = if within_grace { policy.shift_start } else { time_in };
    let effective_end = time_out.min(policy.shift_end);

    let overtime_minutes = if !is_late && time_out > policy.shift_end {
        minutes_between(policy.shift_end, time_out)
    } else {
        0
    };

    let regular_minutes = (minutes_between(effective_start, effective_end)
        - policy.unpaid_break_minutes)
        .max(0);

    let durations = WorkDurations {
        regular_minutes,
        overtime_minutes,
    };

    let reasoning = if is_late && time_out > policy.shift_end {
        format!(
            "Arrived {} after grace end {}: late, so {} minutes past shift end are not overtime",
            time_in,
            grace_end,
            minutes_between(policy.shift_end, time_out)
        )
    } else if is_late {
        format!(
            "Arrived {} after grace end {}: regular time counted from arrival",
            time_in, grace_end
        )
    } else if overtime_minutes > 0 {
        format!(
            "Arrived {} on time: regular time counted from {}, {} minutes past shift end are overtime",
            time_in, effective_start, overtime_minutes
        )
    } else {
        format!(
            "Arrived {} on time: regular time counted from {}",
            time_in, effective_start
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "shift_policy".to_string(),
        rule_name: "Shift Policy Classification".to_string(),
        input: serde_json::json!({
            "time_in": time_in.to_string(),
            "time_out": time_out.to_string(),
            "shift_start": policy.shift_start.to_string(),
            "grace_end": grace_end.to_string(),
            "shift_end": policy.shift_end.to_string(),
            "unpaid_break_minutes": policy.unpaid_break_minutes
        }),
        output: serde_json::json!({
            "is_late": is_late,
            "effective_start": effective_start.to_string(),
            "effective_end": effective_end.to_string(),
            "regular_minutes": regular_minutes,
            "overtime_minutes": overtime_minutes
        }),
        reasoning,
    };

    ShiftPolicyResult {
        durations,
        anomaly: None,
        audit_step,
    }
}

fn excluded(
    time_in: Option<NaiveTime>,
    time_out: Option<NaiveTime>,
    anomaly: Option<AttendanceAnomaly>,
    step_number: u32,
) -> ShiftPolicyResult {
    let reason = anomaly
        .map(|a| a.to_string())
        .unwrap_or_else(|| "unusable punches".to_string());

    let audit_step = AuditStep {
        step_number,
        rule_id: "shift_policy".to_string(),
        rule_name: "Shift Policy Classification".to_string(),
        input: serde_json::json!({
            "time_in": time_in.map(|t| t.to_string()),
            "time_out": time_out.map(|t| t.to_string())
        }),
        output: serde_json::json!({
            "excluded": true,
            "anomaly": anomaly,
            "regular_minutes": 0,
            "overtime_minutes": 0
        }),
        reasoning: format!("Day excluded from pay: {}", reason),
    };

    ShiftPolicyResult {
        durations: WorkDurations::zero(),
        anomaly,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn time(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    fn classify_default(time_in: Option<NaiveTime>, time_out: Option<NaiveTime>) -> ShiftPolicyResult {
        compute_work_durations(time_in, time_out, &ShiftPolicy::default(), 1)
    }

    // ==========================================================================
    // Punctuality and grace window
    // ==========================================================================

    #[test]
    fn test_on_time_full_day() {
        let result = classify_default(time(8, 0), time(17, 0));
        assert_eq!(result.durations.regular_minutes, 480);
        assert_eq!(result.durations.overtime_minutes, 0);
        assert_eq!(result.anomaly, None);
    }

    #[test]
    fn test_arrival_at_grace_end_counts_from_punch() {
        // 08:10 is on time but not inside the grace window
        let result = classify_default(time(8, 10), time(17, 0));
        assert_eq!(result.durations.regular_minutes, 470);
        assert_eq!(result.durations.overtime_minutes, 0);
        assert_eq!(result.audit_step.output["is_late"], false);
        assert_eq!(result.audit_step.output["effective_start"], "08:10:00");
    }

    #[test]
    fn test_arrival_inside_grace_is_absorbed() {
        let result = classify_default(time(8, 5), time(17, 0));
        assert_eq!(result.durations.regular_minutes, 480);
        assert_eq!(result.audit_step.output["effective_start"], "08:00:00");
    }

    #[test]
    fn test_arrival_at_shift_start_is_not_moved() {
        let result = classify_default(time(8, 0), time(17, 0));
        assert_eq!(result.audit_step.output["effective_start"], "08:00:00");
        assert_eq!(result.durations.regular_hours(), dec("8"));
    }

    #[test]
    fn test_late_arrival_forfeits_overtime() {
        let result = classify_default(time(8, 15), time(18, 0));
        assert_eq!(result.durations.overtime_minutes, 0);
        // 08:15 to 17:00 is 525 minutes, minus the 60 minute break
        assert_eq!(result.durations.regular_minutes, 465);
        assert_eq!(result.audit_step.output["is_late"], true);
        assert!(result.audit_step.reasoning.contains("not overtime"));
    }

    #[test]
    fn test_one_minute_past_grace_is_late() {
        let result = classify_default(time(8, 11), time(19, 0));
        assert_eq!(result.durations.overtime_minutes, 0);
        assert_eq!(result.durations.regular_minutes, 469);
    }

    #[test]
    fn test_early_arrival_with_overtime() {
        // 07:55 to 17:00 is 545 minutes, minus the break
        let result = classify_default(time(7, 55), time(19, 0));
        assert_eq!(result.durations.regular_minutes, 485);
        assert_eq!(result.durations.overtime_hours(), dec("2"));
    }

    #[test]
    fn test_early_arrival_counts_from_punch() {
        let result = classify_default(time(7, 0), time(17, 0));
        assert_eq!(result.durations.regular_minutes, 540);
        assert_eq!(result.durations.overtime_minutes, 0);
        assert_eq!(result.audit_step.output["effective_start"], "07:00:00");
    }

    // ==========================================================================
    // Short and odd days
    // ==========================================================================

    #[test]
    fn test_short_day_shorter_than_break_is_zero() {
        let result = classify_default(time(8, 0), time(8, 45));
        assert_eq!(result.durations, WorkDurations::zero());
        assert_eq!(result.anomaly, None);
    }

    #[test]
    fn test_early_departure() {
        let result = classify_default(time(8, 0), time(12, 30));
        assert_eq!(result.durations.regular_minutes, 210);
        assert_eq!(result.durations.overtime_minutes, 0);
    }

    #[test]
    fn test_punches_entirely_after_shift_end() {
        // Late arrival after the shift ended: nothing regular, no overtime
        let result = classify_default(time(18, 0), time(21, 0));
        assert_eq!(result.durations, WorkDurations::zero());
    }

    #[test]
    fn test_punches_entirely_before_shift_start() {
        // Only the end is clipped, so 05:00 to 07:30 less the break remains
        let result = classify_default(time(5, 0), time(7, 30));
        assert_eq!(result.durations.regular_minutes, 90);
        assert_eq!(result.durations.overtime_minutes, 0);
    }

    #[test]
    fn test_zero_length_day() {
        let result = classify_default(time(9, 0), time(9, 0));
        assert_eq!(result.durations, WorkDurations::zero());
        assert_eq!(result.anomaly, None);
    }

    #[test]
    fn test_fractional_hours() {
        let result = classify_default(time(8, 0), time(17, 45));
        assert_eq!(result.durations.overtime_hours(), dec("0.75"));
    }

    // ==========================================================================
    // Malformed punches
    // ==========================================================================

    #[test]
    fn test_time_out_before_time_in_falls_back_to_zero() {
        let result = classify_default(time(17, 0), time(8, 0));
        assert_eq!(result.durations, WorkDurations::zero());
        assert_eq!(result.anomaly, Some(AttendanceAnomaly::TimeOutBeforeTimeIn));
        assert_eq!(result.audit_step.output["excluded"], true);
        assert!(result.audit_step.reasoning.contains("excluded"));
    }

    #[test]
    fn test_missing_time_in() {
        let result = classify_default(None, time(17, 0));
        assert_eq!(result.durations, WorkDurations::zero());
        assert_eq!(result.anomaly, Some(AttendanceAnomaly::MissingTimeIn));
    }

    #[test]
    fn test_missing_time_out() {
        let result = classify_default(time(8, 0), None);
        assert_eq!(result.anomaly, Some(AttendanceAnomaly::MissingTimeOut));
    }

    #[test]
    fn test_missing_both() {
        let result = classify_default(None, None);
        assert_eq!(result.anomaly, Some(AttendanceAnomaly::MissingBoth));
        assert_eq!(result.audit_step.output["anomaly"], "missing_both");
    }

    // ==========================================================================
    // Policy, durations and audit
    // ==========================================================================

    #[test]
    fn test_custom_policy() {
        let policy = ShiftPolicy {
            shift_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            grace_minutes: 15,
            shift_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            unpaid_break_minutes: 30,
        };
        let within = compute_work_durations(time(9, 10), time(19, 0), &policy, 1);
        assert_eq!(within.durations.regular_minutes, 510);
        assert_eq!(within.durations.overtime_minutes, 60);

        let result = compute_work_durations(time(9, 15), time(19, 0), &policy, 1);
        assert_eq!(result.durations.regular_minutes, 495);
        assert_eq!(result.durations.overtime_minutes, 60);
    }

    #[test]
    fn test_step_number_passed_through() {
        let result = compute_work_durations(time(8, 0), time(17, 0), &ShiftPolicy::default(), 7);
        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.rule_id, "shift_policy");
    }

    #[test]
    fn test_durations_sum() {
        let days = vec![
            WorkDurations {
                regular_minutes: 480,
                overtime_minutes: 30,
            },
            WorkDurations {
                regular_minutes: 450,
                overtime_minutes: 0,
            },
        ];
        let total: WorkDurations = days.into_iter().sum();
        assert_eq!(total.regular_minutes, 930);
        assert_eq!(total.overtime_minutes, 30);
        assert_eq!(total.total_minutes(), 960);
        assert_eq!(total.regular_hours(), dec("15.5"));
    }

    #[test]
    fn test_default_policy_is_valid() {
        assert!(ShiftPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_policy_validation_rejects_reversed_shift() {
        let policy = ShiftPolicy {
            shift_start: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            shift_end: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            ..ShiftPolicy::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_policy_validation_rejects_negative_break() {
        let policy = ShiftPolicy {
            unpaid_break_minutes: -5,
            ..ShiftPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_policy_validation_rejects_oversized_grace() {
        let policy = ShiftPolicy {
            grace_minutes: 9 * 60,
            ..ShiftPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_durations_are_bounded_by_span(
            in_minute in 0u32..1440,
            length in 0u32..1440,
        ) {
            let out_minute = (in_minute + length).min(1439);
            let time_in = NaiveTime::from_hms_opt(in_minute / 60, in_minute % 60, 0).unwrap();
            let time_out = NaiveTime::from_hms_opt(out_minute / 60, out_minute % 60, 0).unwrap();

            let result = compute_work_durations(
                Some(time_in),
                Some(time_out),
                &ShiftPolicy::default(),
                1,
            );
            let span = (time_out - time_in).num_minutes();

            prop_assert!(result.durations.regular_minutes >= 0);
            prop_assert!(result.durations.overtime_minutes >= 0);
            prop_assert!(result.durations.total_minutes() <= span);
            prop_assert_eq!(result.anomaly, None);
        }

        #[test]
        fn prop_reversed_punches_never_count(
            in_minute in 1u32..1440,
            back in 1u32..1440,
        ) {
            let out_minute = in_minute.saturating_sub(back.min(in_minute));
            prop_assume!(out_minute < in_minute);
            let time_in = NaiveTime::from_hms_opt(in_minute / 60, in_minute % 60, 0).unwrap();
            let time_out = NaiveTime::from_hms_opt(out_minute / 60, out_minute % 60, 0).unwrap();

            let result = compute_work_durations(
                Some(time_in),
                Some(time_out),
                &ShiftPolicy::default(),
                1,
            );
            prop_assert_eq!(result.durations, WorkDurations::zero());
            prop_assert_eq!(result.anomaly, Some(AttendanceAnomaly::TimeOutBeforeTimeIn));
        }
    }
}
