//! Payroll report aggregation.
//!
//! This module ties the other calculations together. For one employee and one
//! reporting period it classifies every attendance day, sums the hours, prices
//! them, takes statutory deductions from the aggregated gross, adds allowances
//! and records each decision in the audit trace.
//!
//! [`build_payroll_run`] does the same for many employees at once, in
//! parallel, without letting one bad profile abort the others.

use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceEvent, AuditStep, AuditTrace, CompensationProfile, DeductionBreakdown,
    PayrollReport, PayrollRun, ReportStatus, ReportWarning, ReportingPeriod, RunFailure,
    WARNING_MALFORMED_ATTENDANCE, WARNING_NO_ATTENDANCE,
};

use super::allowances::compute_allowances;
use super::deductions::compute_deductions;
use super::gross_pay::compute_gross_pay;
use super::shift_policy::{WorkDurations, compute_work_durations};

/// Builds the payroll report for one employee over one period.
///
/// Attendance events for other employees or outside the period are ignored.
/// Malformed days are excluded from pay and reported as warnings; they never
/// fail the call. A period with no attendance for the employee yields a
/// [`ReportStatus::NoData`] report with every figure zero.
///
/// The report carries no timestamps or generated identifiers, so calling this
/// twice with the same inputs returns equal reports.
///
/// # Arguments
///
/// * `profile` - The employee's compensation profile
/// * `period` - The reporting period
/// * `attendance` - Attendance events; may include other employees and dates
/// * `config` - The shift policy, pay policy and statutory tables
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidCompensation`] for a bad
/// profile, [`crate::error::EngineError::InvalidPeriod`] for a bad period,
/// and [`crate::error::EngineError::CalculationError`] if summed hours come
/// out negative or a pay amount exceeds the decimal range.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::build_payroll_report;
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{
///     AttendanceEvent, CompensationProfile, ReportStatus, ReportingPeriod,
/// };
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let profile = CompensationProfile {
///     employee_id: "10001".to_string(),
///     hourly_rate: Decimal::from_str("100").unwrap(),
///     basic_salary: Decimal::from_str("20000").unwrap(),
///     rice_subsidy: Decimal::ZERO,
///     phone_allowance: Decimal::ZERO,
///     clothing_allowance: Decimal::ZERO,
/// };
/// let attendance = vec![AttendanceEvent {
///     employee_id: "10001".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     time_in: NaiveTime::from_hms_opt(8, 5, 0),
///     time_out: NaiveTime::from_hms_opt(19, 0, 0),
/// }];
///
/// let report = build_payroll_report(
///     &profile,
///     &ReportingPeriod::Month { year: 2024, month: 6 },
///     &attendance,
///     &PayrollConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(report.status, ReportStatus::Complete);
/// assert_eq!(report.regular_hours, Decimal::from(8));
/// assert_eq!(report.overtime_hours, Decimal::from(2));
/// // 8 x 100 + 2 x 100 x 1.25
/// assert_eq!(report.gross_pay, Decimal::from(1050));
/// ```
pub fn build_payroll_report(
    profile: &CompensationProfile,
    period: &ReportingPeriod,
    attendance: &[AttendanceEvent],
    config: &PayrollConfig,
) -> EngineResult<PayrollReport> {
    profile.validate()?;
    period.validate()?;

    let mut events: Vec<&AttendanceEvent> = attendance
        .iter()
        .filter(|event| event.belongs_to(&profile.employee_id) && period.contains_date(event.date))
        .collect();
    events.sort_by_key(|event| event.date);

    debug!(
        employee_id = %profile.employee_id,
        period = %period.label(),
        events = events.len(),
        "Building payroll report"
    );

    if events.is_empty() {
        return Ok(no_data_report(profile, period));
    }

    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<ReportWarning> = Vec::new();
    let mut step_number: u32 = 1;
    let mut totals = WorkDurations::zero();
    let mut days_counted: u32 = 0;
    let mut days_excluded: u32 = 0;

    for event in &events {
        let mut result = compute_work_durations(
            event.time_in,
            event.time_out,
            config.shift_policy(),
            step_number,
        );
        if let Some(input) = result.audit_step.input.as_object_mut() {
            input.insert("date".to_string(), serde_json::json!(event.date.to_string()));
        }
        audit_steps.push(result.audit_step);
        step_number += 1;

        match result.anomaly {
            Some(anomaly) => {
                warn!(
                    employee_id = %profile.employee_id,
                    date = %event.date,
                    anomaly = %anomaly,
                    "Excluding malformed attendance"
                );
                days_excluded += 1;
                warnings.push(ReportWarning {
                    code: WARNING_MALFORMED_ATTENDANCE.to_string(),
                    message: format!("Attendance on {} excluded: {}", event.date, anomaly),
                    date: Some(event.date),
                });
            }
            None => {
                days_counted += 1;
                totals = totals + result.durations;
            }
        }
    }

    let regular_hours = totals.regular_hours();
    let overtime_hours = totals.overtime_hours();
    let pay_policy = config.pay_policy();

    let gross = compute_gross_pay(
        regular_hours,
        overtime_hours,
        profile.hourly_rate,
        pay_policy.overtime_multiplier,
        step_number,
    )?;
    audit_steps.push(gross.audit_step);
    step_number += 1;

    let deductions = compute_deductions(
        gross.gross_pay,
        profile.basic_salary,
        config.tables(),
        step_number,
    )?;
    step_number += deductions.audit_steps.len() as u32;
    audit_steps.extend(deductions.audit_steps);

    let allowances =
        compute_allowances(profile, period, pay_policy.weeks_per_month, step_number)?;
    audit_steps.push(allowances.audit_step);
    step_number += 1;

    let net_pay = gross
        .gross_pay
        .checked_sub(deductions.breakdown.total)
        .and_then(|pay| pay.checked_add(allowances.total))
        .ok_or_else(|| EngineError::overflow("net pay"))?;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_pay": gross.gross_pay.normalize().to_string(),
            "total_deductions": deductions.breakdown.total.normalize().to_string(),
            "total_allowances": allowances.total.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.normalize().to_string()
        }),
        reasoning: format!(
            "${} gross - ${} deductions + ${} allowances = ${}",
            gross.gross_pay.normalize(),
            deductions.breakdown.total.normalize(),
            allowances.total.normalize(),
            net_pay.normalize()
        ),
    });

    let status = if days_excluded > 0 {
        ReportStatus::Incomplete
    } else {
        ReportStatus::Complete
    };

    debug!(
        employee_id = %profile.employee_id,
        period = %period.label(),
        days_counted,
        days_excluded,
        gross_pay = %gross.gross_pay,
        net_pay = %net_pay,
        "Payroll report built"
    );

    Ok(PayrollReport {
        employee_id: profile.employee_id.clone(),
        period: period.clone(),
        days_counted,
        days_excluded,
        regular_hours,
        overtime_hours,
        regular_pay: gross.regular_pay,
        overtime_pay: gross.overtime_pay,
        gross_pay: gross.gross_pay,
        deductions: deductions.breakdown,
        allowances: allowances.allowances,
        total_allowances: allowances.total,
        net_pay,
        status,
        warnings,
        audit_trace: AuditTrace { steps: audit_steps },
    })
}

fn no_data_report(profile: &CompensationProfile, period: &ReportingPeriod) -> PayrollReport {
    let audit_step = AuditStep {
        step_number: 1,
        rule_id: "attendance_filter".to_string(),
        rule_name: "Attendance Filter".to_string(),
        input: serde_json::json!({
            "employee_id": profile.employee_id,
            "period": period.label()
        }),
        output: serde_json::json!({
            "events": 0
        }),
        reasoning: format!(
            "No attendance for employee {} in {}; all figures are zero",
            profile.employee_id,
            period.label()
        ),
    };

    PayrollReport {
        employee_id: profile.employee_id.clone(),
        period: period.clone(),
        days_counted: 0,
        days_excluded: 0,
        regular_hours: Decimal::ZERO,
        overtime_hours: Decimal::ZERO,
        regular_pay: Decimal::ZERO,
        overtime_pay: Decimal::ZERO,
        gross_pay: Decimal::ZERO,
        deductions: DeductionBreakdown::zero(),
        allowances: vec![],
        total_allowances: Decimal::ZERO,
        net_pay: Decimal::ZERO,
        status: ReportStatus::NoData,
        warnings: vec![ReportWarning {
            code: WARNING_NO_ATTENDANCE.to_string(),
            message: format!(
                "No attendance recorded for employee {} in {}",
                profile.employee_id,
                period.label()
            ),
            date: None,
        }],
        audit_trace: AuditTrace {
            steps: vec![audit_step],
        },
    }
}

/// Builds payroll reports for many employees over one period.
///
/// Reports are computed in parallel. Results keep the order of `profiles`. An
/// employee whose report fails (for example, an invalid compensation profile)
/// is recorded as a [`RunFailure`] and the rest of the run continues.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidPeriod`] when the period itself
/// is invalid, since no report could be built.
pub fn build_payroll_run(
    profiles: &[CompensationProfile],
    period: &ReportingPeriod,
    attendance: &[AttendanceEvent],
    config: &PayrollConfig,
) -> EngineResult<PayrollRun> {
    period.validate()?;

    let outcomes: Vec<EngineResult<PayrollReport>> = profiles
        .par_iter()
        .map(|profile| build_payroll_report(profile, period, attendance, config))
        .collect();

    let mut reports = Vec::with_capacity(profiles.len());
    let mut failures = Vec::new();
    for (profile, outcome) in profiles.iter().zip(outcomes) {
        match outcome {
            Ok(report) => reports.push(report),
            Err(err) => {
                warn!(
                    employee_id = %profile.employee_id,
                    period = %period.label(),
                    error = %err,
                    "Payroll report failed"
                );
                failures.push(RunFailure {
                    employee_id: profile.employee_id.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    debug!(
        period = %period.label(),
        reports = reports.len(),
        failures = failures.len(),
        "Payroll run complete"
    );

    Ok(PayrollRun {
        period: period.clone(),
        reports,
        failures,
    })
}
