//! Request types for the Payroll Engine API.
//!
//! This module defines the JSON request structures for the API endpoints.
//! Domain models are accepted as-is; they already carry serde support and
//! validate themselves inside the calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceEvent, CompensationProfile, ReportingPeriod};

/// Request body for the `/payroll/report` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollReportRequest {
    /// The employee's compensation profile.
    pub profile: CompensationProfile,
    /// The reporting period.
    pub period: ReportingPeriod,
    /// Attendance events; events for other employees or dates are ignored.
    #[serde(default)]
    pub attendance: Vec<AttendanceEvent>,
}

/// Request body for the `/payroll/run` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunRequest {
    /// One compensation profile per employee in the run.
    pub profiles: Vec<CompensationProfile>,
    /// The reporting period shared by every report.
    pub period: ReportingPeriod,
    /// Attendance events for all employees.
    #[serde(default)]
    pub attendance: Vec<AttendanceEvent>,
}

/// Request body for the `/deductions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRequest {
    /// The employee the figures belong to, echoed in error messages.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Gross pay to deduct from.
    pub gross_pay: Decimal,
    /// Monthly basic salary, used for health insurance.
    pub basic_salary: Decimal,
}

impl DeductionRequest {
    /// Checks that neither amount is negative.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCompensation`] naming `gross_pay` or
    /// `basic_salary`.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [("gross_pay", self.gross_pay), ("basic_salary", self.basic_salary)] {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidCompensation {
                    employee_id: self.employee_id.clone().unwrap_or_default(),
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// Request body for the `/attendance/summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursSummaryRequest {
    /// Attendance events to summarize.
    pub attendance: Vec<AttendanceEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_request_deserialization() {
        let json = r#"{
            "profile": {
                "employee_id": "10001",
                "hourly_rate": "535.71",
                "basic_salary": "90000",
                "rice_subsidy": "1500"
            },
            "period": { "kind": "month", "year": 2024, "month": 6 },
            "attendance": [
                { "employee_id": "10001", "date": "2024-06-03", "time_in": "08:00:00", "time_out": "17:00:00" },
                { "employee_id": "10001", "date": "2024-06-04", "time_in": "08:00:00" }
            ]
        }"#;

        let request: PayrollReportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.profile.employee_id, "10001");
        assert_eq!(request.profile.phone_allowance, Decimal::ZERO);
        assert!(matches!(
            request.period,
            ReportingPeriod::Month {
                year: 2024,
                month: 6
            }
        ));
        assert_eq!(request.attendance.len(), 2);
        assert!(request.attendance[1].time_out.is_none());
    }

    #[test]
    fn test_week_period_deserialization() {
        let json = r#"{
            "profiles": [],
            "period": { "kind": "week", "start_date": "2024-06-03", "end_date": "2024-06-09" }
        }"#;

        let request: PayrollRunRequest = serde_json::from_str(json).unwrap();
        assert!(request.period.is_weekly());
        assert!(request.attendance.is_empty());
    }

    #[test]
    fn test_deduction_request_accepts_numbers_and_strings() {
        let request: DeductionRequest =
            serde_json::from_str(r#"{ "gross_pay": "50000", "basic_salary": 50000 }"#).unwrap();
        assert_eq!(request.gross_pay, request.basic_salary);
        assert!(request.employee_id.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_deduction_request_rejects_negative_amounts() {
        let request: DeductionRequest = serde_json::from_str(
            r#"{ "employee_id": "10001", "gross_pay": "-5000", "basic_salary": "20000" }"#,
        )
        .unwrap();
        match request.validate() {
            Err(EngineError::InvalidCompensation {
                employee_id, field, ..
            }) => {
                assert_eq!(employee_id, "10001");
                assert_eq!(field, "gross_pay");
            }
            other => panic!("Expected InvalidCompensation, got {:?}", other),
        }

        let request: DeductionRequest =
            serde_json::from_str(r#"{ "gross_pay": "5000", "basic_salary": "-1" }"#).unwrap();
        assert!(matches!(
            request.validate(),
            Err(EngineError::InvalidCompensation { field, .. }) if field == "basic_salary"
        ));
    }

    #[test]
    fn test_zero_amounts_are_valid() {
        let request: DeductionRequest =
            serde_json::from_str(r#"{ "gross_pay": "0", "basic_salary": "0" }"#).unwrap();
        assert!(request.validate().is_ok());
    }
}
