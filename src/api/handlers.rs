//! HTTP request handlers for the Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! handler tags its log lines with a fresh correlation id and maps
//! [`EngineError`](crate::error::EngineError) values onto HTTP errors.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    build_payroll_report, build_payroll_run, compute_deductions, summarize_monthly_hours,
};
use crate::error::EngineError;

use super::request::{DeductionRequest, HoursSummaryRequest, PayrollReportRequest, PayrollRunRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/report", post(payroll_report_handler))
        .route("/payroll/run", post(payroll_run_handler))
        .route("/deductions", post(deductions_handler))
        .route("/attendance/summary", post(hours_summary_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /payroll/report.
///
/// Builds one employee's payroll report for one period.
async fn payroll_report_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll report request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match build_payroll_report(
        &request.profile,
        &request.period,
        &request.attendance,
        state.config(),
    ) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %report.employee_id,
                period = %report.period.label(),
                status = ?report.status,
                gross_pay = %report.gross_pay,
                net_pay = %report.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll report completed"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /payroll/run.
///
/// Builds reports for every profile in the request; per-employee failures are
/// returned inside the run rather than failing the request. The run executes
/// on tokio's blocking pool.
async fn payroll_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll run request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let outcome = tokio::task::spawn_blocking(move || {
        build_payroll_run(
            &request.profiles,
            &request.period,
            &request.attendance,
            state.config(),
        )
    })
    .await
    .unwrap_or_else(|join_error| {
        Err(EngineError::CalculationError {
            message: format!("payroll run task failed: {}", join_error),
        })
    });

    match outcome {
        Ok(run) => {
            info!(
                correlation_id = %correlation_id,
                period = %run.period.label(),
                reports = run.reports.len(),
                failures = run.failures.len(),
                total_net_pay = %run.total_net_pay(),
                duration_us = start_time.elapsed().as_micros(),
                "Payroll run completed"
            );
            json_response(StatusCode::OK, run)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /deductions.
///
/// Returns the statutory deduction breakdown for a gross pay figure.
async fn deductions_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeductionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing deductions request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = request.validate().and_then(|()| {
        compute_deductions(
            request.gross_pay,
            request.basic_salary,
            state.config().tables(),
            1,
        )
    });
    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                gross_pay = %request.gross_pay,
                total_deductions = %result.breakdown.total,
                "Deductions computed"
            );
            json_response(StatusCode::OK, result.breakdown)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /attendance/summary.
///
/// Returns worked hours per employee per calendar month.
async fn hours_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<HoursSummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let summaries = summarize_monthly_hours(&request.attendance, state.config().shift_policy());
    info!(
        correlation_id = %correlation_id,
        events = request.attendance.len(),
        months = summaries.len(),
        "Attendance summary computed"
    );
    json_response(StatusCode::OK, summaries)
}
