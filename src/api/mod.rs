//! HTTP API module for the Payroll Engine.
//!
//! This module provides the REST API endpoints for building payroll reports,
//! running payroll for many employees, computing statutory deductions, and
//! summarizing attendance into monthly hours.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DeductionRequest, HoursSummaryRequest, PayrollReportRequest, PayrollRunRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
