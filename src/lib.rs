//! Payroll Engine for time-clock based pay
//!
//! This crate turns daily clock-in/clock-out punches into pay. Each day is
//! classified into regular and overtime time under a fixed shift policy, the
//! period's hours are priced, and gross pay becomes net pay through statutory
//! contribution tables and a progressive withholding-tax schedule.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
