//! Performance benchmarks for the Payroll Engine.
//!
//! This benchmark suite covers:
//! - Single-day shift classification
//! - A monthly report for one employee (22 working days)
//! - The same report through the HTTP router
//! - Payroll runs of 100 and 1000 employees
//! - Scaling of the report with the number of attendance days
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{NaiveDate, NaiveTime};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{
    ShiftPolicy, build_payroll_report, build_payroll_run, compute_work_durations,
};
use payroll_engine::config::{ConfigLoader, PayrollConfig};
use payroll_engine::models::{AttendanceEvent, CompensationProfile, ReportingPeriod};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn june() -> ReportingPeriod {
    ReportingPeriod::Month {
        year: 2024,
        month: 6,
    }
}

fn create_profile(employee_id: &str) -> CompensationProfile {
    CompensationProfile {
        employee_id: employee_id.to_string(),
        hourly_rate: Decimal::new(53571, 2),
        basic_salary: Decimal::new(90_000, 0),
        rice_subsidy: Decimal::new(1_500, 0),
        phone_allowance: Decimal::new(2_000, 0),
        clothing_allowance: Decimal::new(1_000, 0),
    }
}

/// Creates `days` attendance events for an employee, alternating punctual
/// days with and without overtime and a late arrival every fifth day.
fn create_attendance(employee_id: &str, days: u32) -> Vec<AttendanceEvent> {
    (0..days)
        .map(|i| {
            let (time_in, time_out) = match i % 5 {
                0 => ((7, 55), (19, 0)),
                4 => ((8, 30), (17, 30)),
                _ => ((8, 0), (17, 0)),
            };
            AttendanceEvent {
                employee_id: employee_id.to_string(),
                date: NaiveDate::from_ymd_opt(2024, 6, 1 + i % 30).unwrap(),
                time_in: NaiveTime::from_hms_opt(time_in.0, time_in.1, 0),
                time_out: NaiveTime::from_hms_opt(time_out.0, time_out.1, 0),
            }
        })
        .collect()
}

/// Benchmark: One day's shift classification.
fn bench_single_day(c: &mut Criterion) {
    let policy = ShiftPolicy::default();
    let time_in = NaiveTime::from_hms_opt(7, 55, 0);
    let time_out = NaiveTime::from_hms_opt(19, 0, 0);

    c.bench_function("single_day", |b| {
        b.iter(|| compute_work_durations(black_box(time_in), black_box(time_out), &policy, 1))
    });
}

/// Benchmark: Monthly report for one employee.
fn bench_monthly_report(c: &mut Criterion) {
    let config = PayrollConfig::default();
    let profile = create_profile("10001");
    let attendance = create_attendance("10001", 22);

    c.bench_function("monthly_report", |b| {
        b.iter(|| build_payroll_report(&profile, &june(), black_box(&attendance), &config))
    });
}

/// Benchmark: Monthly report through the HTTP router.
fn bench_monthly_report_http(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/motorph").expect("Failed to load config");
    let router = create_router(AppState::new(config));
    let body = serde_json::to_string(&serde_json::json!({
        "profile": create_profile("10001"),
        "period": june(),
        "attendance": create_attendance("10001", 22)
    }))
    .unwrap();

    c.bench_function("monthly_report_http", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/report")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Payroll runs over many employees.
fn bench_payroll_run(c: &mut Criterion) {
    let config = PayrollConfig::default();
    let mut group = c.benchmark_group("payroll_run");
    // Reduce sample size for large runs to keep benchmark time reasonable
    group.sample_size(10);

    for employees in [100u32, 1000] {
        let profiles: Vec<CompensationProfile> = (0..employees)
            .map(|i| create_profile(&format!("{:05}", 10_000 + i)))
            .collect();
        let attendance: Vec<AttendanceEvent> = profiles
            .iter()
            .flat_map(|p| create_attendance(&p.employee_id, 22))
            .collect();

        group.throughput(Throughput::Elements(employees as u64));
        group.bench_with_input(BenchmarkId::new("employees", employees), &employees, |b, _| {
            b.iter(|| build_payroll_run(&profiles, &june(), black_box(&attendance), &config))
        });
    }

    group.finish();
}

/// Benchmark: Report cost as attendance grows.
fn bench_scaling(c: &mut Criterion) {
    let config = PayrollConfig::default();
    let profile = create_profile("10001");
    let mut group = c.benchmark_group("scaling");

    for days in [1u32, 5, 10, 22, 30] {
        let attendance = create_attendance("10001", days);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::new("days", days), &days, |b, _| {
            b.iter(|| build_payroll_report(&profile, &june(), black_box(&attendance), &config))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_day,
    bench_monthly_report,
    bench_monthly_report_http,
    bench_payroll_run,
    bench_scaling,
);
criterion_main!(benches);
