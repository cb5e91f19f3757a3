//! Performance benchmarks for the leave entitlement engine.
//!
//! This benchmark suite verifies that the preview path meets performance
//! targets:
//! - Single one-week preview: < 100μs mean
//! - Full-year preview (365 days): < 1ms mean
//! - Batch of 100 previews: < 100ms mean
//! - Batch of 1000 previews: < 500ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use leave_engine::api::{create_router, AppState};
use leave_engine::config::ConfigLoader;
use leave_engine::models::{Employee, EmployeeStatus, EmploymentType, PublicHoliday};
use leave_engine::store::{LeaveStore, MemoryStore};

use axum::{body::Body, http::Request};
use chrono::NaiveDate;
use tower::ServiceExt;

/// Creates a state with loaded configuration and a seeded store.
fn create_bench_state(employee_count: usize) -> AppState {
    let config = ConfigLoader::load("./config/leave").expect("Failed to load config");
    let store = Arc::new(MemoryStore::new());

    for i in 0..employee_count {
        store
            .upsert_employee(Employee {
                id: format!("emp_bench_{:04}", i),
                employment_type: EmploymentType::FullTime,
                hours_per_week: None,
                start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                service_start_date: None,
                department_id: "dept_care".to_string(),
                entity_id: "entity_au".to_string(),
                state: Some("VIC".to_string()),
                status: EmployeeStatus::Active,
            })
            .unwrap();
    }

    // A typical national holiday calendar
    for (i, (month, day, name)) in [
        (1u32, 1u32, "New Year's Day"),
        (1, 26, "Australia Day"),
        (4, 25, "Anzac Day"),
        (12, 25, "Christmas Day"),
        (12, 26, "Boxing Day"),
    ]
    .iter()
    .enumerate()
    {
        store
            .upsert_holiday(PublicHoliday {
                id: format!("hol_{:02}", i),
                date: NaiveDate::from_ymd_opt(2026, *month, *day).unwrap(),
                name: name.to_string(),
                entity_id: None,
                state_region: None,
                is_paid: true,
                is_active: true,
            })
            .unwrap();
    }

    AppState::new(config, store)
}

fn preview_body(employee_id: &str, start: &str, end: &str) -> String {
    serde_json::json!({
        "employee_id": employee_id,
        "start_date": start,
        "end_date": end
    })
    .to_string()
}

/// Benchmark: one-week preview.
///
/// Target: < 100μs mean
fn bench_single_week_preview(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_bench_state(1);
    let router = create_router(state);
    let body = preview_body("emp_bench_0000", "2026-03-02", "2026-03-08");

    c.bench_function("single_week_preview", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/leave/chargeable")
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

/// Benchmark: full-year preview, 365 walked days.
///
/// Target: < 1ms mean
fn bench_full_year_preview(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_bench_state(1);
    let router = create_router(state);
    let body = preview_body("emp_bench_0000", "2026-01-01", "2026-12-31");

    c.bench_function("full_year_preview", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/leave/chargeable")
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

/// Benchmark: batch of 100 previews for distinct employees.
///
/// Target: < 100ms mean
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_bench_state(100);

    let requests: Vec<String> = (0..100)
        .map(|i| preview_body(&format!("emp_bench_{:04}", i), "2026-03-02", "2026-03-15"))
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/leave/chargeable")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: batch of 1000 previews.
///
/// Target: < 500ms mean
fn bench_batch_1000(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_bench_state(1000);

    let requests: Vec<String> = (0..1000)
        .map(|i| preview_body(&format!("emp_bench_{:04}", i), "2026-03-02", "2026-03-15"))
        .collect();

    let mut group = c.benchmark_group("large_batch_processing");
    group.throughput(Throughput::Elements(1000));
    // Reduce sample size for large batches to keep benchmark time reasonable
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(1000);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/leave/chargeable")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: range lengths to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_bench_state(1);

    let mut group = c.benchmark_group("scaling");

    for days in [1u64, 7, 14, 28, 90].iter() {
        let router = create_router(state.clone());
        let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let end = start + chrono::Duration::days(*days as i64 - 1);
        let body = preview_body("emp_bench_0000", &start.to_string(), &end.to_string());

        group.throughput(Throughput::Elements(*days));
        group.bench_with_input(BenchmarkId::new("range_days", days), days, |b, _| {
            b.to_async(&rt).iter(|| async {
                let router = router.clone();
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/leave/chargeable")
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

    group.finish();
}

criterion_group!(
    benches,
    bench_single_week_preview,
    bench_full_year_preview,
    bench_batch_100,
    bench_batch_1000,
    bench_scaling,
);
criterion_main!(benches);
