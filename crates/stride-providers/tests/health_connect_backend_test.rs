// ABOUTME: Integration tests for the Health Connect backend over the synthetic SDK
// ABOUTME: Covers per-type grants, day-scoped record reads, and client-side summation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveTime, Timelike, Utc};
use stride_providers::errors::ErrorCode;
use stride_providers::health_connect::{TimeRangeFilter, TimeRangeOperator, REQUESTED_PERMISSIONS};
use stride_providers::models::{
    CalendarDate, Metric, MetricSample, PermissionGrant, PermissionState, RecordType,
};
use stride_providers::{
    DayFixture, HealthBackend, HealthConnectBackend, HealthFixture, SdkCall, SyntheticControls,
    SyntheticHealthConnect,
};

fn new_year() -> CalendarDate {
    CalendarDate::from_ymd(2024, 1, 1).unwrap()
}

fn scenario_fixture() -> HealthFixture {
    HealthFixture::default()
        .with_day(
            new_year(),
            DayFixture {
                steps: vec![120, 380],
                distance_meters: vec![250.5],
                floors: vec![2.0],
            },
        )
        .with_day(
            new_year().add_days(1).unwrap(),
            DayFixture {
                steps: vec![9999],
                distance_meters: vec![1.0],
                floors: vec![7.0],
            },
        )
}

fn backend_with(fixture: HealthFixture) -> (HealthConnectBackend, SyntheticControls) {
    let controls = SyntheticControls::new(fixture);
    let api = Arc::new(SyntheticHealthConnect::new(controls.clone()));
    (HealthConnectBackend::new(api), controls)
}

#[tokio::test]
async fn test_requests_read_access_for_three_types() {
    let (backend, controls) = backend_with(scenario_fixture());

    let state = backend.request_access().await.unwrap();
    assert!(state.allows(Metric::Steps));
    assert!(state.allows(Metric::Distance));
    assert!(state.allows(Metric::FlightsClimbed));

    assert!(controls
        .calls()
        .contains(&SdkCall::RequestPermission(REQUESTED_PERMISSIONS.to_vec())));
}

#[tokio::test]
async fn test_scenario_sums_records_for_the_day() {
    let (backend, _controls) = backend_with(scenario_fixture());
    let state = backend.request_access().await.unwrap();
    let range = new_year().day_range().unwrap();

    let partial = backend.fetch_daily(&range, &state).await;
    assert_eq!(partial.steps, Some(500));
    assert_eq!(partial.distance_meters, Some(250.5));
    assert_eq!(partial.flights_climbed, Some(2));
}

#[tokio::test]
async fn test_filter_spans_local_day_inclusive() {
    let (backend, controls) = backend_with(scenario_fixture());
    let date = new_year();
    let range = date.day_range().unwrap();

    backend.fetch_metric(Metric::Steps, &range).await.unwrap();

    let calls = controls.calls();
    let Some(SdkCall::ReadRecords {
        record_type,
        filter,
    }) = calls.first()
    else {
        panic!("expected a read call, got {calls:?}");
    };
    assert_eq!(*record_type, RecordType::Steps);
    assert_eq!(filter.operator, TimeRangeOperator::Between);
    assert_eq!(*filter, TimeRangeFilter::for_range(&range));

    let start = filter.start_time.with_timezone(&Local);
    let end = filter.end_time.with_timezone(&Local);
    assert_eq!(start.date_naive(), date.naive());
    assert_eq!(end.date_naive(), date.naive());
    assert_eq!(start.time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
    assert_eq!(end.timestamp_subsec_millis(), 999);
}

#[tokio::test]
async fn test_records_outside_range_are_not_summed() {
    let (backend, _controls) = backend_with(scenario_fixture());
    let range = new_year().day_range().unwrap();

    let sample = backend.fetch_metric(Metric::Steps, &range).await.unwrap();
    assert_eq!(sample, MetricSample::Steps(500));

    let next = new_year().add_days(1).unwrap().day_range().unwrap();
    let sample = backend.fetch_metric(Metric::Steps, &next).await.unwrap();
    assert_eq!(sample, MetricSample::Steps(9999));
}

#[tokio::test]
async fn test_partial_grant_skips_denied_metric() {
    let (backend, controls) = backend_with(scenario_fixture());
    controls.deny_metric(Metric::Distance);

    let state = backend.request_access().await.unwrap();
    assert!(!state.allows(Metric::Distance));
    let PermissionState::HealthConnect { granted } = &state else {
        panic!("expected Health Connect grants, got {state:?}");
    };
    assert!(!granted.contains(&PermissionGrant::read(RecordType::Distance)));

    controls.clear_calls();
    let range = new_year().day_range().unwrap();
    let partial = backend.fetch_daily(&range, &state).await;

    assert_eq!(partial.distance_meters, None);
    assert_eq!(partial.steps, Some(500));
    assert!(!controls.fetched_metrics().contains(&Metric::Distance));
}

#[tokio::test]
async fn test_empty_grant_list_is_denied() {
    let (backend, controls) = backend_with(scenario_fixture());
    for metric in Metric::ALL {
        controls.deny_metric(metric);
    }

    let err = backend.request_access().await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PermissionDenied);
}

#[tokio::test]
async fn test_uninitialized_client_is_unavailable() {
    let (backend, controls) = backend_with(scenario_fixture());
    controls.set_available(false);

    let err = backend.request_access().await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PlatformUnavailable);
    assert_eq!(controls.calls(), vec![SdkCall::Initialize]);
}

#[test]
fn test_filter_serializes_as_rfc3339() {
    let range = new_year().day_range().unwrap();
    let json = serde_json::to_value(TimeRangeFilter::for_range(&range)).unwrap();

    assert_eq!(json["operator"], "between");
    let start: DateTime<Utc> = json["startTime"].as_str().unwrap().parse().unwrap();
    let end: DateTime<Utc> = json["endTime"].as_str().unwrap().parse().unwrap();
    assert_eq!(start, range.start_utc());
    assert_eq!(end, range.end_utc());
}
