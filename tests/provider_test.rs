// ABOUTME: Integration tests for the health data provider over the synthetic platform SDKs
// ABOUTME: Covers access resolution, per-metric publishing, failure isolation, and stale results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::time::Duration;

use common::{
    android_fixture, apple_day, apple_fixture, new_year, new_years_eve, provider_for,
    provider_with_policy, reading,
};
use stride::backends::{HealthFixture, SdkCall, SyntheticControls};
use stride::config::StaleResultPolicy;
use stride::models::{Metric, PermissionState};

fn count_calls(controls: &SyntheticControls, matches: impl Fn(&SdkCall) -> bool) -> usize {
    controls.calls().iter().filter(|call| matches(call)).count()
}

#[tokio::test]
async fn test_reading_is_zero_before_any_fetch() {
    let (provider, controls) = provider_for("android", android_fixture());

    let current = provider.current();
    assert!(current.is_zero());
    assert_eq!(provider.permission(), PermissionState::Unauthorized);
    assert!(controls.calls().is_empty());
}

#[tokio::test]
async fn test_android_day_is_summed_from_records() {
    let (provider, _controls) = provider_for("android", android_fixture());

    provider.observe(new_year()).await;
    provider.settle().await;

    assert_eq!(provider.backend_name(), Some("health_connect"));
    assert_eq!(provider.current(), reading(new_year(), 500, 250.5, 2));
    assert_eq!(provider.stats().metrics_skipped, 0);
}

#[tokio::test]
async fn test_ios_day_uses_daily_statistics() {
    let (provider, controls) = provider_for("ios", apple_fixture());

    provider.observe(new_year()).await;
    provider.settle().await;

    assert_eq!(provider.backend_name(), Some("healthkit"));
    assert_eq!(provider.current(), reading(new_year(), 4321, 3000.0, 5));
    assert_eq!(
        provider.permission(),
        PermissionState::HealthKit { authorized: true }
    );

    let calls = controls.calls();
    let init = calls
        .iter()
        .position(|call| matches!(call, SdkCall::InitHealthKit(_)))
        .unwrap();
    let first_fetch = calls
        .iter()
        .position(|call| call.fetched_metric().is_some())
        .unwrap();
    assert!(init < first_fetch, "fetches must wait for access");
}

#[tokio::test]
async fn test_subscriber_sees_published_reading() {
    let (provider, _controls) = provider_for("android", android_fixture());

    let mut readings = provider.observe(new_year()).await;
    let published = *tokio::time::timeout(
        Duration::from_secs(5),
        readings.wait_for(|r| r.steps == 500 && r.flights_climbed == 2),
    )
    .await
    .expect("reading not published in time")
    .expect("provider dropped");

    assert_eq!(published.date, new_year());
    assert!((published.distance_meters - 250.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_denied_metric_is_never_fetched() {
    let (provider, controls) = provider_for("android", android_fixture());
    controls.deny_metric(Metric::Distance);

    provider.observe(new_year()).await;
    provider.settle().await;

    let permission = provider.permission();
    assert!(permission.allows(Metric::Steps));
    assert!(!permission.allows(Metric::Distance));
    assert!(!controls.fetched_metrics().contains(&Metric::Distance));

    let current = provider.current();
    assert_eq!(current.steps, 500);
    assert_eq!(current.flights_climbed, 2);
    assert!(current.distance_meters.abs() < f64::EPSILON);
    assert_eq!(provider.stats().metrics_skipped, 1);
}

#[tokio::test]
async fn test_healthkit_denial_leaves_reading_at_zero() {
    let (provider, controls) = provider_for("ios", apple_fixture());
    controls.deny_metric(Metric::Steps);

    provider.observe(new_year()).await;
    provider.settle().await;

    assert_eq!(provider.permission(), PermissionState::Unauthorized);
    assert!(controls.fetched_metrics().is_empty());
    assert!(provider.current().is_zero());
}

#[tokio::test]
async fn test_unsupported_platform_stays_at_zero() {
    let (provider, controls) = provider_for("linux", android_fixture());

    assert_eq!(provider.backend_name(), None);
    assert_eq!(provider.platform().as_str(), "linux");

    provider.observe(new_year()).await;
    provider.settle().await;

    assert_eq!(provider.permission(), PermissionState::Unauthorized);
    assert!(provider.current().is_zero());
    assert!(controls.calls().is_empty());
    assert_eq!(provider.refresh(), None);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_value() {
    let (provider, controls) = provider_for("android", android_fixture());

    provider.observe(new_year()).await;
    provider.settle().await;
    assert_eq!(provider.current(), reading(new_year(), 500, 250.5, 2));

    controls.fail_metric(Metric::FlightsClimbed);
    provider.set_date(new_years_eve());
    provider.settle().await;

    // Steps and distance move to the new day, flights keeps the old value
    assert_eq!(provider.current(), reading(new_years_eve(), 1000, 800.0, 2));
    assert_eq!(provider.stats().fetches_failed, 1);

    controls.recover_metric(Metric::FlightsClimbed);
    assert!(provider.refresh().is_some());
    provider.settle().await;

    assert_eq!(provider.current(), reading(new_years_eve(), 1000, 800.0, 1));
}

#[tokio::test]
async fn test_missing_day_reads_as_zero() {
    let (provider, _controls) = provider_for("ios", HealthFixture::default());

    provider.observe(new_year()).await;
    provider.settle().await;

    assert_eq!(provider.current(), reading(new_year(), 0, 0.0, 0));
    assert_eq!(provider.stats().fetches_succeeded, 3);
}

#[tokio::test]
async fn test_reobserving_same_date_is_idempotent() {
    let (provider, controls) = provider_for("android", android_fixture());

    provider.observe(new_year()).await;
    provider.settle().await;
    let first = provider.current();
    let calls_after_first = controls.calls().len();

    provider.observe(new_year()).await;
    provider.settle().await;

    assert_eq!(provider.current(), first);
    assert_eq!(controls.calls().len(), calls_after_first);
    assert_eq!(provider.stats().cycles_started, 1);
}

#[tokio::test]
async fn test_access_is_requested_once_across_dates() {
    let (provider, controls) = provider_for("android", android_fixture());

    provider.observe(new_year()).await;
    provider.settle().await;
    provider.observe(new_years_eve()).await;
    provider.settle().await;

    assert_eq!(
        count_calls(&controls, |call| matches!(call, SdkCall::RequestPermission(_))),
        1
    );
    assert_eq!(provider.current(), reading(new_years_eve(), 1000, 800.0, 1));
}

#[tokio::test]
async fn test_concurrent_observers_share_one_access_request() {
    let (provider, controls) = provider_for("ios", apple_fixture());
    let other = provider.clone();

    tokio::join!(provider.observe(new_year()), other.observe(new_year()));
    provider.settle().await;

    assert_eq!(
        count_calls(&controls, |call| matches!(call, SdkCall::InitHealthKit(_))),
        1
    );
    assert_eq!(other.current(), reading(new_year(), 4321, 3000.0, 5));
}

#[tokio::test]
async fn test_refresh_picks_up_new_data() {
    let (provider, controls) = provider_for("android", android_fixture());

    provider.observe(new_year()).await;
    provider.settle().await;

    controls.set_day(new_year(), apple_day());
    provider.refresh();
    provider.settle().await;

    assert_eq!(provider.current(), reading(new_year(), 4321, 3000.0, 5));
}

#[tokio::test(start_paused = true)]
async fn test_superseded_results_are_discarded() {
    let (provider, controls) = provider_with_policy(
        "android",
        android_fixture(),
        StaleResultPolicy::DiscardSuperseded,
    );
    controls.set_latency(new_years_eve(), Duration::from_secs(5));

    provider.observe(new_years_eve()).await;
    provider.set_date(new_year());
    provider.settle().await;

    assert_eq!(provider.current(), reading(new_year(), 500, 250.5, 2));
    let stats = provider.stats();
    assert_eq!(stats.results_discarded, 3);
    assert_eq!(stats.fetches_succeeded, 6);
}

#[tokio::test(start_paused = true)]
async fn test_last_write_wins_lets_slow_results_land() {
    let (provider, controls) = provider_with_policy(
        "android",
        android_fixture(),
        StaleResultPolicy::LastWriteWins,
    );
    controls.set_latency(new_years_eve(), Duration::from_secs(5));

    provider.observe(new_years_eve()).await;
    provider.set_date(new_year());
    provider.settle().await;

    assert_eq!(provider.current(), reading(new_years_eve(), 1000, 800.0, 1));
    assert_eq!(provider.stats().results_discarded, 0);
}

#[tokio::test]
async fn test_reauthorize_after_denial_fetches() {
    let (provider, controls) = provider_for("android", android_fixture());
    for metric in Metric::ALL {
        controls.deny_metric(metric);
    }

    provider.observe(new_year()).await;
    provider.settle().await;
    assert_eq!(provider.permission(), PermissionState::Unauthorized);
    assert!(controls.fetched_metrics().is_empty());

    // Initializing again does not ask again
    provider.initialize().await;
    assert_eq!(
        count_calls(&controls, |call| matches!(call, SdkCall::RequestPermission(_))),
        1
    );

    controls.grant_all();
    let permission = provider.reauthorize().await;
    provider.settle().await;

    assert!(permission.is_authorized());
    assert_eq!(provider.current(), reading(new_year(), 500, 250.5, 2));
}

#[tokio::test]
async fn test_unavailable_platform_is_terminal() {
    let (provider, controls) = provider_for("android", android_fixture());
    controls.set_available(false);

    provider.observe(new_year()).await;
    provider.settle().await;
    assert!(provider.current().is_zero());

    controls.set_available(true);
    let permission = provider.reauthorize().await;
    provider.settle().await;

    assert_eq!(permission, PermissionState::Unauthorized);
    assert!(provider.current().is_zero());
    assert_eq!(
        count_calls(&controls, |call| matches!(call, SdkCall::Initialize)),
        1
    );
}

#[tokio::test]
async fn test_stats_count_fetches() {
    let (provider, controls) = provider_for("android", android_fixture());
    controls.fail_metric(Metric::Steps);

    provider.observe(new_year()).await;
    provider.settle().await;

    let stats = provider.stats();
    assert_eq!(stats.cycles_started, 1);
    assert_eq!(stats.fetches_succeeded, 2);
    assert_eq!(stats.fetches_failed, 1);
    assert_eq!(stats.fetches_completed(), 3);
    assert_eq!(provider.current().steps, 0);
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_settle_leaves_fetches_running() {
    let (provider, controls) = provider_for("android", android_fixture());
    controls.set_latency(new_year(), Duration::from_secs(5));

    provider.observe(new_year()).await;
    let waited = tokio::time::timeout(Duration::from_secs(1), provider.settle()).await;
    assert!(waited.is_err(), "fetches should still be running after 1s");
    assert_eq!(provider.in_flight(), 3);

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(provider.current(), reading(new_year(), 500, 250.5, 2));
    assert_eq!(provider.stats().fetches_succeeded, 3);
    assert_eq!(provider.in_flight(), 0);
    provider.settle().await;
}

#[tokio::test(start_paused = true)]
async fn test_date_change_does_not_cancel_running_fetches() {
    let (provider, controls) = provider_for("android", android_fixture());
    controls.set_latency(new_years_eve(), Duration::from_secs(5));

    provider.observe(new_years_eve()).await;
    provider.set_date(new_year());
    provider.settle().await;

    // The superseded fetches ran to completion and were counted, then dropped
    let stats = provider.stats();
    assert_eq!(stats.fetches_completed(), 6);
    assert_eq!(stats.results_discarded, 3);
    assert_eq!(stats.metrics_skipped, 0);
}
