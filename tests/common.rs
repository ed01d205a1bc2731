// ABOUTME: Shared test utilities for the Stride integration tests
// ABOUTME: Quiet logging setup plus providers wired to the synthetic platform SDKs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `stride`
//!
//! Fixture days and provider builders used across integration tests.

use std::sync::{Arc, Once};

use stride::backends::{
    DayFixture, HealthFixture, PlatformSdks, SyntheticControls, SyntheticHealthConnect,
    SyntheticHealthKit,
};
use stride::config::{StaleResultPolicy, StrideConfig};
use stride::models::{CalendarDate, DailyHealthReading, HostPlatform};
use stride::provider::HealthDataProvider;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; WARN keeps test output quiet
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

pub fn new_year() -> CalendarDate {
    CalendarDate::from_ymd(2024, 1, 1).unwrap()
}

pub fn new_years_eve() -> CalendarDate {
    CalendarDate::from_ymd(2023, 12, 31).unwrap()
}

/// Entries summing to 500 steps, 250.5 m, 2 flights
pub fn android_day() -> DayFixture {
    DayFixture {
        steps: vec![120, 380],
        distance_meters: vec![250.5],
        floors: vec![2.0],
    }
}

/// Day statistics of 4321 steps, 3000 m, 5 flights
pub fn apple_day() -> DayFixture {
    DayFixture {
        steps: vec![4321],
        distance_meters: vec![3000.0],
        floors: vec![5.0],
    }
}

pub fn quiet_day() -> DayFixture {
    DayFixture {
        steps: vec![1000],
        distance_meters: vec![800.0],
        floors: vec![1.0],
    }
}

pub fn reading(
    date: CalendarDate,
    steps: u64,
    distance_meters: f64,
    flights: u64,
) -> DailyHealthReading {
    DailyHealthReading {
        date,
        steps,
        distance_meters,
        flights_climbed: flights,
    }
}

/// Fixture with the Android scenario on New Year's Day and a quieter New Year's Eve
pub fn android_fixture() -> HealthFixture {
    HealthFixture::default()
        .with_day(new_year(), android_day())
        .with_day(new_years_eve(), quiet_day())
}

/// Fixture with the Apple scenario on New Year's Day and a quieter New Year's Eve
pub fn apple_fixture() -> HealthFixture {
    HealthFixture::default()
        .with_day(new_year(), apple_day())
        .with_day(new_years_eve(), quiet_day())
}

/// Synthetic SDK bindings for both platforms sharing one set of controls
pub fn synthetic_sdks(controls: &SyntheticControls) -> PlatformSdks {
    PlatformSdks::none()
        .with_health_kit(Arc::new(SyntheticHealthKit::new(controls.clone())))
        .with_health_connect(Arc::new(SyntheticHealthConnect::new(controls.clone())))
}

/// Provider for a platform over the synthetic SDKs
pub fn provider_with_policy(
    platform: &str,
    fixture: HealthFixture,
    policy: StaleResultPolicy,
) -> (HealthDataProvider, SyntheticControls) {
    init_test_logging();
    let controls = SyntheticControls::new(fixture);
    let config = StrideConfig::default()
        .with_platform(HostPlatform::from_os(platform))
        .with_stale_policy(policy);
    let provider = HealthDataProvider::new(&config, &synthetic_sdks(&controls));
    (provider, controls)
}

/// Provider with the default stale result policy
pub fn provider_for(
    platform: &str,
    fixture: HealthFixture,
) -> (HealthDataProvider, SyntheticControls) {
    provider_with_policy(platform, fixture, StaleResultPolicy::default())
}
