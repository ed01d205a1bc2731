// ABOUTME: In-memory HealthKit and Health Connect SDK stand-ins for development and testing
// ABOUTME: Serves per-day fixture data with injectable denials, failures, and latency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Mutex poisoning is recovered with `into_inner`: the guarded state is plain data
// and stays consistent even if a test thread panicked while holding it.

//! # Synthetic Health SDKs
//!
//! Stand-ins for the two platform SDK bindings, backed by one shared
//! [`SyntheticControls`] so tests and demos can drive both the same way:
//!
//! - **Fixture data**: per-day step, distance and floor entries ([`HealthFixture`])
//! - **Denials**: metrics the simulated user refuses to share
//! - **Failures**: metrics whose queries error until recovered
//! - **Latency**: per-day delays for exercising out-of-order completion
//! - **Call log**: every SDK call with its arguments ([`SdkCall`])
//!
//! `SyntheticHealthKit` pre-aggregates each day like `HealthKit` does;
//! `SyntheticHealthConnect` hands back one timed record per fixture entry and
//! leaves summation to the backend.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::SdkError;
use crate::errors::{HealthError, HealthResult};
use crate::health_connect::{
    DistanceRecord, FloorsClimbedRecord, HealthConnectApi, HealthConnectRecord, Length,
    ReadRecordsOptions, ReadRecordsResult, StepsRecord, TimeRangeFilter,
};
use crate::healthkit::{
    HealthInputOptions, HealthKitApi, HealthKitPermission, HealthKitPermissions, HealthValue,
};
use crate::models::{CalendarDate, Metric, PermissionGrant, RecordType};

/// Raw entries recorded on one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayFixture {
    /// Step counts, one per record
    #[serde(default)]
    pub steps: Vec<u64>,
    /// Distances in metres, one per record
    #[serde(default)]
    pub distance_meters: Vec<f64>,
    /// Floors climbed, one per record
    #[serde(default)]
    pub floors: Vec<f64>,
}

impl DayFixture {
    /// Day total the way `HealthKit` would report it
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn total(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Steps => self.steps.iter().map(|s| *s as f64).sum(),
            Metric::Distance => self.distance_meters.iter().sum(),
            Metric::FlightsClimbed => self.floors.iter().sum(),
        }
    }

    /// One record per entry, spaced a minute apart from local midnight
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidDate` if the day has no local range.
    pub fn records(
        &self,
        date: CalendarDate,
        record_type: RecordType,
    ) -> HealthResult<Vec<HealthConnectRecord>> {
        let day_start = date.day_range()?.start_utc();
        let slot = |i: usize| {
            let minute = i64::try_from(i.min(1438)).unwrap_or(1438);
            let start = day_start + chrono::Duration::minutes(minute);
            (start, start + chrono::Duration::seconds(59))
        };

        Ok(match record_type {
            RecordType::Steps => self
                .steps
                .iter()
                .enumerate()
                .map(|(i, count)| {
                    let (start_time, end_time) = slot(i);
                    HealthConnectRecord::Steps(StepsRecord {
                        count: *count,
                        start_time,
                        end_time,
                    })
                })
                .collect(),
            RecordType::Distance => self
                .distance_meters
                .iter()
                .enumerate()
                .map(|(i, meters)| {
                    let (start_time, end_time) = slot(i);
                    HealthConnectRecord::Distance(DistanceRecord {
                        distance: Length { in_meters: *meters },
                        start_time,
                        end_time,
                    })
                })
                .collect(),
            RecordType::FloorsClimbed => self
                .floors
                .iter()
                .enumerate()
                .map(|(i, floors)| {
                    let (start_time, end_time) = slot(i);
                    HealthConnectRecord::FloorsClimbed(FloorsClimbedRecord {
                        floors: *floors,
                        start_time,
                        end_time,
                    })
                })
                .collect(),
        })
    }
}

/// Simulated device: data per day plus permission and failure switches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthFixture {
    /// Entries keyed by `YYYY-MM-DD`
    #[serde(default)]
    pub days: BTreeMap<CalendarDate, DayFixture>,
    /// Metrics the simulated user refuses to share
    #[serde(default)]
    pub denied: BTreeSet<Metric>,
    /// Metrics whose queries fail
    #[serde(default)]
    pub failing: BTreeSet<Metric>,
    /// Whether the health service is absent
    #[serde(default)]
    pub unavailable: bool,
}

impl HealthFixture {
    /// Parse a fixture from JSON
    ///
    /// # Errors
    ///
    /// Returns `HealthError::Fixture` if the JSON does not match the fixture shape.
    pub fn from_json_str(json: &str) -> HealthResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a fixture file
    ///
    /// # Errors
    ///
    /// Returns `HealthError::Fixture` if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> HealthResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| HealthError::fixture(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Add a day of entries
    #[must_use]
    pub fn with_day(mut self, date: CalendarDate, day: DayFixture) -> Self {
        self.days.insert(date, day);
        self
    }
}

/// One call received by a synthetic SDK
#[derive(Debug, Clone, PartialEq)]
pub enum SdkCall {
    /// `HealthKit` availability check
    IsAvailable,
    /// `HealthKit` authorization
    InitHealthKit(HealthKitPermissions),
    /// `HealthKit` daily metric query
    GetMetric {
        /// Metric queried
        metric: Metric,
        /// Day queried, as local midnight
        date: DateTime<FixedOffset>,
    },
    /// Health Connect initialization
    Initialize,
    /// Health Connect permission request
    RequestPermission(Vec<PermissionGrant>),
    /// Health Connect record read
    ReadRecords {
        /// Record type read
        record_type: RecordType,
        /// Time range read
        filter: TimeRangeFilter,
    },
}

impl SdkCall {
    /// Metric a data call fetched, `None` for availability and permission calls
    #[must_use]
    pub const fn fetched_metric(&self) -> Option<Metric> {
        match self {
            Self::GetMetric { metric, .. } => Some(*metric),
            Self::ReadRecords { record_type, .. } => Some(record_type.metric()),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct ControlState {
    fixture: HealthFixture,
    latency: HashMap<CalendarDate, Duration>,
    calls: Vec<SdkCall>,
}

/// Shared switches behind both synthetic SDKs
#[derive(Debug, Clone, Default)]
pub struct SyntheticControls {
    state: Arc<Mutex<ControlState>>,
}

impl SyntheticControls {
    /// Controls serving a fixture
    #[must_use]
    pub fn new(fixture: HealthFixture) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControlState {
                fixture,
                ..ControlState::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace one day's entries
    pub fn set_day(&self, date: CalendarDate, day: DayFixture) {
        self.lock().fixture.days.insert(date, day);
    }

    /// Make a metric's queries fail
    pub fn fail_metric(&self, metric: Metric) {
        self.lock().fixture.failing.insert(metric);
    }

    /// Let a failing metric succeed again
    pub fn recover_metric(&self, metric: Metric) {
        self.lock().fixture.failing.remove(&metric);
    }

    /// Refuse permission for a metric on the next access request
    pub fn deny_metric(&self, metric: Metric) {
        self.lock().fixture.denied.insert(metric);
    }

    /// Grant every metric on the next access request
    pub fn grant_all(&self) {
        self.lock().fixture.denied.clear();
    }

    /// Toggle whether the health service is present
    pub fn set_available(&self, available: bool) {
        self.lock().fixture.unavailable = !available;
    }

    /// Delay every query for a day
    pub fn set_latency(&self, date: CalendarDate, latency: Duration) {
        self.lock().latency.insert(date, latency);
    }

    /// All calls received so far
    #[must_use]
    pub fn calls(&self) -> Vec<SdkCall> {
        self.lock().calls.clone()
    }

    /// Metrics fetched so far, one entry per data call
    #[must_use]
    pub fn fetched_metrics(&self) -> Vec<Metric> {
        self.lock()
            .calls
            .iter()
            .filter_map(SdkCall::fetched_metric)
            .collect()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn record(&self, call: SdkCall) {
        self.lock().calls.push(call);
    }

    fn is_available(&self) -> bool {
        !self.lock().fixture.unavailable
    }

    fn is_denied(&self, metric: Metric) -> bool {
        self.lock().fixture.denied.contains(&metric)
    }

    fn latency(&self, date: CalendarDate) -> Duration {
        self.lock().latency.get(&date).copied().unwrap_or_default()
    }

    /// Wait out the day's latency, then fail if the metric is switched to failing.
    /// The lock is never held across the sleep.
    async fn simulate_query(&self, metric: Metric, date: CalendarDate) -> Result<(), SdkError> {
        let latency = self.latency(date);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if self.lock().fixture.failing.contains(&metric) {
            return Err(SdkError::new(format!("{metric} query failed")));
        }
        Ok(())
    }

    fn day(&self, date: CalendarDate) -> DayFixture {
        self.lock().fixture.days.get(&date).cloned().unwrap_or_default()
    }

    fn days(&self) -> Vec<(CalendarDate, DayFixture)> {
        self.lock()
            .fixture
            .days
            .iter()
            .map(|(date, day)| (*date, day.clone()))
            .collect()
    }
}

/// `HealthKit` binding backed by [`SyntheticControls`]
#[derive(Debug, Clone, Default)]
pub struct SyntheticHealthKit {
    controls: SyntheticControls,
}

impl SyntheticHealthKit {
    /// Binding driven by the given controls
    #[must_use]
    pub const fn new(controls: SyntheticControls) -> Self {
        Self { controls }
    }

    async fn daily_value(
        &self,
        metric: Metric,
        options: &HealthInputOptions,
    ) -> Result<HealthValue, SdkError> {
        self.controls.record(SdkCall::GetMetric {
            metric,
            date: options.date,
        });
        let date = CalendarDate::new(options.date.date_naive());
        self.controls.simulate_query(metric, date).await?;
        Ok(HealthValue::of(self.controls.day(date).total(metric)))
    }
}

#[async_trait]
impl HealthKitApi for SyntheticHealthKit {
    async fn is_available(&self) -> Result<bool, SdkError> {
        self.controls.record(SdkCall::IsAvailable);
        Ok(self.controls.is_available())
    }

    async fn init_health_kit(&self, permissions: &HealthKitPermissions) -> Result<(), SdkError> {
        self.controls
            .record(SdkCall::InitHealthKit(permissions.clone()));
        let refused = Metric::ALL.into_iter().any(|metric| {
            permissions
                .read
                .contains(&HealthKitPermission::for_metric(metric))
                && self.controls.is_denied(metric)
        });
        if refused {
            return Err(SdkError::new("Authorization denied"));
        }
        Ok(())
    }

    async fn get_step_count(&self, options: &HealthInputOptions) -> Result<HealthValue, SdkError> {
        self.daily_value(Metric::Steps, options).await
    }

    async fn get_distance_walking_running(
        &self,
        options: &HealthInputOptions,
    ) -> Result<HealthValue, SdkError> {
        self.daily_value(Metric::Distance, options).await
    }

    async fn get_flights_climbed(
        &self,
        options: &HealthInputOptions,
    ) -> Result<HealthValue, SdkError> {
        self.daily_value(Metric::FlightsClimbed, options).await
    }
}

/// Health Connect binding backed by [`SyntheticControls`]
#[derive(Debug, Clone, Default)]
pub struct SyntheticHealthConnect {
    controls: SyntheticControls,
}

impl SyntheticHealthConnect {
    /// Binding driven by the given controls
    #[must_use]
    pub const fn new(controls: SyntheticControls) -> Self {
        Self { controls }
    }
}

#[async_trait]
impl HealthConnectApi for SyntheticHealthConnect {
    async fn initialize(&self) -> Result<bool, SdkError> {
        self.controls.record(SdkCall::Initialize);
        Ok(self.controls.is_available())
    }

    async fn request_permission(
        &self,
        permissions: &[PermissionGrant],
    ) -> Result<Vec<PermissionGrant>, SdkError> {
        self.controls
            .record(SdkCall::RequestPermission(permissions.to_vec()));
        Ok(permissions
            .iter()
            .filter(|grant| !self.controls.is_denied(grant.record_type.metric()))
            .copied()
            .collect())
    }

    async fn read_records(
        &self,
        record_type: RecordType,
        options: &ReadRecordsOptions,
    ) -> Result<ReadRecordsResult, SdkError> {
        let filter = options.time_range_filter;
        self.controls.record(SdkCall::ReadRecords {
            record_type,
            filter,
        });

        let date = CalendarDate::new(filter.start_time.with_timezone(&Local).date_naive());
        self.controls
            .simulate_query(record_type.metric(), date)
            .await?;

        let mut records = Vec::new();
        for (day, fixture) in self.controls.days() {
            match fixture.records(day, record_type) {
                Ok(day_records) => records.extend(day_records.into_iter().filter(|r| {
                    let (start, end) = r.interval();
                    filter.covers(&start, &end)
                })),
                Err(e) => warn!(%day, error = %e, "Skipping fixture day without a local range"),
            }
        }
        Ok(ReadRecordsResult { records })
    }
}
