// ABOUTME: Apple HealthKit backend over a host-provided HealthKit SDK binding
// ABOUTME: Each metric query returns one pre-aggregated scalar for the requested day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Apple `HealthKit` Backend
//!
//! `HealthKit` authorizes all requested read types in one call and answers each
//! metric query with a single daily value, so no client-side summation happens
//! here. A missing value is reported as zero.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::backends;
use crate::conversions::{count_from_f64, meters_from_f64};
use crate::core::{HealthBackend, SdkError};
use crate::errors::{HealthError, HealthResult};
use crate::models::{DayRange, Metric, MetricSample, PermissionState};

/// `HealthKit` quantity types the dashboard reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthKitPermission {
    /// `HKQuantityTypeIdentifierStepCount`
    StepCount,
    /// `HKQuantityTypeIdentifierDistanceWalkingRunning`
    DistanceWalkingRunning,
    /// `HKQuantityTypeIdentifierFlightsClimbed`
    FlightsClimbed,
}

impl HealthKitPermission {
    /// Quantity type backing a metric
    #[must_use]
    pub const fn for_metric(metric: Metric) -> Self {
        match metric {
            Metric::Steps => Self::StepCount,
            Metric::Distance => Self::DistanceWalkingRunning,
            Metric::FlightsClimbed => Self::FlightsClimbed,
        }
    }
}

/// Read/write permission request passed to `init_health_kit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthKitPermissions {
    /// Types to read
    pub read: Vec<HealthKitPermission>,
    /// Types to write
    pub write: Vec<HealthKitPermission>,
}

impl HealthKitPermissions {
    /// Read-only access to steps, flights climbed and walking/running distance
    #[must_use]
    pub fn dashboard() -> Self {
        Self {
            read: vec![
                HealthKitPermission::StepCount,
                HealthKitPermission::FlightsClimbed,
                HealthKitPermission::DistanceWalkingRunning,
            ],
            write: Vec::new(),
        }
    }
}

/// Query options for daily metric calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInputOptions {
    /// Day to aggregate, as its local midnight
    pub date: DateTime<FixedOffset>,
    /// Inclusive start of the day
    pub start_date: DateTime<FixedOffset>,
    /// Inclusive end of the day
    pub end_date: DateTime<FixedOffset>,
}

impl HealthInputOptions {
    /// Options scoped to a day range
    #[must_use]
    pub fn for_range(range: &DayRange) -> Self {
        Self {
            date: range.start,
            start_date: range.start,
            end_date: range.end,
        }
    }
}

/// A single aggregated value returned by a metric query
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthValue {
    /// Daily total; absent when the platform has no samples
    pub value: Option<f64>,
}

impl HealthValue {
    /// A present value
    #[must_use]
    pub const fn of(value: f64) -> Self {
        Self { value: Some(value) }
    }
}

/// Host binding for the `HealthKit` SDK
#[async_trait]
pub trait HealthKitApi: Send + Sync {
    /// Whether `HealthKit` exists on this device
    async fn is_available(&self) -> Result<bool, SdkError>;

    /// Request authorization for the given types
    async fn init_health_kit(&self, permissions: &HealthKitPermissions) -> Result<(), SdkError>;

    /// Daily step count
    async fn get_step_count(&self, options: &HealthInputOptions) -> Result<HealthValue, SdkError>;

    /// Daily walking and running distance in metres
    async fn get_distance_walking_running(
        &self,
        options: &HealthInputOptions,
    ) -> Result<HealthValue, SdkError>;

    /// Daily flights climbed
    async fn get_flights_climbed(
        &self,
        options: &HealthInputOptions,
    ) -> Result<HealthValue, SdkError>;
}

/// `HealthBackend` over a `HealthKit` binding
pub struct AppleHealthKitBackend {
    api: Arc<dyn HealthKitApi>,
}

impl AppleHealthKitBackend {
    /// Wrap a `HealthKit` binding
    #[must_use]
    pub fn new(api: Arc<dyn HealthKitApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl HealthBackend for AppleHealthKitBackend {
    fn name(&self) -> &'static str {
        backends::HEALTHKIT
    }

    async fn request_access(&self) -> HealthResult<PermissionState> {
        match self.api.is_available().await {
            Ok(true) => {}
            Ok(false) => {
                info!("HealthKit is not available on this device");
                return Err(HealthError::PlatformUnavailable {
                    backend: backends::HEALTHKIT,
                });
            }
            Err(e) => {
                warn!(error = %e, "Error checking HealthKit availability");
                return Err(HealthError::PlatformUnavailable {
                    backend: backends::HEALTHKIT,
                });
            }
        }

        self.api
            .init_health_kit(&HealthKitPermissions::dashboard())
            .await
            .map_err(|e| {
                warn!(error = %e, "HealthKit authorization failed");
                HealthError::permission_denied(backends::HEALTHKIT, e.message)
            })?;

        info!("HealthKit read access granted");
        Ok(PermissionState::HealthKit { authorized: true })
    }

    async fn fetch_metric(&self, metric: Metric, range: &DayRange) -> HealthResult<MetricSample> {
        let options = HealthInputOptions::for_range(range);
        let result = match metric {
            Metric::Steps => self.api.get_step_count(&options).await,
            Metric::Distance => self.api.get_distance_walking_running(&options).await,
            Metric::FlightsClimbed => self.api.get_flights_climbed(&options).await,
        };

        let value = result
            .map_err(|e| HealthError::fetch_failed(backends::HEALTHKIT, metric, e.message))?
            .value
            .unwrap_or(0.0);
        debug!(%metric, value, date = %options.date, "HealthKit metric fetched");

        Ok(match metric {
            Metric::Steps => MetricSample::Steps(count_from_f64(value)),
            Metric::Distance => MetricSample::Distance(meters_from_f64(value)),
            Metric::FlightsClimbed => MetricSample::FlightsClimbed(count_from_f64(value)),
        })
    }
}
