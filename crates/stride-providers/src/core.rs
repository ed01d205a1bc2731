// ABOUTME: Core health backend trait shared by the HealthKit and Health Connect variants
// ABOUTME: Defines access requests, per-metric fetches, and the partial daily reading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Backend Contract
//!
//! Both platform health services are reduced to the same two operations:
//!
//! - **`request_access`**: resolve what the user has granted, once per provider
//!   lifetime (or per explicit re-authorization)
//! - **`fetch_metric`**: one day total for one metric, scoped to a [`DayRange`]
//!
//! Each metric is fetched independently, so one failing metric never blocks or
//! invalidates the others. [`HealthBackend::fetch_daily`] is a convenience that
//! runs all permitted fetches concurrently and reports a [`PartialReading`] in
//! which every field is independently absent on failure.
//!
//! ## Backend-Specific Details vs Shared Interface
//!
//! - **Internal**: backends speak their SDK's DTOs (`HealthValue`, `StepsRecord`, ...)
//! - **External**: backends report [`MetricSample`]s
//! - **Conversion**: record summation and float-to-count clamping happen inside the backend

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::HealthResult;
use crate::models::{DayRange, Metric, MetricSample, MetricSet, PermissionState};

/// Error reported by a platform SDK binding
///
/// Bindings only surface a message; backends classify it into a `HealthError`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SdkError {
    /// Message reported by the platform
    pub message: String,
}

impl SdkError {
    /// Create an SDK error from a platform message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One backend's day totals, each field absent when its fetch failed or was skipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialReading {
    /// Step count, if fetched
    pub steps: Option<u64>,
    /// Distance in metres, if fetched
    pub distance_meters: Option<f64>,
    /// Flights climbed, if fetched
    pub flights_climbed: Option<u64>,
}

impl PartialReading {
    /// Record a successful sample
    pub fn insert(&mut self, sample: MetricSample) {
        match sample {
            MetricSample::Steps(v) => self.steps = Some(v),
            MetricSample::Distance(v) => self.distance_meters = Some(v),
            MetricSample::FlightsClimbed(v) => self.flights_climbed = Some(v),
        }
    }

    /// Samples present in this partial reading
    #[must_use]
    pub fn samples(&self) -> Vec<MetricSample> {
        [
            self.steps.map(MetricSample::Steps),
            self.distance_meters.map(MetricSample::Distance),
            self.flights_climbed.map(MetricSample::FlightsClimbed),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Metrics present in this partial reading
    #[must_use]
    pub fn fetched(&self) -> MetricSet {
        self.samples().iter().map(MetricSample::metric).collect()
    }
}

/// A platform health service reduced to access and per-metric day totals
#[async_trait]
pub trait HealthBackend: Send + Sync {
    /// Backend identifier (e.g., "healthkit", "`health_connect`")
    fn name(&self) -> &'static str;

    /// Metrics this backend can report
    fn supported_metrics(&self) -> MetricSet {
        MetricSet::all()
    }

    /// Metrics that may be fetched under a permission state
    fn permitted_metrics(&self, permission: &PermissionState) -> MetricSet {
        permission.granted_metrics() & self.supported_metrics()
    }

    /// Ask the platform for read access to all tracked metrics
    ///
    /// # Errors
    ///
    /// Returns `HealthError::PlatformUnavailable` when the service is absent and
    /// `HealthError::PermissionDenied` when the user declines.
    async fn request_access(&self) -> HealthResult<PermissionState>;

    /// Fetch one metric's total for a day
    ///
    /// # Errors
    ///
    /// Returns `HealthError::TransientFetchFailure` when the platform call fails.
    async fn fetch_metric(&self, metric: Metric, range: &DayRange) -> HealthResult<MetricSample>;

    /// Fetch every permitted metric concurrently
    ///
    /// Metrics without permission are not requested. Failures are logged and
    /// leave the corresponding field empty.
    async fn fetch_daily(&self, range: &DayRange, permission: &PermissionState) -> PartialReading {
        let permitted = self.permitted_metrics(permission);
        for metric in Metric::ALL.into_iter().filter(|m| !permitted.includes(*m)) {
            debug!(backend = self.name(), %metric, "Skipping metric without permission");
        }

        let results = join_all(permitted.metrics().map(|metric| async move {
            (metric, self.fetch_metric(metric, range).await)
        }))
        .await;

        let mut partial = PartialReading::default();
        for (metric, result) in results {
            match result {
                Ok(sample) => partial.insert(sample),
                Err(e) => warn!(backend = self.name(), %metric, error = %e, "Metric fetch failed"),
            }
        }
        partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_reading_reports_present_fields() {
        let mut partial = PartialReading::default();
        partial.insert(MetricSample::Steps(500));
        partial.insert(MetricSample::FlightsClimbed(2));

        assert_eq!(partial.distance_meters, None);
        assert_eq!(
            partial.samples(),
            vec![MetricSample::Steps(500), MetricSample::FlightsClimbed(2)]
        );
        assert_eq!(partial.fetched(), MetricSet::STEPS | MetricSet::FLIGHTS_CLIMBED);
    }
}
