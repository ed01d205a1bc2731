// ABOUTME: Google Health Connect backend over a host-provided Health Connect SDK binding
// ABOUTME: Reads raw records per day and sums them client-side into day totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Google Health Connect Backend
//!
//! Health Connect grants each `(accessType, recordType)` pair individually and
//! answers reads with raw records inside a time range. The backend requests read
//! access for `Steps`, `Distance` and `FloorsClimbed`, then sums the per-record
//! quantity for each metric (see [`crate::aggregate`]).

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aggregate;
use crate::constants::backends;
use crate::core::{HealthBackend, SdkError};
use crate::errors::{HealthError, HealthResult};
use crate::models::{
    AccessType, DayRange, Metric, MetricSample, PermissionGrant, PermissionState, RecordType,
};

/// Permission pairs requested at initialization
pub const REQUESTED_PERMISSIONS: [PermissionGrant; 3] = [
    PermissionGrant::read(RecordType::Steps),
    PermissionGrant::read(RecordType::Distance),
    PermissionGrant::read(RecordType::FloorsClimbed),
];

/// Time range comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRangeOperator {
    /// Records between `start_time` and `end_time`
    Between,
}

/// Time range filter passed to `read_records`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeFilter {
    /// Comparison operator
    pub operator: TimeRangeOperator,
    /// Inclusive start
    pub start_time: DateTime<Utc>,
    /// Inclusive end
    pub end_time: DateTime<Utc>,
}

impl TimeRangeFilter {
    /// `between` filter covering a day range
    #[must_use]
    pub fn for_range(range: &DayRange) -> Self {
        Self {
            operator: TimeRangeOperator::Between,
            start_time: range.start_utc(),
            end_time: range.end_utc(),
        }
    }

    /// Whether a record interval lies within the filter
    #[must_use]
    pub fn covers(&self, start: &DateTime<Utc>, end: &DateTime<Utc>) -> bool {
        self.start_time <= *start && *end <= self.end_time
    }
}

/// Options for `read_records`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadRecordsOptions {
    /// Time range to read
    pub time_range_filter: TimeRangeFilter,
}

/// A `Steps` record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsRecord {
    /// Steps counted in the interval
    pub count: u64,
    /// Interval start
    pub start_time: DateTime<Utc>,
    /// Interval end
    pub end_time: DateTime<Utc>,
}

/// A length value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Length {
    /// Length in metres
    pub in_meters: f64,
}

/// A `Distance` record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceRecord {
    /// Distance covered in the interval
    pub distance: Length,
    /// Interval start
    pub start_time: DateTime<Utc>,
    /// Interval end
    pub end_time: DateTime<Utc>,
}

/// A `FloorsClimbed` record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorsClimbedRecord {
    /// Floors climbed in the interval; Health Connect reports a double
    pub floors: f64,
    /// Interval start
    pub start_time: DateTime<Utc>,
    /// Interval end
    pub end_time: DateTime<Utc>,
}

/// A raw Health Connect record of one of the three read types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HealthConnectRecord {
    /// Steps record
    Steps(StepsRecord),
    /// Distance record
    Distance(DistanceRecord),
    /// Floors climbed record
    FloorsClimbed(FloorsClimbedRecord),
}

impl HealthConnectRecord {
    /// Record type of this record
    #[must_use]
    pub const fn record_type(&self) -> RecordType {
        match self {
            Self::Steps(_) => RecordType::Steps,
            Self::Distance(_) => RecordType::Distance,
            Self::FloorsClimbed(_) => RecordType::FloorsClimbed,
        }
    }

    /// Interval covered by the record
    #[must_use]
    pub fn interval(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        match self {
            Self::Steps(r) => (r.start_time, r.end_time),
            Self::Distance(r) => (r.start_time, r.end_time),
            Self::FloorsClimbed(r) => (r.start_time, r.end_time),
        }
    }
}

/// Result of `read_records`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadRecordsResult {
    /// Records inside the filter
    pub records: Vec<HealthConnectRecord>,
}

/// Host binding for the Health Connect SDK
#[async_trait]
pub trait HealthConnectApi: Send + Sync {
    /// Initialize the client; `false` when Health Connect is absent
    async fn initialize(&self) -> Result<bool, SdkError>;

    /// Request permission pairs; returns the pairs the user granted
    async fn request_permission(
        &self,
        permissions: &[PermissionGrant],
    ) -> Result<Vec<PermissionGrant>, SdkError>;

    /// Read raw records of one type inside a time range
    async fn read_records(
        &self,
        record_type: RecordType,
        options: &ReadRecordsOptions,
    ) -> Result<ReadRecordsResult, SdkError>;
}

/// `HealthBackend` over a Health Connect binding
pub struct HealthConnectBackend {
    api: Arc<dyn HealthConnectApi>,
}

impl HealthConnectBackend {
    /// Wrap a Health Connect binding
    #[must_use]
    pub fn new(api: Arc<dyn HealthConnectApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl HealthBackend for HealthConnectBackend {
    fn name(&self) -> &'static str {
        backends::HEALTH_CONNECT
    }

    async fn request_access(&self) -> HealthResult<PermissionState> {
        let initialized = self.api.initialize().await.unwrap_or_else(|e| {
            warn!(error = %e, "Health Connect initialization errored");
            false
        });
        if !initialized {
            info!("Failed to initialize Health Connect");
            return Err(HealthError::PlatformUnavailable {
                backend: backends::HEALTH_CONNECT,
            });
        }

        let granted: BTreeSet<PermissionGrant> = self
            .api
            .request_permission(&REQUESTED_PERMISSIONS)
            .await
            .map_err(|e| HealthError::permission_denied(backends::HEALTH_CONNECT, e.message))?
            .into_iter()
            .collect();

        if !granted.iter().any(|g| g.access_type == AccessType::Read) {
            return Err(HealthError::permission_denied(
                backends::HEALTH_CONNECT,
                "no read permissions granted",
            ));
        }

        let state = PermissionState::HealthConnect { granted };
        info!(granted = ?state.granted_metrics(), "Health Connect permissions resolved");
        Ok(state)
    }

    async fn fetch_metric(&self, metric: Metric, range: &DayRange) -> HealthResult<MetricSample> {
        let record_type = RecordType::for_metric(metric);
        let options = ReadRecordsOptions {
            time_range_filter: TimeRangeFilter::for_range(range),
        };

        let result = self
            .api
            .read_records(record_type, &options)
            .await
            .map_err(|e| HealthError::fetch_failed(backends::HEALTH_CONNECT, metric, e.message))?;

        debug!(
            record_type = record_type.as_str(),
            records = result.records.len(),
            "Health Connect records read"
        );
        Ok(aggregate::total(record_type, &result.records))
    }
}
