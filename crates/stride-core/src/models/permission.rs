// ABOUTME: Per-backend permission records and the grant pairs requested from Health Connect
// ABOUTME: No metric is fetched until its entry here is confirmed granted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::metric::{Metric, MetricSet};

/// Access kind in a Health Connect permission pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Read access
    Read,
    /// Write access
    Write,
}

/// Health Connect record type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// `Steps` records carrying a `count`
    Steps,
    /// `Distance` records carrying `distance.inMeters`
    Distance,
    /// `FloorsClimbed` records carrying `floors`
    FloorsClimbed,
}

impl RecordType {
    /// Record type holding a metric
    #[must_use]
    pub const fn for_metric(metric: Metric) -> Self {
        match metric {
            Metric::Steps => Self::Steps,
            Metric::Distance => Self::Distance,
            Metric::FlightsClimbed => Self::FloorsClimbed,
        }
    }

    /// Metric this record type is aggregated into
    #[must_use]
    pub const fn metric(&self) -> Metric {
        match self {
            Self::Steps => Metric::Steps,
            Self::Distance => Metric::Distance,
            Self::FloorsClimbed => Metric::FlightsClimbed,
        }
    }

    /// Platform name of the record type
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Steps => "Steps",
            Self::Distance => "Distance",
            Self::FloorsClimbed => "FloorsClimbed",
        }
    }
}

/// One `(accessType, recordType)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGrant {
    /// Access kind
    pub access_type: AccessType,
    /// Record type
    pub record_type: RecordType,
}

impl PermissionGrant {
    /// Read access to a record type
    #[must_use]
    pub const fn read(record_type: RecordType) -> Self {
        Self {
            access_type: AccessType::Read,
            record_type,
        }
    }
}

/// What the active backend has been granted
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PermissionState {
    /// Access not requested, denied, or no backend applies
    #[default]
    Unauthorized,
    /// `HealthKit` grants read access to all requested types at once
    HealthKit {
        /// Whether initialization succeeded
        authorized: bool,
    },
    /// Health Connect grants each pair individually
    HealthConnect {
        /// Pairs the user granted
        granted: BTreeSet<PermissionGrant>,
    },
}

impl PermissionState {
    /// Metrics that may be fetched under this state
    #[must_use]
    pub fn granted_metrics(&self) -> MetricSet {
        match self {
            Self::Unauthorized | Self::HealthKit { authorized: false } => MetricSet::empty(),
            Self::HealthKit { authorized: true } => MetricSet::all(),
            Self::HealthConnect { granted } => granted
                .iter()
                .filter(|g| g.access_type == AccessType::Read)
                .map(|g| g.record_type.metric())
                .collect(),
        }
    }

    /// Whether a metric may be fetched
    #[must_use]
    pub fn allows(&self, metric: Metric) -> bool {
        self.granted_metrics().includes(metric)
    }

    /// Whether any metric may be fetched
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        !self.granted_metrics().is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_health_connect_grants_are_per_metric() {
        let state = PermissionState::HealthConnect {
            granted: [
                PermissionGrant::read(RecordType::Steps),
                PermissionGrant::read(RecordType::FloorsClimbed),
            ]
            .into_iter()
            .collect(),
        };

        assert!(state.allows(Metric::Steps));
        assert!(!state.allows(Metric::Distance));
        assert!(state.allows(Metric::FlightsClimbed));
    }

    #[test]
    fn test_write_grant_does_not_allow_reads() {
        let state = PermissionState::HealthConnect {
            granted: [PermissionGrant {
                access_type: AccessType::Write,
                record_type: RecordType::Steps,
            }]
            .into_iter()
            .collect(),
        };
        assert!(!state.is_authorized());
    }

    #[test]
    fn test_grant_wire_shape() {
        let json = serde_json::to_value(PermissionGrant::read(RecordType::FloorsClimbed)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"accessType": "read", "recordType": "FloorsClimbed"})
        );
    }

    #[test]
    fn test_unauthorized_grants_nothing() {
        assert!(!PermissionState::Unauthorized.is_authorized());
        assert!(!PermissionState::HealthKit { authorized: false }.is_authorized());
        assert_eq!(
            PermissionState::HealthKit { authorized: true }.granted_metrics(),
            MetricSet::all()
        );
    }
}
