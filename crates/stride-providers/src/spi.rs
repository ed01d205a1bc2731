// ABOUTME: Backend descriptors describing identity, host platform, and capabilities
// ABOUTME: Lets selection code pick a backend by platform without naming concrete types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Backend Descriptors
//!
//! A [`BackendDescriptor`] says which platform a backend serves and how it
//! behaves (pre-aggregated vs record based, all-or-nothing vs per-type
//! permissions). [`crate::registry::BackendRegistry`] walks the registered
//! descriptors to choose exactly one backend at startup.

use std::fmt;

use crate::constants::backends;
use crate::models::{HostPlatform, MetricSet};

/// Concrete backend variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Apple `HealthKit`
    HealthKit,
    /// Google Health Connect
    HealthConnect,
}

bitflags::bitflags! {
    /// Backend capability flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct BackendCapabilities: u8 {
        /// Metric queries return one pre-aggregated daily value
        const PRE_AGGREGATED = 0b0000_0001;
        /// Metric queries return raw records summed client-side
        const RECORD_BASED = 0b0000_0010;
        /// Permissions are granted per record type
        const GRANULAR_PERMISSIONS = 0b0000_0100;
        /// The service can report that it is absent before authorization
        const AVAILABILITY_CHECK = 0b0000_1000;
    }
}

impl BackendCapabilities {
    /// Whether the backend must sum records itself
    #[must_use]
    pub const fn requires_aggregation(&self) -> bool {
        self.contains(Self::RECORD_BASED)
    }

    /// Whether permissions can be partially granted
    #[must_use]
    pub const fn has_granular_permissions(&self) -> bool {
        self.contains(Self::GRANULAR_PERMISSIONS)
    }
}

/// Describes a backend's identity and capabilities
pub trait BackendDescriptor: Send + Sync {
    /// Unique backend identifier
    fn name(&self) -> &'static str;

    /// Human-readable name
    fn display_name(&self) -> &'static str;

    /// Concrete variant
    fn kind(&self) -> BackendKind;

    /// Platform this backend serves
    fn platform(&self) -> HostPlatform;

    /// Behavioural capabilities
    fn capabilities(&self) -> BackendCapabilities;

    /// Metrics the backend can report
    fn supported_metrics(&self) -> MetricSet {
        MetricSet::all()
    }
}

impl fmt::Debug for dyn BackendDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendDescriptor")
            .field("name", &self.name())
            .field("platform", &self.platform())
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

/// Apple `HealthKit` descriptor
pub struct HealthKitDescriptor;

impl BackendDescriptor for HealthKitDescriptor {
    fn name(&self) -> &'static str {
        backends::HEALTHKIT
    }

    fn display_name(&self) -> &'static str {
        "Apple HealthKit"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::HealthKit
    }

    fn platform(&self) -> HostPlatform {
        HostPlatform::Ios
    }

    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities::PRE_AGGREGATED | BackendCapabilities::AVAILABILITY_CHECK
    }
}

/// Google Health Connect descriptor
pub struct HealthConnectDescriptor;

impl BackendDescriptor for HealthConnectDescriptor {
    fn name(&self) -> &'static str {
        backends::HEALTH_CONNECT
    }

    fn display_name(&self) -> &'static str {
        "Health Connect"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::HealthConnect
    }

    fn platform(&self) -> HostPlatform {
        HostPlatform::Android
    }

    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities::RECORD_BASED | BackendCapabilities::GRANULAR_PERMISSIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_capabilities() {
        assert!(HealthConnectDescriptor.capabilities().requires_aggregation());
        assert!(HealthConnectDescriptor.capabilities().has_granular_permissions());
        assert!(!HealthKitDescriptor.capabilities().requires_aggregation());
        assert_eq!(HealthKitDescriptor.platform(), HostPlatform::Ios);
    }
}
