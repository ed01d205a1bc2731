// ABOUTME: Health backend implementations for Apple HealthKit and Google Health Connect
// ABOUTME: Core backend trait, SDK boundary traits, record aggregation, and backend selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health backend implementations and core abstractions.
//!
//! The platform SDKs themselves are external collaborators: host bindings
//! implement [`healthkit::HealthKitApi`] or [`health_connect::HealthConnectApi`],
//! and this crate turns either into a [`core::HealthBackend`] that reports one
//! scalar per metric per day.

// Re-export stride-core modules so backend files can keep `use crate::models::*` etc.
pub use stride_core::constants;
pub use stride_core::conversions;
pub use stride_core::errors;
pub use stride_core::models;

/// Client-side summation of raw Health Connect records
pub mod aggregate;
/// Core backend trait and shared SDK error type
pub mod core;
/// Google Health Connect backend (record based)
pub mod health_connect;
/// Apple `HealthKit` backend (pre-aggregated)
pub mod healthkit;
/// Backend selection by host platform
pub mod registry;
/// Backend descriptors and capability flags
pub mod spi;
/// In-memory SDK stand-ins for development and testing
#[cfg(feature = "synthetic")]
pub mod synthetic;

pub use crate::core::{HealthBackend, PartialReading, SdkError};
pub use health_connect::{HealthConnectApi, HealthConnectBackend};
pub use healthkit::{AppleHealthKitBackend, HealthKitApi};
pub use registry::{BackendRegistry, PlatformSdks};
pub use spi::{BackendCapabilities, BackendDescriptor, BackendKind};
#[cfg(feature = "synthetic")]
pub use synthetic::{
    DayFixture, HealthFixture, SdkCall, SyntheticControls, SyntheticHealthConnect,
    SyntheticHealthKit,
};
