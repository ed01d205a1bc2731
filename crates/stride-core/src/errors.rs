// ABOUTME: Error taxonomy for health backend access, permission, and fetch failures
// ABOUTME: Maps every failure kind to a stable ErrorCode for logging and JSON output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Error Handling
//!
//! Every failure that can originate at a platform health service boundary is
//! represented by [`HealthError`]. The provider catches these at the point of
//! origin and logs them; none of them reach the presentation layer. Configuration
//! and fixture errors are ordinary `Result` errors at the process edges.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Metric;

/// Standard error codes used throughout the workspace
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Platform (1000-1999)
    /// Health service absent on this device
    #[serde(rename = "PLATFORM_UNAVAILABLE")]
    PlatformUnavailable = 1000,
    /// No backend applies to the host platform
    #[serde(rename = "UNSUPPORTED_PLATFORM")]
    UnsupportedPlatform = 1001,

    // Authorization (2000-2999)
    /// The user declined read access
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 2000,

    // Fetching (3000-3999)
    /// A single metric fetch failed for one cycle
    #[serde(rename = "TRANSIENT_FETCH_FAILURE")]
    TransientFetchFailure = 3000,

    // Validation (4000-4999)
    /// A calendar date could not be represented
    #[serde(rename = "INVALID_DATE")]
    InvalidDate = 4000,

    // Configuration (6000-6999)
    /// Configuration value is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6000,
    /// Fixture data could not be loaded
    #[serde(rename = "FIXTURE_INVALID")]
    FixtureInvalid = 6001,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::PlatformUnavailable => "The health service is not available on this device",
            Self::UnsupportedPlatform => "No health backend supports this platform",
            Self::PermissionDenied => "Read access to health data was not granted",
            Self::TransientFetchFailure => "A health metric could not be fetched",
            Self::InvalidDate => "The requested date is outside the representable range",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::FixtureInvalid => "Fixture data is invalid",
        }
    }

    /// Whether a later trigger (date change, refresh) may succeed without user action
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::TransientFetchFailure)
    }
}

/// Failures originating at health backends, dates, and configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HealthError {
    /// Health service absent on the device; terminal for that platform
    #[error("{backend} is not available on this device")]
    PlatformUnavailable {
        /// Backend that reported the condition
        backend: &'static str,
    },

    /// The user declined access; terminal until re-authorization
    #[error("{backend} permission denied: {reason}")]
    PermissionDenied {
        /// Backend that reported the denial
        backend: &'static str,
        /// Reason reported by the platform
        reason: String,
    },

    /// One metric fetch failed for one cycle
    #[error("failed to fetch {metric} from {backend}: {reason}")]
    TransientFetchFailure {
        /// Backend the fetch was issued against
        backend: &'static str,
        /// Metric whose fetch failed
        metric: Metric,
        /// Reason reported by the platform
        reason: String,
    },

    /// Neither backend applies to the host platform
    #[error("no health backend supports platform '{platform}'")]
    UnsupportedPlatform {
        /// Platform identifier that was detected or configured
        platform: String,
    },

    /// A calendar date could not be represented or stepped
    #[error("invalid date: {details}")]
    InvalidDate {
        /// What went wrong
        details: String,
    },

    /// A configuration value could not be used
    #[error("invalid configuration for {key}: {details}")]
    Configuration {
        /// Configuration key
        key: String,
        /// What went wrong
        details: String,
    },

    /// Fixture data could not be read or parsed
    #[error("invalid fixture: {details}")]
    Fixture {
        /// What went wrong
        details: String,
    },
}

impl HealthError {
    /// Stable code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::PlatformUnavailable { .. } => ErrorCode::PlatformUnavailable,
            Self::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            Self::TransientFetchFailure { .. } => ErrorCode::TransientFetchFailure,
            Self::UnsupportedPlatform { .. } => ErrorCode::UnsupportedPlatform,
            Self::InvalidDate { .. } => ErrorCode::InvalidDate,
            Self::Configuration { .. } => ErrorCode::ConfigInvalid,
            Self::Fixture { .. } => ErrorCode::FixtureInvalid,
        }
    }

    /// Create a transient fetch failure
    #[must_use]
    pub fn fetch_failed(backend: &'static str, metric: Metric, reason: impl Into<String>) -> Self {
        Self::TransientFetchFailure {
            backend,
            metric,
            reason: reason.into(),
        }
    }

    /// Create a permission denial
    #[must_use]
    pub fn permission_denied(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::PermissionDenied {
            backend,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(key: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Configuration {
            key: key.into(),
            details: details.into(),
        }
    }

    /// Create an invalid date error
    #[must_use]
    pub fn invalid_date(details: impl Into<String>) -> Self {
        Self::InvalidDate {
            details: details.into(),
        }
    }

    /// Create a fixture error
    #[must_use]
    pub fn fixture(details: impl Into<String>) -> Self {
        Self::Fixture {
            details: details.into(),
        }
    }
}

impl From<serde_json::Error> for HealthError {
    fn from(error: serde_json::Error) -> Self {
        Self::fixture(error.to_string())
    }
}

/// Result type alias for convenience
pub type HealthResult<T> = Result<T, HealthError>;
