// ABOUTME: Workspace-wide constants for platforms, backends, and configuration defaults
// ABOUTME: Centralizes environment variable names and presentation defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Backend identifiers used in logs, descriptors, and errors
pub mod backends {
    /// Apple `HealthKit` backend
    pub const HEALTHKIT: &str = "healthkit";
    /// Google Health Connect backend
    pub const HEALTH_CONNECT: &str = "health_connect";
}

/// Host platform identifiers as reported by `std::env::consts::OS`
pub mod platforms {
    /// Apple mobile platform
    pub const IOS: &str = "ios";
    /// Google mobile platform
    pub const ANDROID: &str = "android";
}

/// Environment variable names read by configuration loaders
pub mod env_vars {
    /// Overrides host platform detection (`ios`, `android`, anything else)
    pub const PLATFORM: &str = "STRIDE_PLATFORM";
    /// Daily step goal used for ring progress
    pub const STEP_GOAL: &str = "STRIDE_STEP_GOAL";
    /// Stale fetch result policy (`discard` or `last-write-wins`)
    pub const STALE_POLICY: &str = "STRIDE_STALE_POLICY";
    /// Ring animation duration in milliseconds
    pub const RING_ANIMATION_MS: &str = "STRIDE_RING_ANIMATION_MS";
}

/// Defaults shared by configuration and presentation
pub mod defaults {
    /// Daily step goal
    pub const STEP_GOAL: u32 = 10_000;
    /// Ring fill animation duration in milliseconds
    pub const RING_ANIMATION_MS: u64 = 1500;
    /// Ring outer radius used by the component when none is given
    pub const RING_RADIUS: f64 = 100.0;
    /// Ring stroke width used by the component when none is given
    pub const RING_STROKE_WIDTH: f64 = 30.0;
    /// Ring outer radius on the dashboard
    pub const DASHBOARD_RING_RADIUS: f64 = 150.0;
    /// Ring stroke width on the dashboard
    pub const DASHBOARD_RING_STROKE_WIDTH: f64 = 50.0;
    /// Ring stroke colour
    pub const RING_COLOR: &str = "#EE0F55";
    /// Opacity of the unfilled ring track
    pub const RING_TRACK_OPACITY: f64 = 0.2;
}

/// Metres in one kilometre, for display conversion
pub const METERS_PER_KILOMETER: f64 = 1000.0;
