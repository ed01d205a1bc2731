// ABOUTME: Core types and constants for the Stride daily health dashboard
// ABOUTME: Foundation crate with error handling, health reading models, and conversions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stride Core
//!
//! Foundation crate providing shared types for the Stride workspace. Both the
//! backend implementations in `stride-providers` and the subscription service in
//! the root crate speak these types, so this crate is kept free of async and
//! platform concerns.
//!
//! ## Modules
//!
//! - **errors**: `HealthError` taxonomy with stable `ErrorCode`s
//! - **models**: `CalendarDate`, `DayRange`, `DailyHealthReading`, permissions, platforms
//! - **constants**: Environment variable names, defaults, and platform identifiers
//! - **conversions**: Clamping float-to-integer conversions for SDK values

/// Unified error taxonomy for health backends and configuration
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Safe numeric conversions for values reported by platform SDKs
pub mod conversions;

/// Core data models (readings, dates, permissions, platforms)
pub mod models;

pub use errors::{ErrorCode, HealthError, HealthResult};
