// ABOUTME: Main library entry point for the Stride daily health dashboard
// ABOUTME: Health data provider, configuration, logging, and presentation layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stride
//!
//! Reads steps, walking/running distance and flights climbed from the platform
//! health service (Apple `HealthKit` on iOS, Health Connect on Android) and
//! renders them with a date stepper, value tiles and an animated ring.
//!
//! ## Architecture
//!
//! - **`stride-core`**: readings, dates, permissions, error taxonomy
//! - **`stride-providers`**: the `HealthBackend` trait, both backends, SDK boundary traits
//! - **provider**: [`provider::HealthDataProvider`], the subscription service
//! - **presentation**: stepper, tiles, ring geometry/animation, dashboard
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use stride::backends::PlatformSdks;
//! use stride::config::StrideConfig;
//! use stride::models::CalendarDate;
//! use stride::provider::HealthDataProvider;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = StrideConfig::from_env();
//!     let provider = HealthDataProvider::new(&config, &PlatformSdks::none());
//!     let mut readings = provider.observe(CalendarDate::today()).await;
//!     while readings.changed().await.is_ok() {
//!         println!("{:?}", *readings.borrow());
//!     }
//! }
//! ```

pub use stride_core::{constants, conversions, errors, models};

/// Health backends and platform SDK boundary traits
pub use stride_providers as backends;

/// Environment-based configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Presentation layer: date stepper, tiles, ring, dashboard
pub mod presentation;

/// Health data provider publishing the daily reading
pub mod provider;

pub use config::{StaleResultPolicy, StrideConfig};
pub use provider::HealthDataProvider;
