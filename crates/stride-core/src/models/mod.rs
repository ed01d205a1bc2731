// ABOUTME: Core data models for daily health readings and the inputs that scope them
// ABOUTME: Re-exports CalendarDate, DailyHealthReading, Metric, PermissionState and HostPlatform
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Backend-agnostic representation of one day of health data.
//!
//! - `CalendarDate` / `DayRange`: the day a reading covers and its local-time bounds
//! - `Metric` / `MetricSet` / `MetricSample`: the three tracked metrics
//! - `DailyHealthReading`: the value published to consumers
//! - `PermissionState`: what each backend has been granted
//! - `HostPlatform`: which backend applies

mod date;
mod metric;
mod permission;
mod platform;
mod reading;

pub use date::{CalendarDate, DayRange};
pub use metric::{Metric, MetricSample, MetricSet};
pub use permission::{AccessType, PermissionGrant, PermissionState, RecordType};
pub use platform::HostPlatform;
pub use reading::DailyHealthReading;
