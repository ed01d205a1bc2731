// ABOUTME: Presentation layer rendering the provider's readings
// ABOUTME: Date stepper, value tiles, ring geometry and animation, and dashboard composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Presentation layer
//!
//! Everything here is a pure function of the selected date and the reading the
//! provider publishes; nothing here talks to a backend.

/// Dashboard composition
pub mod dashboard;
/// Selected date with one-day stepping
pub mod date_stepper;
/// Ring geometry, animation, and SVG
pub mod ring;
/// Labelled value tiles
pub mod tiles;

pub use dashboard::{Dashboard, DashboardView};
pub use date_stepper::DateStepper;
pub use ring::{ease_in_out_quad, progress, render_svg, RingAnimation, RingGeometry};
pub use tiles::{format_distance_km, tiles, ValueTile};
