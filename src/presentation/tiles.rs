// ABOUTME: Value tiles showing steps, distance in kilometres, and flights climbed
// ABOUTME: Distance display-unit conversion happens here and nowhere else
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::METERS_PER_KILOMETER;
use crate::models::{DailyHealthReading, Metric};

/// One labelled value under the ring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueTile {
    /// Caption
    pub label: String,
    /// Formatted value
    pub value: String,
}

/// Caption for a metric's tile
#[must_use]
pub const fn tile_label(metric: Metric) -> &'static str {
    match metric {
        Metric::Steps => "Steps",
        Metric::Distance => "Distance",
        Metric::FlightsClimbed => "Flights Climbed",
    }
}

/// Metres shown as kilometres with two decimals, e.g. `0.25 km`
#[must_use]
pub fn format_distance_km(meters: f64) -> String {
    format!("{:.2} km", meters / METERS_PER_KILOMETER)
}

/// The three tiles for a reading, in display order
#[must_use]
pub fn tiles(reading: &DailyHealthReading) -> [ValueTile; 3] {
    Metric::ALL.map(|metric| ValueTile {
        label: tile_label(metric).to_owned(),
        value: match metric {
            Metric::Steps => reading.steps.to_string(),
            Metric::Distance => format_distance_km(reading.distance_meters),
            Metric::FlightsClimbed => reading.flights_climbed.to_string(),
        },
    })
}
