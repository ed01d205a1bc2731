// ABOUTME: Daily health reading value object published to dashboard consumers
// ABOUTME: Replaced wholesale on every update; never mutated in place once published
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::date::CalendarDate;
use super::metric::{Metric, MetricSample};
use crate::conversions::meters_from_f64;

/// Steps, distance and flights climbed for one calendar day
///
/// Distance is always metres; display-unit conversion belongs to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyHealthReading {
    /// Day the most recent field update was fetched for
    pub date: CalendarDate,
    /// Step count
    pub steps: u64,
    /// Walking and running distance in metres
    #[serde(rename = "distance")]
    pub distance_meters: f64,
    /// Flights of stairs climbed
    #[serde(rename = "flights")]
    pub flights_climbed: u64,
}

impl DailyHealthReading {
    /// The reading published before any fetch succeeds
    #[must_use]
    pub const fn zero(date: CalendarDate) -> Self {
        Self {
            date,
            steps: 0,
            distance_meters: 0.0,
            flights_climbed: 0,
        }
    }

    /// Whether every metric is zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.steps == 0 && self.distance_meters == 0.0 && self.flights_climbed == 0
    }

    /// A new reading with one field replaced; other fields keep their values
    #[must_use]
    pub fn with_sample(self, date: CalendarDate, sample: MetricSample) -> Self {
        let mut next = Self { date, ..self };
        match sample {
            MetricSample::Steps(v) => next.steps = v,
            MetricSample::Distance(v) => next.distance_meters = meters_from_f64(v),
            MetricSample::FlightsClimbed(v) => next.flights_climbed = v,
        }
        next
    }

    /// The current value of one metric
    #[must_use]
    pub fn sample(&self, metric: Metric) -> MetricSample {
        match metric {
            Metric::Steps => MetricSample::Steps(self.steps),
            Metric::Distance => MetricSample::Distance(self.distance_meters),
            Metric::FlightsClimbed => MetricSample::FlightsClimbed(self.flights_climbed),
        }
    }
}
