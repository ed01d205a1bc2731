// ABOUTME: The three tracked metrics, a bitflag set of them, and typed per-metric samples
// ABOUTME: Used for per-metric permission checks and single-field reading updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

/// A daily metric tracked by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Step count
    Steps,
    /// Walking and running distance in metres
    Distance,
    /// Flights of stairs climbed
    FlightsClimbed,
}

impl Metric {
    /// All metrics, in fetch order
    pub const ALL: [Self; 3] = [Self::Steps, Self::Distance, Self::FlightsClimbed];

    /// Stable identifier for logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Steps => "steps",
            Self::Distance => "distance",
            Self::FlightsClimbed => "flights_climbed",
        }
    }

    /// The single-bit set for this metric
    #[must_use]
    pub const fn flag(&self) -> MetricSet {
        match self {
            Self::Steps => MetricSet::STEPS,
            Self::Distance => MetricSet::DISTANCE,
            Self::FlightsClimbed => MetricSet::FLIGHTS_CLIMBED,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// Set of metrics, used for granted permissions and backend support
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct MetricSet: u8 {
        /// Step count
        const STEPS = 0b0000_0001;
        /// Walking and running distance
        const DISTANCE = 0b0000_0010;
        /// Flights climbed
        const FLIGHTS_CLIMBED = 0b0000_0100;
    }
}

impl MetricSet {
    /// Whether the set contains a metric
    #[must_use]
    pub const fn includes(&self, metric: Metric) -> bool {
        self.contains(metric.flag())
    }

    /// Metrics in the set, in fetch order
    pub fn metrics(self) -> impl Iterator<Item = Metric> {
        Metric::ALL.into_iter().filter(move |m| self.includes(*m))
    }
}

impl FromIterator<Metric> for MetricSet {
    fn from_iter<I: IntoIterator<Item = Metric>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, metric| set | metric.flag())
    }
}

/// One metric's day total, as produced by a backend fetch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", content = "value", rename_all = "snake_case")]
pub enum MetricSample {
    /// Step count for the day
    Steps(u64),
    /// Distance for the day in metres
    Distance(f64),
    /// Flights climbed for the day
    FlightsClimbed(u64),
}

impl MetricSample {
    /// Which metric this sample carries
    #[must_use]
    pub const fn metric(&self) -> Metric {
        match self {
            Self::Steps(_) => Metric::Steps,
            Self::Distance(_) => Metric::Distance,
            Self::FlightsClimbed(_) => Metric::FlightsClimbed,
        }
    }

    /// The sample as a float, for logging
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Steps(v) | Self::FlightsClimbed(v) => v as f64,
            Self::Distance(v) => v,
        }
    }
}
