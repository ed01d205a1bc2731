// ABOUTME: Dashboard composition of the date label, ring progress, and value tiles
// ABOUTME: A pure function of the selected date and the published reading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::ring::{progress, render_svg, RingAnimation, RingGeometry};
use super::tiles::{tiles, ValueTile};
use crate::config::StrideConfig;
use crate::constants::defaults;
use crate::models::{CalendarDate, DailyHealthReading};

/// Dashboard layout settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dashboard {
    /// Ring dimensions
    pub ring: RingGeometry,
    /// Daily step goal
    pub step_goal: u32,
    /// Ring fill animation duration
    pub animation: Duration,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            ring: RingGeometry::dashboard(),
            step_goal: defaults::STEP_GOAL,
            animation: Duration::from_millis(defaults::RING_ANIMATION_MS),
        }
    }
}

/// Everything the dashboard shows for one reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Selected date
    pub date: CalendarDate,
    /// Date stepper label
    pub label: String,
    /// Ring fill target, steps over goal
    pub progress: f64,
    /// Tiles under the ring
    pub tiles: Vec<ValueTile>,
    /// Raw reading the view was built from
    pub reading: DailyHealthReading,
}

impl Dashboard {
    /// Dashboard with the configured step goal
    #[must_use]
    pub fn from_config(config: &StrideConfig) -> Self {
        Self {
            step_goal: config.step_goal,
            animation: config.ring_animation(),
            ..Self::default()
        }
    }

    /// Build the view for a selected date and reading
    #[must_use]
    pub fn view(&self, date: CalendarDate, reading: &DailyHealthReading) -> DashboardView {
        DashboardView {
            date,
            label: date.display_label(),
            progress: progress(reading.steps, self.step_goal),
            tiles: tiles(reading).to_vec(),
            reading: *reading,
        }
    }

    /// Ring tween at rest, timed by the configured duration
    #[must_use]
    pub fn ring_animation(&self, now: Instant) -> RingAnimation {
        RingAnimation::new(self.animation, now)
    }

    /// Fill shown `elapsed` into the animation from an empty ring toward `target`
    #[must_use]
    pub fn fill_at(&self, target: f64, elapsed: Duration) -> f64 {
        let start = Instant::now();
        let mut animation = self.ring_animation(start);
        animation.animate_to(target, start);
        animation.value_at(start + elapsed)
    }

    /// Ring SVG at a given fill
    #[must_use]
    pub fn ring_svg(&self, fill: f64) -> String {
        render_svg(&self.ring, fill)
    }

    /// Plain-text rendering for terminals
    #[must_use]
    pub fn render_text(&self, view: &DashboardView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<  {}  >", view.label);
        let _ = writeln!(
            out,
            "Ring: {:.1}% of {} steps",
            view.progress * 100.0,
            self.step_goal
        );
        for tile in &view.tiles {
            let _ = writeln!(out, "{:<16} {}", tile.label, tile.value);
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::MetricSample;

    #[test]
    fn test_view_formats_tiles_and_progress() {
        let date = CalendarDate::from_ymd(2024, 1, 1).unwrap();
        let reading = DailyHealthReading::zero(date)
            .with_sample(date, MetricSample::Steps(500))
            .with_sample(date, MetricSample::Distance(250.5))
            .with_sample(date, MetricSample::FlightsClimbed(2));

        let view = Dashboard::default().view(date, &reading);
        assert_eq!(view.label, "Mon Jan 01 2024");
        assert!((view.progress - 0.05).abs() < 1e-12);
        let values: Vec<&str> = view.tiles.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, ["500", "0.25 km", "2"]);
    }
}
