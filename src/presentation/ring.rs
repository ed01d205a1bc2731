// ABOUTME: Ring progress geometry, eased fill animation, and SVG rendering
// ABOUTME: Fill is steps over goal and is not clamped past a full circle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// Arrow glyph side relative to the stroke width
const ARROW_SIZE_RATIO: f64 = 0.8;
/// Arrow glyph offset from the top edge relative to the stroke width
const ARROW_TOP_RATIO: f64 = 0.1;
const ARROW_COLOR: &str = "black";

/// Ring dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingGeometry {
    /// Outer radius
    pub radius: f64,
    /// Stroke width, centred on the inner radius
    pub stroke_width: f64,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            radius: defaults::RING_RADIUS,
            stroke_width: defaults::RING_STROKE_WIDTH,
        }
    }
}

impl RingGeometry {
    /// Ring with explicit dimensions
    #[must_use]
    pub const fn new(radius: f64, stroke_width: f64) -> Self {
        Self {
            radius,
            stroke_width,
        }
    }

    /// The larger ring shown on the dashboard
    #[must_use]
    pub const fn dashboard() -> Self {
        Self::new(
            defaults::DASHBOARD_RING_RADIUS,
            defaults::DASHBOARD_RING_STROKE_WIDTH,
        )
    }

    /// Radius of the stroke's centre line
    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        self.radius - self.stroke_width / 2.0
    }

    /// Length of the stroke's centre line
    #[must_use]
    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.inner_radius()
    }

    /// Width and height of the drawing
    #[must_use]
    pub fn size(&self) -> f64 {
        self.radius * 2.0
    }

    /// Side of the square holding the arrow glyph at the top of the ring
    #[must_use]
    pub fn arrow_size(&self) -> f64 {
        self.stroke_width * ARROW_SIZE_RATIO
    }

    /// Distance from the top edge to the arrow glyph
    #[must_use]
    pub fn arrow_top(&self) -> f64 {
        self.stroke_width * ARROW_TOP_RATIO
    }

    /// Stroke dash pattern `[dash, gap]` drawing `fill` of the circle
    #[must_use]
    pub fn dash_array(&self, fill: f64) -> [f64; 2] {
        let circumference = self.circumference();
        [circumference * fill, circumference]
    }
}

/// Steps as a fraction of the goal; zero when the goal is zero
#[must_use]
pub fn progress(steps: u64, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    steps as f64 / f64::from(goal)
}

/// Quadratic ease-in-out over `t` in `[0, 1]`
#[must_use]
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Time-driven tween of the ring fill toward a target
///
/// Retargeting mid-flight starts the new tween from the value shown at that instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingAnimation {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl RingAnimation {
    /// Empty ring at rest
    #[must_use]
    pub fn new(duration: Duration, now: Instant) -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            started: now,
            duration,
        }
    }

    /// Start moving toward a new fill
    pub fn animate_to(&mut self, target: f64, now: Instant) {
        self.from = self.value_at(now);
        self.to = target;
        self.started = now;
    }

    /// Fill shown at an instant
    #[must_use]
    pub fn value_at(&self, now: Instant) -> f64 {
        let eased = ease_in_out_quad(self.fraction_at(now));
        (self.to - self.from).mul_add(eased, self.from)
    }

    /// Whether the tween has reached its target
    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.fraction_at(now) >= 1.0
    }

    /// Fill the tween is heading to
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.to
    }

    fn fraction_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

/// SVG drawing of the ring at a given fill
#[must_use]
pub fn render_svg(geometry: &RingGeometry, fill: f64) -> String {
    let size = geometry.size();
    let centre = geometry.radius;
    let r = geometry.inner_radius();
    let [dash, gap] = geometry.dash_array(fill);
    let color = defaults::RING_COLOR;
    let stroke = geometry.stroke_width;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    );
    let _ = writeln!(
        svg,
        r#"  <circle cx="{centre}" cy="{centre}" r="{r:.3}" stroke="{color}" stroke-width="{stroke}" opacity="{opacity}" fill="transparent"/>"#,
        opacity = defaults::RING_TRACK_OPACITY,
    );
    let _ = writeln!(
        svg,
        r#"  <circle cx="{centre}" cy="{centre}" r="{r:.3}" stroke="{color}" stroke-width="{stroke}" stroke-dasharray="{dash:.3} {gap:.3}" stroke-linecap="round" fill="transparent" transform="rotate(-90 {centre} {centre})"/>"#
    );
    write_arrow(&mut svg, geometry);
    svg.push_str("</svg>\n");
    svg
}

/// Right-pointing arrow centred horizontally inside the stroke at the top
fn write_arrow(svg: &mut String, geometry: &RingGeometry) {
    let size = geometry.arrow_size();
    let top = geometry.arrow_top();
    let left = geometry.radius - size / 2.0;
    let mid = top + size / 2.0;
    let tail = size.mul_add(0.15, left);
    let tip = size.mul_add(0.85, left);
    let barb = size.mul_add(0.5, left);
    let barb_top = size.mul_add(0.15, top);
    let barb_bottom = size.mul_add(0.85, top);
    let _ = writeln!(
        svg,
        r#"  <path d="M{tail:.3} {mid:.3} H{tip:.3} M{barb:.3} {barb_top:.3} L{tip:.3} {mid:.3} L{barb:.3} {barb_bottom:.3}" stroke="{ARROW_COLOR}" stroke-width="{width:.3}" stroke-linecap="round" stroke-linejoin="round" fill="none"/>"#,
        width = size * 0.12,
    );
}
