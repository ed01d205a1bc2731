// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: `ring` subcommand writing the ring progress SVG for one day
// ABOUTME: Renders the settled fill, or one frame of the fill animation

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use stride::config::StrideConfig;
use stride::models::CalendarDate;
use stride::presentation::{progress, Dashboard, RingGeometry};
use tracing::info;

use crate::helpers::provider;

pub async fn run(
    config: &StrideConfig,
    fixture: Option<&Path>,
    date: CalendarDate,
    output: Option<&Path>,
    small: bool,
    elapsed_ms: Option<u64>,
) -> Result<()> {
    let (_provider, reading) = provider::settled_reading(config, fixture, date).await?;

    let mut dashboard = Dashboard::from_config(config);
    if small {
        dashboard.ring = RingGeometry::default();
    }
    let target = progress(reading.steps, dashboard.step_goal);
    let fill = elapsed_ms.map_or(target, |ms| {
        dashboard.fill_at(target, Duration::from_millis(ms))
    });
    let svg = dashboard.ring_svg(fill);

    match output {
        Some(path) => {
            fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), %date, fill, "Ring written");
        }
        None => print!("{svg}"),
    }
    Ok(())
}
