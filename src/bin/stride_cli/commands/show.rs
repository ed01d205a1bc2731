// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: `show` subcommand printing the dashboard for one day
// ABOUTME: Reports fetch counters at debug level after the reading settles

use std::path::Path;

use anyhow::Result;
use stride::config::StrideConfig;
use stride::models::CalendarDate;
use stride::presentation::Dashboard;
use tracing::debug;

use crate::helpers::{display, provider};

pub async fn run(
    config: &StrideConfig,
    fixture: Option<&Path>,
    date: CalendarDate,
    json: bool,
) -> Result<()> {
    let (provider, reading) = provider::settled_reading(config, fixture, date).await?;
    debug!(stats = ?provider.stats(), permission = ?provider.permission(), "Reading settled");

    let dashboard = Dashboard::from_config(config);
    let view = dashboard.view(date, &reading);
    display::print_view(&dashboard, &view, &provider, json)
}
