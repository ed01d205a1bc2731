// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for stride-cli
// ABOUTME: Text and JSON rendering of dashboard views and day ranges

use anyhow::Result;
use serde::Serialize;
use stride::presentation::{Dashboard, DashboardView};
use stride::provider::HealthDataProvider;

/// Print the dashboard view as text or JSON
pub fn print_view(
    dashboard: &Dashboard,
    view: &DashboardView,
    provider: &HealthDataProvider,
    json: bool,
) -> Result<()> {
    if json {
        #[derive(Serialize)]
        struct Output<'a> {
            backend: Option<&'static str>,
            platform: String,
            #[serde(flatten)]
            view: &'a DashboardView,
        }
        let output = Output {
            backend: provider.backend_name(),
            platform: provider.platform().to_string(),
            view,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match provider.backend_name() {
        Some(backend) => println!("Backend: {backend} ({})", provider.platform()),
        None => println!(
            "Backend: none ({} has no health service, showing zeros)",
            provider.platform()
        ),
    }
    print!("{}", dashboard.render_text(view));
    Ok(())
}
