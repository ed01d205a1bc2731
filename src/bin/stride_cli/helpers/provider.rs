// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Builds a health data provider over synthetic SDKs loaded from a fixture
// ABOUTME: Observes one day and waits for every fetch to settle

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use stride::backends::{
    HealthFixture, PlatformSdks, SyntheticControls, SyntheticHealthConnect, SyntheticHealthKit,
};
use stride::config::StrideConfig;
use stride::models::{CalendarDate, DailyHealthReading};
use stride::provider::HealthDataProvider;
use tracing::info;

/// Fixture from a file, or an empty device when none is given
pub fn load_fixture(path: Option<&Path>) -> Result<HealthFixture> {
    let Some(path) = path else {
        return Ok(HealthFixture::default());
    };
    let fixture = HealthFixture::from_path(path)?;
    info!(path = %path.display(), days = fixture.days.len(), "Fixture loaded");
    Ok(fixture)
}

/// Both synthetic SDK bindings over one fixture; the provider picks the one for its platform
pub fn synthetic_sdks(fixture: HealthFixture) -> PlatformSdks {
    let controls = SyntheticControls::new(fixture);
    PlatformSdks::none()
        .with_health_kit(Arc::new(SyntheticHealthKit::new(controls.clone())))
        .with_health_connect(Arc::new(SyntheticHealthConnect::new(controls)))
}

/// Observe a day and return the provider with the settled reading
pub async fn settled_reading(
    config: &StrideConfig,
    fixture: Option<&Path>,
    date: CalendarDate,
) -> Result<(HealthDataProvider, DailyHealthReading)> {
    let sdks = synthetic_sdks(load_fixture(fixture)?);
    let provider = HealthDataProvider::new(config, &sdks);
    let readings = provider.observe(date).await;
    provider.settle().await;
    let reading = *readings.borrow();
    Ok((provider, reading))
}
