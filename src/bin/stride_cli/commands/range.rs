// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: `range` subcommand printing the local-time bounds queried for a day
// ABOUTME: Shows both the Health Connect filter and the HealthKit query options

use anyhow::Result;
use serde_json::json;
use stride::backends::health_connect::TimeRangeFilter;
use stride::backends::healthkit::HealthInputOptions;
use stride::models::CalendarDate;

pub fn run(date: CalendarDate, json: bool) -> Result<()> {
    let range = date.day_range()?;

    if json {
        let output = json!({
            "date": date,
            "timeRangeFilter": TimeRangeFilter::for_range(&range),
            "healthKitOptions": HealthInputOptions::for_range(&range),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} ({})", date.display_label(), date);
    println!("  local start: {}", range.start.to_rfc3339());
    println!("  local end:   {}", range.end.to_rfc3339());
    println!("  between {} and {}", range.start_rfc3339(), range.end_rfc3339());
    Ok(())
}
