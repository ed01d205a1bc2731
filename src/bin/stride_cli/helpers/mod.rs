// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Shared helpers for stride-cli
// ABOUTME: Date arguments, fixture-backed provider setup, and output formatting

pub mod display;
pub mod provider;

use clap::Args;
use stride::errors::HealthResult;
use stride::models::CalendarDate;

/// Day selection shared by all subcommands
#[derive(Args, Debug, Clone, Copy)]
pub struct DateArgs {
    /// Day as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<CalendarDate>,

    /// Days to step from the selected day, like pressing the arrows (negative for back)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub offset: i64,
}

impl DateArgs {
    /// Selected day after applying the offset
    pub fn resolve(self) -> HealthResult<CalendarDate> {
        self.date
            .unwrap_or_else(CalendarDate::today)
            .add_days(self.offset)
    }
}
