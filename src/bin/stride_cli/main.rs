// ABOUTME: Stride CLI - renders the daily health dashboard from fixture data
// ABOUTME: Shows readings, writes the ring SVG, and prints day range filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Dashboard for a day on an Android host, data from a fixture
//! stride-cli --platform android --fixture demo.json show --date 2024-01-01
//!
//! # Same as JSON
//! stride-cli --platform ios --fixture demo.json --json show --date 2024-01-01
//!
//! # Ring SVG for yesterday
//! stride-cli --platform android --fixture demo.json ring --offset -1 --output ring.svg
//!
//! # Local-day time range filter sent to Health Connect
//! stride-cli range --date 2024-03-31
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stride::config::StrideConfig;
use stride::logging::LoggingConfig;
use stride::models::HostPlatform;
use tracing::debug;

use helpers::DateArgs;

#[derive(Parser)]
#[command(
    name = "stride-cli",
    about = "Stride daily health dashboard",
    long_about = "Reads steps, distance, and flights climbed through the HealthKit or Health Connect backend (backed by fixture data) and renders the dashboard."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Platform to select a backend for (ios, android); defaults to STRIDE_PLATFORM or the host
    #[arg(long, global = true)]
    platform: Option<String>,

    /// Fixture file with per-day health data
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Show the dashboard for a day
    Show {
        #[command(flatten)]
        date: DateArgs,
    },

    /// Write the ring SVG for a day
    Ring {
        #[command(flatten)]
        date: DateArgs,

        /// Output file (stdout if omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Use the component's default ring size instead of the dashboard's
        #[arg(long)]
        small: bool,

        /// Render the animation frame this many milliseconds after it starts
        #[arg(long)]
        elapsed_ms: Option<u64>,
    },

    /// Print the local-time range queried for a day
    Range {
        #[command(flatten)]
        date: DateArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env().with_verbosity(cli.verbose).init()?;

    let mut config = StrideConfig::from_env();
    if let Some(platform) = cli.platform.as_deref() {
        config = config.with_platform(HostPlatform::from_os(platform));
    }
    debug!(?config, "Configuration loaded");

    match cli.command {
        Command::Show { date } => {
            commands::show::run(&config, cli.fixture.as_deref(), date.resolve()?, cli.json).await?;
        }
        Command::Ring {
            date,
            output,
            small,
            elapsed_ms,
        } => {
            commands::ring::run(
                &config,
                cli.fixture.as_deref(),
                date.resolve()?,
                output.as_deref(),
                small,
                elapsed_ms,
            )
            .await?;
        }
        Command::Range { date } => {
            commands::range::run(date.resolve()?, cli.json)?;
        }
    }

    Ok(())
}
