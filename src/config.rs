// ABOUTME: Environment-driven configuration for the health data provider and dashboard
// ABOUTME: Platform override, step goal, stale result policy, and ring animation duration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Every value has a default, so `StrideConfig::from_env` never fails: an
//! unparseable value is logged at `warn` and replaced by its default.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{defaults, env_vars};
use crate::errors::HealthError;
use crate::models::HostPlatform;

/// What to do with a fetch result that arrives after a newer cycle started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaleResultPolicy {
    /// Drop results from superseded cycles
    #[default]
    DiscardSuperseded,
    /// Publish every result in completion order, even a superseded one
    LastWriteWins,
}

impl StaleResultPolicy {
    /// Configuration spelling
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DiscardSuperseded => "discard",
            Self::LastWriteWins => "last-write-wins",
        }
    }
}

impl fmt::Display for StaleResultPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaleResultPolicy {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" | "discard-superseded" => Ok(Self::DiscardSuperseded),
            "last-write-wins" | "lww" => Ok(Self::LastWriteWins),
            other => Err(HealthError::config(
                env_vars::STALE_POLICY,
                format!("unknown policy '{other}', expected 'discard' or 'last-write-wins'"),
            )),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrideConfig {
    /// Platform to select a backend for; `None` detects the host
    pub platform: Option<HostPlatform>,
    /// Daily step goal for ring progress
    pub step_goal: u32,
    /// Handling of results from superseded fetch cycles
    pub stale_policy: StaleResultPolicy,
    /// Ring fill animation duration in milliseconds
    pub ring_animation_ms: u64,
}

impl Default for StrideConfig {
    fn default() -> Self {
        Self {
            platform: None,
            step_goal: defaults::STEP_GOAL,
            stale_policy: StaleResultPolicy::default(),
            ring_animation_ms: defaults::RING_ANIMATION_MS,
        }
    }
}

impl StrideConfig {
    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let platform = env::var(env_vars::PLATFORM)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| HostPlatform::from_os(&value));

        let step_goal = parse_env(env_vars::STEP_GOAL, defaults::STEP_GOAL);
        let step_goal = if step_goal == 0 {
            warn!(
                key = env_vars::STEP_GOAL,
                default = defaults::STEP_GOAL,
                "Step goal must be positive, using default"
            );
            defaults::STEP_GOAL
        } else {
            step_goal
        };

        Self {
            platform,
            step_goal,
            stale_policy: parse_env(env_vars::STALE_POLICY, StaleResultPolicy::default()),
            ring_animation_ms: parse_env(env_vars::RING_ANIMATION_MS, defaults::RING_ANIMATION_MS),
        }
    }

    /// Platform to use, detecting the host when not overridden
    #[must_use]
    pub fn resolved_platform(&self) -> HostPlatform {
        self.platform.clone().unwrap_or_else(HostPlatform::detect)
    }

    /// Ring fill animation duration
    #[must_use]
    pub const fn ring_animation(&self) -> Duration {
        Duration::from_millis(self.ring_animation_ms)
    }

    /// Override the platform
    #[must_use]
    pub fn with_platform(mut self, platform: HostPlatform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Override the stale result policy
    #[must_use]
    pub const fn with_stale_policy(mut self, policy: StaleResultPolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    /// Override the step goal
    #[must_use]
    pub const fn with_step_goal(mut self, step_goal: u32) -> Self {
        self.step_goal = step_goal;
        self
    }
}

/// Parse an environment variable, falling back to a default with a warning when invalid
fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!(key, value = %raw, %default, error = %e, "Invalid configuration value, using default");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "discard".parse::<StaleResultPolicy>().unwrap(),
            StaleResultPolicy::DiscardSuperseded
        );
        assert_eq!(
            " Last-Write-Wins ".parse::<StaleResultPolicy>().unwrap(),
            StaleResultPolicy::LastWriteWins
        );
        assert!("newest".parse::<StaleResultPolicy>().is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = StrideConfig::default()
            .with_platform(HostPlatform::Android)
            .with_step_goal(8000);
        assert_eq!(config.resolved_platform(), HostPlatform::Android);
        assert_eq!(config.step_goal, 8000);
        assert_eq!(config.ring_animation(), Duration::from_millis(1500));
    }
}
