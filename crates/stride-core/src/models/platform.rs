// ABOUTME: Host platform identification used to pick exactly one health backend
// ABOUTME: Anything other than iOS or Android leaves the dashboard permanently unauthorized
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::platforms;

/// Operating system the process runs on, as far as health backends care
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPlatform {
    /// Apple mobile platform (`HealthKit`)
    Ios,
    /// Google mobile platform (Health Connect)
    Android,
    /// Any other platform; no backend applies
    Other(String),
}

impl HostPlatform {
    /// Detect the platform this binary was compiled for
    #[must_use]
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier to a platform
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os.trim().to_ascii_lowercase().as_str() {
            platforms::IOS => Self::Ios,
            platforms::ANDROID => Self::Android,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Platform identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ios => platforms::IOS,
            Self::Android => platforms::ANDROID,
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostPlatform {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_os(s))
    }
}
