// ABOUTME: Backend registry that selects exactly one health backend for the host platform
// ABOUTME: Pairs registered descriptors with the SDK bindings the host supplies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::core::HealthBackend;
use crate::errors::{HealthError, HealthResult};
use crate::health_connect::{HealthConnectApi, HealthConnectBackend};
use crate::healthkit::{AppleHealthKitBackend, HealthKitApi};
use crate::models::HostPlatform;
use crate::spi::{BackendDescriptor, BackendKind, HealthConnectDescriptor, HealthKitDescriptor};

/// SDK bindings supplied by the host application
#[derive(Clone, Default)]
pub struct PlatformSdks {
    /// `HealthKit` binding, present on iOS hosts
    pub health_kit: Option<Arc<dyn HealthKitApi>>,
    /// Health Connect binding, present on Android hosts
    pub health_connect: Option<Arc<dyn HealthConnectApi>>,
}

impl PlatformSdks {
    /// No bindings
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Attach a `HealthKit` binding
    #[must_use]
    pub fn with_health_kit(mut self, api: Arc<dyn HealthKitApi>) -> Self {
        self.health_kit = Some(api);
        self
    }

    /// Attach a Health Connect binding
    #[must_use]
    pub fn with_health_connect(mut self, api: Arc<dyn HealthConnectApi>) -> Self {
        self.health_connect = Some(api);
        self
    }
}

impl fmt::Debug for PlatformSdks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformSdks")
            .field("health_kit", &self.health_kit.is_some())
            .field("health_connect", &self.health_connect.is_some())
            .finish()
    }
}

/// Registry of backend descriptors
pub struct BackendRegistry {
    descriptors: Vec<Box<dyn BackendDescriptor>>,
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendRegistry {
    /// Registry with the `HealthKit` and Health Connect descriptors
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            descriptors: Vec::new(),
        };
        registry.register(Box::new(HealthKitDescriptor));
        registry.register(Box::new(HealthConnectDescriptor));
        registry
    }

    /// Register a descriptor
    pub fn register(&mut self, descriptor: Box<dyn BackendDescriptor>) {
        self.descriptors.push(descriptor);
    }

    /// Registered backend names
    #[must_use]
    pub fn supported_backends(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(|d| d.name()).collect()
    }

    /// Descriptor serving a platform, if any
    #[must_use]
    pub fn descriptor_for(&self, platform: &HostPlatform) -> Option<&dyn BackendDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.platform() == *platform)
            .map(|d| &**d)
    }

    /// Select the one backend for a platform
    ///
    /// # Errors
    ///
    /// Returns `HealthError::UnsupportedPlatform` when no descriptor serves the
    /// platform and `HealthError::PlatformUnavailable` when the host did not
    /// supply the SDK binding the descriptor needs.
    pub fn select(
        &self,
        platform: &HostPlatform,
        sdks: &PlatformSdks,
    ) -> HealthResult<Arc<dyn HealthBackend>> {
        let Some(descriptor) = self.descriptor_for(platform) else {
            warn!(%platform, "No health backend supports this platform");
            return Err(HealthError::UnsupportedPlatform {
                platform: platform.to_string(),
            });
        };

        let backend: Option<Arc<dyn HealthBackend>> = match descriptor.kind() {
            BackendKind::HealthKit => sdks
                .health_kit
                .clone()
                .map(|api| Arc::new(AppleHealthKitBackend::new(api)) as Arc<dyn HealthBackend>),
            BackendKind::HealthConnect => sdks
                .health_connect
                .clone()
                .map(|api| Arc::new(HealthConnectBackend::new(api)) as Arc<dyn HealthBackend>),
        };

        match backend {
            Some(backend) => {
                info!(
                    %platform,
                    backend = descriptor.display_name(),
                    capabilities = ?descriptor.capabilities(),
                    "Health backend selected"
                );
                Ok(backend)
            }
            None => {
                warn!(%platform, backend = descriptor.name(), "SDK binding missing");
                Err(HealthError::PlatformUnavailable {
                    backend: descriptor.name(),
                })
            }
        }
    }
}
