// ABOUTME: Tests for backend descriptors and platform-based backend selection
// ABOUTME: Verifies exactly one backend is chosen per platform and unsupported hosts are rejected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use stride_providers::errors::{ErrorCode, HealthError};
use stride_providers::models::HostPlatform;
use stride_providers::{
    BackendCapabilities, BackendKind, BackendRegistry, PlatformSdks, SyntheticControls,
    SyntheticHealthConnect, SyntheticHealthKit,
};

fn both_sdks() -> PlatformSdks {
    let controls = SyntheticControls::default();
    PlatformSdks::none()
        .with_health_kit(Arc::new(SyntheticHealthKit::new(controls.clone())))
        .with_health_connect(Arc::new(SyntheticHealthConnect::new(controls)))
}

#[test]
fn test_registry_lists_both_backends() {
    let registry = BackendRegistry::new();
    assert_eq!(
        registry.supported_backends(),
        vec!["healthkit", "health_connect"]
    );
}

#[test]
fn test_descriptor_for_platform() {
    let registry = BackendRegistry::new();

    let ios = registry.descriptor_for(&HostPlatform::Ios).unwrap();
    assert_eq!(ios.kind(), BackendKind::HealthKit);
    assert!(ios.capabilities().contains(BackendCapabilities::PRE_AGGREGATED));

    let android = registry.descriptor_for(&HostPlatform::Android).unwrap();
    assert_eq!(android.kind(), BackendKind::HealthConnect);
    assert!(android.capabilities().requires_aggregation());

    assert!(registry
        .descriptor_for(&HostPlatform::Other("linux".to_owned()))
        .is_none());
}

#[test]
fn test_select_by_platform() {
    let registry = BackendRegistry::new();
    let sdks = both_sdks();

    let ios = registry.select(&HostPlatform::Ios, &sdks).unwrap();
    assert_eq!(ios.name(), "healthkit");

    let android = registry.select(&HostPlatform::Android, &sdks).unwrap();
    assert_eq!(android.name(), "health_connect");
}

#[test]
fn test_select_rejects_unsupported_platform() {
    let registry = BackendRegistry::new();
    let result = registry.select(&HostPlatform::from_os("windows"), &both_sdks());

    let Err(err) = result else {
        panic!("windows must not select a backend");
    };
    assert_eq!(err.code(), ErrorCode::UnsupportedPlatform);
    assert_eq!(
        err,
        HealthError::UnsupportedPlatform {
            platform: "windows".to_owned()
        }
    );
}

#[test]
fn test_select_without_binding_is_unavailable() {
    let registry = BackendRegistry::new();
    let result = registry.select(&HostPlatform::Android, &PlatformSdks::none());

    let Err(err) = result else {
        panic!("a missing SDK binding must not select a backend");
    };
    assert_eq!(err.code(), ErrorCode::PlatformUnavailable);
}
