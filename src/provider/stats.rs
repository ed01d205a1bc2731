// ABOUTME: Lock-free counters for fetch cycles, metric fetches, and discarded stale results
// ABOUTME: Makes swallowed fetch failures observable without surfacing them to consumers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Fetch counters shared by all tasks of a provider
#[derive(Debug, Default)]
pub struct FetchStats {
    cycles_started: AtomicU64,
    fetches_succeeded: AtomicU64,
    fetches_failed: AtomicU64,
    metrics_skipped: AtomicU64,
    results_discarded: AtomicU64,
}

impl FetchStats {
    pub(crate) fn record_cycle(&self) {
        self.cycles_started.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_success(&self) {
        self.fetches_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.fetches_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_skipped(&self, count: u64) {
        self.metrics_skipped.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_discard(&self) {
        self.results_discarded.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters
    #[must_use]
    pub fn snapshot(&self) -> FetchStatsSnapshot {
        FetchStatsSnapshot {
            cycles_started: self.cycles_started.load(Ordering::Relaxed),
            fetches_succeeded: self.fetches_succeeded.load(Ordering::Relaxed),
            fetches_failed: self.fetches_failed.load(Ordering::Relaxed),
            metrics_skipped: self.metrics_skipped.load(Ordering::Relaxed),
            results_discarded: self.results_discarded.load(Ordering::Relaxed),
        }
    }
}

/// Counter values at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchStatsSnapshot {
    /// Fetch cycles started (date changes, refreshes, permission changes)
    pub cycles_started: u64,
    /// Metric fetches that returned a value
    pub fetches_succeeded: u64,
    /// Metric fetches that failed; the field kept its previous value
    pub fetches_failed: u64,
    /// Metrics not fetched for lack of permission
    pub metrics_skipped: u64,
    /// Results dropped because a newer cycle had started
    pub results_discarded: u64,
}

impl FetchStatsSnapshot {
    /// Metric fetches that completed either way
    #[must_use]
    pub const fn fetches_completed(&self) -> u64 {
        self.fetches_succeeded + self.fetches_failed
    }
}
