// ABOUTME: Health data provider publishing one daily reading for the observed calendar date
// ABOUTME: Resolves access once, fans out per-metric fetches, and republishes on every change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Data Provider
//!
//! [`HealthDataProvider`] turns the one backend selected for the host platform
//! into a continuously updated [`DailyHealthReading`]:
//!
//! 1. Access is requested once per provider lifetime (or per [`HealthDataProvider::reauthorize`])
//!    and must resolve before any fetch is issued.
//! 2. Whenever the observed date or the permission state changes, a new fetch
//!    cycle starts: one spawned task per permitted metric, scoped to the day range.
//! 3. Each successful fetch replaces the published reading immediately through a
//!    `watch` channel; a failed fetch leaves its field at the previous value.
//!
//! Backend errors are logged and counted, never returned to consumers.
//!
//! Fetch tasks belong to the provider, never to a caller waiting on them:
//! dropping a [`HealthDataProvider::settle`] future leaves every fetch running.
//!
//! Cycles carry a generation number. Under [`StaleResultPolicy::DiscardSuperseded`]
//! a result from an older generation is dropped, so a slow fetch for a previous
//! date cannot overwrite the current one.

mod stats;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tokio::runtime::Handle;
use tokio::sync::{watch, Mutex as AsyncMutex};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::backends::{BackendRegistry, HealthBackend, PlatformSdks};
use crate::config::{StaleResultPolicy, StrideConfig};
use crate::errors::HealthError;
use crate::logging::HealthLogger;
use crate::models::{
    CalendarDate, DailyHealthReading, DayRange, HostPlatform, Metric, MetricSample,
    PermissionState,
};

pub use stats::{FetchStats, FetchStatsSnapshot};

/// Outcome of the last access request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessStatus {
    NotRequested,
    Resolved,
    Denied,
    Unavailable,
}

struct ProviderState {
    date: CalendarDate,
    permission: PermissionState,
    access_resolved: bool,
    generation: u64,
}

struct ProviderInner {
    backend: Option<Arc<dyn HealthBackend>>,
    platform: HostPlatform,
    policy: StaleResultPolicy,
    reading: watch::Sender<DailyHealthReading>,
    state: Mutex<ProviderState>,
    access: AsyncMutex<AccessStatus>,
    tasks: Mutex<JoinSet<()>>,
    in_flight: watch::Sender<usize>,
    stats: FetchStats,
}

/// Counts one spawned fetch until its future is dropped, completed or not
struct InFlightFetch {
    inner: Arc<ProviderInner>,
}

impl InFlightFetch {
    fn enter(inner: Arc<ProviderInner>) -> Self {
        inner.in_flight.send_modify(|count| *count += 1);
        Self { inner }
    }

    fn provider(&self) -> &ProviderInner {
        &self.inner
    }
}

impl Drop for InFlightFetch {
    fn drop(&mut self) {
        self.inner
            .in_flight
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}

/// Publishes the daily reading for the observed date
///
/// Cloning shares the same state and channel.
#[derive(Clone)]
pub struct HealthDataProvider {
    inner: Arc<ProviderInner>,
}

impl HealthDataProvider {
    /// Select the backend for the configured platform from the supplied SDK bindings
    ///
    /// An unsupported platform or a missing binding is logged; the provider then
    /// stays unauthorized and publishes the zero reading.
    #[must_use]
    pub fn new(config: &StrideConfig, sdks: &PlatformSdks) -> Self {
        let platform = config.resolved_platform();
        let backend = match BackendRegistry::new().select(&platform, sdks) {
            Ok(backend) => Some(backend),
            Err(e) => {
                warn!(%platform, error = %e, code = ?e.code(), "No health backend, readings stay at zero");
                None
            }
        };
        Self::with_backend(backend, platform, config.stale_policy)
    }

    /// Provider over an explicit backend (or none)
    #[must_use]
    pub fn with_backend(
        backend: Option<Arc<dyn HealthBackend>>,
        platform: HostPlatform,
        policy: StaleResultPolicy,
    ) -> Self {
        let date = CalendarDate::today();
        let (reading, _) = watch::channel(DailyHealthReading::zero(date));
        Self {
            inner: Arc::new(ProviderInner {
                backend,
                platform,
                policy,
                reading,
                state: Mutex::new(ProviderState {
                    date,
                    permission: PermissionState::Unauthorized,
                    access_resolved: false,
                    generation: 0,
                }),
                access: AsyncMutex::new(AccessStatus::NotRequested),
                tasks: Mutex::new(JoinSet::new()),
                in_flight: watch::channel(0).0,
                stats: FetchStats::default(),
            }),
        }
    }

    /// Request access if it has not been requested yet
    ///
    /// Later calls return the stored state without contacting the platform.
    pub async fn initialize(&self) -> PermissionState {
        self.inner.resolve_access(false).await
    }

    /// Observe a date: resolve access once, fetch the day, and subscribe to its reading
    ///
    /// Re-observing the current date with unchanged permission starts no new fetches.
    pub async fn observe(&self, date: CalendarDate) -> watch::Receiver<DailyHealthReading> {
        self.set_date(date);
        self.initialize().await;
        self.subscribe()
    }

    /// Change the observed date; returns the generation of the started cycle
    ///
    /// Returns `None` when the date is unchanged or nothing may be fetched.
    /// Fetches already in flight are not cancelled.
    pub fn set_date(&self, date: CalendarDate) -> Option<u64> {
        {
            let mut state = self.inner.lock_state();
            if state.date == date {
                return None;
            }
            debug!(from = %state.date, to = %date, "Observed date changed");
            state.date = date;
        }
        self.inner.start_cycle()
    }

    /// Re-run the fetch cycle for the current date and permission state
    pub fn refresh(&self) -> Option<u64> {
        self.inner.start_cycle()
    }

    /// Request access again, e.g. after the user changed settings, then re-fetch
    ///
    /// A platform reported unavailable stays unavailable.
    pub async fn reauthorize(&self) -> PermissionState {
        self.inner.resolve_access(true).await
    }

    /// Latest published reading
    #[must_use]
    pub fn current(&self) -> DailyHealthReading {
        *self.inner.reading.borrow()
    }

    /// New receiver of published readings
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DailyHealthReading> {
        self.inner.reading.subscribe()
    }

    /// Current permission state
    #[must_use]
    pub fn permission(&self) -> PermissionState {
        self.inner.lock_state().permission.clone()
    }

    /// Currently observed date
    #[must_use]
    pub fn date(&self) -> CalendarDate {
        self.inner.lock_state().date
    }

    /// Name of the selected backend, `None` on unsupported platforms
    #[must_use]
    pub fn backend_name(&self) -> Option<&'static str> {
        self.inner.backend.as_ref().map(|backend| backend.name())
    }

    /// Platform the backend was selected for
    #[must_use]
    pub fn platform(&self) -> &HostPlatform {
        &self.inner.platform
    }

    /// Stale result policy in effect
    #[must_use]
    pub fn stale_policy(&self) -> StaleResultPolicy {
        self.inner.policy
    }

    /// Fetch counters
    #[must_use]
    pub fn stats(&self) -> FetchStatsSnapshot {
        self.inner.stats.snapshot()
    }

    /// Number of fetches currently running
    #[must_use]
    pub fn in_flight(&self) -> usize {
        *self.inner.in_flight.borrow()
    }

    /// Wait until no fetch is running
    ///
    /// Cancel-safe: dropping the returned future does not affect the fetches.
    pub async fn settle(&self) {
        let mut in_flight = self.inner.in_flight.subscribe();
        if in_flight.wait_for(|count| *count == 0).await.is_err() {
            warn!("Fetch counter closed while settling");
        }
        self.inner.reap_finished();
    }
}

impl ProviderInner {
    fn lock_state(&self) -> MutexGuard<'_, ProviderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_tasks(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop handles of finished tasks, logging any that panicked
    fn reap_finished(&self) {
        let mut tasks = self.lock_tasks();
        while let Some(result) = tasks.try_join_next() {
            if let Err(e) = result {
                warn!(error = %e, "Fetch task ended abnormally");
            }
        }
    }

    async fn resolve_access(self: &Arc<Self>, force: bool) -> PermissionState {
        let Some(backend) = self.backend.clone() else {
            debug!(platform = %self.platform, "No backend, access stays unauthorized");
            return PermissionState::Unauthorized;
        };

        let mut status = self.access.lock().await;
        match *status {
            AccessStatus::Unavailable => return PermissionState::Unauthorized,
            AccessStatus::Resolved | AccessStatus::Denied if !force => {
                return self.lock_state().permission.clone();
            }
            _ => {}
        }

        let (next_status, permission) = match backend.request_access().await {
            Ok(permission) => {
                let granted: Vec<Metric> = permission.granted_metrics().metrics().collect();
                HealthLogger::log_access_event(backend.name(), &granted, true, "");
                (AccessStatus::Resolved, permission)
            }
            Err(e) => {
                HealthLogger::log_access_event(backend.name(), &[], false, &e.to_string());
                let next = if matches!(e, HealthError::PlatformUnavailable { .. }) {
                    AccessStatus::Unavailable
                } else {
                    AccessStatus::Denied
                };
                (next, PermissionState::Unauthorized)
            }
        };
        *status = next_status;

        let changed = {
            let mut state = self.lock_state();
            let changed = state.permission != permission;
            state.permission = permission.clone();
            state.access_resolved = next_status != AccessStatus::Unavailable;
            changed
        };
        drop(status);

        if changed || force {
            self.start_cycle();
        }
        permission
    }

    /// Bump the generation and spawn one fetch per permitted metric
    fn start_cycle(self: &Arc<Self>) -> Option<u64> {
        let (date, permission, access_resolved, generation) = {
            let mut state = self.lock_state();
            state.generation += 1;
            (
                state.date,
                state.permission.clone(),
                state.access_resolved,
                state.generation,
            )
        };

        let backend = self.backend.clone()?;
        if !access_resolved {
            debug!(%date, "Access not resolved yet, nothing to fetch");
            return None;
        }
        let range = match date.day_range() {
            Ok(range) => range,
            Err(e) => {
                warn!(%date, error = %e, "Cannot scope fetches to this date");
                return None;
            }
        };

        let permitted = backend.permitted_metrics(&permission);
        let skipped: Vec<Metric> = Metric::ALL
            .into_iter()
            .filter(|metric| !permitted.includes(*metric))
            .collect();
        if !skipped.is_empty() {
            debug!(%date, ?skipped, "Skipping metrics without permission");
            self.stats.record_skipped(skipped.len() as u64);
        }
        if permitted.is_empty() {
            return None;
        }

        let Ok(handle) = Handle::try_current() else {
            warn!(%date, "No async runtime, fetch cycle not started");
            return None;
        };

        self.stats.record_cycle();
        info!(
            backend = backend.name(),
            %date,
            generation,
            metrics = ?permitted,
            "Starting fetch cycle"
        );

        self.reap_finished();
        let mut tasks = self.lock_tasks();
        for metric in permitted.metrics() {
            let fetch = InFlightFetch::enter(Arc::clone(self));
            let backend = Arc::clone(&backend);
            tasks.spawn_on(
                async move {
                    fetch
                        .provider()
                        .fetch_and_publish(backend, metric, date, range, generation)
                        .await;
                },
                &handle,
            );
        }
        Some(generation)
    }

    async fn fetch_and_publish(
        &self,
        backend: Arc<dyn HealthBackend>,
        metric: Metric,
        date: CalendarDate,
        range: DayRange,
        generation: u64,
    ) {
        let started = Instant::now();
        let result = backend.fetch_metric(metric, &range).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(sample) => {
                self.stats.record_success();
                HealthLogger::log_fetch_result(
                    backend.name(),
                    metric,
                    date,
                    generation,
                    duration_ms,
                    None,
                );
                self.publish(sample, date, generation);
            }
            Err(e) => {
                self.stats.record_failure();
                HealthLogger::log_fetch_result(
                    backend.name(),
                    metric,
                    date,
                    generation,
                    duration_ms,
                    Some(&e.to_string()),
                );
            }
        }
    }

    /// Swap in a reading with one field replaced, unless the result is stale
    fn publish(&self, sample: MetricSample, date: CalendarDate, generation: u64) -> bool {
        let state = self.lock_state();
        if self.policy == StaleResultPolicy::DiscardSuperseded && generation < state.generation {
            self.stats.record_discard();
            debug!(
                metric = %sample.metric(),
                %date,
                generation,
                current = state.generation,
                "Discarding result from superseded cycle"
            );
            return false;
        }

        self.reading.send_if_modified(|reading| {
            let next = reading.with_sample(date, sample);
            if next == *reading {
                false
            } else {
                *reading = next;
                true
            }
        })
    }
}
