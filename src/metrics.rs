use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Tracks counters and readiness latency across preload sessions
#[derive(Debug, Default)]
pub struct PreloadMetrics {
    ready_latency: RwLock<HashMap<String, Duration>>,
    items_registered: AtomicU64,
    items_ready: AtomicU64,
    items_dropped: AtomicU64,
    sessions_completed: AtomicU64,
    sessions_timed_out: AtomicU64,
}

impl PreloadMetrics {
    /// Create a new instance of PreloadMetrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `count` items were registered for loading
    pub fn record_registered(&self, count: usize) {
        self.items_registered
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record the time an item took to report ready
    pub fn record_ready(&self, key: String, latency: Duration) {
        self.items_ready.fetch_add(1, Ordering::Relaxed);
        self.ready_latency.write().insert(key, latency);
    }

    /// Record an item whose signal was dropped unfired
    pub fn record_dropped(&self) {
        self.items_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_session_completed(&self) {
        self.sessions_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_session_timed_out(&self) {
        self.sessions_timed_out.fetch_add(1, Ordering::Relaxed);
    }

    pub fn items_registered(&self) -> u64 {
        self.items_registered.load(Ordering::Relaxed)
    }

    pub fn items_ready(&self) -> u64 {
        self.items_ready.load(Ordering::Relaxed)
    }

    pub fn items_dropped(&self) -> u64 {
        self.items_dropped.load(Ordering::Relaxed)
    }

    pub fn sessions_completed(&self) -> u64 {
        self.sessions_completed.load(Ordering::Relaxed)
    }

    pub fn sessions_timed_out(&self) -> u64 {
        self.sessions_timed_out.load(Ordering::Relaxed)
    }

    /// Latency of the most recent readiness for an item key
    pub fn ready_latency(&self, key: &str) -> Option<Duration> {
        self.ready_latency.read().get(key).cloned()
    }

    /// Slowest recorded item, if any
    pub fn slowest(&self) -> Option<(String, Duration)> {
        self.ready_latency
            .read()
            .iter()
            .max_by_key(|(_, latency)| **latency)
            .map(|(key, latency)| (key.clone(), *latency))
    }
}

/// A thread-safe wrapper around PreloadMetrics
#[derive(Debug, Clone, Default)]
pub struct PreloadMetricsHandle(Arc<PreloadMetrics>);

impl PreloadMetricsHandle {
    /// Create a new metrics handle
    pub fn new() -> Self {
        Self(Arc::new(PreloadMetrics::new()))
    }

    /// Get a reference to the underlying metrics
    pub fn inner(&self) -> &PreloadMetrics {
        &self.0
    }
}

impl std::ops::Deref for PreloadMetricsHandle {
    type Target = PreloadMetrics;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
