use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing CRUD outcomes.
#[derive(Default)]
pub struct StudentMetrics {
    created: AtomicU64,
    updated: AtomicU64,
    deleted: AtomicU64,
    conflicts: AtomicU64,
    not_found: AtomicU64,
}

impl StudentMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful insert.
    pub fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful overwrite.
    pub fn record_updated(&self) {
        self.updated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful removal.
    pub fn record_deleted(&self) {
        self.deleted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an insert rejected because the id already existed.
    pub fn record_conflict(&self) {
        self.conflicts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup, update, or delete that found no record.
    pub fn record_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters alongside the store size.
    pub fn snapshot(&self, students: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            students: students as u64,
            created: self.created.load(Ordering::Relaxed),
            updated: self.updated.load(Ordering::Relaxed),
            deleted: self.deleted.load(Ordering::Relaxed),
            conflicts: self.conflicts.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of CRUD counters used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of records currently held by the store.
    pub students: u64,
    /// Records inserted since startup.
    pub created: u64,
    /// Records overwritten since startup.
    pub updated: u64,
    /// Records removed since startup.
    pub deleted: u64,
    /// Inserts rejected because of an existing id.
    pub conflicts: u64,
    /// Requests that referenced an absent id.
    pub not_found: u64,
}
