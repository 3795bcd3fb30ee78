use crate::models::Snapshot;

#[derive(Clone, Debug)]
struct CacheEntry {
    snapshot: Snapshot,
    fetched_at_ms: i64,
}

/// Single-slot snapshot cache with a fixed freshness window.
///
/// The slot is replaced wholesale on every successful fetch; freshness reads
/// never mutate it.
#[derive(Debug)]
pub struct SnapshotCache {
    window_ms: i64,
    entry: Option<CacheEntry>,
}

impl SnapshotCache {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms: window_ms as i64,
            entry: None,
        }
    }

    /// Fresh iff not forced, a snapshot is present, and the fetch is younger
    /// than the window.
    pub fn fresh(&self, now_ms: i64, force: bool) -> bool {
        if force {
            return false;
        }
        match &self.entry {
            Some(entry) => now_ms - entry.fetched_at_ms < self.window_ms,
            None => false,
        }
    }

    pub fn store(&mut self, snapshot: Snapshot, now_ms: i64) {
        self.entry = Some(CacheEntry {
            snapshot,
            fetched_at_ms: now_ms,
        });
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.entry.as_ref().map(|entry| &entry.snapshot)
    }

    pub fn fetched_at_ms(&self) -> Option<i64> {
        self.entry.as_ref().map(|entry| entry.fetched_at_ms)
    }
}
