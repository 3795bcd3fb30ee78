use crate::app::metrics;
use crate::cache::SnapshotCache;
use crate::feed::Feed;
use crate::models::{ConnectionStatus, Snapshot};
use crate::view::format::format_timestamp;
use tracing::{info, warn};

/// Drives the fetch/cache/status pipeline.
///
/// All fetch-path failures stop here: the status flips to offline and the
/// status line carries the error text, but the previous snapshot stays
/// cached so already-rendered views keep their data until the next
/// successful fetch.
pub struct RefreshCoordinator<F: Feed> {
    feed: F,
    cache: SnapshotCache,
    status: ConnectionStatus,
    status_line: String,
    in_flight: bool,
    fetch_seq: u64,
    applied_seq: u64,
}

impl<F: Feed> RefreshCoordinator<F> {
    pub fn new(feed: F, cache_ms: u64) -> Self {
        Self {
            feed,
            cache: SnapshotCache::new(cache_ms),
            status: ConnectionStatus::Loading,
            status_line: "Waiting for first update".to_string(),
            in_flight: false,
            fetch_seq: 0,
            applied_seq: 0,
        }
    }

    /// Returns the snapshot to render, or `None` when there is no data at
    /// all (first fetch failed). A fresh cache entry is returned without any
    /// status change or network I/O; a re-entrant call while a fetch is in
    /// flight is a no-op returning the cached value.
    pub fn refresh(&mut self, force: bool, now_ms: i64) -> Option<&Snapshot> {
        if self.cache.fresh(now_ms, force) {
            metrics::inc_cache_hit();
            return self.cache.snapshot();
        }
        if self.in_flight {
            return self.cache.snapshot();
        }

        self.in_flight = true;
        self.status = ConnectionStatus::Loading;
        self.fetch_seq += 1;
        let seq = self.fetch_seq;
        metrics::inc_refresh();
        if force {
            metrics::inc_forced_refresh();
        }

        let outcome = self.feed.fetch_snapshot(force.then_some(now_ms));
        self.in_flight = false;

        match outcome {
            Ok(snapshot) => {
                if seq < self.applied_seq {
                    // a newer fetch already landed; drop this completion
                    return self.cache.snapshot();
                }
                self.applied_seq = seq;
                self.status = ConnectionStatus::Online;
                self.status_line =
                    format!("Last update: {}", format_timestamp(snapshot.last_updated));
                info!(accounts = snapshot.accounts.len(), forced = force, "snapshot fetched");
                metrics::set_last_fetch(now_ms / 1000);
                self.cache.store(snapshot, now_ms);
                self.cache.snapshot()
            }
            Err(err) => {
                self.status = ConnectionStatus::Offline;
                self.status_line = format!("Error: {}", err.message);
                metrics::inc_fetch_error();
                warn!(error = %err.message, "snapshot fetch failed");
                None
            }
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    /// Last successfully fetched snapshot, regardless of freshness.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.cache.snapshot()
    }

    pub fn fetched_at_ms(&self) -> Option<i64> {
        self.cache.fetched_at_ms()
    }
}
