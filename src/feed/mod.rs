pub mod http;
pub mod parse;

use crate::models::Snapshot;
use crate::Result;

/// Source of account snapshots.
///
/// `cache_bust` carries the caller's epoch-millisecond timestamp on a forced
/// refresh; implementations append it as a query parameter so intermediate
/// HTTP caches between the dashboard and the feed are bypassed.
pub trait Feed {
    fn fetch_snapshot(&self, cache_bust: Option<i64>) -> Result<Snapshot>;
}
