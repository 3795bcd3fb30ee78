use mtwatch::cache::SnapshotCache;
use mtwatch::models::Snapshot;

fn snapshot(stamp: i64) -> Snapshot {
    Snapshot {
        last_updated: stamp,
        accounts: Vec::new(),
    }
}

#[test]
fn empty_cache_is_never_fresh() {
    let cache = SnapshotCache::new(60_000);
    assert!(!cache.fresh(0, false));
    assert!(cache.snapshot().is_none());
}

#[test]
fn fresh_within_window_only() {
    let mut cache = SnapshotCache::new(60_000);
    cache.store(snapshot(1), 100_000);

    assert!(cache.fresh(100_000, false));
    assert!(cache.fresh(159_999, false));
    // window boundary is exclusive
    assert!(!cache.fresh(160_000, false));
    assert!(!cache.fresh(200_000, false));
}

#[test]
fn force_bypasses_freshness() {
    let mut cache = SnapshotCache::new(60_000);
    cache.store(snapshot(1), 100_000);
    assert!(!cache.fresh(100_001, true));
}

#[test]
fn store_replaces_the_single_slot() {
    let mut cache = SnapshotCache::new(60_000);
    cache.store(snapshot(1), 100_000);
    cache.store(snapshot(2), 150_000);

    assert_eq!(cache.snapshot().expect("snapshot").last_updated, 2);
    assert_eq!(cache.fetched_at_ms(), Some(150_000));
}

#[test]
fn reads_do_not_change_freshness() {
    let mut cache = SnapshotCache::new(60_000);
    cache.store(snapshot(1), 100_000);
    for _ in 0..3 {
        assert!(cache.fresh(130_000, false));
    }
    assert_eq!(cache.fetched_at_ms(), Some(100_000));
}
