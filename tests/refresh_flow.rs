use mtwatch::feed::Feed;
use mtwatch::models::{Account, ConnectionStatus, Snapshot};
use mtwatch::refresh::RefreshCoordinator;
use mtwatch::{Error, Result};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Feed double that replays scripted outcomes and records every call's
/// cache-bust parameter.
struct ScriptedFeed {
    responses: RefCell<VecDeque<Result<Snapshot>>>,
    calls: Rc<RefCell<Vec<Option<i64>>>>,
}

impl ScriptedFeed {
    fn new(responses: Vec<Result<Snapshot>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn call_log(&self) -> Rc<RefCell<Vec<Option<i64>>>> {
        Rc::clone(&self.calls)
    }
}

impl Feed for ScriptedFeed {
    fn fetch_snapshot(&self, cache_bust: Option<i64>) -> Result<Snapshot> {
        self.calls.borrow_mut().push(cache_bust);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Error::new("script exhausted")))
    }
}

fn snapshot(stamp: i64, logins: &[&str]) -> Snapshot {
    let accounts = logins
        .iter()
        .map(|login| Account {
            id: login.to_string(),
            login: login.to_string(),
            name: None,
            server: "Demo".to_string(),
            balance: 100.0,
            equity: 100.0,
            profit: 0.0,
            free_margin: 100.0,
            margin: 0.0,
            margin_level: 0.0,
            last_updated: stamp,
            active_eas: Vec::new(),
        })
        .collect();
    Snapshot {
        last_updated: stamp,
        accounts,
    }
}

#[test]
fn second_refresh_within_window_hits_cache() {
    let feed = ScriptedFeed::new(vec![Ok(snapshot(1, &["100"]))]);
    let calls = feed.call_log();
    let mut coordinator = RefreshCoordinator::new(feed, 60_000);

    let first = coordinator.refresh(false, 100_000).cloned();
    let second = coordinator.refresh(false, 130_000).cloned();

    assert_eq!(first, second);
    assert_eq!(first.expect("snapshot").last_updated, 1);
    // the second refresh never reached the feed
    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(coordinator.status(), ConnectionStatus::Online);
}

#[test]
fn expired_window_issues_second_fetch() {
    let feed = ScriptedFeed::new(vec![Ok(snapshot(1, &["100"])), Ok(snapshot(2, &["100"]))]);
    let mut coordinator = RefreshCoordinator::new(feed, 60_000);

    coordinator.refresh(false, 100_000);
    let second = coordinator.refresh(false, 160_000).cloned();

    assert_eq!(second.expect("snapshot").last_updated, 2);
}

#[test]
fn forced_refresh_bypasses_cache_and_sends_timestamp() {
    let feed = ScriptedFeed::new(vec![Ok(snapshot(1, &["100"])), Ok(snapshot(2, &["100"]))]);
    let calls = feed.call_log();
    let mut coordinator = RefreshCoordinator::new(feed, 60_000);

    coordinator.refresh(false, 100_000);
    let forced = coordinator.refresh(true, 130_000).cloned();

    assert_eq!(forced.expect("snapshot").last_updated, 2);
    // first call unforced, second forced with the call's timestamp
    assert_eq!(calls.borrow().as_slice(), &[None, Some(130_000)]);
}

#[test]
fn http_failure_goes_offline_and_keeps_stale_snapshot() {
    let feed = ScriptedFeed::new(vec![
        Ok(snapshot(1, &["100"])),
        Err(Error::new("HTTP 404")),
        Ok(snapshot(3, &["100"])),
    ]);
    let mut coordinator = RefreshCoordinator::new(feed, 60_000);

    coordinator.refresh(false, 100_000);
    let failed = coordinator.refresh(false, 170_000).cloned();

    assert!(failed.is_none());
    assert_eq!(coordinator.status(), ConnectionStatus::Offline);
    assert!(coordinator.status_line().contains("404"));
    assert!(coordinator.status_line().starts_with("Error:"));
    // stale-but-visible: the previous snapshot is still available to render
    assert_eq!(coordinator.snapshot().expect("stale").last_updated, 1);

    // self-heals on the next tick
    let recovered = coordinator.refresh(false, 240_000).cloned();
    assert_eq!(recovered.expect("snapshot").last_updated, 3);
    assert_eq!(coordinator.status(), ConnectionStatus::Online);
    assert!(coordinator.status_line().starts_with("Last update:"));
}

#[test]
fn first_fetch_failure_leaves_no_snapshot() {
    let feed = ScriptedFeed::new(vec![Err(Error::new("http request failed: dns error"))]);
    let mut coordinator = RefreshCoordinator::new(feed, 60_000);

    let result = coordinator.refresh(false, 100_000).cloned();

    assert!(result.is_none());
    assert!(coordinator.snapshot().is_none());
    assert_eq!(coordinator.status(), ConnectionStatus::Offline);
    assert!(coordinator.status_line().contains("dns error"));
}

#[test]
fn full_exclusion_renders_placeholder_while_online() {
    use mtwatch::view::render::{render_view, RenderOptions, EMPTY_PLACEHOLDER};
    use mtwatch::view::{filter_accounts, Selection, ViewMode};

    let feed = ScriptedFeed::new(vec![Ok(snapshot(1, &["100", "200"]))]);
    let mut coordinator = RefreshCoordinator::new(feed, 60_000);

    let fetched = coordinator.refresh(false, 100_000).cloned().expect("snapshot");
    let exclude = vec!["100".to_string(), "200".to_string()];
    let accounts = filter_accounts(&fetched.accounts, &exclude);
    let mut selection = Selection::default();
    selection.sync(&accounts);

    let out = render_view(ViewMode::Tabs, &accounts, &selection, &RenderOptions::default());
    assert_eq!(out, EMPTY_PLACEHOLDER);
    // an empty visible list is not a connection problem
    assert_eq!(coordinator.status(), ConnectionStatus::Online);
    assert!(selection.selected_id().is_none());
}

#[test]
fn status_line_reports_feed_timestamp() {
    let feed = ScriptedFeed::new(vec![Ok(snapshot(1704067200, &["100"]))]);
    let mut coordinator = RefreshCoordinator::new(feed, 60_000);

    coordinator.refresh(false, 100_000);

    assert_eq!(coordinator.status_line(), "Last update: Jan 01, 00:00");
}
