use crate::{Error, Result};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

static START_TIME: OnceLock<i64> = OnceLock::new();

static REFRESH_TOTAL: AtomicU64 = AtomicU64::new(0);
static CACHE_HITS_TOTAL: AtomicU64 = AtomicU64::new(0);
static FORCED_REFRESH_TOTAL: AtomicU64 = AtomicU64::new(0);
static FETCH_ERRORS_TOTAL: AtomicU64 = AtomicU64::new(0);

static LAST_FETCH_TIMESTAMP: AtomicU64 = AtomicU64::new(0);
static ACCOUNTS_VISIBLE: AtomicU64 = AtomicU64::new(0);

pub fn init_start_time() {
    let _ = START_TIME.set(now_epoch());
}

pub fn inc_refresh() {
    REFRESH_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_cache_hit() {
    CACHE_HITS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_forced_refresh() {
    FORCED_REFRESH_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_fetch_error() {
    FETCH_ERRORS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub fn set_last_fetch(epoch_secs: i64) {
    LAST_FETCH_TIMESTAMP.store(epoch_secs.max(0) as u64, Ordering::Relaxed);
}

pub fn set_accounts_visible(count: usize) {
    ACCOUNTS_VISIBLE.store(count as u64, Ordering::Relaxed);
}

pub fn write_if_configured() -> Result<()> {
    let path = match std::env::var("MTWATCH_METRICS_PATH") {
        Ok(value) if !value.trim().is_empty() => value,
        _ => return Ok(()),
    };
    write_metrics(&path)
}

pub fn write_metrics(path: &str) -> Result<()> {
    let content = render();
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| Error::new(format!("metrics dir create failed: {err}")))?;
    }
    fs::write(path, content).map_err(|err| Error::new(format!("metrics write failed: {err}")))
}

pub fn render() -> String {
    let mut output = String::new();
    push_line(&mut output, "# HELP mtwatch_up Mtwatch process up");
    push_line(&mut output, "# TYPE mtwatch_up gauge");
    push_line(&mut output, "mtwatch_up 1");
    push_line(&mut output, "# HELP mtwatch_uptime_seconds Process uptime in seconds");
    push_line(&mut output, "# TYPE mtwatch_uptime_seconds gauge");
    push_line(
        &mut output,
        &format!("mtwatch_uptime_seconds {}", uptime_seconds()),
    );
    push_line(&mut output, "# HELP mtwatch_refresh_total Refresh attempts that reached the feed");
    push_line(&mut output, "# TYPE mtwatch_refresh_total counter");
    push_line(
        &mut output,
        &format!(
            "mtwatch_refresh_total {}",
            REFRESH_TOTAL.load(Ordering::Relaxed)
        ),
    );
    push_line(&mut output, "# HELP mtwatch_cache_hits_total Refreshes served from the cache");
    push_line(&mut output, "# TYPE mtwatch_cache_hits_total counter");
    push_line(
        &mut output,
        &format!(
            "mtwatch_cache_hits_total {}",
            CACHE_HITS_TOTAL.load(Ordering::Relaxed)
        ),
    );
    push_line(&mut output, "# HELP mtwatch_forced_refresh_total Forced refreshes");
    push_line(&mut output, "# TYPE mtwatch_forced_refresh_total counter");
    push_line(
        &mut output,
        &format!(
            "mtwatch_forced_refresh_total {}",
            FORCED_REFRESH_TOTAL.load(Ordering::Relaxed)
        ),
    );
    push_line(&mut output, "# HELP mtwatch_fetch_errors_total Failed fetch attempts");
    push_line(&mut output, "# TYPE mtwatch_fetch_errors_total counter");
    push_line(
        &mut output,
        &format!(
            "mtwatch_fetch_errors_total {}",
            FETCH_ERRORS_TOTAL.load(Ordering::Relaxed)
        ),
    );
    push_line(
        &mut output,
        "# HELP mtwatch_last_fetch_timestamp Last successful fetch (epoch seconds)",
    );
    push_line(&mut output, "# TYPE mtwatch_last_fetch_timestamp gauge");
    push_line(
        &mut output,
        &format!(
            "mtwatch_last_fetch_timestamp {}",
            LAST_FETCH_TIMESTAMP.load(Ordering::Relaxed)
        ),
    );
    push_line(
        &mut output,
        "# HELP mtwatch_accounts_visible Accounts after exclusion filtering",
    );
    push_line(&mut output, "# TYPE mtwatch_accounts_visible gauge");
    push_line(
        &mut output,
        &format!(
            "mtwatch_accounts_visible {}",
            ACCOUNTS_VISIBLE.load(Ordering::Relaxed)
        ),
    );
    output
}

fn now_epoch() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs() as i64)
        .unwrap_or(0)
}

fn uptime_seconds() -> i64 {
    let start = START_TIME.get().copied().unwrap_or_else(now_epoch);
    now_epoch().saturating_sub(start)
}

fn push_line(target: &mut String, line: &str) {
    target.push_str(line);
    target.push('\n');
}

#[cfg(test)]
mod tests {
    use super::{render, set_accounts_visible};

    #[test]
    fn renders_prometheus_text() {
        set_accounts_visible(3);
        let output = render();
        assert!(output.contains("mtwatch_up 1"));
        assert!(output.contains("# TYPE mtwatch_refresh_total counter"));
        assert!(output.contains("mtwatch_accounts_visible 3"));
    }
}
