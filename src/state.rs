use crate::view::ViewMode;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ViewState {
    view: String,
    updated_at: i64,
}

/// Restores the persisted view preference. Anything unreadable or naming an
/// unsupported mode activates the default instead of failing startup.
pub fn load_view_mode(path: &str, default: ViewMode) -> ViewMode {
    match read_state(path) {
        Ok(Some(state)) => ViewMode::parse(&state.view).unwrap_or(default),
        _ => default,
    }
}

/// Persists the active view mode; called on every switch.
pub fn save_view_mode(path: &str, mode: ViewMode) -> Result<()> {
    let state = ViewState {
        view: mode.as_str().to_string(),
        updated_at: now_epoch(),
    };
    let content = serde_json::to_string_pretty(&state)
        .map_err(|err| Error::new(format!("view state serialize failed: {err}")))?;
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| Error::new(format!("view state dir create failed: {err}")))?;
    }
    fs::write(path, content).map_err(|err| Error::new(format!("view state write failed: {err}")))
}

fn read_state(path: &str) -> Result<Option<ViewState>> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|err| Error::new(format!("view state read failed: {err}")))?;
    let state = serde_json::from_str::<ViewState>(&content)
        .map_err(|err| Error::new(format!("view state parse failed: {err}")))?;
    Ok(Some(state))
}

fn now_epoch() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs() as i64)
        .unwrap_or(0)
}
