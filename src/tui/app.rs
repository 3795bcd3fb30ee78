use crate::app::metrics;
use crate::config::Config;
use crate::feed::Feed;
use crate::models::Account;
use crate::refresh::RefreshCoordinator;
use crate::state;
use crate::view::render::RenderOptions;
use crate::view::{filter_accounts, Selection, ViewMode};
use crate::Result;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Mutable dashboard state: the refresh pipeline, the filtered account
/// list currently on screen, the active view, and the detail selection.
pub struct DashboardApp<F: Feed> {
    pub config: Config,
    pub coordinator: RefreshCoordinator<F>,
    pub view: ViewMode,
    pub selection: Selection,
    pub accounts: Vec<Account>,
}

impl<F: Feed> DashboardApp<F> {
    pub fn new(config: Config, coordinator: RefreshCoordinator<F>) -> Result<Self> {
        let default_view = ViewMode::parse(&config.display.default_view)?;
        let view = state::load_view_mode(&config.state.path, default_view);
        Ok(Self {
            config,
            coordinator,
            view,
            selection: Selection::default(),
            accounts: Vec::new(),
        })
    }

    /// Runs the refresh pipeline and, on data, re-filters the account list
    /// and re-syncs the selection. On failure the previous list stays on
    /// screen; the coordinator's status line carries the error.
    pub fn refresh(&mut self, force: bool) {
        let now = now_ms();
        if let Some(snapshot) = self.coordinator.refresh(force, now) {
            let filtered = filter_accounts(&snapshot.accounts, &self.config.accounts.exclude);
            self.accounts = filtered;
            self.selection.sync(&self.accounts);
            metrics::set_accounts_visible(self.accounts.len());
        }
    }

    /// Activates a view and persists the choice. Exactly one view is
    /// rendered at any time.
    pub fn switch_view(&mut self, mode: ViewMode) {
        if mode == self.view {
            return;
        }
        self.view = mode;
        if let Err(err) = state::save_view_mode(&self.config.state.path, mode) {
            warn!(error = %err.message, "view state save failed");
        }
    }

    pub fn select_next(&mut self) {
        self.selection.select_next(&self.accounts);
    }

    pub fn select_prev(&mut self) {
        self.selection.select_prev(&self.accounts);
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            currency_symbol: self.config.display.currency_symbol.clone(),
        }
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as i64)
        .unwrap_or(0)
}
