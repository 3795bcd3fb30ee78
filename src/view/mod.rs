pub mod format;
pub mod render;

use crate::models::Account;
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Tabs,
    Grid,
    Table,
    Dropdown,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Tabs,
        ViewMode::Grid,
        ViewMode::Table,
        ViewMode::Dropdown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Tabs => "tabs",
            ViewMode::Grid => "grid",
            ViewMode::Table => "table",
            ViewMode::Dropdown => "dropdown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Tabs => "Tabs",
            ViewMode::Grid => "Grid",
            ViewMode::Table => "Table",
            ViewMode::Dropdown => "Dropdown",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "tabs" => Ok(ViewMode::Tabs),
            "grid" => Ok(ViewMode::Grid),
            "table" => Ok(ViewMode::Table),
            "dropdown" => Ok(ViewMode::Dropdown),
            _ => Err(Error::new(format!("unknown view mode: {value}"))),
        }
    }

    pub fn next(self) -> Self {
        match self {
            ViewMode::Tabs => ViewMode::Grid,
            ViewMode::Grid => ViewMode::Table,
            ViewMode::Table => ViewMode::Dropdown,
            ViewMode::Dropdown => ViewMode::Tabs,
        }
    }
}

/// Removes accounts whose login is in the exclusion set.
///
/// Applied once per snapshot so every renderer sees the same list; relative
/// order of retained accounts is preserved.
pub fn filter_accounts(accounts: &[Account], exclude: &[String]) -> Vec<Account> {
    accounts
        .iter()
        .filter(|account| !exclude.iter().any(|login| login == &account.login))
        .cloned()
        .collect()
}

/// Tracks which account the detail-style views (tabs, dropdown) show.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    /// Re-aligns the selection with a freshly filtered list: a surviving id
    /// is kept, a vanished one falls back to the first account, an empty
    /// list clears the selection. Detail views never show an account that
    /// is no longer in the list.
    pub fn sync(&mut self, accounts: &[Account]) {
        let keep = self
            .selected
            .as_deref()
            .is_some_and(|id| accounts.iter().any(|account| account.id == id));
        if !keep {
            self.selected = accounts.first().map(|account| account.id.clone());
        }
    }

    pub fn selected_account<'a>(&self, accounts: &'a [Account]) -> Option<&'a Account> {
        let id = self.selected.as_deref()?;
        accounts.iter().find(|account| account.id == id)
    }

    pub fn select_next(&mut self, accounts: &[Account]) {
        self.step(accounts, 1);
    }

    pub fn select_prev(&mut self, accounts: &[Account]) {
        self.step(accounts, accounts.len().saturating_sub(1));
    }

    fn step(&mut self, accounts: &[Account], offset: usize) {
        if accounts.is_empty() {
            self.selected = None;
            return;
        }
        let current = self
            .selected
            .as_deref()
            .and_then(|id| accounts.iter().position(|account| account.id == id))
            .unwrap_or(0);
        let next = (current + offset) % accounts.len();
        self.selected = Some(accounts[next].id.clone());
    }
}
