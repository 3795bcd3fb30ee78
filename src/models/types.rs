/// One fetched feed payload: account state at a point in time.
///
/// Snapshots are immutable once parsed and replaced wholesale on the next
/// successful fetch; nothing merges into an existing snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Feed-level timestamp, epoch seconds. Zero when the feed omits it.
    pub last_updated: i64,
    pub accounts: Vec<Account>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub id: String,
    /// Login identifier; the feed may send it as string or number, it is
    /// normalized to a string at parse time.
    pub login: String,
    pub name: Option<String>,
    pub server: String,
    pub balance: f64,
    pub equity: f64,
    pub profit: f64,
    pub free_margin: f64,
    pub margin: f64,
    /// Equity over used margin, as a percentage.
    pub margin_level: f64,
    /// Per-account timestamp, epoch seconds. Zero when absent.
    pub last_updated: i64,
    /// Names of the automated strategies currently running on the account.
    pub active_eas: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
    Loading,
    Online,
    Offline,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Loading => "Loading...",
            ConnectionStatus::Online => "Connected",
            ConnectionStatus::Offline => "Disconnected",
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            ConnectionStatus::Loading => "◌",
            ConnectionStatus::Online => "●",
            ConnectionStatus::Offline => "○",
        }
    }
}
