use crate::view::ViewMode;
use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;

#[derive(Clone, Debug)]
pub struct FeedConfig {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct RefreshConfig {
    pub interval_ms: u64,
    pub cache_ms: u64,
}

#[derive(Clone, Debug)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub default_view: String,
}

#[derive(Clone, Debug)]
pub struct AccountsConfig {
    pub exclude: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct StateConfig {
    pub path: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub feed: FeedConfig,
    pub refresh: RefreshConfig,
    pub display: DisplayConfig,
    pub accounts: AccountsConfig,
    pub state: StateConfig,
}

#[derive(Clone, Debug, Deserialize)]
struct FeedConfigFile {
    url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Clone, Debug, Deserialize)]
struct RefreshConfigFile {
    interval_ms: Option<u64>,
    cache_ms: Option<u64>,
}

#[derive(Clone, Debug, Deserialize)]
struct DisplayConfigFile {
    currency_symbol: Option<String>,
    default_view: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct AccountsConfigFile {
    exclude: Option<Vec<String>>,
}

#[derive(Clone, Debug, Deserialize)]
struct StateConfigFile {
    path: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct ConfigFile {
    feed: Option<FeedConfigFile>,
    refresh: Option<RefreshConfigFile>,
    display: Option<DisplayConfigFile>,
    accounts: Option<AccountsConfigFile>,
    state: Option<StateConfigFile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedConfig {
                url: "https://example.com/accounts.json".to_string(),
                timeout_secs: 30,
            },
            refresh: RefreshConfig {
                interval_ms: 300_000,
                cache_ms: 60_000,
            },
            display: DisplayConfig {
                currency_symbol: "$".to_string(),
                default_view: "tabs".to_string(),
            },
            accounts: AccountsConfig {
                exclude: Vec::new(),
            },
            state: StateConfig {
                path: "output/view_state.json".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|err| Error::new(format!("failed to read config: {err}")))?;
        let file: ConfigFile = toml::from_str(&content)
            .map_err(|err| Error::new(format!("failed to parse config: {err}")))?;
        let mut config = Config::from_file(file);
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(file: ConfigFile) -> Self {
        let mut config = Config::default();

        if let Some(feed) = file.feed {
            if let Some(value) = feed.url {
                config.feed.url = value;
            }
            if let Some(value) = feed.timeout_secs {
                config.feed.timeout_secs = value;
            }
        }

        if let Some(refresh) = file.refresh {
            if let Some(value) = refresh.interval_ms {
                config.refresh.interval_ms = value;
            }
            if let Some(value) = refresh.cache_ms {
                config.refresh.cache_ms = value;
            }
        }

        if let Some(display) = file.display {
            if let Some(value) = display.currency_symbol {
                config.display.currency_symbol = value;
            }
            if let Some(value) = display.default_view {
                config.display.default_view = value;
            }
        }

        if let Some(accounts) = file.accounts {
            if let Some(value) = accounts.exclude {
                config.accounts.exclude = value;
            }
        }

        if let Some(state) = file.state {
            if let Some(value) = state.path {
                config.state.path = value;
            }
        }

        config
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = read_string_env("MTWATCH_FEED_URL")? {
            self.feed.url = value;
        }
        if let Some(value) = read_u64_env("MTWATCH_FEED_TIMEOUT_SECS")? {
            self.feed.timeout_secs = value;
        }
        if let Some(value) = read_u64_env("MTWATCH_REFRESH_INTERVAL_MS")? {
            self.refresh.interval_ms = value;
        }
        if let Some(value) = read_u64_env("MTWATCH_CACHE_MS")? {
            self.refresh.cache_ms = value;
        }
        if let Some(value) = read_string_env("MTWATCH_CURRENCY_SYMBOL")? {
            self.display.currency_symbol = value;
        }
        if let Some(value) = read_string_env("MTWATCH_DEFAULT_VIEW")? {
            self.display.default_view = value;
        }
        if let Some(value) = read_list_env("MTWATCH_EXCLUDE_ACCOUNTS")? {
            self.accounts.exclude = value;
        }
        if let Some(value) = read_string_env("MTWATCH_STATE_PATH")? {
            self.state.path = value;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.feed.url.trim().is_empty() {
            return Err(Error::new("feed.url must be set"));
        }
        if self.feed.timeout_secs == 0 {
            return Err(Error::new("feed.timeout_secs must be positive"));
        }
        if self.refresh.interval_ms == 0 {
            return Err(Error::new("refresh.interval_ms must be positive"));
        }
        if self.refresh.cache_ms == 0 {
            return Err(Error::new("refresh.cache_ms must be positive"));
        }
        if self.display.currency_symbol.is_empty() {
            return Err(Error::new("display.currency_symbol must be set"));
        }
        ViewMode::parse(&self.display.default_view)?;
        for login in &self.accounts.exclude {
            if login.trim().is_empty() {
                return Err(Error::new("accounts.exclude entries must be non-empty"));
            }
        }
        if self.state.path.trim().is_empty() {
            return Err(Error::new("state.path must be set"));
        }
        Ok(())
    }
}

fn read_string_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(Error::new(format!("failed to read {key}: {err}"))),
    }
}

fn read_u64_env(key: &str) -> Result<Option<u64>> {
    match env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|err| Error::new(format!("{key} must be u64: {err}"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(Error::new(format!("failed to read {key}: {err}"))),
    }
}

fn read_list_env(key: &str) -> Result<Option<Vec<String>>> {
    match env::var(key) {
        Ok(value) => {
            let entries = value
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect();
            Ok(Some(entries))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(Error::new(format!("failed to read {key}: {err}"))),
    }
}
