use crate::app::metrics;
use crate::config::Config;
use crate::feed::http::{HttpFeed, HttpFeedConfig};
use crate::refresh::RefreshCoordinator;
use crate::tui;
use crate::view::render::{render_view, RenderOptions};
use crate::view::{filter_accounts, Selection, ViewMode};
use crate::{Error, Result};
use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn run() -> Result<()> {
    metrics::init_start_time();
    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args)?;

    if cli.show_help {
        print_usage();
        return Ok(());
    }

    let mut config = Config::load(&cli.config_path)?;
    if let Some(url) = cli.url_override {
        config.feed.url = url;
    }
    if let Some(interval) = cli.interval_override {
        config.refresh.interval_ms = interval;
    }
    if let Some(view) = cli.view_override {
        config.display.default_view = view;
    }
    config.validate()?;

    let feed = HttpFeed::new(HttpFeedConfig {
        url: config.feed.url.clone(),
        timeout_secs: config.feed.timeout_secs,
    })?;
    let coordinator = RefreshCoordinator::new(feed, config.refresh.cache_ms);

    if cli.once {
        run_once(&config, coordinator, cli.force)
    } else {
        tui::run(config, coordinator)
    }
}

/// Non-interactive mode: one fetch, print the active view to stdout, exit.
fn run_once<F: crate::feed::Feed>(
    config: &Config,
    mut coordinator: RefreshCoordinator<F>,
    force: bool,
) -> Result<()> {
    let now = now_ms()?;
    let snapshot = coordinator.refresh(force, now).cloned();
    let outcome = match snapshot {
        Some(snapshot) => {
            let accounts = filter_accounts(&snapshot.accounts, &config.accounts.exclude);
            metrics::set_accounts_visible(accounts.len());
            let mut selection = Selection::default();
            selection.sync(&accounts);
            let mode = ViewMode::parse(&config.display.default_view)?;
            let options = RenderOptions {
                currency_symbol: config.display.currency_symbol.clone(),
            };
            println!(
                "{} {}  {}",
                coordinator.status().indicator(),
                coordinator.status().label(),
                coordinator.status_line()
            );
            println!();
            print!("{}", render_view(mode, &accounts, &selection, &options));
            Ok(())
        }
        None => Err(Error::new(coordinator.status_line().to_string())),
    };
    metrics::write_if_configured()?;
    outcome
}

struct CliArgs {
    config_path: String,
    url_override: Option<String>,
    interval_override: Option<u64>,
    view_override: Option<String>,
    once: bool,
    force: bool,
    show_help: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut config_path = "config.toml".to_string();
    let mut url_override = None;
    let mut interval_override = None;
    let mut view_override = None;
    let mut once = false;
    let mut force = false;
    let mut show_help = false;

    let mut index = 1;
    while index < args.len() {
        match args[index].as_str() {
            "--help" | "-h" => {
                show_help = true;
                index += 1;
            }
            "--config" | "-c" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| Error::new("missing value for --config"))?;
                config_path = value.to_string();
                index += 2;
            }
            "--url" | "-u" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| Error::new("missing value for --url"))?;
                url_override = Some(value.to_string());
                index += 2;
            }
            "--interval" | "-i" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| Error::new("missing value for --interval"))?;
                let parsed = value
                    .parse::<u64>()
                    .map_err(|_| Error::new("invalid value for --interval"))?;
                interval_override = Some(parsed);
                index += 2;
            }
            "--view" | "-v" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| Error::new("missing value for --view"))?;
                ViewMode::parse(value)?;
                view_override = Some(value.to_string());
                index += 2;
            }
            "--once" => {
                once = true;
                index += 1;
            }
            "--force" => {
                force = true;
                index += 1;
            }
            unknown => {
                return Err(Error::new(format!("unknown argument: {unknown}")));
            }
        }
    }

    Ok(CliArgs {
        config_path,
        url_override,
        interval_override,
        view_override,
        once,
        force,
        show_help,
    })
}

fn print_usage() {
    println!("usage: mtwatch [--config <path>] [--url <url>] [--interval <ms>] [--view <mode>] [--once] [--force]");
    println!("  -c, --config    Path to config.toml (default: config.toml)");
    println!("  -u, --url       Override feed url from config");
    println!("  -i, --interval  Override refresh interval in milliseconds");
    println!("  -v, --view      Starting view (tabs|grid|table|dropdown)");
    println!("      --once      Fetch once, print the view to stdout, exit");
    println!("      --force     With --once, bypass the snapshot cache");
    println!("  -h, --help      Show this help");
}

fn now_ms() -> Result<i64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| Error::new("system time before unix epoch"))?;
    Ok(now.as_millis() as i64)
}
