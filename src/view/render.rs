use crate::models::Account;
use crate::view::format::{
    account_display_name, format_currency, format_margin_level, format_signed_currency,
    format_timestamp,
};
use crate::view::{Selection, ViewMode};

pub const EMPTY_PLACEHOLDER: &str = "No accounts to display";

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub currency_symbol: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}

/// Renders the active view from an already-filtered account list.
///
/// Every renderer is a pure `(data) -> String` transform; the terminal draw
/// step only writes the returned text. An empty list always yields the
/// placeholder, whatever the mode.
pub fn render_view(
    mode: ViewMode,
    accounts: &[Account],
    selection: &Selection,
    options: &RenderOptions,
) -> String {
    if accounts.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    match mode {
        ViewMode::Tabs => render_tabs(accounts, selection, options),
        ViewMode::Grid => render_grid(accounts, options),
        ViewMode::Table => render_table(accounts, options),
        ViewMode::Dropdown => render_dropdown(accounts, selection, options),
    }
}

/// The view selector line; exactly one mode is bracketed as active.
pub fn render_view_bar(active: ViewMode) -> String {
    ViewMode::ALL
        .iter()
        .map(|mode| {
            if *mode == active {
                format!("[{}]", mode.label())
            } else {
                format!(" {} ", mode.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_tabs(accounts: &[Account], selection: &Selection, options: &RenderOptions) -> String {
    let mut out = String::new();
    let bar = accounts
        .iter()
        .map(|account| {
            let name = account_display_name(account);
            if selection.selected_id() == Some(account.id.as_str()) {
                format!("[{name}]")
            } else {
                format!(" {name} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" | ");
    push_line(&mut out, &bar);
    push_line(&mut out, "");
    if let Some(account) = selection.selected_account(accounts) {
        out.push_str(&render_detail(account, options));
    }
    out
}

pub fn render_grid(accounts: &[Account], options: &RenderOptions) -> String {
    let symbol = options.currency_symbol.as_str();
    let mut out = String::new();
    for (index, account) in accounts.iter().enumerate() {
        if index > 0 {
            push_line(&mut out, "");
        }
        push_line(
            &mut out,
            &format!(
                "{}  (login {} @ {})",
                account_display_name(account),
                account.login,
                account.server
            ),
        );
        push_line(
            &mut out,
            &format!(
                "  Balance: {}   Equity: {}",
                format_currency(account.balance, symbol),
                format_currency(account.equity, symbol)
            ),
        );
        push_line(
            &mut out,
            &format!(
                "  Profit: {}   Free Margin: {}",
                format_signed_currency(account.profit, symbol),
                format_currency(account.free_margin, symbol)
            ),
        );
        push_line(
            &mut out,
            &format!("  Margin Level: {}", format_margin_level(account.margin_level)),
        );
    }
    out
}

pub fn render_table(accounts: &[Account], options: &RenderOptions) -> String {
    let symbol = options.currency_symbol.as_str();
    let mut out = String::new();
    push_line(
        &mut out,
        &format!(
            "{:<10} {:<20} {:>14} {:>14} {:>14} {:>14} {:>12}",
            "Login", "Name", "Balance", "Equity", "Profit", "Free Margin", "Margin Lvl"
        ),
    );
    for account in accounts {
        push_line(
            &mut out,
            &format!(
                "{:<10} {:<20} {:>14} {:>14} {:>14} {:>14} {:>12}",
                account.login,
                account_display_name(account),
                format_currency(account.balance, symbol),
                format_currency(account.equity, symbol),
                format_signed_currency(account.profit, symbol),
                format_currency(account.free_margin, symbol),
                format_margin_level(account.margin_level)
            ),
        );
    }
    out
}

pub fn render_dropdown(
    accounts: &[Account],
    selection: &Selection,
    options: &RenderOptions,
) -> String {
    let mut out = String::new();
    for account in accounts {
        let marker = if selection.selected_id() == Some(account.id.as_str()) {
            "> "
        } else {
            "  "
        };
        push_line(
            &mut out,
            &format!(
                "{marker}{} (login {})",
                account_display_name(account),
                account.login
            ),
        );
    }
    push_line(&mut out, "");
    if let Some(account) = selection.selected_account(accounts) {
        out.push_str(&render_detail(account, options));
    }
    out
}

/// Detail panel shared by the tabs and dropdown views: identity block, four
/// metric cards, margin block.
pub fn render_detail(account: &Account, options: &RenderOptions) -> String {
    let symbol = options.currency_symbol.as_str();
    let mut out = String::new();
    push_line(
        &mut out,
        &format!(
            "Login: {}    Name: {}",
            account.login,
            account_display_name(account)
        ),
    );
    push_line(&mut out, &format!("Server: {}", account.server));
    let badges = if account.active_eas.is_empty() {
        "none".to_string()
    } else {
        account.active_eas.join(", ")
    };
    push_line(&mut out, &format!("EAs: {badges}"));
    push_line(
        &mut out,
        &format!("Last updated: {}", format_timestamp(account.last_updated)),
    );
    push_line(&mut out, "");
    push_line(
        &mut out,
        &format!("Balance:     {}", format_currency(account.balance, symbol)),
    );
    push_line(
        &mut out,
        &format!("Equity:      {}", format_currency(account.equity, symbol)),
    );
    push_line(
        &mut out,
        &format!(
            "Profit:      {}",
            format_signed_currency(account.profit, symbol)
        ),
    );
    push_line(
        &mut out,
        &format!(
            "Free Margin: {}",
            format_currency(account.free_margin, symbol)
        ),
    );
    push_line(&mut out, "");
    push_line(
        &mut out,
        &format!("Margin Used:  {}", format_currency(account.margin, symbol)),
    );
    push_line(
        &mut out,
        &format!(
            "Margin Level: {}",
            format_margin_level(account.margin_level)
        ),
    );
    out
}

fn push_line(target: &mut String, line: &str) {
    target.push_str(line);
    target.push('\n');
}
