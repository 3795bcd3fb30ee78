use crate::models::Account;
use chrono::DateTime;

/// `$1,234.56` style: thousands grouping, two fractional digits, the sign
/// ahead of the symbol for negative values.
pub fn format_currency(value: f64, symbol: &str) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let units = group_thousands(cents / 100);
    let frac = cents % 100;
    if negative {
        format!("-{symbol}{units}.{frac:02}")
    } else {
        format!("{symbol}{units}.{frac:02}")
    }
}

/// Like [`format_currency`] but with an explicit `+` on non-negative
/// values, used for profit figures.
pub fn format_signed_currency(value: f64, symbol: &str) -> String {
    if value >= 0.0 {
        format!("+{}", format_currency(value, symbol))
    } else {
        format_currency(value, symbol)
    }
}

pub fn format_margin_level(value: f64) -> String {
    format!("{value:.2}%")
}

/// Compact `Jan 01, 14:30` stamp; `-` when the timestamp is absent.
pub fn format_timestamp(epoch: i64) -> String {
    if epoch <= 0 {
        return "-".to_string();
    }
    match DateTime::from_timestamp(epoch, 0) {
        Some(stamp) => stamp.format("%b %d, %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Canonical display-name chain: explicit name, else the single active EA
/// label, else an EA count summary, else `Account <login>`.
pub fn account_display_name(account: &Account) -> String {
    if let Some(name) = &account.name {
        if !name.trim().is_empty() {
            return name.clone();
        }
    }
    match account.active_eas.len() {
        0 => format!("Account {}", account.login),
        1 => account.active_eas[0].clone(),
        count => format!("{count} EAs"),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
