use crate::models::{Account, Snapshot};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime};
use serde_json::{Map, Value};

/// Decodes a feed body into a [`Snapshot`].
///
/// Two feed variants exist: a multi-account document with an `accounts`
/// array, and a single-account document with one `account` object. Both are
/// normalized here so the rest of the pipeline only ever sees a snapshot
/// with an ordered account list.
pub fn parse_snapshot(body: &str) -> Result<Snapshot> {
    let root: Value = serde_json::from_str(body)
        .map_err(|err| Error::new(format!("json parse failed: {err}")))?;
    let object = root
        .as_object()
        .ok_or_else(|| Error::new("feed root must be an object"))?;

    let last_updated = match object.get("last_updated") {
        Some(value) => parse_time_value(value, "last_updated")?,
        None => 0,
    };

    let mut accounts = Vec::new();
    if let Some(list) = object.get("accounts") {
        let entries = list
            .as_array()
            .ok_or_else(|| Error::new("accounts must be an array"))?;
        for entry in entries {
            accounts.push(parse_account(entry)?);
        }
    } else if let Some(single) = object.get("account") {
        accounts.push(parse_account(single)?);
    } else {
        return Err(Error::new("feed must contain accounts or account"));
    }

    Ok(Snapshot {
        last_updated,
        accounts,
    })
}

fn parse_account(value: &Value) -> Result<Account> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::new("account must be an object"))?;

    let login = text_field(object, "login")?;
    let id = match object.get("id") {
        Some(value) if !value.is_null() => text_value(value, "id")?,
        _ => login.clone(),
    };
    let name = object
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string);
    let server = object
        .get("server")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let last_updated = match object.get("last_updated") {
        Some(value) => parse_time_value(value, "last_updated")?,
        None => 0,
    };

    let active_eas = match object.get("active_eas") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Ok(Account {
        id,
        login,
        name,
        server,
        balance: number_field(object, "balance")?,
        equity: number_field(object, "equity")?,
        profit: number_field(object, "profit")?,
        free_margin: number_field(object, "free_margin")?,
        margin: number_field(object, "margin")?,
        margin_level: number_field(object, "margin_level")?,
        last_updated,
        active_eas,
    })
}

fn number_field(object: &Map<String, Value>, key: &str) -> Result<f64> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(0.0),
        Some(value) => {
            let parsed = value
                .as_f64()
                .ok_or_else(|| Error::new(format!("{key} must be a number")))?;
            if !parsed.is_finite() {
                return Err(Error::new(format!("{key} must be finite")));
            }
            Ok(parsed)
        }
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> Result<String> {
    let value = object
        .get(key)
        .ok_or_else(|| Error::new(format!("{key} must be set")))?;
    text_value(value, key)
}

fn text_value(value: &Value, key: &str) -> Result<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        _ => Err(Error::new(format!("{key} must be a string or number"))),
    }
}

fn parse_time_value(value: &Value, key: &str) -> Result<i64> {
    match value {
        Value::Null => Ok(0),
        Value::String(text) => parse_time(text),
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| Error::new(format!("{key} must be an integer timestamp"))),
        _ => Err(Error::new(format!("{key} must be a string or number"))),
    }
}

/// Accepts bare epoch seconds, RFC 3339, or the `YYYY-MM-DD HH:MM:SS`
/// form MT-style exporters emit (taken as UTC).
pub fn parse_time(value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::new("time value is empty"));
    }
    if let Ok(epoch) = trimmed.parse::<i64>() {
        return Ok(epoch);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.timestamp());
    }
    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .map_err(|err| Error::new(format!("invalid time format: {err}")))?;
    Ok(naive.and_utc().timestamp())
}
