//! Field parsers: each turns one raw spreadsheet cell into one canonical
//! scalar. All of them are total — dirty input resolves to `None` (or a
//! default), never to an error.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::models::Status;

/// Parse a number out of free-form spreadsheet text. Currency symbols,
/// thousands separators, and surrounding prose are stripped before
/// parsing: `$12,500.00` -> 12500, `approx 5000` -> 5000.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a date, trying formats in a fixed order: ISO-8601 first, then
/// `MM/DD/YYYY`, `DD-MM-YYYY`, `YYYY/MM/DD`.
///
/// The trial order is the tiebreaker for ambiguous numeric dates:
/// `03/04/2024` always parses as March 4, never April 3. Truly European
/// slash dates will be misread; there is no locale detection.
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    for fmt in ["%b %d, %Y", "%B %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    numeric_date(raw, r"^(\d{1,2})/(\d{1,2})/(\d{4})$", 3, 1, 2)
        .or_else(|| numeric_date(raw, r"^(\d{1,2})-(\d{1,2})-(\d{4})$", 3, 2, 1))
        .or_else(|| numeric_date(raw, r"^(\d{4})/(\d{1,2})/(\d{1,2})$", 1, 2, 3))
}

fn numeric_date(raw: &str, pattern: &str, y: usize, m: usize, d: usize) -> Option<NaiveDate> {
    let re = Regex::new(pattern).ok()?;
    let caps = re.captures(raw)?;
    let year: i32 = caps[y].parse().ok()?;
    let month: u32 = caps[m].parse().ok()?;
    let day: u32 = caps[d].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Trim a string cell. Empty after trimming means `None` — this never
/// returns an empty string.
pub fn clean_string(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalize free-form status vocabulary to the four-valued enum.
///
/// An empty status with a parseable sale price means the sale completed;
/// an empty status otherwise means untouched inventory. An explicit
/// status always wins over price inference. Unrecognized vocabulary
/// falls back to `in_stock` rather than failing the row.
pub fn normalize_status(status_raw: Option<&str>, sale_price_raw: Option<&str>) -> Status {
    let status = status_raw.map(|s| s.trim().to_lowercase()).unwrap_or_default();

    if status.is_empty() {
        if parse_number(sale_price_raw).is_some() {
            return Status::Sold;
        }
        return Status::InStock;
    }

    match status.as_str() {
        "sold" | "completed" | "closed" | "archived" => Status::Sold,
        "traded" | "trade" | "swapped" => Status::Traded,
        "consigned" | "consignment" | "memo" => Status::Consigned,
        "for sale" | "available" | "in stock" | "in_stock" | "listed" | "active"
        | "inventory" | "unsold" => Status::InStock,
        _ => Status::InStock,
    }
}

/// Parse a JSON object into a flat string bag. Anything that is not a
/// JSON object — including malformed JSON — yields an empty map, so
/// corrupt custom-data blobs never break an import.
pub fn try_parse_json(raw: &str) -> BTreeMap<String, String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) else {
        return BTreeMap::new();
    };
    let Some(object) = value.as_object() else {
        return BTreeMap::new();
    };
    object
        .iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect()
}
