//! Field formatters — revenue normalization and advanced-match trait
//! shaping for the vendor pixel.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use pixelbridge_core::events::scalar_number;

/// Format a monetary amount the way the vendor expects: a string with
/// exactly two decimal places. Missing, null, or non-numeric input counts
/// as zero. Total function, never fails.
pub fn format_revenue(value: Option<&Value>) -> String {
    let amount = value.and_then(scalar_number).unwrap_or(0.0);
    format!("{amount:.2}")
}

/// User traits as supplied by the host runtime at an identify moment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserTraits {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<String>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

/// Shape user traits into the vendor's advanced-match record. Every field
/// whose resolved value is empty is omitted entirely — never emitted as
/// null or "". With no trait data at all the record is empty.
pub fn format_traits(traits: Option<&UserTraits>) -> Map<String, Value> {
    let mut record = Map::new();
    let Some(traits) = traits else {
        return record;
    };

    let (first_name, last_name) = resolve_name(traits);
    let address = traits.address.clone().unwrap_or_default();

    insert_non_empty(&mut record, "em", traits.email.clone());
    insert_non_empty(&mut record, "fn", first_name);
    insert_non_empty(&mut record, "ln", last_name);
    insert_non_empty(&mut record, "ph", traits.phone.clone());
    insert_non_empty(
        &mut record,
        "ge",
        traits
            .gender
            .as_deref()
            .and_then(|g| g.chars().next())
            .map(|c| c.to_lowercase().collect::<String>()),
    );
    insert_non_empty(
        &mut record,
        "db",
        traits.birthday.as_deref().and_then(format_birthday),
    );
    insert_non_empty(
        &mut record,
        "ct",
        address
            .city
            .map(|c| c.split_whitespace().collect::<String>().to_lowercase()),
    );
    insert_non_empty(&mut record, "st", address.state.map(|s| s.to_lowercase()));
    insert_non_empty(&mut record, "zp", address.postal_code);
    record
}

/// First/last-name resolution: prefer explicit first/last traits; else
/// split a single `name` on whitespace, lower-cased, first token as first
/// name and last token as last name. A single-token name yields no last
/// name.
fn resolve_name(traits: &UserTraits) -> (Option<String>, Option<String>) {
    if let Some(first) = non_empty(&traits.first_name) {
        return (Some(first), non_empty(&traits.last_name));
    }
    let Some(name) = traits.name.as_deref() else {
        return (None, None);
    };
    let lowered = name.to_lowercase();
    let mut tokens = lowered.split_whitespace();
    let first = tokens.next().map(str::to_string);
    let last = tokens.next_back().map(str::to_string);
    (first, last)
}

/// Normalize a birthday to the vendor's 8-digit `YYYYMMDD` form. Accepts
/// `YYYY-MM-DD`, an already-compact `YYYYMMDD`, or RFC 3339; anything else
/// is dropped rather than sent malformed.
fn format_birthday(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y%m%d"))
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .ok()?;
    Some(date.format("%Y%m%d").to_string())
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn insert_non_empty(record: &mut Map<String, Value>, key: &str, value: Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            record.insert(key.to_string(), Value::String(value));
        }
    }
}
