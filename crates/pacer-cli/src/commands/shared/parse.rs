use chrono::{Local, NaiveDate, TimeDelta};
use serde::de::DeserializeOwned;

/// Parse a `snake_case` enum value through its serde representation.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

pub fn parse_optional_enum<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    raw.map(|value| parse_enum(value, field)).transpose()
}

/// Parse a deadline given as `YYYY-MM-DD`, `today`, or `tomorrow`.
pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    parse_date_relative_to(raw, Local::now().date_naive())
}

fn parse_date_relative_to(raw: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => Ok(today + TimeDelta::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|error| {
            anyhow::anyhow!("invalid deadline '{raw}': {error} (expected YYYY-MM-DD, today, or tomorrow)")
        }),
    }
}
