//! Lenient field decoders for the Books API record shape.
//!
//! The API is loose about scalar types: amounts arrive as numbers or strings,
//! empty strings stand in for missing dates, and timestamps carry offsets
//! without a colon (`2013-11-18T02:17:40-0800`). Entity models opt into these
//! with `#[serde(deserialize_with = "...")]`.

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;
use validator::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const OFFSET_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn to_decimal(value: &Value) -> Result<Decimal, String> {
    match value {
        Value::Number(n) => {
            let raw = n.to_string();
            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .map_err(|e| format!("invalid decimal {raw}: {e}"))
        }
        Value::String(s) => {
            Decimal::from_str(s.trim()).map_err(|e| format!("invalid decimal {s:?}: {e}"))
        }
        other => Err(format!("expected a decimal, found {other}")),
    }
}

fn to_date(value: &Value) -> Result<NaiveDate, String> {
    match value {
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map_err(|e| format!("invalid date {s:?}: {e}")),
        other => Err(format!("expected a date, found {other}")),
    }
}

/// Parses RFC 3339 first, then the colon-less offset form the API emits.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, OFFSET_TIMESTAMP_FORMAT))
        .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))
}

pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    to_decimal(&value).map_err(D::Error::custom)
}

pub fn opt_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if is_blank(&value) {
        return Ok(None);
    }
    to_decimal(&value).map(Some).map_err(D::Error::custom)
}

pub fn zero_if_blank<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_decimal(deserializer)?.unwrap_or(Decimal::ZERO))
}

pub fn one_if_blank<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_decimal(deserializer)?.unwrap_or(Decimal::ONE))
}

pub fn one() -> Decimal {
    Decimal::ONE
}

pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    to_date(&value).map_err(D::Error::custom)
}

pub fn opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if is_blank(&value) {
        return Ok(None);
    }
    to_date(&value).map(Some).map_err(D::Error::custom)
}

pub fn opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => {
            parse_timestamp(&s).map(Some).map_err(D::Error::custom)
        }
        Value::Null | Value::String(_) => Ok(None),
        other => Err(D::Error::custom(format!(
            "expected a timestamp, found {other}"
        ))),
    }
}

pub fn opt_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if is_blank(&value) {
        return Ok(None);
    }
    let parsed = match &value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected an integer, found {value}")))
}

/// Free text that the API sometimes sends as a number or boolean.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!("expected text, found {other}"))),
    }
}

pub fn opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b)),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(D::Error::custom(format!("expected a boolean, found {s:?}"))),
        },
        other => Err(D::Error::custom(format!("expected a boolean, found {other}"))),
    }
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_flag(deserializer)?.unwrap_or(false))
}

/// Nested collections that may be omitted or sent as `null`.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Nested objects that the API blanks out as `""` or `{}`.
pub fn opt_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) if map.values().all(is_blank) => Ok(None),
        value @ Value::Object(_) => T::deserialize(value).map(Some).map_err(D::Error::custom),
        value if is_blank(&value) => Ok(None),
        other => Err(D::Error::custom(format!("expected an object, found {other}"))),
    }
}

pub fn blank_or_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || validator::validate_email(value) {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

pub fn blank_or_url(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || validator::validate_url(value) {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "opt_decimal")]
        amount: Option<Decimal>,
        #[serde(default, deserialize_with = "opt_date")]
        due: Option<NaiveDate>,
        #[serde(default, deserialize_with = "opt_timestamp")]
        at: Option<DateTime<FixedOffset>>,
        #[serde(default = "one", deserialize_with = "one_if_blank")]
        rate: Decimal,
        #[serde(default, deserialize_with = "flag")]
        enabled: bool,
    }

    #[test]
    fn accepts_numbers_and_strings_for_amounts() {
        let from_number: Sample = serde_json::from_value(json!({"amount": 12.5})).unwrap();
        let from_string: Sample = serde_json::from_value(json!({"amount": "12.50"})).unwrap();
        assert_eq!(from_number.amount, Some(dec!(12.5)));
        assert_eq!(from_string.amount, Some(dec!(12.50)));
    }

    #[test]
    fn blank_values_become_none_or_defaults() {
        let sample: Sample =
            serde_json::from_value(json!({"amount": "", "due": "", "rate": null, "enabled": null}))
                .unwrap();
        assert_eq!(sample.amount, None);
        assert_eq!(sample.due, None);
        assert_eq!(sample.rate, Decimal::ONE);
        assert!(!sample.enabled);
    }

    #[test]
    fn parses_offset_timestamps_without_colon() {
        let sample: Sample =
            serde_json::from_value(json!({"at": "2013-11-18T02:17:40-0800"})).unwrap();
        let at = sample.at.unwrap();
        assert_eq!(at.offset().local_minus_utc(), -8 * 3600);
        assert_eq!(at.to_rfc3339(), "2013-11-18T02:17:40-08:00");
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(serde_json::from_value::<Sample>(json!({"due": "31/01/2024"})).is_err());
    }

    #[test]
    fn email_and_url_checks_allow_blank() {
        assert!(blank_or_email("").is_ok());
        assert!(blank_or_email("ap@acme.example").is_ok());
        assert!(blank_or_email("not-an-email").is_err());
        assert!(blank_or_url("https://acme.example").is_ok());
        assert!(blank_or_url("acme").is_err());
    }
}
