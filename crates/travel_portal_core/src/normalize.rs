//! crates/travel_portal_core/src/normalize.rs
//!
//! Serde helpers that normalize loosely-typed backend fields.
//!
//! The backend serializes decimal columns (prices, amounts, percentages) as JSON
//! strings such as `"25000000.00"`, while some endpoints return plain numbers for
//! the same field. Identifiers are likewise either integers or strings. These
//! helpers are used with `#[serde(deserialize_with = "...")]` so that the domain
//! records always carry `f64`/`String`/`u32` regardless of the wire shape.

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    Text(String),
}

/// Parses a decimal value from its string form. Empty strings yield `None`.
pub fn parse_decimal(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("'{}' is not a valid number", trimmed))
}

fn decimal_from(raw: Option<NumberOrString>) -> Result<Option<f64>, String> {
    match raw {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) => parse_decimal(&s),
    }
}

/// A required money/decimal field. `null` and `""` become `0.0`.
pub fn money<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    decimal_from(raw)
        .map(|v| v.unwrap_or(0.0))
        .map_err(de::Error::custom)
}

/// An optional money/decimal field. `null` and `""` become `None`.
pub fn optional_money<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    decimal_from(raw).map_err(de::Error::custom)
}

/// A non-negative count that may arrive as a number or a numeric string.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    let value = decimal_from(raw).map_err(de::Error::custom)?.unwrap_or(0.0);
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(de::Error::custom(format!("{} is not a valid count", value)));
    }
    Ok(value as u32)
}

/// Like [`count`] but for totals that can exceed `u32`.
pub fn total<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    let value = decimal_from(raw).map_err(de::Error::custom)?.unwrap_or(0.0);
    if value < 0.0 || value.fract() != 0.0 {
        return Err(de::Error::custom(format!("{} is not a valid total", value)));
    }
    Ok(value as u64)
}

/// An identifier that may be an integer or a string.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match IdRepr::deserialize(deserializer)? {
        IdRepr::Int(n) => Ok(n.to_string()),
        IdRepr::Text(s) => Ok(s),
    }
}

pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<IdRepr>::deserialize(deserializer)?.map(|raw| match raw {
        IdRepr::Int(n) => n.to_string(),
        IdRepr::Text(s) => s,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Debug)]
    struct Priced {
        #[serde(deserialize_with = "money")]
        price: f64,
        #[serde(default, deserialize_with = "optional_money")]
        dp: Option<f64>,
        #[serde(deserialize_with = "id")]
        id: String,
        #[serde(default, deserialize_with = "count")]
        quota: u32,
    }

    #[test]
    fn string_currency_becomes_number() {
        let parsed: Priced = serde_json::from_value(json!({
            "price": "25000000.00",
            "dp": "30",
            "id": 42,
            "quota": "45"
        }))
        .unwrap();
        assert_eq!(parsed.price, 25_000_000.0);
        assert_eq!(parsed.dp, Some(30.0));
        assert_eq!(parsed.id, "42");
        assert_eq!(parsed.quota, 45);
    }

    #[test]
    fn numeric_and_missing_fields_are_accepted() {
        let parsed: Priced =
            serde_json::from_value(json!({ "price": 1500.5, "id": "pkg-1" })).unwrap();
        assert_eq!(parsed.price, 1500.5);
        assert_eq!(parsed.dp, None);
        assert_eq!(parsed.id, "pkg-1");
        assert_eq!(parsed.quota, 0);
    }

    #[test]
    fn empty_and_null_money_normalize_to_defaults() {
        let parsed: Priced =
            serde_json::from_value(json!({ "price": "", "dp": null, "id": 1 })).unwrap();
        assert_eq!(parsed.price, 0.0);
        assert_eq!(parsed.dp, None);
    }

    #[test]
    fn garbage_money_is_rejected() {
        let result = serde_json::from_value::<Priced>(json!({ "price": "abc", "id": 1 }));
        assert!(result.is_err());
    }

    #[test]
    fn fractional_count_is_rejected() {
        let result =
            serde_json::from_value::<Priced>(json!({ "price": 1, "id": 1, "quota": 2.5 }));
        assert!(result.is_err());
    }
}
