use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::consts::DATE_FORMAT;

/// Epoch values below this are seconds, not milliseconds
const EPOCH_MS_THRESHOLD: f64 = 1e12;

/// Normalize a JSON timestamp (epoch number or ISO-8601 string) to epoch milliseconds
pub(crate) fn parse_timestamp_ms(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_f64().and_then(epoch_to_ms),
        Value::String(s) => parse_timestamp_str(s),
        _ => None,
    }
}

pub(crate) fn parse_timestamp_str(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return epoch_to_ms(n);
    }
    if let Ok(dt) = trimmed.parse::<DateTime<Utc>>() {
        return Some(dt.timestamp_millis());
    }
    // Zone-less timestamps are taken as UTC
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().timestamp_millis())
}

fn epoch_to_ms(n: f64) -> Option<i64> {
    if !n.is_finite() || n < 0.0 {
        return None;
    }
    if n < EPOCH_MS_THRESHOLD {
        Some((n * 1000.0) as i64)
    } else {
        Some(n as i64)
    }
}

/// Zero-padded `YYYY-MM-DD` key
pub(crate) fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_iso_strings() {
        assert_eq!(
            parse_timestamp_ms(&json!("2025-01-01T00:00:00Z")),
            Some(1_735_689_600_000)
        );
        assert_eq!(
            parse_timestamp_ms(&json!("2025-01-01T08:00:00+08:00")),
            Some(1_735_689_600_000)
        );
        assert_eq!(
            parse_timestamp_ms(&json!("2025-01-01T00:00:00.500Z")),
            Some(1_735_689_600_500)
        );
    }

    #[test]
    fn parses_zoneless_iso_as_utc() {
        assert_eq!(
            parse_timestamp_ms(&json!("2025-01-01T00:00:00")),
            Some(1_735_689_600_000)
        );
    }

    #[test]
    fn parses_epoch_millis_and_seconds() {
        assert_eq!(
            parse_timestamp_ms(&json!(1_735_689_600_000_i64)),
            Some(1_735_689_600_000)
        );
        assert_eq!(
            parse_timestamp_ms(&json!(1_735_689_600)),
            Some(1_735_689_600_000)
        );
        assert_eq!(
            parse_timestamp_ms(&json!("1735689600000")),
            Some(1_735_689_600_000)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp_ms(&json!("yesterday")), None);
        assert_eq!(parse_timestamp_ms(&json!("")), None);
        assert_eq!(parse_timestamp_ms(&json!(null)), None);
        assert_eq!(parse_timestamp_ms(&json!(-5)), None);
        assert_eq!(parse_timestamp_ms(&json!({"a": 1})), None);
    }

    #[test]
    fn date_key_is_zero_padded() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(date_key(d), "2025-03-07");
        assert_eq!(parse_date_key("2025-03-07"), Some(d));
        assert_eq!(parse_date_key("2025-3-7x"), None);
    }
}
