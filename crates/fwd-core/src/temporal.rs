//! # Timestamps
//!
//! Lifecycle stamps on notification log rows (`created_at`, `sent_at`,
//! `delivered_at`, `failed_at`). Stored as UTC with whole seconds.
//!
//! Inputs arrive in three shapes, all accepted by [`Timestamp::parse`]:
//!
//! | Source | Example |
//! |--------|---------|
//! | JSON row export, CLI `--at` | `2026-03-02T08:15:30.482913+00:00` |
//! | Postgres text export | `2026-03-02 08:15:30.482913+00` |
//! | Provider webhook (epoch seconds) | `1772439330` |
//!
//! Output is always `YYYY-MM-DDTHH:MM:SSZ`.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FwdError;

/// A UTC timestamp truncated to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Timestamp(DateTime<Utc>);

impl<'de> Deserialize<'de> for Timestamp {
    /// Any format [`Timestamp::parse`] accepts; sub-seconds are dropped.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl Timestamp {
    /// The current time.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Wrap a `DateTime<Utc>`, dropping sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    /// Parse an RFC 3339 string (any offset), a Postgres text timestamp, or
    /// epoch seconds, normalizing to UTC.
    pub fn parse(s: &str) -> Result<Self, FwdError> {
        let s = s.trim();
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            let secs: i64 = s
                .parse()
                .map_err(|_| FwdError::Validation(format!("epoch seconds out of range: {s:?}")))?;
            return DateTime::from_timestamp(secs, 0)
                .map(Self)
                .ok_or_else(|| FwdError::Validation(format!("epoch seconds out of range: {s:?}")));
        }
        DateTime::parse_from_rfc3339(s)
            .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z"))
            .map(|dt| Self::from_utc(dt.with_timezone(&Utc)))
            .map_err(|e| FwdError::Validation(format!("invalid timestamp {s:?}: {e}")))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%SZ"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_json_export_with_micros_and_offset() {
        let ts = Timestamp::parse("2026-03-02T08:15:30.482913+00:00").unwrap();
        assert_eq!(ts.to_string(), "2026-03-02T08:15:30Z");
        assert_eq!(ts.as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_non_utc_offset_normalized() {
        // Kuala Lumpur office clock.
        let ts = Timestamp::parse("2026-03-02T16:15:30+08:00").unwrap();
        assert_eq!(ts.to_string(), "2026-03-02T08:15:30Z");
    }

    #[test]
    fn test_postgres_text_export() {
        let ts = Timestamp::parse("2026-03-02 08:15:30.482913+00").unwrap();
        assert_eq!(ts.to_string(), "2026-03-02T08:15:30Z");
        let ts = Timestamp::parse("2026-03-02 10:15:30+02:00").unwrap();
        assert_eq!(ts.to_string(), "2026-03-02T08:15:30Z");
    }

    #[test]
    fn test_webhook_epoch_seconds() {
        let ts = Timestamp::parse("1772439330").unwrap();
        let expected = Utc.timestamp_opt(1_772_439_330, 0).unwrap();
        assert_eq!(ts.as_datetime(), &expected);
    }

    #[test]
    fn test_rejects_garbage() {
        for bad in ["", "yesterday", "2026-03-02", "2026-13-02T08:00:00Z", "99999999999999999999"] {
            let err = Timestamp::parse(bad).unwrap_err();
            assert!(matches!(err, FwdError::Validation(_)), "{bad:?}");
        }
    }

    #[test]
    fn test_from_utc_drops_subseconds() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 45).unwrap();
        let ts = Timestamp::from_utc(dt.with_nanosecond(999_000_000).unwrap());
        assert_eq!(ts, Timestamp::from_utc(dt));
    }

    #[test]
    fn test_now_whole_seconds() {
        assert_eq!(Timestamp::now().as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_row_field_deserializes_export_formats() {
        let a: Timestamp = serde_json::from_str("\"2026-03-02T08:15:30.9+00:00\"").unwrap();
        let b: Timestamp = serde_json::from_str("\"2026-03-02 08:15:30+00\"").unwrap();
        assert_eq!(a, b);
        assert!(serde_json::from_str::<Timestamp>("\"soon\"").is_err());
    }

    #[test]
    fn test_serializes_as_utc_z() {
        let ts = Timestamp::parse("2026-03-02T16:15:30+08:00").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2026-03-02T08:15:30Z\"");
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), ts);
    }

    #[test]
    fn test_orders_chronologically_across_offsets() {
        let sent = Timestamp::parse("2026-03-02T16:15:30+08:00").unwrap();
        let delivered = Timestamp::parse("2026-03-02T08:15:31Z").unwrap();
        assert!(sent < delivered);
    }
}
