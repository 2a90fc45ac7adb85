//! Board timestamp parsing.
//!
//! Board timestamps arrive as free-form strings. Calculators never see a parse
//! error; they get a [`ParsedTimestamp`] and map `Unparseable` to their own
//! fallback score.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of parsing a board timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ParsedTimestamp {
    Valid(DateTime<Utc>),
    Unparseable,
}

impl ParsedTimestamp {
    pub fn valid(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(ts) => Some(ts),
            Self::Unparseable => None,
        }
    }
}

/// Parse an ISO 8601 timestamp.
///
/// Accepts RFC 3339 (`Z` or numeric offset, optional fraction). Naive
/// date-times and bare dates are read as UTC.
pub fn parse_timestamp(raw: &str) -> ParsedTimestamp {
    let raw = raw.trim();
    if raw.is_empty() {
        return ParsedTimestamp::Unparseable;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return ParsedTimestamp::Valid(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return ParsedTimestamp::Valid(naive.and_utc());
        }
    }

    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date
            .and_hms_opt(0, 0, 0)
            .map(|naive| ParsedTimestamp::Valid(naive.and_utc()))
            .unwrap_or(ParsedTimestamp::Unparseable),
        Err(_) => {
            tracing::debug!(raw, "unparseable board timestamp");
            ParsedTimestamp::Unparseable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_zulu_with_millis() {
        let parsed = parse_timestamp("2025-03-01T12:30:00.000Z");
        assert_eq!(
            parsed,
            ParsedTimestamp::Valid(Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        let parsed = parse_timestamp("2025-03-01T14:30:00+02:00");
        assert_eq!(
            parsed.valid(),
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn naive_and_date_only_read_as_utc() {
        assert_eq!(
            parse_timestamp("2025-03-01T08:00:00").valid(),
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap())
        );
        assert_eq!(
            parse_timestamp("2025-03-01").valid(),
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn garbage_is_unparseable() {
        assert_eq!(parse_timestamp("next tuesday"), ParsedTimestamp::Unparseable);
        assert_eq!(parse_timestamp("   "), ParsedTimestamp::Unparseable);
        assert!(parse_timestamp("2025-13-45").valid().is_none());
    }
}
