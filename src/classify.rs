//! Blah variant classification
//!
//! Creating a blah and voting on one choose among structurally different
//! request shapes based on the blah-type id the user selected. The rule:
//! an id equal to the cached prediction id takes the prediction path, one
//! equal to the cached poll id takes the poll path, everything else
//! (including an unconfigured cache) degrades to the simple path.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::error::ConsoleError;
use crate::session::TypeCache;

/// The three request-shape variants of typed blahs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlahVariant {
    Simple,
    /// Time-bounded prediction; creation requires an expiration date
    Prediction,
    /// Multi-choice poll; creation and voting are declared but unbuilt
    Poll,
}

/// Classify a user-selected type id against the cached specialized ids
pub fn classify(type_id: &str, cache: &TypeCache) -> BlahVariant {
    if cache.prediction_id() == Some(type_id) {
        BlahVariant::Prediction
    } else if cache.poll_id() == Some(type_id) {
        BlahVariant::Poll
    } else {
        BlahVariant::Simple
    }
}

/// Parse a user-supplied expiration date into an RFC 3339 string.
///
/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` (taken as
/// midnight UTC). Empty or unparsable input is a validation error raised
/// before any request is sent.
pub fn parse_expiration(input: &str) -> Result<String, ConsoleError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ConsoleError::validation(
            "prediction blahs require an expiration date",
        ));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true));
    }
    if let Ok(date) = trimmed.parse::<NaiveDate>() {
        let dt = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        return Ok(dt.to_rfc3339_opts(SecondsFormat::Secs, true));
    }
    Err(ConsoleError::validation(format!(
        "unparsable expiration date: {}",
        trimmed
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlahTypeRecord;

    fn cache() -> TypeCache {
        TypeCache::from_records(vec![
            BlahTypeRecord {
                id: "t-simple".into(),
                name: "says".into(),
            },
            BlahTypeRecord {
                id: "t-pred".into(),
                name: "predicts".into(),
            },
            BlahTypeRecord {
                id: "t-poll".into(),
                name: "polls".into(),
            },
        ])
    }

    #[test]
    fn test_classify_prediction_and_poll_ids() {
        let cache = cache();
        assert_eq!(classify("t-pred", &cache), BlahVariant::Prediction);
        assert_eq!(classify("t-poll", &cache), BlahVariant::Poll);
        assert_eq!(classify("t-simple", &cache), BlahVariant::Simple);
    }

    #[test]
    fn test_unknown_id_degrades_to_simple() {
        assert_eq!(classify("mystery", &cache()), BlahVariant::Simple);
    }

    #[test]
    fn test_empty_cache_degrades_to_simple() {
        let empty = TypeCache::default();
        assert_eq!(classify("t-pred", &empty), BlahVariant::Simple);
        assert_eq!(classify("", &empty), BlahVariant::Simple);
    }

    #[test]
    fn test_parse_expiration_date_only() {
        assert_eq!(
            parse_expiration("2026-09-01").unwrap(),
            "2026-09-01T00:00:00Z"
        );
    }

    #[test]
    fn test_parse_expiration_rfc3339() {
        assert_eq!(
            parse_expiration("2026-09-01T12:30:00+02:00").unwrap(),
            "2026-09-01T10:30:00Z"
        );
    }

    #[test]
    fn test_parse_expiration_rejects_empty_and_garbage() {
        assert!(matches!(
            parse_expiration("   "),
            Err(ConsoleError::Validation(_))
        ));
        assert!(matches!(
            parse_expiration("next tuesday"),
            Err(ConsoleError::Validation(_))
        ));
    }
}
