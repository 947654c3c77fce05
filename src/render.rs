//! Response rendering and session-state extraction
//!
//! Extractors are pure with respect to the network layer: they read an
//! already-fetched body and mutate session state, nothing else. A malformed
//! body in a success response is reported as a render error and leaves the
//! session untouched.

use serde_json::Value;

use crate::constants::{IMAGE_BASE_URL, IMAGE_VARIANTS};
use crate::error::ConsoleError;
use crate::models::{BlahTypeRecord, Extract};
use crate::session::{Identity, SessionState, TypeCache};

/// One completed call, ready for display
#[derive(Clone, Debug, Default)]
pub struct Rendered {
    pub ok: bool,
    /// HTTP status when the call reached the server
    pub status: Option<u16>,
    pub body: String,
    /// Extraction notes and derived values (image URLs, remembered ids)
    pub notes: Vec<String>,
    pub time_ms: u64,
}

impl Rendered {
    pub fn success(raw_body: &str, status: u16, time_ms: u64) -> Self {
        Rendered {
            ok: true,
            status: Some(status),
            body: format_body(raw_body),
            notes: Vec::new(),
            time_ms,
        }
    }

    pub fn failure(status: Option<u16>, message: &str, body: &str, time_ms: u64) -> Self {
        // The uniform error handler: status code, status text, raw body
        let headline = match status {
            Some(code) => ConsoleError::Transport {
                status: code,
                status_text: message.to_string(),
                body: body.to_string(),
            }
            .to_string(),
            None => message.to_string(),
        };
        let mut rendered = Rendered {
            ok: false,
            status,
            body: format_body(body),
            notes: vec![headline],
            time_ms,
        };
        if rendered.body.is_empty() {
            rendered.body = rendered.notes.remove(0);
        }
        rendered
    }

    /// A locally raised error, no network attempt behind it
    pub fn local_error(err: &ConsoleError) -> Self {
        Rendered {
            ok: false,
            status: None,
            body: err.to_string(),
            notes: Vec::new(),
            time_ms: 0,
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Rendered {
            ok: true,
            status: None,
            body: text.into(),
            notes: Vec::new(),
            time_ms: 0,
        }
    }
}

/// Pretty-print JSON bodies, pass anything else through raw
pub fn format_body(raw: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(raw) {
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| raw.to_string())
    } else {
        raw.to_string()
    }
}

/// Derive the rendition URLs for one image reference
pub fn image_urls(image_ref: &str) -> Vec<String> {
    IMAGE_VARIANTS
        .iter()
        .map(|variant| format!("{}{}-{}.jpg", IMAGE_BASE_URL, image_ref, variant))
        .collect()
}

/// Apply an extractor to a success body, mutating session state.
///
/// Returns display notes describing what was remembered. Fields are
/// replaced whole; with concurrent in-flight requests the last response
/// to be applied wins.
pub fn apply_extract(
    extract: Extract,
    raw_body: &str,
    session: &mut SessionState,
) -> Result<Vec<String>, ConsoleError> {
    match extract {
        Extract::None => Ok(Vec::new()),
        Extract::BlahTypes => {
            let records: Vec<BlahTypeRecord> = serde_json::from_str(raw_body)
                .map_err(|e| ConsoleError::Configuration(e.to_string()))?;
            let mut notes = vec![format!("cached {} blah types", records.len())];
            session.types = TypeCache::from_records(records);
            if session.types.prediction_id().is_none() {
                notes.push("no prediction type listed; prediction path disabled".into());
            }
            if session.types.poll_id().is_none() {
                notes.push("no poll type listed; poll path disabled".into());
            }
            Ok(notes)
        }
        Extract::Identity => {
            let obj = parse_object(raw_body)?;
            let user_id = required_str(&obj, "_id")?;
            let display_name = str_field(&obj, "displayName").unwrap_or_default();
            session.user = Some(Identity {
                user_id: user_id.clone(),
                display_name: display_name.clone(),
            });
            Ok(vec![format!("user set to {} ({})", display_name, user_id)])
        }
        Extract::Channel => {
            let obj = parse_object(raw_body)?;
            let id = required_str(&obj, "_id")?;
            session.channel_id = Some(id.clone());
            Ok(vec![format!("channel set to {}", id)])
        }
        Extract::ChannelType => {
            let obj = parse_object(raw_body)?;
            let id = required_str(&obj, "_id")?;
            session.channel_type_id = Some(id.clone());
            Ok(vec![format!("channel type set to {}", id)])
        }
        Extract::Blah => {
            let obj = parse_object(raw_body)?;
            let id = required_str(&obj, "_id")?;
            session.blah_id = Some(id.clone());
            let mut notes = vec![format!("blah set to {}", id)];
            if let Some(Value::Array(refs)) = obj.get("img") {
                for image_ref in refs.iter().filter_map(Value::as_str) {
                    notes.extend(image_urls(image_ref));
                }
            }
            Ok(notes)
        }
        Extract::Comment => {
            let obj = parse_object(raw_body)?;
            let id = required_str(&obj, "_id")?;
            session.comment_id = Some(id.clone());
            Ok(vec![format!("comment set to {}", id)])
        }
        Extract::BadgeAuthority => {
            let records: Vec<Value> = serde_json::from_str(raw_body)
                .map_err(|e| ConsoleError::Render(e.to_string()))?;
            match records.first().and_then(|r| r.get("_id")).and_then(Value::as_str) {
                Some(id) => {
                    session.badge_authority_id = Some(id.to_string());
                    Ok(vec![format!("badge authority set to {}", id)])
                }
                None => Ok(vec!["no badge authorities listed".into()]),
            }
        }
    }
}

fn parse_object(raw: &str) -> Result<serde_json::Map<String, Value>, ConsoleError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ConsoleError::Render(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
        Err(e) => Err(ConsoleError::Render(e.to_string())),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn str_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn required_str(obj: &serde_json::Map<String, Value>, key: &str) -> Result<String, ConsoleError> {
    str_field(obj, key).ok_or_else(|| ConsoleError::Render(format!("missing field {}", key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_extraction_updates_session() {
        let mut session = SessionState::new();
        let notes =
            apply_extract(Extract::Identity, r#"{"_id":"U1","displayName":"alice"}"#, &mut session)
                .unwrap();
        let user = session.user.unwrap();
        assert_eq!(user.user_id, "U1");
        assert_eq!(user.display_name, "alice");
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_malformed_body_is_render_error_and_leaves_session_untouched() {
        let mut session = SessionState::new();
        let err = apply_extract(Extract::Blah, "<html>oops</html>", &mut session).unwrap_err();
        assert!(matches!(err, ConsoleError::Render(_)));
        assert!(session.blah_id.is_none());
    }

    #[test]
    fn test_blah_extraction_derives_image_urls() {
        let mut session = SessionState::new();
        let notes = apply_extract(
            Extract::Blah,
            r#"{"_id":"B1","img":["abc"]}"#,
            &mut session,
        )
        .unwrap();
        assert_eq!(session.blah_id.as_deref(), Some("B1"));
        assert!(notes.contains(&format!("{}abc-A.jpg", IMAGE_BASE_URL)));
        assert!(notes.contains(&format!("{}abc-D.jpg", IMAGE_BASE_URL)));
    }

    #[test]
    fn test_blah_types_parse_failure_is_configuration_error() {
        let mut session = SessionState::new();
        let err = apply_extract(Extract::BlahTypes, "not json", &mut session).unwrap_err();
        assert!(matches!(err, ConsoleError::Configuration(_)));
        assert!(session.types.is_empty());
    }

    #[test]
    fn test_format_body_pretty_prints_json() {
        assert_eq!(format_body(r#"{"a":1}"#), "{\n  \"a\": 1\n}");
        assert_eq!(format_body("plain text"), "plain text");
    }
}
