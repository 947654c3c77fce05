//! Session state - pure data, no I/O
//!
//! Everything here is an advisory convenience: ids remembered from earlier
//! responses pre-fill later requests, nothing more. A stale id (a deleted or
//! superseded entity) is the backend's error to report, not ours to detect.

use std::collections::HashMap;

use crate::constants::{POLL_TYPE_NAME, PREDICTION_TYPE_NAME};
use crate::models::BlahTypeRecord;

/// Last-known user identity
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Identity {
    pub user_id: String,
    pub display_name: String,
}

/// Reference-data cache mapping blah-type names to server-assigned ids.
///
/// Populated once at configuration time from `GET /v2/blahs/types`; read
/// thereafter to classify creation and voting variants. The prediction and
/// poll ids are retained separately because the classifier compares against
/// them; a server that lists neither simply disables those paths.
#[derive(Clone, Debug, Default)]
pub struct TypeCache {
    pub types: Vec<BlahTypeRecord>,
    by_name: HashMap<String, String>,
    prediction_id: Option<String>,
    poll_id: Option<String>,
}

impl TypeCache {
    pub fn from_records(records: Vec<BlahTypeRecord>) -> Self {
        let by_name: HashMap<String, String> = records
            .iter()
            .map(|r| (r.name.clone(), r.id.clone()))
            .collect();
        let prediction_id = by_name.get(PREDICTION_TYPE_NAME).cloned();
        let poll_id = by_name.get(POLL_TYPE_NAME).cloned();
        TypeCache {
            types: records,
            by_name,
            prediction_id,
            poll_id,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve a symbolic type name to its server id
    pub fn id_for(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    pub fn prediction_id(&self) -> Option<&str> {
        self.prediction_id.as_deref()
    }

    pub fn poll_id(&self) -> Option<&str> {
        self.poll_id.as_deref()
    }
}

/// Mutable session record, scoped to the life of the console process.
///
/// Mutated only by whole-field replacement from response extractors, so
/// concurrent in-flight requests resolve as last-write-wins. Never persisted.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Configured `host[:port]`; no request may be dispatched without it
    pub endpoint: Option<String>,
    pub user: Option<Identity>,
    pub channel_id: Option<String>,
    pub channel_type_id: Option<String>,
    pub blah_id: Option<String>,
    pub comment_id: Option<String>,
    pub badge_authority_id: Option<String>,
    /// Blah-type id chosen for the next create/vote action
    pub selected_type_id: Option<String>,
    pub types: TypeCache,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Human summary of everything currently remembered
    pub fn summary(&self) -> Vec<String> {
        let fmt = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());
        let mut lines = vec![
            format!("endpoint:        {}", fmt(&self.endpoint)),
            match &self.user {
                Some(u) => format!("user:            {} ({})", u.display_name, u.user_id),
                None => "user:            -".into(),
            },
            format!("channel:         {}", fmt(&self.channel_id)),
            format!("channel type:    {}", fmt(&self.channel_type_id)),
            format!("blah:            {}", fmt(&self.blah_id)),
            format!("comment:         {}", fmt(&self.comment_id)),
            format!("badge authority: {}", fmt(&self.badge_authority_id)),
            format!("selected type:   {}", fmt(&self.selected_type_id)),
        ];
        if self.types.is_empty() {
            lines.push("blah types:      (not configured)".into());
        } else {
            for t in &self.types.types {
                lines.push(format!("blah type:       {} = {}", t.name, t.id));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> BlahTypeRecord {
        BlahTypeRecord {
            id: id.into(),
            name: name.into(),
        }
    }

    #[test]
    fn test_cache_retains_specialized_ids() {
        let cache = TypeCache::from_records(vec![
            record("t1", "says"),
            record("t2", "predicts"),
            record("t3", "polls"),
        ]);
        assert_eq!(cache.prediction_id(), Some("t2"));
        assert_eq!(cache.poll_id(), Some("t3"));
        assert_eq!(cache.id_for("says"), Some("t1"));
    }

    #[test]
    fn test_missing_specialized_types_is_not_an_error() {
        let cache = TypeCache::from_records(vec![record("t1", "says")]);
        assert_eq!(cache.prediction_id(), None);
        assert_eq!(cache.poll_id(), None);
    }
}
