//! Agent record model and its store representation.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use voicedesk_core::{AgentName, AssistantId, PublicKey};

/// Hash field names used in the store.
pub mod fields {
    pub const NAME: &str = "name";
    pub const ASSISTANT_ID: &str = "assistantId";
    pub const PUBLIC_KEY: &str = "publicKey";
    pub const CREATED_AT: &str = "createdAt";
}

/// One voice-agent configuration.
///
/// `name` is globally unique and doubles as the store key suffix and the
/// public URL slug. `created_at` is set once at creation and never mutated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub name: AgentName,
    pub assistant_id: AssistantId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<PublicKey>,
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Rebuild an `Agent` from a stored hash.
    ///
    /// Returns `None` when any required field (`name`, `assistantId`,
    /// `createdAt`) is missing or unparseable: a partially-written record
    /// is treated as absent, not as an error. A malformed optional
    /// `publicKey` degrades to "no key" without discarding the record.
    #[must_use]
    pub fn from_record(record: &HashMap<String, String>) -> Option<Self> {
        let name = AgentName::parse(record.get(fields::NAME)?).ok()?;
        let assistant_id = AssistantId::parse(record.get(fields::ASSISTANT_ID)?).ok()?;
        let created_at = DateTime::parse_from_rfc3339(record.get(fields::CREATED_AT)?)
            .ok()?
            .with_timezone(&Utc);
        let public_key = record
            .get(fields::PUBLIC_KEY)
            .and_then(|raw| PublicKey::parse(raw).ok());

        Some(Self {
            name,
            assistant_id,
            public_key,
            created_at,
        })
    }

    /// Flatten the agent into hash fields for a full-record write.
    #[must_use]
    pub fn to_record(&self) -> Vec<(&'static str, String)> {
        let mut record = vec![
            (fields::NAME, self.name.as_str().to_owned()),
            (fields::ASSISTANT_ID, self.assistant_id.as_str().to_owned()),
            (
                fields::CREATED_AT,
                self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        ];
        if let Some(key) = &self.public_key {
            record.push((fields::PUBLIC_KEY, key.as_str().to_owned()));
        }
        record
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn from_record_requires_all_mandatory_fields() {
        let complete = record(&[
            ("name", "sales-bot"),
            ("assistantId", "asst_1"),
            ("createdAt", "2026-08-01T10:00:00.000Z"),
        ]);
        assert!(Agent::from_record(&complete).is_some());

        for missing in ["name", "assistantId", "createdAt"] {
            let mut partial = complete.clone();
            partial.remove(missing);
            assert!(
                Agent::from_record(&partial).is_none(),
                "record without {missing} should be treated as absent"
            );
        }
    }

    #[test]
    fn from_record_rejects_bad_timestamp() {
        let bad = record(&[
            ("name", "sales-bot"),
            ("assistantId", "asst_1"),
            ("createdAt", "yesterday"),
        ]);
        assert!(Agent::from_record(&bad).is_none());
    }

    #[test]
    fn from_record_drops_malformed_public_key() {
        let rec = record(&[
            ("name", "sales-bot"),
            ("assistantId", "asst_1"),
            ("createdAt", "2026-08-01T10:00:00.000Z"),
            ("publicKey", "not-a-key"),
        ]);
        let agent = Agent::from_record(&rec).unwrap();
        assert!(agent.public_key.is_none());
    }

    #[test]
    fn record_round_trip_preserves_fields() {
        let agent = Agent {
            name: AgentName::parse("sales-bot").unwrap(),
            assistant_id: AssistantId::parse("asst_1").unwrap(),
            public_key: Some(PublicKey::parse("pub_123").unwrap()),
            created_at: "2026-08-01T10:00:00.000Z".parse().unwrap(),
        };
        let flat: HashMap<String, String> = agent
            .to_record()
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect();
        assert_eq!(Agent::from_record(&flat).unwrap(), agent);
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let agent = Agent {
            name: AgentName::parse("sales-bot").unwrap(),
            assistant_id: AssistantId::parse("asst_1").unwrap(),
            public_key: None,
            created_at: "2026-08-01T10:00:00.000Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&agent).unwrap();
        assert_eq!(json["name"], "sales-bot");
        assert_eq!(json["assistantId"], "asst_1");
        assert!(json["createdAt"].is_string());
        // Absent key is omitted entirely, not serialized as null
        assert!(json.get("publicKey").is_none());
    }
}
