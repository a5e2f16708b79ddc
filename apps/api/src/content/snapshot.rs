//! Snapshot codec — one JSON document capturing the whole content store,
//! used for backup download and restore upload.
//!
//! Every field except `timestamp` is optional on the way in: a document
//! only replaces the collections it actually carries, so older backups
//! missing newer fields still import cleanly. Export always emits every
//! field, empty collections included.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::content::store::ContentStore;
use crate::models::content::{Certification, Education, Experience, Profile, Project, Skill};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<Skill>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiences: Option<Vec<Experience>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub educations: Option<Vec<Education>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<Certification>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SnapshotDocument {
    /// Captures the full store state with a fresh RFC 3339 timestamp.
    pub fn capture(store: &ContentStore) -> Self {
        Self {
            profile: Some(store.profile.clone()),
            skills: Some(store.skills.items().to_vec()),
            experiences: Some(store.experiences.items().to_vec()),
            educations: Some(store.educations.items().to_vec()),
            projects: Some(store.projects.items().to_vec()),
            certifications: Some(store.certifications.items().to_vec()),
            timestamp: Some(Utc::now().to_rfc3339()),
        }
    }

    /// Parses raw backup text. A failed parse has zero side effects — the
    /// store is only touched after parsing succeeds.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::defaults;
    use crate::content::store::Collection;

    #[test]
    fn test_round_trip_preserves_full_state() {
        let store = defaults::content_store();
        let document = SnapshotDocument::capture(&store);
        let raw = serde_json::to_string_pretty(&document).unwrap();
        let parsed = SnapshotDocument::parse(&raw).unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn test_round_trip_with_empty_collection() {
        let mut store = defaults::content_store();
        store.projects = Collection::new();
        let document = SnapshotDocument::capture(&store);
        assert_eq!(document.projects, Some(vec![]));

        let raw = serde_json::to_string(&document).unwrap();
        let parsed = SnapshotDocument::parse(&raw).unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn test_capture_emits_every_field() {
        let store = defaults::content_store();
        let document = SnapshotDocument::capture(&store);
        assert!(document.profile.is_some());
        assert!(document.skills.is_some());
        assert!(document.experiences.is_some());
        assert!(document.educations.is_some());
        assert!(document.projects.is_some());
        assert!(document.certifications.is_some());
        assert!(document.timestamp.is_some());
    }

    #[test]
    fn test_capture_timestamp_is_rfc3339() {
        let store = defaults::content_store();
        let document = SnapshotDocument::capture(&store);
        let timestamp = document.timestamp.unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&timestamp).is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SnapshotDocument::parse("not json at all").is_err());
        assert!(SnapshotDocument::parse("{\"skills\": 42}").is_err());
    }

    #[test]
    fn test_corrupt_import_is_a_noop() {
        let mut store = defaults::content_store();
        let before = store.view();
        if let Ok(document) = SnapshotDocument::parse("{{{ definitely broken") {
            store.import(document);
        }
        assert_eq!(store.view(), before);
    }

    #[test]
    fn test_parse_accepts_partial_document() {
        let raw = r#"{"skills": [{"name": "SQL", "level": 85}], "timestamp": "2025-01-01T00:00:00Z"}"#;
        let document = SnapshotDocument::parse(raw).unwrap();
        assert!(document.profile.is_none());
        assert!(document.experiences.is_none());
        let skills = document.skills.unwrap();
        assert_eq!(skills.len(), 1);
        // Legacy documents carry skills without ids; they default to 0 and
        // are re-assigned on import.
        assert_eq!(skills[0].id, 0);
        assert_eq!(skills[0].level, 85);
    }

    #[test]
    fn test_imported_legacy_skills_get_ids() {
        let raw = r#"{"skills": [{"name": "SQL", "level": 85}, {"name": "Python", "level": 90}]}"#;
        let document = SnapshotDocument::parse(raw).unwrap();
        let mut store = defaults::content_store();
        store.import(document);
        let ids: Vec<i64> = store.skills.items().iter().map(|s| s.id).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn test_parse_accepts_profile_camel_case_fields() {
        let raw = r#"{"profile": {"name": "A", "role": "B", "location": "C", "phone": "D",
            "email": "E", "summary": "F", "resumeUrl": "https://example.com/cv.pdf"}}"#;
        let document = SnapshotDocument::parse(raw).unwrap();
        let profile = document.profile.unwrap();
        assert_eq!(profile.resume_url.as_deref(), Some("https://example.com/cv.pdf"));
        assert!(profile.status.is_none());
    }
}
