use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provenance record attached to a document pair.
///
/// Written alongside a proposed update and served verbatim to readers. It
/// survives retirement of the pair so the audit trail outlives the review.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMetadata {
    /// When the update was proposed.
    pub last_updated: DateTime<Utc>,
    /// Why the update was proposed.
    pub update_reason: String,
    /// Short human summary of what changed.
    pub change_summary: String,
    /// Link to the source material backing the update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_link: Option<String>,
}

impl UpdateMetadata {
    /// Create a record stamped with the current time.
    pub fn new(update_reason: impl Into<String>, change_summary: impl Into<String>) -> Self {
        Self {
            last_updated: Utc::now(),
            update_reason: update_reason.into(),
            change_summary: change_summary.into(),
            reference_link: None,
        }
    }

    /// Attach a reference link.
    pub fn with_reference(mut self, link: impl Into<String>) -> Self {
        self.reference_link = Some(link.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serde_round_trip() {
        let meta = UpdateMetadata {
            last_updated: Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap(),
            update_reason: "quarterly refresh".to_string(),
            change_summary: "updated thresholds".to_string(),
            reference_link: Some("https://example.com/source".to_string()),
        };
        let json = serde_json::to_string(&meta).unwrap();
        let parsed: UpdateMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, meta);
    }

    #[test]
    fn wire_keys_are_snake_case() {
        let meta = UpdateMetadata::new("reason", "summary").with_reference("https://example.com");
        let json = serde_json::to_value(&meta).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("last_updated"));
        assert!(obj.contains_key("update_reason"));
        assert!(obj.contains_key("change_summary"));
        assert!(obj.contains_key("reference_link"));
    }

    #[test]
    fn missing_reference_link_is_omitted_and_defaulted() {
        let meta = UpdateMetadata::new("reason", "summary");
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("reference_link").is_none());

        let parsed: UpdateMetadata = serde_json::from_value(serde_json::json!({
            "last_updated": "2024-06-01T12:30:00Z",
            "update_reason": "r",
            "change_summary": "s",
        }))
        .unwrap();
        assert_eq!(parsed.reference_link, None);
    }
}
