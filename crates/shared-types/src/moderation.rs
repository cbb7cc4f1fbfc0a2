use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{matches_search, push_selected, QueryParams, UserRef, ALL};

pub const MODERATION_STATUSES: &[&str] = &["pending", "in_review", "resolved", "dismissed"];
pub const MODERATION_CONTENT_TYPES: &[&str] = &["job", "profile", "review", "message", "photo"];
pub const MODERATION_PRIORITIES: &[&str] = &["low", "normal", "high", "urgent"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationItem {
    pub id: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub report_reason: Option<String>,
    #[serde(default)]
    pub report_details: Option<String>,
    #[serde(default)]
    pub reported_by: Option<UserRef>,
    #[serde(default)]
    pub reported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl ModerationItem {
    pub fn is_open(&self) -> bool {
        matches!(self.status.as_str(), "pending" | "in_review")
    }
}

/// What a moderator decides about a reported item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Remove,
    Dismiss,
}

impl ModerationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Remove => "remove",
            ModerationAction::Dismiss => "dismiss",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub action: ModerationAction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModerationQuery {
    pub status: String,
    pub content_type: String,
    pub priority: String,
    pub assigned_to: String,
}

impl Default for ModerationQuery {
    fn default() -> Self {
        Self {
            status: ALL.to_string(),
            content_type: ALL.to_string(),
            priority: ALL.to_string(),
            assigned_to: ALL.to_string(),
        }
    }
}

impl ModerationQuery {
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_selected(&mut params, "status", &self.status);
        push_selected(&mut params, "content_type", &self.content_type);
        push_selected(&mut params, "priority", &self.priority);
        push_selected(&mut params, "assigned_to", &self.assigned_to);
        params
    }
}

pub fn search_moderation<'a>(items: &'a [ModerationItem], query: &str) -> Vec<&'a ModerationItem> {
    items
        .iter()
        .filter(|i| matches_search(query, [i.report_reason.as_deref(), i.report_details.as_deref()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_skips_all_sentinels() {
        assert!(ModerationQuery::default().to_query().is_empty());
        let q = ModerationQuery {
            content_type: "photo".into(),
            assigned_to: "me".into(),
            ..ModerationQuery::default()
        };
        assert_eq!(
            q.to_query(),
            vec![("content_type", "photo".to_string()), ("assigned_to", "me".to_string())]
        );
    }

    #[test]
    fn resolve_request_serializes_lowercase() {
        let body = serde_json::to_string(&ResolveRequest {
            action: ModerationAction::Remove,
        })
        .unwrap();
        assert_eq!(body, r#"{"action":"remove"}"#);
    }

    #[test]
    fn search_covers_reason_and_details() {
        let items: Vec<ModerationItem> = serde_json::from_str(
            r#"[{"id":"1","report_reason":"Spam","status":"pending"},
                {"id":"2","report_details":"Contains a phone number","status":"resolved"}]"#,
        )
        .unwrap();
        assert_eq!(search_moderation(&items, "spam")[0].id, "1");
        assert_eq!(search_moderation(&items, "phone")[0].id, "2");
        assert!(items[0].is_open());
        assert!(!items[1].is_open());
    }
}
