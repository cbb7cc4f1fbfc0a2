use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::common::{matches_search, push_selected, QueryParams, UserRef, ALL};

pub const TICKET_STATUSES: &[&str] = &["open", "in_progress", "resolved", "closed"];
pub const TICKET_PRIORITIES: &[&str] = &["low", "normal", "high", "urgent"];
pub const TICKET_CATEGORIES: &[&str] = &["account", "billing", "technical", "dispute", "other"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportDashboard {
    #[serde(default)]
    pub open_tickets_count: u64,
    /// Minutes.
    #[serde(default)]
    pub average_response_time: f64,
    /// Minutes.
    #[serde(default)]
    pub average_resolution_time: f64,
    #[serde(default)]
    pub tickets_by_status: BTreeMap<String, u64>,
    #[serde(default)]
    pub tickets_by_priority: BTreeMap<String, u64>,
    #[serde(default)]
    pub tickets_by_category: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: String,
    #[serde(default)]
    pub ticket_number: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketQuery {
    pub status: String,
    pub priority: String,
    pub category: String,
}

impl Default for TicketQuery {
    fn default() -> Self {
        Self {
            status: ALL.to_string(),
            priority: ALL.to_string(),
            category: ALL.to_string(),
        }
    }
}

impl TicketQuery {
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_selected(&mut params, "status", &self.status);
        push_selected(&mut params, "priority", &self.priority);
        push_selected(&mut params, "category", &self.category);
        params
    }
}

pub fn search_tickets<'a>(tickets: &'a [SupportTicket], query: &str) -> Vec<&'a SupportTicket> {
    tickets
        .iter()
        .filter(|t| {
            matches_search(
                query,
                [
                    Some(t.subject.as_str()),
                    t.ticket_number.as_deref(),
                    t.user.as_ref().and_then(|u| u.full_name.as_deref()),
                    t.user.as_ref().and_then(|u| u.email.as_deref()),
                ],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_decodes_breakdowns() {
        let d: SupportDashboard = serde_json::from_str(
            r#"{"open_tickets_count":14,"average_response_time":42.5,"tickets_by_status":{"open":14,"closed":3}}"#,
        )
        .unwrap();
        assert_eq!(d.tickets_by_status.get("open"), Some(&14));
        assert!(d.tickets_by_category.is_empty());
    }

    #[test]
    fn ticket_search_by_requester_email() {
        let tickets: Vec<SupportTicket> = serde_json::from_str(
            r#"[{"id":"t1","subject":"Payout delayed","user":{"email":"kim@example.com"}}]"#,
        )
        .unwrap();
        assert_eq!(search_tickets(&tickets, "kim@").len(), 1);
        assert_eq!(search_tickets(&tickets, "payout").len(), 1);
        assert!(search_tickets(&tickets, "login").is_empty());
    }

    #[test]
    fn ticket_query_skips_all() {
        let q = TicketQuery {
            priority: "urgent".into(),
            ..TicketQuery::default()
        };
        assert_eq!(q.to_query(), vec![("priority", "urgent".to_string())]);
    }
}
