use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::common::{matches_search, push_number, push_selected, ProjectRef, QueryParams, UserRef, ALL};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DISPUTE_TYPES: &[&str] = &["payment", "quality", "scope", "timeline", "damage"];
pub const DISPUTE_STATUSES: &[&str] =
    &["filed", "internal_resolution", "mediation", "arbitration", "resolved"];
pub const DISPUTE_PRIORITIES: &[&str] = &["urgent", "high", "normal", "low"];

/// Rank given to any priority outside the known table.
pub const UNKNOWN_PRIORITY_RANK: u8 = 99;

/// Sort position of a priority. Lower sorts first.
pub fn priority_rank(priority: &str) -> u8 {
    match priority {
        "urgent" => 0,
        "high" => 1,
        "normal" => 2,
        "low" => 3,
        _ => UNKNOWN_PRIORITY_RANK,
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dispute {
    pub id: String,
    #[serde(rename = "type", alias = "dispute_type", default)]
    pub dispute_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub filed_by: Option<String>,
    #[serde(default)]
    pub filed_by_user: Option<UserRef>,
    #[serde(default)]
    pub amount_disputed: Option<f64>,
    #[serde(default)]
    pub filing_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_admin: Option<String>,
}

impl Dispute {
    pub fn priority_rank(&self) -> u8 {
        priority_rank(&self.priority)
    }

    /// A deadline strictly before `now`. No deadline is never overdue.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|d| d < now)
    }

    /// First eight characters of the id, as shown in the queue.
    pub fn short_id(&self) -> String {
        let short: String = self.id.chars().take(8).collect();
        format!("{short}...")
    }

    pub fn project_title(&self) -> Option<&str> {
        self.project.as_ref().and_then(|p| p.title.as_deref())
    }

    pub fn filer_name(&self) -> Option<&str> {
        self.filed_by_user.as_ref().and_then(|u| u.full_name.as_deref())
    }
}

/// Aggregates shown on the disputes dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputesDashboard {
    #[serde(default)]
    pub total_disputes: u64,
    #[serde(default)]
    pub active_disputes: u64,
    #[serde(default)]
    pub resolved_disputes: u64,
    #[serde(default)]
    pub resolution_rate: f64,
    /// Days.
    #[serde(default)]
    pub average_resolution_time: f64,
    #[serde(default)]
    pub escalation_rate: f64,
    #[serde(default)]
    pub disputes_by_type: BTreeMap<String, u64>,
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Server-side filters for the dispute queue.
#[derive(Debug, Clone, PartialEq)]
pub struct DisputeQuery {
    pub status: String,
    pub dispute_type: String,
    pub filed_date_from: Option<NaiveDate>,
    pub filed_date_to: Option<NaiveDate>,
    pub project_id: String,
    pub filed_by: String,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub assigned_admin: String,
}

impl Default for DisputeQuery {
    fn default() -> Self {
        Self {
            status: ALL.to_string(),
            dispute_type: ALL.to_string(),
            filed_date_from: None,
            filed_date_to: None,
            project_id: String::new(),
            filed_by: String::new(),
            amount_min: None,
            amount_max: None,
            assigned_admin: String::new(),
        }
    }
}

impl DisputeQuery {
    /// Query parameters. `status` and `type` are omitted for `"all"`; date
    /// bounds are sent as UTC midnight timestamps.
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_selected(&mut params, "status", &self.status);
        push_selected(&mut params, "type", &self.dispute_type);
        if let Some(from) = self.filed_date_from {
            params.push(("filed_date_from", midnight_utc(from)));
        }
        if let Some(to) = self.filed_date_to {
            params.push(("filed_date_to", midnight_utc(to)));
        }
        push_selected(&mut params, "project_id", &self.project_id);
        push_selected(&mut params, "filed_by", &self.filed_by);
        push_number(&mut params, "amount_min", self.amount_min);
        push_number(&mut params, "amount_max", self.amount_max);
        push_selected(&mut params, "assigned_admin", &self.assigned_admin);
        params
    }
}

fn midnight_utc(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        .unwrap_or_else(|| date.to_string())
}

// ---------------------------------------------------------------------------
// Sort & search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisputeSort {
    #[default]
    Priority,
    Date,
}

impl DisputeSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisputeSort::Priority => "priority",
            DisputeSort::Date => "date",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "date" => DisputeSort::Date,
            _ => DisputeSort::Priority,
        }
    }
}

/// Stable in-place sort.
///
/// `Priority` ranks urgent, high, normal, low, then everything else, keeping
/// fetch order among equal ranks. `Date` puts the newest `filing_date` first;
/// disputes without one go last.
pub fn sort_disputes(disputes: &mut [Dispute], sort: DisputeSort) {
    match sort {
        DisputeSort::Priority => disputes.sort_by_key(Dispute::priority_rank),
        DisputeSort::Date => disputes.sort_by(|a, b| b.filing_date.cmp(&a.filing_date)),
    }
}

/// Case-insensitive search over id, description, project title and filer name.
/// Returns references into `disputes` in their current order.
pub fn search_disputes<'a>(disputes: &'a [Dispute], query: &str) -> Vec<&'a Dispute> {
    disputes
        .iter()
        .filter(|d| {
            matches_search(
                query,
                [
                    Some(d.id.as_str()),
                    d.description.as_deref(),
                    d.project_title(),
                    d.filer_name(),
                ],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn dispute(id: &str, priority: &str, filed_day: u32) -> Dispute {
        Dispute {
            id: id.to_string(),
            dispute_type: "payment".into(),
            status: "filed".into(),
            priority: priority.to_string(),
            description: None,
            project_id: None,
            project: None,
            filed_by: None,
            filed_by_user: None,
            amount_disputed: None,
            filing_date: Some(Utc.with_ymd_and_hms(2026, 3, filed_day, 12, 0, 0).unwrap()),
            deadline: None,
            assigned_admin: None,
        }
    }

    fn ids(disputes: &[Dispute]) -> Vec<&str> {
        disputes.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn priority_sort_ranks_known_then_unknown() {
        let mut list = vec![
            dispute("a", "low", 1),
            dispute("b", "critical", 2),
            dispute("c", "urgent", 3),
            dispute("d", "normal", 4),
            dispute("e", "high", 5),
        ];
        sort_disputes(&mut list, DisputeSort::Priority);
        assert_eq!(ids(&list), vec!["c", "e", "d", "a", "b"]);
    }

    #[test]
    fn priority_sort_is_stable_among_ties() {
        let mut list = vec![
            dispute("x1", "", 1),
            dispute("h1", "high", 2),
            dispute("x2", "weird", 3),
            dispute("h2", "high", 4),
            dispute("x3", "", 5),
        ];
        sort_disputes(&mut list, DisputeSort::Priority);
        assert_eq!(ids(&list), vec!["h1", "h2", "x1", "x2", "x3"]);
    }

    #[test]
    fn urgent_ranks_zero() {
        assert_eq!(priority_rank("urgent"), 0);
        assert_eq!(priority_rank("Urgent"), UNKNOWN_PRIORITY_RANK);
    }

    #[test]
    fn date_sort_is_newest_first() {
        let mut list = vec![dispute("old", "low", 1), dispute("new", "low", 20), dispute("mid", "low", 10)];
        let mut undated = dispute("none", "low", 1);
        undated.filing_date = None;
        list.push(undated);

        sort_disputes(&mut list, DisputeSort::Date);
        assert_eq!(ids(&list), vec!["new", "mid", "old", "none"]);
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let mut a = dispute("abc12345-0000", "high", 1);
        a.description = Some("Unpaid invoice for drywall".into());
        let mut b = dispute("def67890-0000", "low", 2);
        b.project = Some(ProjectRef {
            id: None,
            title: Some("Kitchen Remodel".into()),
        });
        let mut c = dispute("fff00000-0000", "low", 3);
        c.filed_by_user = Some(UserRef {
            id: None,
            full_name: Some("Dana Ortiz".into()),
            email: None,
        });
        let list = vec![a, b, c];

        let hits: Vec<&str> = search_disputes(&list, "DRYWALL").iter().map(|d| d.id.as_str()).collect();
        assert_eq!(hits, vec!["abc12345-0000"]);
        assert_eq!(search_disputes(&list, "kitchen").len(), 1);
        assert_eq!(search_disputes(&list, "ortiz").len(), 1);
        assert_eq!(search_disputes(&list, "def678").len(), 1);
        assert_eq!(search_disputes(&list, "").len(), 3);
        assert!(search_disputes(&list, "no such thing").is_empty());
    }

    #[test]
    fn search_results_are_a_subset_in_order() {
        let list: Vec<Dispute> = (1..=6)
            .map(|i| {
                let mut d = dispute(&format!("id-{i}"), "normal", i);
                d.description = Some(if i % 2 == 0 { "roof leak".into() } else { "paint".into() });
                d
            })
            .collect();
        let hits = search_disputes(&list, "roof");
        assert_eq!(hits.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), vec!["id-2", "id-4", "id-6"]);
        assert!(hits.iter().all(|h| list.contains(*h)));
    }

    #[test]
    fn overdue_compares_deadline_to_now() {
        let now = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();
        let mut d = dispute("a", "high", 1);
        assert!(!d.is_overdue(now));
        d.deadline = Some(Utc.with_ymd_and_hms(2026, 3, 31, 23, 59, 0).unwrap());
        assert!(d.is_overdue(now));
        d.deadline = Some(now);
        assert!(!d.is_overdue(now));
    }

    #[test]
    fn short_id_truncates() {
        let d = dispute("0f9e8d7c-6b5a-4321", "low", 1);
        assert_eq!(d.short_id(), "0f9e8d7c...");
    }

    #[test]
    fn default_query_sends_nothing() {
        assert!(DisputeQuery::default().to_query().is_empty());
    }

    #[test]
    fn query_includes_only_set_filters() {
        let query = DisputeQuery {
            status: "mediation".into(),
            filed_date_from: NaiveDate::from_ymd_opt(2026, 1, 15),
            amount_min: Some(250.0),
            filed_by: "  ".into(),
            ..DisputeQuery::default()
        };
        assert_eq!(
            query.to_query(),
            vec![
                ("status", "mediation".to_string()),
                ("filed_date_from", "2026-01-15T00:00:00.000Z".to_string()),
                ("amount_min", "250".to_string()),
            ]
        );
    }

    #[test]
    fn dispute_decodes_type_field() {
        let json = r#"{"id":"d-1","type":"quality","status":"mediation","priority":"urgent",
            "amount_disputed":1200.5,"filing_date":"2026-02-01T10:00:00Z",
            "project":{"title":"Deck"},"filed_by_user":{"full_name":"Sam Lee"}}"#;
        let d: Dispute = serde_json::from_str(json).unwrap();
        assert_eq!(d.dispute_type, "quality");
        assert_eq!(d.project_title(), Some("Deck"));
        assert_eq!(d.filer_name(), Some("Sam Lee"));
        assert_eq!(d.amount_disputed, Some(1200.5));
    }
}
