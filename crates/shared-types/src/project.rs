use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::common::{matches_search, push_number, push_selected, QueryParams, UserRef, ALL};

pub const PROJECT_STATUSES: &[&str] = &["active", "in_progress", "completed", "on_hold", "cancelled"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub completion_percentage: f64,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub owner: Option<UserRef>,
    #[serde(default)]
    pub contractor_id: Option<String>,
    #[serde(default)]
    pub contractor: Option<UserRef>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub dispute_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentReleaseStats {
    #[serde(default)]
    pub total_released: f64,
    #[serde(default)]
    pub total_pending: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectsSummary {
    #[serde(default)]
    pub active_projects_count: u64,
    /// Days.
    #[serde(default)]
    pub average_completion_time: f64,
    #[serde(default)]
    pub on_time_completion_rate: f64,
    #[serde(default)]
    pub dispute_rate: f64,
    #[serde(default)]
    pub payment_release_stats: PaymentReleaseStats,
    #[serde(default)]
    pub projects_by_status: BTreeMap<String, u64>,
}

/// Server-side filters for the project list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectQuery {
    pub status: String,
    pub owner_id: String,
    pub contractor_id: String,
    pub trade_type: String,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub start_date_from: Option<NaiveDate>,
    pub start_date_to: Option<NaiveDate>,
    pub completion_percentage_min: Option<f64>,
    pub completion_percentage_max: Option<f64>,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            status: ALL.to_string(),
            owner_id: String::new(),
            contractor_id: String::new(),
            trade_type: String::new(),
            budget_min: None,
            budget_max: None,
            start_date_from: None,
            start_date_to: None,
            completion_percentage_min: None,
            completion_percentage_max: None,
        }
    }
}

impl ProjectQuery {
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_selected(&mut params, "status", &self.status);
        push_selected(&mut params, "owner_id", &self.owner_id);
        push_selected(&mut params, "contractor_id", &self.contractor_id);
        push_selected(&mut params, "trade_type", &self.trade_type);
        push_number(&mut params, "budget_min", self.budget_min);
        push_number(&mut params, "budget_max", self.budget_max);
        if let Some(d) = self.start_date_from {
            params.push(("start_date_from", d.to_string()));
        }
        if let Some(d) = self.start_date_to {
            params.push(("start_date_to", d.to_string()));
        }
        push_number(&mut params, "completion_percentage_min", self.completion_percentage_min);
        push_number(&mut params, "completion_percentage_max", self.completion_percentage_max);
        params
    }
}

pub fn search_projects<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| {
            matches_search(
                query,
                [
                    Some(p.title.as_str()),
                    p.description.as_deref(),
                    p.owner.as_ref().and_then(|o| o.full_name.as_deref()),
                    p.contractor.as_ref().and_then(|c| c.full_name.as_deref()),
                ],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn query_sends_completion_range_and_dates() {
        let query = ProjectQuery {
            completion_percentage_min: Some(25.0),
            completion_percentage_max: Some(75.0),
            start_date_from: NaiveDate::from_ymd_opt(2026, 5, 1),
            ..ProjectQuery::default()
        };
        assert_eq!(
            query.to_query(),
            vec![
                ("start_date_from", "2026-05-01".to_string()),
                ("completion_percentage_min", "25".to_string()),
                ("completion_percentage_max", "75".to_string()),
            ]
        );
    }

    #[test]
    fn search_covers_owner_and_contractor() {
        let projects: Vec<Project> = serde_json::from_str(
            r#"[{"id":"1","title":"Basement","owner":{"full_name":"Lena Park"}},
                {"id":"2","title":"Garage","contractor":{"full_name":"Bolt Electric"}}]"#,
        )
        .unwrap();
        assert_eq!(search_projects(&projects, "park")[0].id, "1");
        assert_eq!(search_projects(&projects, "bolt")[0].id, "2");
    }

    #[test]
    fn summary_defaults_missing_sections() {
        let summary: ProjectsSummary = serde_json::from_str(r#"{"active_projects_count":12}"#).unwrap();
        assert_eq!(summary.active_projects_count, 12);
        assert_eq!(summary.payment_release_stats, PaymentReleaseStats::default());
    }
}
