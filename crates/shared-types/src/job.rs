use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{matches_search, UserRef};

pub const JOB_STATUSES: &[&str] = &["open", "in_progress", "completed", "cancelled", "closed"];

pub fn is_valid_job_status(s: &str) -> bool {
    JOB_STATUSES.contains(&s)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub posted_by: Option<UserRef>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub applications_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

pub fn search_jobs<'a>(jobs: &'a [Job], query: &str) -> Vec<&'a Job> {
    jobs.iter()
        .filter(|j| matches_search(query, [Some(j.title.as_str()), j.description.as_deref()]))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureJobRequest {
    pub featured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_decodes_with_nested_poster() {
        let json = r#"{"id":"j1","title":"Panel upgrade","status":"open","budget":4200,
            "posted_by":{"full_name":"Ana Cruz"},"applications_count":3}"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.budget, Some(4200.0));
        assert_eq!(job.posted_by.unwrap().display_name(), "Ana Cruz");
        assert!(!job.featured);
    }

    #[test]
    fn search_matches_title_or_description() {
        let jobs: Vec<Job> = serde_json::from_str(
            r#"[{"id":"1","title":"Roof tear-off"},{"id":"2","title":"Deck","description":"Composite roof deck"},{"id":"3","title":"Tile"}]"#,
        )
        .unwrap();
        let hits: Vec<&str> = search_jobs(&jobs, "roof").iter().map(|j| j.id.as_str()).collect();
        assert_eq!(hits, vec!["1", "2"]);
    }

    #[test]
    fn status_validation() {
        assert!(is_valid_job_status("in_progress"));
        assert!(!is_valid_job_status("archived"));
    }
}
