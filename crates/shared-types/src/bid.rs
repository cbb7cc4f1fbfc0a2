use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{matches_search, UserRef};
use crate::error::AppError;

pub const BID_STATUSES: &[&str] = &["open", "closed", "awarded", "cancelled"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
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
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    /// Number of submissions received.
    #[serde(default, alias = "submissions_count")]
    pub submissions: u32,
}

impl Bid {
    pub fn is_open(&self) -> bool {
        self.status == "open"
    }
}

pub fn search_bids<'a>(bids: &'a [Bid], query: &str) -> Vec<&'a Bid> {
    bids.iter()
        .filter(|b| matches_search(query, [Some(b.title.as_str()), b.description.as_deref()]))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendDeadlineRequest {
    pub deadline: DateTime<Utc>,
}

pub const DEADLINE_REQUIRED: &str = "Please select a new deadline";

impl ExtendDeadlineRequest {
    /// Build from a `YYYY-MM-DD` date input. The deadline lands at the end of
    /// that day, UTC, and must be later than `now`.
    pub fn from_date_input(input: &str, now: DateTime<Utc>) -> Result<Self, AppError> {
        let day = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::validation(DEADLINE_REQUIRED))?;
        let deadline = day
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| AppError::validation(DEADLINE_REQUIRED))?
            .and_utc();
        if deadline <= now {
            return Err(AppError::validation("The new deadline must be in the future"));
        }
        Ok(Self { deadline })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn submissions_accepts_either_name() {
        let a: Bid = serde_json::from_str(r#"{"id":"b","submissions":4}"#).unwrap();
        let b: Bid = serde_json::from_str(r#"{"id":"b","submissions_count":4}"#).unwrap();
        assert_eq!(a.submissions, 4);
        assert_eq!(b.submissions, 4);
    }

    #[test]
    fn search_ignores_status() {
        let bids: Vec<Bid> = serde_json::from_str(
            r#"[{"id":"1","title":"HVAC retrofit","status":"open"},{"id":"2","title":"Open floor plan","status":"closed"}]"#,
        )
        .unwrap();
        let hits = search_bids(&bids, "open");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
        assert!(bids[0].is_open());
    }

    #[test]
    fn deadline_from_date_input() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let req = ExtendDeadlineRequest::from_date_input("2026-03-10", now).unwrap();
        assert_eq!(req.deadline, Utc.with_ymd_and_hms(2026, 3, 10, 23, 59, 59).unwrap());

        let err = ExtendDeadlineRequest::from_date_input("", now).unwrap_err();
        assert_eq!(err.message, DEADLINE_REQUIRED);
        assert!(ExtendDeadlineRequest::from_date_input("2026-02-28", now).is_err());
    }
}
