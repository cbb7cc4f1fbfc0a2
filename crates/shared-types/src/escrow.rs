use serde::{Deserialize, Serialize};

use crate::common::{matches_search, require_text, ProjectRef, UserRef};
use crate::error::AppError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const ESCROW_STATUSES: &[&str] = &["active", "frozen", "closed"];

const FILL_REQUIRED: &str = "Please fill all required fields";
const REASON_REQUIRED: &str = "Please provide a reason";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscrowAccount {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub owner: Option<UserRef>,
    #[serde(default)]
    pub contractor: Option<UserRef>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub released_amount: f64,
    #[serde(default)]
    pub remaining_balance: f64,
    #[serde(default)]
    pub status: String,
}

impl EscrowAccount {
    pub fn is_frozen(&self) -> bool {
        self.status == "frozen"
    }

    /// Share of the total already released, 0 to 100.
    pub fn released_percent(&self) -> f64 {
        if self.total_amount <= 0.0 {
            0.0
        } else {
            (self.released_amount / self.total_amount * 100.0).clamp(0.0, 100.0)
        }
    }
}

/// Accounts matching `status` (unless `"all"`) and a search over project
/// title, owner name and contractor name.
pub fn filter_escrow<'a>(accounts: &'a [EscrowAccount], status: &str, query: &str) -> Vec<&'a EscrowAccount> {
    accounts
        .iter()
        .filter(|a| status == crate::common::ALL || status.is_empty() || a.status == status)
        .filter(|a| {
            matches_search(
                query,
                [
                    a.project.as_ref().and_then(|p| p.title.as_deref()),
                    a.owner.as_ref().and_then(|o| o.full_name.as_deref()),
                    a.contractor.as_ref().and_then(|c| c.full_name.as_deref()),
                ],
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Action requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseRequest {
    pub amount: f64,
    pub reason: String,
    pub emergency: bool,
}

impl ReleaseRequest {
    /// Emergency release from raw form input. Amount and reason are required.
    pub fn from_input(amount: &str, reason: &str) -> Result<Self, AppError> {
        let amount = parse_amount(amount).ok_or_else(|| AppError::validation(FILL_REQUIRED))?;
        let reason = require_text(reason, FILL_REQUIRED)?;
        Ok(Self {
            amount,
            reason,
            emergency: true,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub reason: String,
}

impl RefundRequest {
    /// An empty amount refunds the remaining balance.
    pub fn from_input(amount: &str, reason: &str) -> Result<Self, AppError> {
        let reason = require_text(reason, REASON_REQUIRED)?;
        let amount = if amount.trim().is_empty() {
            None
        } else {
            Some(parse_amount(amount).ok_or_else(|| AppError::validation_field("amount", "Enter a valid amount"))?)
        };
        Ok(Self { amount, reason })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustRequest {
    pub new_amount: f64,
    pub reason: String,
}

impl AdjustRequest {
    pub fn from_input(new_amount: &str, reason: &str) -> Result<Self, AppError> {
        let new_amount = parse_amount(new_amount).ok_or_else(|| AppError::validation(FILL_REQUIRED))?;
        let reason = require_text(reason, FILL_REQUIRED)?;
        Ok(Self { new_amount, reason })
    }
}

fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

pub fn escrow_report_filename(account_id: &str) -> String {
    format!("escrow-report-{account_id}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, title: &str, owner: &str, status: &str) -> EscrowAccount {
        EscrowAccount {
            id: id.into(),
            project_id: None,
            project: Some(ProjectRef {
                id: None,
                title: Some(title.into()),
            }),
            owner: Some(UserRef {
                id: None,
                full_name: Some(owner.into()),
                email: None,
            }),
            contractor: None,
            total_amount: 10_000.0,
            released_amount: 2_500.0,
            remaining_balance: 7_500.0,
            status: status.into(),
        }
    }

    #[test]
    fn release_requires_amount_and_reason() {
        let err = ReleaseRequest::from_input("", "milestone met").unwrap_err();
        assert_eq!(err.message, "Please fill all required fields");
        let err = ReleaseRequest::from_input("500", "  ").unwrap_err();
        assert_eq!(err.message, "Please fill all required fields");

        let req = ReleaseRequest::from_input("500", "milestone met").unwrap();
        assert!(req.emergency);
        assert_eq!(req.amount, 500.0);
    }

    #[test]
    fn refund_amount_is_optional() {
        let req = RefundRequest::from_input("", "job cancelled").unwrap();
        assert_eq!(req.amount, None);
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("amount").is_none());

        assert!(RefundRequest::from_input("-5", "job cancelled").is_err());
        assert!(RefundRequest::from_input("100", "").is_err());
    }

    #[test]
    fn adjust_rejects_non_positive_amounts() {
        assert!(AdjustRequest::from_input("0", "change order").is_err());
        assert_eq!(AdjustRequest::from_input("12000", "change order").unwrap().new_amount, 12000.0);
    }

    #[test]
    fn filter_by_status_and_search() {
        let accounts = vec![
            account("e1", "Kitchen", "Maya Chen", "active"),
            account("e2", "Roof", "Omar Haddad", "frozen"),
        ];
        assert_eq!(filter_escrow(&accounts, "all", "").len(), 2);
        assert_eq!(filter_escrow(&accounts, "frozen", "")[0].id, "e2");
        assert_eq!(filter_escrow(&accounts, "all", "maya")[0].id, "e1");
        assert!(filter_escrow(&accounts, "active", "roof").is_empty());
    }

    #[test]
    fn released_percent_guards_zero_total() {
        let mut a = account("e1", "K", "M", "active");
        assert_eq!(a.released_percent(), 25.0);
        a.total_amount = 0.0;
        assert_eq!(a.released_percent(), 0.0);
    }

    #[test]
    fn report_filename() {
        assert_eq!(escrow_report_filename("e-42"), "escrow-report-e-42.pdf");
    }
}
