use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::UserRef;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopReferrer {
    pub user_id: String,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub referrals_count: u64,
    #[serde(default)]
    pub rewards_earned: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferralProgram {
    pub total_referrals: u64,
    pub active_campaigns: u64,
    pub conversion_rate: f64,
    pub rewards_distributed: f64,
    pub top_referrers: Vec<TopReferrer>,
}

/// Program payload, sent either bare or under a `program` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferralProgramPayload {
    Wrapped { program: ReferralProgram },
    Bare(ReferralProgram),
}

impl ReferralProgramPayload {
    pub fn into_program(self) -> ReferralProgram {
        match self {
            ReferralProgramPayload::Wrapped { program } => program,
            ReferralProgramPayload::Bare(program) => program,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferralSettings {
    pub reward_amount: f64,
    pub expiration_days: u32,
}

impl Default for ReferralSettings {
    fn default() -> Self {
        Self {
            reward_amount: 0.0,
            expiration_days: 30,
        }
    }
}

impl ReferralSettings {
    pub fn validated(self) -> Result<Self, AppError> {
        if !self.reward_amount.is_finite() || self.reward_amount < 0.0 {
            return Err(AppError::validation_field("reward_amount", "Reward amount cannot be negative"));
        }
        if self.expiration_days == 0 {
            return Err(AppError::validation_field("expiration_days", "Expiration must be at least one day"));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferralRecord {
    pub id: String,
    #[serde(default)]
    pub referrer_id: String,
    #[serde(default)]
    pub referrer: Option<UserRef>,
    #[serde(default)]
    pub referred_user_id: String,
    #[serde(default)]
    pub referred_user: Option<UserRef>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reward_amount: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ReferralRecord {
    pub fn referrer_label(&self) -> &str {
        self.referrer
            .as_ref()
            .and_then(|u| u.full_name.as_deref())
            .unwrap_or(&self.referrer_id)
    }

    pub fn referred_label(&self) -> &str {
        self.referred_user
            .as_ref()
            .and_then(|u| u.full_name.as_deref())
            .unwrap_or(&self.referred_user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_payload_accepts_both_shapes() {
        let wrapped: ReferralProgramPayload =
            serde_json::from_str(r#"{"program":{"total_referrals":40}}"#).unwrap();
        let bare: ReferralProgramPayload = serde_json::from_str(r#"{"total_referrals":40}"#).unwrap();
        assert_eq!(wrapped.into_program().total_referrals, 40);
        assert_eq!(bare.into_program().total_referrals, 40);
    }

    #[test]
    fn settings_default_to_thirty_days() {
        assert_eq!(ReferralSettings::default().expiration_days, 30);
        assert!(ReferralSettings {
            reward_amount: -1.0,
            expiration_days: 30
        }
        .validated()
        .is_err());
    }

    #[test]
    fn record_labels_fall_back_to_ids() {
        let r: ReferralRecord =
            serde_json::from_str(r#"{"id":"r1","referrer_id":"u-9","referred_user":{"full_name":"Bo Kim"}}"#).unwrap();
        assert_eq!(r.referrer_label(), "u-9");
        assert_eq!(r.referred_label(), "Bo Kim");
    }
}
