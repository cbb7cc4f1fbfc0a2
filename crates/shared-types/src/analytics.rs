use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Platform analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserMetrics {
    pub total: u64,
    pub active: u64,
    pub new: u64,
    pub retention_rate: f64,
    pub by_role: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobMetrics {
    pub posted: u64,
    pub filled: u64,
    pub fill_rate: f64,
    /// Days.
    pub average_time_to_fill: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectMetrics {
    pub active: u64,
    pub completed: u64,
    pub average_value: f64,
    pub on_time_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialSummary {
    pub total_volume: f64,
    pub platform_revenue: f64,
    pub average_transaction_size: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngagementMetrics {
    pub dau: u64,
    pub mau: u64,
    pub dau_mau_ratio: f64,
    /// Minutes.
    pub average_session_time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformMetrics {
    pub users: UserMetrics,
    pub jobs: JobMetrics,
    pub projects: ProjectMetrics,
    pub financials: FinancialSummary,
    pub engagement: EngagementMetrics,
}

// ---------------------------------------------------------------------------
// Marketing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferralStatistics {
    pub total_referrals: u64,
    pub active_referrers: u64,
    pub rewards_paid: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionRates {
    pub signup_to_verification: f64,
    pub verification_to_first_job: f64,
    pub first_job_to_repeat: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionChannel {
    pub channel: String,
    pub users: u64,
    pub cost: f64,
    pub conversion_rate: f64,
}

impl AcquisitionChannel {
    /// Spend per acquired user; zero when the channel brought nobody in.
    pub fn cost_per_user(&self) -> f64 {
        if self.users == 0 {
            0.0
        } else {
            self.cost / self.users as f64
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketingDashboard {
    pub cost_per_acquisition: f64,
    pub user_activation_rate: f64,
    pub referral_statistics: ReferralStatistics,
    pub conversion_rates: ConversionRates,
    pub acquisition_channels: Vec<AcquisitionChannel>,
}

/// Dashboard payloads that may arrive under a `dashboard` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DashboardPayload<T> {
    Wrapped { dashboard: T },
    Bare(T),
}

impl<T> DashboardPayload<T> {
    pub fn into_inner(self) -> T {
        match self {
            DashboardPayload::Wrapped { dashboard } => dashboard,
            DashboardPayload::Bare(inner) => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_metrics_decode_camel_case() {
        let m: PlatformMetrics = serde_json::from_str(
            r#"{"users":{"total":900,"retentionRate":61.5,"byRole":{"GC":120}},
                "engagement":{"dauMauRatio":0.32,"averageSessionTime":7.5}}"#,
        )
        .unwrap();
        assert_eq!(m.users.retention_rate, 61.5);
        assert_eq!(m.users.by_role.get("GC"), Some(&120));
        assert_eq!(m.engagement.dau_mau_ratio, 0.32);
        assert_eq!(m.jobs.posted, 0);
    }

    #[test]
    fn dashboard_payload_unwraps() {
        let wrapped: DashboardPayload<MarketingDashboard> =
            serde_json::from_str(r#"{"dashboard":{"cost_per_acquisition":42.0}}"#).unwrap();
        assert_eq!(wrapped.into_inner().cost_per_acquisition, 42.0);
    }

    #[test]
    fn channel_cost_per_user() {
        let c = AcquisitionChannel {
            channel: "search".into(),
            users: 40,
            cost: 1000.0,
            conversion_rate: 3.2,
        };
        assert_eq!(c.cost_per_user(), 25.0);
        assert_eq!(AcquisitionChannel::default().cost_per_user(), 0.0);
    }
}
