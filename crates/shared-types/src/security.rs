use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityCounts {
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

impl SeverityCounts {
    pub fn total(&self) -> u64 {
        self.critical + self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnerabilityScan {
    pub last_scan: Option<DateTime<Utc>>,
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatDetection {
    pub active: bool,
    pub threats_blocked_24h: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DdosProtection {
    pub status: String,
    pub attacks_blocked_24h: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimiting {
    /// Percent of abusive traffic stopped.
    pub effectiveness: f64,
    pub requests_blocked_24h: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityDashboard {
    pub active_sessions: u64,
    pub failed_login_attempts: u64,
    pub suspicious_activities: u64,
    pub security_alerts: SeverityCounts,
    pub vulnerability_scan_results: VulnerabilityScan,
    pub threat_detection: ThreatDetection,
    pub ddos_protection: DdosProtection,
    pub rate_limiting: RateLimiting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_payload_decodes() {
        let d: SecurityDashboard = serde_json::from_str(
            r#"{"active_sessions":311,"security_alerts":{"critical":1,"high":4},
                "ddos_protection":{"status":"active","attacks_blocked_24h":2}}"#,
        )
        .unwrap();
        assert_eq!(d.active_sessions, 311);
        assert_eq!(d.security_alerts.total(), 5);
        assert_eq!(d.ddos_protection.status, "active");
        assert!(d.vulnerability_scan_results.last_scan.is_none());
    }
}
