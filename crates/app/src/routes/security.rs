use dioxus::prelude::*;
use shared_types::{SecurityDashboard, ViewState};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, EmptyState, PageHeader,
    SkeletonRows, StatCard, StatGrid, StatTone, StatusBadge,
};

use crate::auth::use_api;
use crate::feedback;
use crate::format_helpers::{format_count, format_datetime, format_percent};

const LOAD_FAILED: &str = "Failed to load security dashboard";

#[component]
pub fn Security() -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut state = use_signal(ViewState::<SecurityDashboard>::default);

    let mut dashboard = use_resource(move || {
        let api = api.clone();
        async move {
            state.write().begin();
            let result = api.security_dashboard().await;
            if let Some(err) = state.write().finish(result) {
                feedback::failure(toast, &err, LOAD_FAILED);
            }
        }
    });

    rsx! {
        PageHeader {
            title: "Security",
            description: "Sessions, alerts and threat protection",
            Button {
                variant: ButtonVariant::Outline,
                onclick: move |_| dashboard.restart(),
                "Refresh"
            }
        }

        match &*state.read() {
            ViewState::Loading => rsx! { SkeletonRows { count: 5 } },
            ViewState::Empty => rsx! { EmptyState { message: "No security data available." } },
            ViewState::Loaded(data) => rsx! { SecurityPanels { data: data.clone() } },
        }
    }
}

fn alert_tone(critical: u64, high: u64) -> StatTone {
    if critical > 0 {
        StatTone::Negative
    } else if high > 0 {
        StatTone::Caution
    } else {
        StatTone::Positive
    }
}

#[component]
fn SecurityPanels(data: SecurityDashboard) -> Element {
    let alerts = &data.security_alerts;
    let scan = &data.vulnerability_scan_results;

    rsx! {
        StatGrid {
            StatCard { label: "Active sessions", value: format_count(data.active_sessions) }
            StatCard {
                label: "Failed logins",
                value: format_count(data.failed_login_attempts),
                tone: if data.failed_login_attempts > 0 { StatTone::Caution } else { StatTone::Neutral },
            }
            StatCard {
                label: "Suspicious activity",
                value: format_count(data.suspicious_activities),
                tone: if data.suspicious_activities > 0 { StatTone::Negative } else { StatTone::Neutral },
            }
            StatCard {
                label: "Open alerts",
                value: format_count(alerts.total()),
                detail: format!("{} critical, {} high", alerts.critical, alerts.high),
                tone: alert_tone(alerts.critical, alerts.high),
            }
        }

        div { class: "panel-grid",
            Card {
                CardHeader {
                    title: "Vulnerability scan",
                    description: format!("Last run {}", format_datetime(scan.last_scan.as_ref())),
                }
                CardContent {
                    dl { class: "metric-list",
                        dt { "Critical" }
                        dd { "{scan.critical}" }
                        dt { "High" }
                        dd { "{scan.high}" }
                        dt { "Medium" }
                        dd { "{scan.medium}" }
                        dt { "Low" }
                        dd { "{scan.low}" }
                    }
                }
            }
            Card {
                CardHeader { title: "Protection" }
                CardContent {
                    dl { class: "metric-list",
                        dt { "Threat detection" }
                        dd {
                            StatusBadge { status: if data.threat_detection.active { "active".to_string() } else { "inactive".to_string() } }
                        }
                        dt { "Threats blocked (24h)" }
                        dd { {format_count(data.threat_detection.threats_blocked_24h)} }
                        dt { "DDoS protection" }
                        dd {
                            StatusBadge { status: data.ddos_protection.status.clone() }
                        }
                        dt { "Attacks blocked (24h)" }
                        dd { {format_count(data.ddos_protection.attacks_blocked_24h)} }
                        dt { "Rate limiting effectiveness" }
                        dd { {format_percent(data.rate_limiting.effectiveness)} }
                        dt { "Requests blocked (24h)" }
                        dd { {format_count(data.rate_limiting.requests_blocked_24h)} }
                    }
                }
            }
        }
    }
}
