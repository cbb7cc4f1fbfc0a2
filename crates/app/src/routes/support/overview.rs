use std::collections::BTreeMap;

use dioxus::prelude::*;
use shared_types::{SupportDashboard, ViewState};
use shared_ui::{
    use_toast, Card, CardContent, CardHeader, EmptyState, PageHeader, SkeletonRows, StatCard,
    StatGrid, StatTone,
};

use crate::auth::use_api;
use crate::feedback;
use crate::format_helpers::{format_count, format_minutes, format_snake_case_title};
use crate::routes::Route;

/// Support workload at a glance.
#[component]
pub fn SupportOverview() -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut state = use_signal(ViewState::<SupportDashboard>::default);

    let _dashboard = use_resource(move || {
        let api = api.clone();
        async move {
            state.write().begin();
            let result = api.support_dashboard().await;
            if let Some(err) = state.write().finish(result) {
                feedback::failure(toast, &err, "Failed to load support dashboard");
            }
        }
    });

    rsx! {
        PageHeader {
            title: "Support",
            description: "Ticket volume and response times",
            Link { class: "overview-link", to: Route::SupportQueue {}, "Open ticket queue" }
        }

        match &*state.read() {
            ViewState::Loading => rsx! { SkeletonRows { count: 4 } },
            ViewState::Empty => rsx! { EmptyState { message: "No support data yet." } },
            ViewState::Loaded(data) => rsx! { SupportPanels { data: data.clone() } },
        }
    }
}

#[component]
fn SupportPanels(data: SupportDashboard) -> Element {
    rsx! {
        StatGrid {
            StatCard {
                label: "Open tickets",
                value: format_count(data.open_tickets_count),
                tone: if data.open_tickets_count > 0 { StatTone::Caution } else { StatTone::Positive },
            }
            StatCard { label: "Average first response", value: format_minutes(data.average_response_time) }
            StatCard { label: "Average resolution", value: format_minutes(data.average_resolution_time) }
        }

        div { class: "panel-grid",
            Breakdown { title: "By status", counts: data.tickets_by_status.clone() }
            Breakdown { title: "By priority", counts: data.tickets_by_priority.clone() }
            Breakdown { title: "By category", counts: data.tickets_by_category.clone() }
        }
    }
}

#[component]
fn Breakdown(title: String, counts: BTreeMap<String, u64>) -> Element {
    rsx! {
        Card {
            CardHeader { title }
            CardContent {
                if counts.is_empty() {
                    p { class: "empty-state", "No tickets." }
                } else {
                    dl { class: "metric-list",
                        for (key, count) in counts.iter() {
                            div { key: "{key}",
                                dt { {format_snake_case_title(key)} }
                                dd { {format_count(*count)} }
                            }
                        }
                    }
                }
            }
        }
    }
}
