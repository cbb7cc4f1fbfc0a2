use dioxus::prelude::*;
use shared_types::{DisputesDashboard, ViewState};
use shared_ui::{
    use_toast, Card, CardContent, CardHeader, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableHeader, DataTableRow, EmptyState, PageHeader, SkeletonRows,
    StatCard, StatGrid, StatTone,
};

use crate::auth::use_api;
use crate::feedback;
use crate::format_helpers::{format_count, format_days, format_percent, format_snake_case_title};

/// Aggregate dispute metrics.
#[component]
pub fn DisputeStats() -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut state = use_signal(ViewState::<DisputesDashboard>::default);

    let _dashboard = use_resource(move || {
        let api = api.clone();
        async move {
            state.write().begin();
            let result = api.disputes_dashboard().await;
            if let Some(err) = state.write().finish(result) {
                feedback::failure(toast, &err, "Failed to load dispute statistics");
            }
        }
    });

    rsx! {
        PageHeader {
            title: "Dispute Statistics",
            description: "Volume, resolution and escalation",
        }

        match &*state.read() {
            ViewState::Loading => rsx! { SkeletonRows { count: 4 } },
            ViewState::Empty => rsx! { EmptyState { message: "No dispute statistics yet." } },
            ViewState::Loaded(data) => rsx! { DisputePanels { data: data.clone() } },
        }
    }
}

#[component]
fn DisputePanels(data: DisputesDashboard) -> Element {
    rsx! {
        StatGrid {
            StatCard { label: "Total disputes", value: format_count(data.total_disputes) }
            StatCard {
                label: "Active",
                value: format_count(data.active_disputes),
                tone: if data.active_disputes > 0 { StatTone::Caution } else { StatTone::Neutral },
            }
            StatCard { label: "Resolved", value: format_count(data.resolved_disputes), tone: StatTone::Positive }
            StatCard { label: "Resolution rate", value: format_percent(data.resolution_rate) }
            StatCard { label: "Average resolution", value: format_days(data.average_resolution_time) }
            StatCard {
                label: "Escalation rate",
                value: format_percent(data.escalation_rate),
                tone: StatTone::Negative,
            }
        }

        Card {
            CardHeader { title: "Disputes by type" }
            CardContent {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Type" }
                        DataTableColumn { align_end: true, "Count" }
                    }
                    DataTableBody {
                        for (kind, count) in data.disputes_by_type.iter() {
                            DataTableRow { key: "{kind}",
                                DataTableCell { {format_snake_case_title(kind)} }
                                DataTableCell { align_end: true, {format_count(*count)} }
                            }
                        }
                    }
                }
            }
        }
    }
}
