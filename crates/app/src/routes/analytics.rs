use dioxus::prelude::*;
use shared_types::{Period, PlatformMetrics, ViewState};
use shared_ui::{
    use_toast, Card, CardContent, CardHeader, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableHeader, DataTableRow, EmptyState, PageHeader, SkeletonRows,
    StatCard, StatGrid,
};

use crate::auth::use_api;
use crate::components::PeriodSelect;
use crate::feedback;
use crate::format_helpers::{format_count, format_currency, format_days, format_minutes, format_percent};

const LOAD_FAILED: &str = "Failed to load analytics";

/// Platform analytics for a reporting period. Changing the period refetches.
#[component]
pub fn Analytics() -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut period = use_signal(|| Period::Monthly);
    let mut state = use_signal(ViewState::<PlatformMetrics>::default);

    let _metrics = use_resource(move || {
        let api = api.clone();
        let period = period();
        async move {
            state.write().begin();
            let result = api.platform_analytics(period).await;
            if let Some(err) = state.write().finish(result) {
                feedback::failure(toast, &err, LOAD_FAILED);
            }
        }
    });

    rsx! {
        PageHeader {
            title: "Platform Analytics",
            description: "Users, jobs, projects and revenue for the selected period",
            PeriodSelect { value: period(), on_change: move |p| period.set(p) }
        }

        match &*state.read() {
            ViewState::Loading => rsx! { SkeletonRows { count: 6 } },
            ViewState::Empty => rsx! { EmptyState { message: "No analytics for this period." } },
            ViewState::Loaded(metrics) => rsx! { MetricsPanels { metrics: metrics.clone() } },
        }
    }
}

#[component]
fn MetricsPanels(metrics: PlatformMetrics) -> Element {
    let PlatformMetrics { users, jobs, projects, financials, engagement } = metrics;

    rsx! {
        StatGrid {
            StatCard {
                label: "Total users",
                value: format_count(users.total),
                detail: format!("{} new this period", format_count(users.new)),
            }
            StatCard { label: "Active users", value: format_count(users.active) }
            StatCard { label: "Retention", value: format_percent(users.retention_rate) }
            StatCard {
                label: "Platform volume",
                value: format_currency(financials.total_volume),
                detail: format!("Revenue {}", format_currency(financials.platform_revenue)),
            }
            StatCard { label: "Average transaction", value: format_currency(financials.average_transaction_size) }
        }

        div { class: "panel-grid",
            Card {
                CardHeader { title: "Jobs" }
                CardContent {
                    dl { class: "metric-list",
                        dt { "Posted" }
                        dd { {format_count(jobs.posted)} }
                        dt { "Filled" }
                        dd { {format_count(jobs.filled)} }
                        dt { "Fill rate" }
                        dd { {format_percent(jobs.fill_rate)} }
                        dt { "Average time to fill" }
                        dd { {format_days(jobs.average_time_to_fill)} }
                    }
                }
            }
            Card {
                CardHeader { title: "Projects" }
                CardContent {
                    dl { class: "metric-list",
                        dt { "Active" }
                        dd { {format_count(projects.active)} }
                        dt { "Completed" }
                        dd { {format_count(projects.completed)} }
                        dt { "Average value" }
                        dd { {format_currency(projects.average_value)} }
                        dt { "On time" }
                        dd { {format_percent(projects.on_time_rate)} }
                    }
                }
            }
            Card {
                CardHeader { title: "Engagement" }
                CardContent {
                    dl { class: "metric-list",
                        dt { "Daily active" }
                        dd { {format_count(engagement.dau)} }
                        dt { "Monthly active" }
                        dd { {format_count(engagement.mau)} }
                        dt { "DAU / MAU" }
                        dd { {format_percent(engagement.dau_mau_ratio)} }
                        dt { "Average session" }
                        dd { {format_minutes(engagement.average_session_time)} }
                    }
                }
            }
        }

        Card {
            CardHeader { title: "Users by role" }
            CardContent {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Role" }
                        DataTableColumn { align_end: true, "Users" }
                    }
                    DataTableBody {
                        for (role, count) in users.by_role.iter() {
                            DataTableRow { key: "{role}",
                                DataTableCell { {shared_types::role_label(role).to_string()} }
                                DataTableCell { align_end: true, {format_count(*count)} }
                            }
                        }
                    }
                }
            }
        }
    }
}
