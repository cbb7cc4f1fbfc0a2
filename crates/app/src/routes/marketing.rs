use dioxus::prelude::*;
use shared_types::{MarketingDashboard, ViewState};
use shared_ui::{
    use_toast, Card, CardContent, CardHeader, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, EmptyState, PageHeader,
    SkeletonRows, StatCard, StatGrid,
};

use crate::auth::use_api;
use crate::feedback;
use crate::format_helpers::{format_count, format_currency, format_percent};

const LOAD_FAILED: &str = "Failed to load marketing dashboard";

#[component]
pub fn Marketing() -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut state = use_signal(ViewState::<MarketingDashboard>::default);

    let _dashboard = use_resource(move || {
        let api = api.clone();
        async move {
            state.write().begin();
            let result = api.marketing_dashboard().await;
            if let Some(err) = state.write().finish(result) {
                feedback::failure(toast, &err, LOAD_FAILED);
            }
        }
    });

    rsx! {
        PageHeader {
            title: "Marketing",
            description: "Acquisition cost, activation and channel performance",
        }

        match &*state.read() {
            ViewState::Loading => rsx! { SkeletonRows { count: 5 } },
            ViewState::Empty => rsx! { EmptyState { message: "No marketing data available." } },
            ViewState::Loaded(data) => rsx! { MarketingPanels { data: data.clone() } },
        }
    }
}

#[component]
fn MarketingPanels(data: MarketingDashboard) -> Element {
    let referrals = &data.referral_statistics;
    let conversion = &data.conversion_rates;

    rsx! {
        StatGrid {
            StatCard { label: "Cost per acquisition", value: format_currency(data.cost_per_acquisition) }
            StatCard { label: "Activation rate", value: format_percent(data.user_activation_rate) }
            StatCard {
                label: "Referrals",
                value: format_count(referrals.total_referrals),
                detail: format!("{} active referrers", format_count(referrals.active_referrers)),
            }
            StatCard { label: "Referral rewards paid", value: format_currency(referrals.rewards_paid) }
        }

        Card {
            CardHeader { title: "Conversion funnel" }
            CardContent {
                dl { class: "metric-list",
                    dt { "Signup to verification" }
                    dd { {format_percent(conversion.signup_to_verification)} }
                    dt { "Verification to first job" }
                    dd { {format_percent(conversion.verification_to_first_job)} }
                    dt { "First job to repeat" }
                    dd { {format_percent(conversion.first_job_to_repeat)} }
                }
            }
        }

        Card {
            CardHeader { title: "Acquisition channels" }
            CardContent {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Channel" }
                        DataTableColumn { align_end: true, "Users" }
                        DataTableColumn { align_end: true, "Spend" }
                        DataTableColumn { align_end: true, "Cost / user" }
                        DataTableColumn { align_end: true, "Conversion" }
                    }
                    DataTableBody {
                        if data.acquisition_channels.is_empty() {
                            DataTableEmpty { colspan: 5, message: "No channel data." }
                        }
                        for channel in data.acquisition_channels.iter() {
                            DataTableRow { key: "{channel.channel}",
                                DataTableCell { "{channel.channel}" }
                                DataTableCell { align_end: true, {format_count(channel.users)} }
                                DataTableCell { align_end: true, {format_currency(channel.cost)} }
                                DataTableCell { align_end: true, {format_currency(channel.cost_per_user())} }
                                DataTableCell { align_end: true, {format_percent(channel.conversion_rate)} }
                            }
                        }
                    }
                }
            }
        }
    }
}
