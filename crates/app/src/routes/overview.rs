use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBriefcase, LdFolder, LdGavel, LdUsers};
use dioxus_free_icons::Icon;
use shared_types::{DashboardStats, ViewState};
use shared_ui::{
    use_toast, Button, ButtonVariant, EmptyState, PageHeader, SkeletonRows, StatCard, StatGrid,
    StatTone,
};

use crate::auth::use_api;
use crate::feedback;
use crate::format_helpers::{format_count, format_currency};
use crate::routes::Route;

const LOAD_FAILED: &str = "Failed to load dashboard";

/// Landing page: platform-wide counts.
#[component]
pub fn Overview() -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut state = use_signal(ViewState::<DashboardStats>::default);

    let mut stats = use_resource(move || {
        let api = api.clone();
        async move {
            state.write().begin();
            let result = api.dashboard_stats().await;
            if let Some(err) = state.write().finish(result) {
                feedback::failure(toast, &err, LOAD_FAILED);
            }
        }
    });

    rsx! {
        PageHeader {
            title: "Overview",
            description: "Marketplace activity at a glance",
            Button {
                variant: ButtonVariant::Outline,
                onclick: move |_| stats.restart(),
                "Refresh"
            }
        }

        match &*state.read() {
            ViewState::Loading => rsx! { SkeletonRows { count: 4 } },
            ViewState::Empty => rsx! { EmptyState { message: "No dashboard data available yet." } },
            ViewState::Loaded(data) => rsx! { OverviewCards { stats: data.clone() } },
        }
    }
}

#[component]
fn OverviewCards(stats: DashboardStats) -> Element {
    let users = &stats.users;
    let suspended_tone = if users.suspended > 0 { StatTone::Caution } else { StatTone::Neutral };
    let dispute_tone = if stats.disputes.active > 0 { StatTone::Negative } else { StatTone::Positive };

    rsx! {
        StatGrid {
            StatCard {
                label: "Total users",
                value: format_count(users.total),
                detail: format!("{} active", format_count(users.active)),
                icon: rsx! { Icon::<LdUsers> { icon: LdUsers, width: 20, height: 20 } },
            }
            StatCard {
                label: "Pending verification",
                value: format_count(users.pending),
                tone: if users.pending > 0 { StatTone::Caution } else { StatTone::Neutral },
            }
            StatCard {
                label: "Suspended users",
                value: format_count(users.suspended),
                tone: suspended_tone,
            }
            StatCard {
                label: "Total revenue",
                value: format_currency(stats.total_revenue),
                tone: StatTone::Positive,
            }
            StatCard {
                label: "Projects",
                value: format_count(stats.projects.total),
                detail: format!("{} active", format_count(stats.projects.active)),
                icon: rsx! { Icon::<LdFolder> { icon: LdFolder, width: 20, height: 20 } },
            }
            StatCard {
                label: "Jobs",
                value: format_count(stats.jobs.total),
                detail: format!("{} active", format_count(stats.jobs.active)),
                icon: rsx! { Icon::<LdBriefcase> { icon: LdBriefcase, width: 20, height: 20 } },
            }
            StatCard {
                label: "Disputes",
                value: format_count(stats.disputes.total),
                detail: format!("{} active", format_count(stats.disputes.active)),
                tone: dispute_tone,
                icon: rsx! { Icon::<LdGavel> { icon: LdGavel, width: 20, height: 20 } },
            }
        }

        div { class: "overview-links",
            Link { to: Route::Users {}, class: "overview-link", "Review pending users" }
            Link { to: Route::DisputeQueue {}, class: "overview-link", "Open dispute queue" }
            Link { to: Route::Moderation {}, class: "overview-link", "Moderation queue" }
        }
    }
}
