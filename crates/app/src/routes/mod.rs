pub mod analytics;
pub mod bids;
pub mod disputes;
pub mod escrow;
pub mod jobs;
pub mod login;
pub mod marketing;
pub mod moderation;
pub mod not_found;
pub mod notifications;
pub mod overview;
pub mod payments;
pub mod projects;
pub mod referrals;
pub mod security;
pub mod seo;
pub mod support;
pub mod users;

use crate::auth::{sign_out, use_api, use_auth};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdActivity, LdBell, LdBriefcase, LdFlag, LdFolder, LdGavel, LdGift, LdGlobe, LdHammer,
    LdLandmark, LdLayoutDashboard, LdLifeBuoy, LdLock, LdLogOut, LdMegaphone, LdShieldCheck,
    LdTicket, LdTrendingUp, LdUsers, LdWallet,
};
use dioxus_free_icons::Icon;
use shared_types::FeatureFlags;

use analytics::Analytics;
use bids::Bids;
use disputes::{DisputeQueue, DisputeStats};
use escrow::Escrow;
use jobs::Jobs;
use login::Login;
use marketing::Marketing;
use moderation::Moderation;
use not_found::NotFound;
use notifications::Notifications;
use overview::Overview;
use payments::Payments;
use projects::Projects;
use referrals::Referrals;
use security::Security;
use seo::Seo;
use support::{SupportOverview, SupportQueue};
use users::Users;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/login")]
    Login {},
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[route("/")]
    Overview {},
    #[route("/analytics")]
    Analytics {},
    #[route("/marketing")]
    Marketing {},
    // ── Marketplace ──
    #[route("/users")]
    Users {},
    #[route("/jobs")]
    Jobs {},
    #[route("/bids")]
    Bids {},
    #[route("/projects")]
    Projects {},
    // ── Trust & safety ──
    #[route("/disputes")]
    DisputeQueue {},
    #[route("/disputes/stats")]
    DisputeStats {},
    #[route("/moderation")]
    Moderation {},
    #[route("/security")]
    Security {},
    // ── Finance ──
    #[route("/payments")]
    Payments {},
    #[route("/escrow")]
    Escrow {},
    #[route("/referrals")]
    Referrals {},
    // ── Engagement ──
    #[route("/notifications")]
    Notifications {},
    #[route("/support")]
    SupportOverview {},
    #[route("/support/tickets")]
    SupportQueue {},
    #[route("/seo")]
    Seo {},
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    /// Heading shown in the top bar.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login {} => "Sign In",
            Route::Overview {} => "Overview",
            Route::Analytics {} => "Platform Analytics",
            Route::Marketing {} => "Marketing",
            Route::Users {} => "Users",
            Route::Jobs {} => "Jobs",
            Route::Bids {} => "Bids",
            Route::Projects {} => "Projects",
            Route::DisputeQueue {} => "Dispute Queue",
            Route::DisputeStats {} => "Dispute Statistics",
            Route::Moderation {} => "Content Moderation",
            Route::Security {} => "Security",
            Route::Payments {} => "Payments",
            Route::Escrow {} => "Escrow",
            Route::Referrals {} => "Referrals",
            Route::Notifications {} => "Notifications",
            Route::SupportOverview {} => "Support",
            Route::SupportQueue {} => "Support Tickets",
            Route::Seo {} => "SEO",
            Route::NotFound { .. } => "Not Found",
        }
    }

    /// Whether the sidebar entry for this route is switched on.
    pub fn enabled(&self, flags: &FeatureFlags) -> bool {
        match self {
            Route::Escrow {} => flags.escrow_actions,
            Route::Referrals {} => flags.referrals,
            Route::Seo {} => flags.seo,
            _ => true,
        }
    }
}

/// Sends visitors without a session to the sign-in page.
#[component]
fn AuthGuard() -> Element {
    let auth = use_auth();
    let api = use_api();

    if auth.is_authenticated() && api.is_authenticated() {
        rsx! { Outlet::<Route> {} }
    } else {
        navigator().replace(Route::Login {});
        rsx! {
            div { class: "auth-guard-loading",
                p { "Redirecting to sign in..." }
            }
        }
    }
}

struct NavGroup {
    label: &'static str,
    entries: Vec<(Route, &'static str)>,
}

fn nav_groups() -> Vec<NavGroup> {
    vec![
        NavGroup {
            label: "Overview",
            entries: vec![
                (Route::Overview {}, "Dashboard"),
                (Route::Analytics {}, "Analytics"),
                (Route::Marketing {}, "Marketing"),
            ],
        },
        NavGroup {
            label: "Marketplace",
            entries: vec![
                (Route::Users {}, "Users"),
                (Route::Jobs {}, "Jobs"),
                (Route::Bids {}, "Bids"),
                (Route::Projects {}, "Projects"),
            ],
        },
        NavGroup {
            label: "Trust & Safety",
            entries: vec![
                (Route::DisputeQueue {}, "Dispute Queue"),
                (Route::DisputeStats {}, "Dispute Stats"),
                (Route::Moderation {}, "Moderation"),
                (Route::Security {}, "Security"),
            ],
        },
        NavGroup {
            label: "Finance",
            entries: vec![
                (Route::Payments {}, "Payments"),
                (Route::Escrow {}, "Escrow"),
                (Route::Referrals {}, "Referrals"),
            ],
        },
        NavGroup {
            label: "Engagement",
            entries: vec![
                (Route::Notifications {}, "Notifications"),
                (Route::SupportOverview {}, "Support"),
                (Route::SupportQueue {}, "Tickets"),
                (Route::Seo {}, "SEO"),
            ],
        },
    ]
}

fn nav_icon(route: &Route) -> Element {
    match route {
        Route::Overview {} => rsx! { Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 } },
        Route::Analytics {} => rsx! { Icon::<LdActivity> { icon: LdActivity, width: 18, height: 18 } },
        Route::Marketing {} => rsx! { Icon::<LdMegaphone> { icon: LdMegaphone, width: 18, height: 18 } },
        Route::Users {} => rsx! { Icon::<LdUsers> { icon: LdUsers, width: 18, height: 18 } },
        Route::Jobs {} => rsx! { Icon::<LdBriefcase> { icon: LdBriefcase, width: 18, height: 18 } },
        Route::Bids {} => rsx! { Icon::<LdHammer> { icon: LdHammer, width: 18, height: 18 } },
        Route::Projects {} => rsx! { Icon::<LdFolder> { icon: LdFolder, width: 18, height: 18 } },
        Route::DisputeQueue {} => rsx! { Icon::<LdGavel> { icon: LdGavel, width: 18, height: 18 } },
        Route::DisputeStats {} => rsx! { Icon::<LdTrendingUp> { icon: LdTrendingUp, width: 18, height: 18 } },
        Route::Moderation {} => rsx! { Icon::<LdFlag> { icon: LdFlag, width: 18, height: 18 } },
        Route::Security {} => rsx! { Icon::<LdShieldCheck> { icon: LdShieldCheck, width: 18, height: 18 } },
        Route::Payments {} => rsx! { Icon::<LdWallet> { icon: LdWallet, width: 18, height: 18 } },
        Route::Escrow {} => rsx! { Icon::<LdLandmark> { icon: LdLandmark, width: 18, height: 18 } },
        Route::Referrals {} => rsx! { Icon::<LdGift> { icon: LdGift, width: 18, height: 18 } },
        Route::Notifications {} => rsx! { Icon::<LdBell> { icon: LdBell, width: 18, height: 18 } },
        Route::SupportOverview {} => rsx! { Icon::<LdLifeBuoy> { icon: LdLifeBuoy, width: 18, height: 18 } },
        Route::SupportQueue {} => rsx! { Icon::<LdTicket> { icon: LdTicket, width: 18, height: 18 } },
        Route::Seo {} => rsx! { Icon::<LdGlobe> { icon: LdGlobe, width: 18, height: 18 } },
        Route::Login {} | Route::NotFound { .. } => rsx! {},
    }
}

/// Sidebar navigation plus a top bar with the page title and sign-out.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let flags: FeatureFlags = use_context();
    let api = use_api();
    let mut auth = use_auth();

    let user_name = auth
        .current_user
        .read()
        .as_ref()
        .map(|u| if u.full_name.is_empty() { u.email.clone() } else { u.full_name.clone() })
        .unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        div { class: "app-shell",
            aside { class: "sidebar",
                div { class: "sidebar-brand",
                    Icon::<LdLock> { icon: LdLock, width: 18, height: 18 }
                    span { class: "sidebar-brand-name", "Marketplace Admin" }
                }
                nav { class: "sidebar-nav",
                    for group in nav_groups() {
                        div { class: "sidebar-group", key: "{group.label}",
                            span { class: "sidebar-group-label", "{group.label}" }
                            for (target, label) in group.entries.into_iter().filter(|(r, _)| r.enabled(&flags)) {
                                Link {
                                    key: "{label}",
                                    class: if target == route { "sidebar-link active" } else { "sidebar-link" },
                                    to: target.clone(),
                                    {nav_icon(&target)}
                                    span { "{label}" }
                                }
                            }
                        }
                    }
                }
            }
            div { class: "app-main",
                header { class: "topbar",
                    h2 { class: "topbar-title", "{route.title()}" }
                    div { class: "topbar-user",
                        span { "{user_name}" }
                        button {
                            class: "topbar-signout",
                            onclick: move |_| {
                                sign_out(&api, &mut auth);
                                navigator().replace(Route::Login {});
                            },
                            Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                            "Sign out"
                        }
                    }
                }
                main { class: "app-content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_hide_gated_entries() {
        let flags = FeatureFlags {
            escrow_actions: false,
            seo: true,
            referrals: false,
        };
        assert!(!Route::Escrow {}.enabled(&flags));
        assert!(!Route::Referrals {}.enabled(&flags));
        assert!(Route::Seo {}.enabled(&flags));
        assert!(Route::Users {}.enabled(&flags));
    }

    #[test]
    fn every_nav_entry_has_a_title() {
        for group in nav_groups() {
            for (route, _) in group.entries {
                assert!(!route.title().is_empty());
            }
        }
    }
}
