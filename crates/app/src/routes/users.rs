use admin_client::config::page_size;
use dioxus::prelude::*;
use shared_types::{
    check_role_change, role_change_message, visible_users, AdminUser, ListState, UserFilters,
    UserQuery, UserTab, ASSIGNABLE_ROLES,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card, CardContent, Choice,
    ConfirmDialog, DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty,
    DataTableHeader, DataTableRow, FormSelect, PageHeader, SelectCheckbox, SkeletonRows, StatCard,
    StatGrid, StatTone, StatusBadge, CountedTab, CountedTabs, TabPanel,
};

use crate::auth::{use_api, use_auth};
use crate::components::{BulkActions, ReasonDialog, UserFilterPanel};
use crate::feedback;
use crate::format_helpers::{format_count, format_date};

const LOAD_FAILED: &str = "Failed to load users";
const ROLE_FAILED: &str = "Failed to update user role";

/// Per-row actions that are not a role change.
#[derive(Debug, Clone, Copy, PartialEq)]
enum RowAction {
    Verify,
    Suspend,
    Unsuspend,
    Delete,
}

/// User management: server-paged list, client-side filters and tabs, row
/// actions and bulk actions on the selection.
#[component]
pub fn Users() -> Element {
    let api = use_api();
    let auth = use_auth();
    let toast = use_toast();
    let limit = page_size();

    let mut filters = use_signal(UserFilters::new);
    let mut page = use_signal(|| 1u32);
    let mut pages = use_signal(|| 1u32);
    let mut total = use_signal(|| 0u64);
    let mut list = use_signal(ListState::<AdminUser>::default);
    let mut selected = use_signal(Vec::<String>::new);
    let mut working = use_signal(|| None::<String>);
    let mut suspend_target = use_signal(|| None::<AdminUser>);
    let mut delete_target = use_signal(|| None::<AdminUser>);

    let mut users = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let query = UserQuery::from_filters(&filters(), page(), limit);
            async move {
                list.write().begin();
                let result = api.list_users(&query).await.map(|found| {
                    pages.set(found.pages.max(1));
                    total.set(found.total);
                    found.users
                });
                if let Some(err) = list.write().finish(result) {
                    feedback::failure(toast, &err, LOAD_FAILED);
                }
            }
        }
    });

    let apply_filters = move |next: UserFilters| {
        page.set(1);
        selected.write().clear();
        filters.set(next);
    };

    let change_role = {
        let api = api.clone();
        move |(user, role): (AdminUser, String)| {
            if let Err(err) = check_role_change(&auth.role(), &user.role_code, &role) {
                feedback::failure(toast, &err, ROLE_FAILED);
                return;
            }
            let api = api.clone();
            spawn(async move {
                working.set(Some(user.id.clone()));
                match api.change_user_role(&user.id, &role).await {
                    Ok(()) => {
                        tracing::info!(user = %user.id, role = %role, "User role changed");
                        feedback::success(toast, role_change_message(&role));
                        users.restart();
                    }
                    Err(e) => feedback::failure(toast, &e, ROLE_FAILED),
                }
                working.set(None);
            });
        }
    };

    let row_action = {
        let api = api.clone();
        move |(user, action): (AdminUser, RowAction)| match action {
            RowAction::Suspend => suspend_target.set(Some(user)),
            RowAction::Delete => delete_target.set(Some(user)),
            RowAction::Verify | RowAction::Unsuspend => {
                let api = api.clone();
                spawn(async move {
                    working.set(Some(user.id.clone()));
                    let (result, done, fallback) = if action == RowAction::Verify {
                        (api.verify_user(&user.id).await, "User verified", "Failed to verify user")
                    } else {
                        (
                            api.unsuspend_user(&user.id).await,
                            "User reactivated",
                            "Failed to unsuspend user",
                        )
                    };
                    match result {
                        Ok(()) => {
                            feedback::success(toast, done);
                            users.restart();
                        }
                        Err(e) => feedback::failure(toast, &e, fallback),
                    }
                    working.set(None);
                });
            }
        }
    };

    let suspend = {
        let api = api.clone();
        move |reason: String| {
            let Some(user) = suspend_target() else {
                return;
            };
            let api = api.clone();
            spawn(async move {
                working.set(Some(user.id.clone()));
                let reason = reason.trim().to_string();
                let reason = (!reason.is_empty()).then_some(reason.as_str());
                match api.suspend_user(&user.id, reason).await {
                    Ok(()) => {
                        feedback::success(toast, format!("{} suspended", user.full_name));
                        suspend_target.set(None);
                        users.restart();
                    }
                    Err(e) => feedback::failure(toast, &e, "Failed to suspend user"),
                }
                working.set(None);
            });
        }
    };

    let delete = {
        let api = api.clone();
        move |_: ()| {
            let Some(user) = delete_target() else {
                return;
            };
            let api = api.clone();
            spawn(async move {
                working.set(Some(user.id.clone()));
                match api.delete_user(&user.id).await {
                    Ok(()) => {
                        feedback::success(toast, "User deleted");
                        selected.write().retain(|id| id != &user.id);
                        delete_target.set(None);
                        users.restart();
                    }
                    Err(e) => feedback::failure(toast, &e, "Failed to delete user"),
                }
                working.set(None);
            });
        }
    };

    let state = list.read();
    let current = filters();
    let loaded = state.items();
    let active = loaded.iter().filter(|u| u.is_active && !u.is_suspended()).count() as u64;
    let pending = loaded.iter().filter(|u| UserTab::Pending.includes(u)).count() as u64;
    let suspended = loaded.iter().filter(|u| UserTab::Suspended.includes(u)).count() as u64;
    let initial_load = state.is_initial_load();
    let tab_rows_by_tab: Vec<(UserTab, Vec<AdminUser>)> = UserTab::ALL
        .iter()
        .map(|&tab| (tab, visible_users(loaded, &current, tab).into_iter().cloned().collect()))
        .collect();
    let tab_headings: Vec<CountedTab> = tab_rows_by_tab
        .iter()
        .map(|(tab, rows)| CountedTab::new(tab.as_str(), tab.label(), rows.len()))
        .collect();
    drop(state);

    let busy_id = working();
    let picked = selected();

    rsx! {
        PageHeader {
            title: "Users",
            description: "Accounts across homeowners, contractors and staff",
        }

        StatGrid {
            StatCard { label: "Total users", value: format_count(total()) }
            StatCard { label: "Active", value: format_count(active), tone: StatTone::Positive }
            StatCard {
                label: "Pending verification",
                value: format_count(pending),
                tone: if pending > 0 { StatTone::Caution } else { StatTone::Neutral },
            }
            StatCard {
                label: "Suspended",
                value: format_count(suspended),
                tone: if suspended > 0 { StatTone::Negative } else { StatTone::Neutral },
            }
        }

        UserFilterPanel {
            filters: current.clone(),
            on_change: apply_filters,
            on_reset: apply_filters,
        }

        BulkActions {
            selected: picked.clone(),
            on_complete: move |_| {
                selected.write().clear();
                users.restart();
            },
        }

        Card {
            CardContent {
                CountedTabs { tabs: tab_headings,
                    for (index, (tab, rows)) in tab_rows_by_tab.into_iter().enumerate() {
                        TabPanel { key: "{tab.as_str()}", value: tab.as_str().to_string(), index,
                            if initial_load {
                                SkeletonRows {}
                            } else {
                                UserTable {
                                    users: rows,
                                    selected: picked.clone(),
                                    busy_id: busy_id.clone(),
                                    on_select: move |(id, on): (String, bool)| {
                                        let mut ids = selected.write();
                                        ids.retain(|x| x != &id);
                                        if on {
                                            ids.push(id);
                                        }
                                    },
                                    on_select_all: move |ids: Vec<String>| selected.set(ids),
                                    on_role_change: change_role.clone(),
                                    on_action: row_action.clone(),
                                }
                            }
                        }
                    }
                }

                div { class: "pager",
                    Button {
                        variant: ButtonVariant::Outline,
                        size: ButtonSize::Small,
                        disabled: page() <= 1,
                        onclick: move |_| {
                            let next = change_page(page(), page().saturating_sub(1), pages(), &mut selected.write());
                            page.set(next);
                        },
                        "Previous"
                    }
                    span { class: "pager-status", "Page {page} of {pages}" }
                    Button {
                        variant: ButtonVariant::Outline,
                        size: ButtonSize::Small,
                        disabled: page() >= pages(),
                        onclick: move |_| {
                            let next = change_page(page(), page() + 1, pages(), &mut selected.write());
                            page.set(next);
                        },
                        "Next"
                    }
                }
            }
        }

        ReasonDialog {
            open: suspend_target().is_some(),
            title: "Suspend user",
            description: match suspend_target() {
                Some(u) => format!("{} will be signed out and blocked until reactivated.", u.full_name),
                None => String::new(),
            },
            label: "Reason (optional)",
            confirm_label: "Suspend",
            destructive: true,
            busy: busy_id.is_some(),
            on_submit: suspend,
            on_cancel: move |_| suspend_target.set(None),
        }

        ConfirmDialog {
            open: delete_target().is_some(),
            title: "Delete user",
            description: match delete_target() {
                Some(u) => format!("Permanently delete {} ({})? This cannot be undone.", u.full_name, u.email),
                None => String::new(),
            },
            confirm_label: "Delete",
            busy: busy_id.is_some(),
            on_confirm: delete,
            on_cancel: move |_| delete_target.set(None),
        }
    }
}

/// Clamp `target` into `1..=pages`. Leaving the current page drops the
/// selection.
fn change_page(current: u32, target: u32, pages: u32, selected: &mut Vec<String>) -> u32 {
    let next = target.clamp(1, pages.max(1));
    if next != current {
        selected.clear();
    }
    next
}

#[component]
fn UserTable(
    users: Vec<AdminUser>,
    selected: Vec<String>,
    busy_id: Option<String>,
    on_select: EventHandler<(String, bool)>,
    on_select_all: EventHandler<Vec<String>>,
    on_role_change: EventHandler<(AdminUser, String)>,
    on_action: EventHandler<(AdminUser, RowAction)>,
) -> Element {
    let all_ids: Vec<String> = users.iter().map(|u| u.id.clone()).collect();
    let all_selected = !all_ids.is_empty() && all_ids.iter().all(|id| selected.contains(id));
    let role_choices = Choice::from_pairs(ASSIGNABLE_ROLES);

    rsx! {
        DataTable {
            DataTableHeader {
                DataTableColumn {
                    SelectCheckbox {
                        checked: all_selected,
                        on_toggle: move |on: bool| {
                            on_select_all.call(if on { all_ids.clone() } else { Vec::new() })
                        },
                    }
                }
                DataTableColumn { "Name" }
                DataTableColumn { "Role" }
                DataTableColumn { "Status" }
                DataTableColumn { "Verification" }
                DataTableColumn { "Joined" }
                DataTableColumn { align_end: true, "Actions" }
            }
            DataTableBody {
                if users.is_empty() {
                    DataTableEmpty { colspan: 7, message: "No users match these filters." }
                }
                for user in users {
                    UserRow {
                        key: "{user.id}",
                        is_selected: selected.contains(&user.id),
                        busy: busy_id.as_deref() == Some(user.id.as_str()),
                        role_choices: role_choices.clone(),
                        user,
                        on_select,
                        on_role_change,
                        on_action,
                    }
                }
            }
        }
    }
}

#[component]
fn UserRow(
    user: AdminUser,
    is_selected: bool,
    busy: bool,
    role_choices: Vec<Choice>,
    on_select: EventHandler<(String, bool)>,
    on_role_change: EventHandler<(AdminUser, String)>,
    on_action: EventHandler<(AdminUser, RowAction)>,
) -> Element {
    let suspended = user.is_suspended();
    let verified = user.verification_status == "verified";
    let id = user.id.clone();
    let (u1, u2, u3, u4) = (user.clone(), user.clone(), user.clone(), user.clone());

    rsx! {
        DataTableRow { selected: is_selected,
            DataTableCell {
                SelectCheckbox {
                    checked: is_selected,
                    on_toggle: move |on: bool| on_select.call((id.clone(), on)),
                }
            }
            DataTableCell {
                div { class: "user-cell",
                    span { class: "user-name", "{user.full_name}" }
                    span { class: "user-email", "{user.email}" }
                }
            }
            DataTableCell {
                FormSelect {
                    value: user.role_code.clone(),
                    options: role_choices,
                    disabled: busy,
                    onchange: move |evt: FormEvent| {
                        let role = evt.value();
                        if role != u1.role_code {
                            on_role_change.call((u1.clone(), role));
                        }
                    },
                    if !ASSIGNABLE_ROLES.iter().any(|(code, _)| *code == user.role_code) {
                        option { value: "{user.role_code}", selected: true, "{user.role_label()}" }
                    }
                }
            }
            DataTableCell { StatusBadge { status: user.status.clone() } }
            DataTableCell {
                Badge {
                    variant: if verified { BadgeVariant::Success } else { BadgeVariant::Warning },
                    "{user.verification_status}"
                }
            }
            DataTableCell { {format_date(user.created_at.as_ref())} }
            DataTableCell { align_end: true,
                div { class: "row-actions",
                    if !verified {
                        Button {
                            variant: ButtonVariant::Ghost,
                            size: ButtonSize::Small,
                            disabled: busy,
                            onclick: move |_| on_action.call((u2.clone(), RowAction::Verify)),
                            "Verify"
                        }
                    }
                    if suspended {
                        Button {
                            variant: ButtonVariant::Ghost,
                            size: ButtonSize::Small,
                            disabled: busy,
                            onclick: move |_| on_action.call((u3.clone(), RowAction::Unsuspend)),
                            "Unsuspend"
                        }
                    } else {
                        Button {
                            variant: ButtonVariant::Ghost,
                            size: ButtonSize::Small,
                            disabled: busy,
                            onclick: move |_| on_action.call((u3.clone(), RowAction::Suspend)),
                            "Suspend"
                        }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        disabled: busy,
                        onclick: move |_| on_action.call((u4.clone(), RowAction::Delete)),
                        "Delete"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn changing_page_clears_selection() {
        let mut selected = vec!["u1".to_string(), "u2".to_string()];
        assert_eq!(change_page(1, 2, 3, &mut selected), 2);
        assert!(selected.is_empty());
    }

    #[test]
    fn staying_on_page_keeps_selection() {
        let mut selected = vec!["u1".to_string()];
        assert_eq!(change_page(3, 4, 3, &mut selected), 3);
        assert_eq!(change_page(1, 0, 3, &mut selected), 1);
        assert_eq!(selected, vec!["u1".to_string()]);
    }
}
