use dioxus::prelude::*;
use shared_types::{
    search_moderation, ListState, ModerationAction, ModerationItem, ModerationQuery,
    MODERATION_CONTENT_TYPES, MODERATION_PRIORITIES, MODERATION_STATUSES,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card, CardContent, Choice,
    DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader,
    DataTableRow, FormSelect, PageHeader, SearchBar, SearchInput, SkeletonRows, StatusBadge,
};

use crate::auth::use_api;
use crate::feedback;
use crate::format_helpers::{format_datetime, format_snake_case_title};

fn resolved_message(action: ModerationAction) -> &'static str {
    match action {
        ModerationAction::Approve => "Content approved",
        ModerationAction::Remove => "Content removed",
        ModerationAction::Dismiss => "Report dismissed",
    }
}

/// Reported content awaiting a moderator decision.
#[component]
pub fn Moderation() -> Element {
    let api = use_api();
    let toast = use_toast();

    let mut query = use_signal(ModerationQuery::default);
    let mut search = use_signal(String::new);
    let mut list = use_signal(ListState::<ModerationItem>::default);
    let mut working = use_signal(|| None::<String>);

    let mut queue = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let query = query();
            async move {
                list.write().begin();
                let result = api.moderation_queue(&query).await;
                if let Some(err) = list.write().finish(result) {
                    feedback::failure(toast, &err, "Failed to load moderation queue");
                }
            }
        }
    });

    let resolve = {
        let api = api.clone();
        move |(item, action): (ModerationItem, ModerationAction)| {
            let api = api.clone();
            spawn(async move {
                working.set(Some(item.id.clone()));
                match api.resolve_moderation(&item.id, action).await {
                    Ok(()) => {
                        tracing::info!(item = %item.id, action = action.as_str(), "Moderation item resolved");
                        feedback::success(toast, resolved_message(action));
                        queue.restart();
                    }
                    Err(e) => feedback::failure(toast, &e, "Failed to resolve item"),
                }
                working.set(None);
            });
        }
    };

    let state = list.read();
    let initial_load = state.is_initial_load();
    let rows: Vec<ModerationItem> = search_moderation(state.items(), &search()).into_iter().cloned().collect();
    drop(state);
    let current = query();
    let busy_id = working();

    rsx! {
        PageHeader {
            title: "Content Moderation",
            description: "Reports raised against jobs, profiles, reviews and messages",
        }

        Card {
            CardContent {
                div { class: "filter-row",
                    FormSelect {
                        label: "Status",
                        value: current.status.clone(),
                        all_label: "All statuses",
                        options: Choice::from_values(MODERATION_STATUSES),
                        onchange: move |e: FormEvent| query.write().status = e.value(),
                    }
                    FormSelect {
                        label: "Content",
                        value: current.content_type.clone(),
                        all_label: "All content",
                        options: Choice::from_values(MODERATION_CONTENT_TYPES),
                        onchange: move |e: FormEvent| query.write().content_type = e.value(),
                    }
                    FormSelect {
                        label: "Priority",
                        value: current.priority.clone(),
                        all_label: "All priorities",
                        options: Choice::from_values(MODERATION_PRIORITIES),
                        onchange: move |e: FormEvent| query.write().priority = e.value(),
                    }
                }
                SearchBar {
                    SearchInput {
                        value: search(),
                        placeholder: "Search report reason or details",
                        on_search: move |q: String| search.set(q),
                    }
                }
                if initial_load {
                    SkeletonRows {}
                } else {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Content" }
                            DataTableColumn { "Reason" }
                            DataTableColumn { "Reported by" }
                            DataTableColumn { "Priority" }
                            DataTableColumn { "Status" }
                            DataTableColumn { "Reported" }
                            DataTableColumn { align_end: true, "Decision" }
                        }
                        DataTableBody {
                            if rows.is_empty() {
                                DataTableEmpty { colspan: 7, message: "Nothing waiting for review." }
                            }
                            for item in rows {
                                ModerationRow {
                                    key: "{item.id}",
                                    busy: busy_id.as_deref() == Some(item.id.as_str()),
                                    item,
                                    on_resolve: resolve.clone(),
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ModerationRow(
    item: ModerationItem,
    busy: bool,
    on_resolve: EventHandler<(ModerationItem, ModerationAction)>,
) -> Element {
    let decide = {
        let item = item.clone();
        move |action: ModerationAction| on_resolve.call((item.clone(), action))
    };
    let (approve, remove, dismiss) = (decide.clone(), decide.clone(), decide);
    let reporter = item
        .reported_by
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "-".to_string());
    let priority = match item.priority.as_str() {
        "urgent" => BadgeVariant::Danger,
        "high" => BadgeVariant::Warning,
        _ => BadgeVariant::Neutral,
    };

    rsx! {
        DataTableRow { highlight: item.priority == "urgent" && item.is_open(),
            DataTableCell {
                Badge { variant: BadgeVariant::Outline, {format_snake_case_title(&item.content_type)} }
            }
            DataTableCell {
                div { class: "title-cell",
                    span { class: "title-cell-main", {item.report_reason.clone().unwrap_or_else(|| "-".into())} }
                    if let Some(details) = item.report_details.clone() {
                        span { class: "title-cell-sub", "{details}" }
                    }
                }
            }
            DataTableCell { "{reporter}" }
            DataTableCell { Badge { variant: priority, "{item.priority}" } }
            DataTableCell { StatusBadge { status: item.status.clone() } }
            DataTableCell { {format_datetime(item.reported_at.as_ref())} }
            DataTableCell { align_end: true,
                if item.is_open() {
                    div { class: "row-actions",
                        Button {
                            variant: ButtonVariant::Ghost,
                            size: ButtonSize::Small,
                            disabled: busy,
                            onclick: move |_| approve(ModerationAction::Approve),
                            "Approve"
                        }
                        Button {
                            variant: ButtonVariant::Danger,
                            size: ButtonSize::Small,
                            disabled: busy,
                            onclick: move |_| remove(ModerationAction::Remove),
                            "Remove"
                        }
                        Button {
                            variant: ButtonVariant::Ghost,
                            size: ButtonSize::Small,
                            disabled: busy,
                            onclick: move |_| dismiss(ModerationAction::Dismiss),
                            "Dismiss"
                        }
                    }
                }
            }
        }
    }
}
