use chrono::Utc;
use dioxus::prelude::*;
use shared_types::{search_bids, Bid, BidFilters, ExtendDeadlineRequest, ListState};
use shared_ui::{
    use_toast, Button, ButtonSize, ButtonVariant, Card, CardContent, ConfirmDialog, DataTable,
    DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow,
    DialogActions, DialogContent, DialogDescription, DialogRoot, DialogTitle, Input, PageHeader,
    SearchBar, SearchInput, SkeletonRows, StatusBadge,
};

use crate::auth::use_api;
use crate::components::{BidFilterPanel, ReasonDialog};
use crate::feedback;
use crate::format_helpers::{format_date, format_optional_currency};

const LOAD_FAILED: &str = "Failed to load bids";

#[derive(Debug, Clone, Copy, PartialEq)]
enum BidAction {
    Close,
    Cancel,
    Flag,
    Extend,
}

/// Bid requests: filters, search, and lifecycle actions.
#[component]
pub fn Bids() -> Element {
    let api = use_api();
    let toast = use_toast();

    let mut filters = use_signal(BidFilters::new);
    let mut search = use_signal(String::new);
    let mut list = use_signal(ListState::<Bid>::default);
    let mut working = use_signal(|| None::<String>);
    // The bid a dialog is open for, and which dialog.
    let mut target = use_signal(|| None::<(Bid, BidAction)>);

    let mut bids = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let filters = filters();
            async move {
                list.write().begin();
                let result = api.list_bids(&filters).await;
                if let Some(err) = list.write().finish(result) {
                    feedback::failure(toast, &err, LOAD_FAILED);
                }
            }
        }
    });

    // Runs the action the open dialog was raised for, with its text input.
    let submit = {
        let api = api.clone();
        move |input: String| {
            let Some((bid, action)) = target() else {
                return;
            };
            let api = api.clone();
            spawn(async move {
                working.set(Some(bid.id.clone()));
                let (result, done, fallback) = match action {
                    BidAction::Close => (api.close_bid(&bid.id).await, "Bid closed", "Failed to close bid"),
                    BidAction::Cancel => (
                        api.cancel_bid(&bid.id, &input).await,
                        "Bid cancelled",
                        "Failed to cancel bid",
                    ),
                    BidAction::Flag => (
                        api.flag_bid(&bid.id, &input).await,
                        "Bid flagged for review",
                        "Failed to flag bid",
                    ),
                    BidAction::Extend => {
                        let result = match ExtendDeadlineRequest::from_date_input(&input, Utc::now()) {
                            Ok(request) => api.extend_bid_deadline(&bid.id, &request).await,
                            Err(e) => Err(e),
                        };
                        (result, "Deadline extended", "Failed to extend deadline")
                    }
                };
                match result {
                    Ok(()) => {
                        tracing::info!(bid = %bid.id, ?action, "Bid updated");
                        feedback::success(toast, done);
                        target.set(None);
                        bids.restart();
                    }
                    Err(e) => feedback::failure(toast, &e, fallback),
                }
                working.set(None);
            });
        }
    };

    let state = list.read();
    let initial_load = state.is_initial_load();
    let rows: Vec<Bid> = search_bids(state.items(), &search()).into_iter().cloned().collect();
    drop(state);
    let busy = working().is_some();
    let open_action = target().map(|(_, action)| action);
    let bid_title = target().map(|(bid, _)| bid.title).unwrap_or_default();
    let confirm_close = {
        let submit = submit.clone();
        move |_: ()| submit(String::new())
    };

    rsx! {
        PageHeader {
            title: "Bids",
            description: "Open bid requests and their submissions",
        }

        BidFilterPanel {
            filters: filters(),
            on_change: move |next: BidFilters| filters.set(next),
            on_reset: move |next: BidFilters| filters.set(next),
        }

        Card {
            CardContent {
                SearchBar {
                    SearchInput {
                        value: search(),
                        placeholder: "Search title or description",
                        on_search: move |q: String| search.set(q),
                    }
                }
                if initial_load {
                    SkeletonRows {}
                } else {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Title" }
                            DataTableColumn { "Trade" }
                            DataTableColumn { align_end: true, "Budget" }
                            DataTableColumn { align_end: true, "Submissions" }
                            DataTableColumn { "Deadline" }
                            DataTableColumn { "Status" }
                            DataTableColumn { align_end: true, "Actions" }
                        }
                        DataTableBody {
                            if rows.is_empty() {
                                DataTableEmpty { colspan: 7, message: "No bids found." }
                            }
                            for bid in rows {
                                BidRow {
                                    key: "{bid.id}",
                                    busy: working().as_deref() == Some(bid.id.as_str()),
                                    bid,
                                    on_action: move |picked: (Bid, BidAction)| target.set(Some(picked)),
                                }
                            }
                        }
                    }
                }
            }
        }

        ConfirmDialog {
            open: open_action == Some(BidAction::Close),
            title: "Close bid",
            description: format!("Close \"{bid_title}\" to new submissions?"),
            confirm_label: "Close bid",
            busy,
            on_confirm: confirm_close,
            on_cancel: move |_| target.set(None),
        }

        ReasonDialog {
            open: matches!(open_action, Some(BidAction::Cancel) | Some(BidAction::Flag)),
            title: if open_action == Some(BidAction::Flag) { "Flag bid".to_string() } else { "Cancel bid".to_string() },
            description: format!("\"{bid_title}\""),
            confirm_label: if open_action == Some(BidAction::Flag) { "Flag bid".to_string() } else { "Cancel bid".to_string() },
            destructive: open_action == Some(BidAction::Cancel),
            busy,
            on_submit: submit.clone(),
            on_cancel: move |_| target.set(None),
        }

        DeadlineDialog {
            open: open_action == Some(BidAction::Extend),
            bid_title: bid_title.clone(),
            busy,
            on_submit: submit.clone(),
            on_cancel: move |_| target.set(None),
        }
    }
}

#[component]
fn DeadlineDialog(
    open: bool,
    bid_title: String,
    busy: bool,
    on_submit: EventHandler<String>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut day = use_signal(String::new);

    use_effect(use_reactive((&open,), move |(open,)| {
        if open {
            day.set(String::new());
        }
    }));

    rsx! {
        DialogRoot {
            open,
            on_open_change: move |open: bool| {
                if !open {
                    on_cancel.call(());
                }
            },
            DialogContent {
                DialogTitle { "Extend deadline" }
                DialogDescription { "Pick a new closing date for \"{bid_title}\"." }
                Input {
                    label: "New deadline",
                    input_type: "date",
                    required: true,
                    value: day(),
                    on_input: move |evt: FormEvent| day.set(evt.value()),
                }
                DialogActions {
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button {
                        loading: busy,
                        onclick: move |_| on_submit.call(day()),
                        "Extend"
                    }
                }
            }
        }
    }
}

#[component]
fn BidRow(bid: Bid, busy: bool, on_action: EventHandler<(Bid, BidAction)>) -> Element {
    let open = bid.is_open();
    let creator = bid
        .created_by
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "-".to_string());
    let action = {
        let bid = bid.clone();
        move |kind: BidAction| on_action.call((bid.clone(), kind))
    };
    let (close, extend, cancel, flag) = (action.clone(), action.clone(), action.clone(), action);

    rsx! {
        DataTableRow {
            DataTableCell {
                div { class: "title-cell",
                    span { class: "title-cell-main", "{bid.title}" }
                    span { class: "title-cell-sub", "by {creator}" }
                }
            }
            DataTableCell { {bid.trade_type.clone().unwrap_or_else(|| "-".into())} }
            DataTableCell { align_end: true, {format_optional_currency(bid.budget)} }
            DataTableCell { align_end: true, "{bid.submissions}" }
            DataTableCell { {format_date(bid.deadline.as_ref())} }
            DataTableCell { StatusBadge { status: bid.status.clone() } }
            DataTableCell { align_end: true,
                div { class: "row-actions",
                    if open {
                        Button {
                            variant: ButtonVariant::Ghost,
                            size: ButtonSize::Small,
                            disabled: busy,
                            onclick: move |_| close(BidAction::Close),
                            "Close"
                        }
                        Button {
                            variant: ButtonVariant::Ghost,
                            size: ButtonSize::Small,
                            disabled: busy,
                            onclick: move |_| extend(BidAction::Extend),
                            "Extend"
                        }
                        Button {
                            variant: ButtonVariant::Ghost,
                            size: ButtonSize::Small,
                            disabled: busy,
                            onclick: move |_| cancel(BidAction::Cancel),
                            "Cancel"
                        }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        disabled: busy,
                        onclick: move |_| flag(BidAction::Flag),
                        "Flag"
                    }
                }
            }
        }
    }
}
