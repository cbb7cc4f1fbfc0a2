use admin_client::export::ExportFile;
use dioxus::prelude::*;
use shared_types::{
    filter_escrow, AdjustRequest, AppError, EscrowAccount, ListState, ReasonRequest, RefundRequest,
    ReleaseRequest, ALL, ESCROW_STATUSES,
};
use shared_ui::{
    use_toast, Button, ButtonSize, ButtonVariant, Card, CardContent, Choice, DataTable,
    DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow,
    DialogActions, DialogContent, DialogDescription, DialogRoot, DialogTitle, FormSelect, Input,
    PageHeader, PercentBar, SearchBar, SearchInput, SkeletonRows, StatCard, StatGrid, StatusBadge,
    Textarea,
};

use crate::auth::use_api;
use crate::download::save_export;
use crate::feedback;
use crate::format_helpers::{format_count, format_currency};

#[derive(Debug, Clone, Copy, PartialEq)]
enum EscrowAction {
    Release,
    Freeze,
    Unfreeze,
    Refund,
    Adjust,
}

impl EscrowAction {
    fn title(self) -> &'static str {
        match self {
            EscrowAction::Release => "Emergency release",
            EscrowAction::Freeze => "Freeze account",
            EscrowAction::Unfreeze => "Unfreeze account",
            EscrowAction::Refund => "Refund",
            EscrowAction::Adjust => "Adjust amount",
        }
    }

    /// Label of the amount field, or `None` when the action takes no amount.
    fn amount_label(self) -> Option<&'static str> {
        match self {
            EscrowAction::Release => Some("Amount to release"),
            EscrowAction::Refund => Some("Refund amount (blank for the full balance)"),
            EscrowAction::Adjust => Some("New total amount"),
            EscrowAction::Freeze | EscrowAction::Unfreeze => None,
        }
    }

    fn done(self) -> &'static str {
        match self {
            EscrowAction::Release => "Funds released",
            EscrowAction::Freeze => "Escrow account frozen",
            EscrowAction::Unfreeze => "Escrow account unfrozen",
            EscrowAction::Refund => "Refund issued",
            EscrowAction::Adjust => "Escrow amount adjusted",
        }
    }

    fn fallback(self) -> &'static str {
        match self {
            EscrowAction::Release => "Failed to release funds",
            EscrowAction::Freeze => "Failed to freeze account",
            EscrowAction::Unfreeze => "Failed to unfreeze account",
            EscrowAction::Refund => "Failed to issue refund",
            EscrowAction::Adjust => "Failed to adjust amount",
        }
    }
}

/// Amount and reason as typed into the action dialog.
#[derive(Debug, Clone, Default, PartialEq)]
struct ActionInput {
    amount: String,
    reason: String,
}

#[component]
pub fn Escrow() -> Element {
    let api = use_api();
    let toast = use_toast();

    let mut list = use_signal(ListState::<EscrowAccount>::default);
    let mut status = use_signal(|| ALL.to_string());
    let mut search = use_signal(String::new);
    let mut working = use_signal(|| None::<String>);
    let mut target = use_signal(|| None::<(EscrowAccount, EscrowAction)>);

    let mut accounts = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                list.write().begin();
                let result = api.list_escrow_accounts().await;
                if let Some(err) = list.write().finish(result) {
                    feedback::failure(toast, &err, "Failed to load escrow accounts");
                }
            }
        }
    });

    let submit = {
        let api = api.clone();
        move |input: ActionInput| {
            let Some((account, action)) = target() else {
                return;
            };
            let api = api.clone();
            spawn(async move {
                working.set(Some(account.id.clone()));
                let id = account.id.as_str();
                let result: Result<(), AppError> = match action {
                    EscrowAction::Release => match ReleaseRequest::from_input(&input.amount, &input.reason) {
                        Ok(req) => api.release_escrow(id, &req).await,
                        Err(e) => Err(e),
                    },
                    EscrowAction::Freeze => match ReasonRequest::from_input(&input.reason) {
                        Ok(req) => api.freeze_escrow(id, &req).await,
                        Err(e) => Err(e),
                    },
                    EscrowAction::Unfreeze => {
                        let req = ReasonRequest {
                            reason: input.reason.trim().to_string(),
                        };
                        api.unfreeze_escrow(id, &req).await
                    }
                    EscrowAction::Refund => match RefundRequest::from_input(&input.amount, &input.reason) {
                        Ok(req) => api.refund_escrow(id, &req).await,
                        Err(e) => Err(e),
                    },
                    EscrowAction::Adjust => match AdjustRequest::from_input(&input.amount, &input.reason) {
                        Ok(req) => api.adjust_escrow(id, &req).await,
                        Err(e) => Err(e),
                    },
                };
                match result {
                    Ok(()) => {
                        tracing::info!(account = %account.id, ?action, "Escrow action applied");
                        feedback::success(toast, action.done());
                        target.set(None);
                        accounts.restart();
                    }
                    Err(e) => feedback::failure(toast, &e, action.fallback()),
                }
                working.set(None);
            });
        }
    };

    let download_report = {
        let api = api.clone();
        move |account: EscrowAccount| {
            let api = api.clone();
            spawn(async move {
                working.set(Some(account.id.clone()));
                let result = match api.escrow_report(&account.id).await {
                    Ok(bytes) => save_export(&ExportFile::escrow_report(&account.id, bytes)),
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => feedback::success(toast, "Report downloaded"),
                    Err(e) => feedback::failure(toast, &e, "Failed to download report"),
                }
                working.set(None);
            });
        }
    };

    let state = list.read();
    let initial_load = state.is_initial_load();
    let all_accounts = state.items().to_vec();
    drop(state);
    let rows: Vec<EscrowAccount> = filter_escrow(&all_accounts, &status(), &search())
        .into_iter()
        .cloned()
        .collect();
    let held: f64 = all_accounts.iter().map(|a| a.remaining_balance).sum();
    let released: f64 = all_accounts.iter().map(|a| a.released_amount).sum();
    let frozen = all_accounts.iter().filter(|a| a.is_frozen()).count() as u64;
    let busy_id = working();

    rsx! {
        PageHeader {
            title: "Escrow",
            description: "Funds held between owners and contractors",
        }

        StatGrid {
            StatCard { label: "Accounts", value: format_count(all_accounts.len() as u64) }
            StatCard { label: "Held", value: format_currency(held) }
            StatCard { label: "Released", value: format_currency(released) }
            StatCard { label: "Frozen", value: format_count(frozen) }
        }

        Card {
            CardContent {
                div { class: "filter-row",
                    FormSelect {
                        label: "Status",
                        value: status(),
                        all_label: "All statuses",
                        options: Choice::from_values(ESCROW_STATUSES),
                        onchange: move |e: FormEvent| status.set(e.value()),
                    }
                    SearchBar {
                        SearchInput {
                            value: search(),
                            placeholder: "Search project, owner or contractor",
                            on_search: move |q: String| search.set(q),
                        }
                    }
                }
                if initial_load {
                    SkeletonRows {}
                } else {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Project" }
                            DataTableColumn { "Owner" }
                            DataTableColumn { "Contractor" }
                            DataTableColumn { align_end: true, "Total" }
                            DataTableColumn { align_end: true, "Balance" }
                            DataTableColumn { "Released" }
                            DataTableColumn { "Status" }
                            DataTableColumn { align_end: true, "Actions" }
                        }
                        DataTableBody {
                            if rows.is_empty() {
                                DataTableEmpty { colspan: 8, message: "No escrow accounts found." }
                            }
                            for account in rows {
                                EscrowRow {
                                    key: "{account.id}",
                                    busy: busy_id.as_deref() == Some(account.id.as_str()),
                                    account,
                                    on_action: move |picked: (EscrowAccount, EscrowAction)| target.set(Some(picked)),
                                    on_report: download_report.clone(),
                                }
                            }
                        }
                    }
                }
            }
        }

        EscrowActionDialog {
            target: target(),
            busy: busy_id.is_some(),
            on_submit: submit,
            on_cancel: move |_| target.set(None),
        }
    }
}

#[component]
fn EscrowRow(
    account: EscrowAccount,
    busy: bool,
    on_action: EventHandler<(EscrowAccount, EscrowAction)>,
    on_report: EventHandler<EscrowAccount>,
) -> Element {
    let frozen = account.is_frozen();
    let action = {
        let account = account.clone();
        move |kind: EscrowAction| on_action.call((account.clone(), kind))
    };
    let (release, toggle, refund, adjust) = (action.clone(), action.clone(), action.clone(), action);
    let report_account = account.clone();
    let name = |user: Option<&shared_types::UserRef>| {
        user.map(|u| u.display_name().to_string()).unwrap_or_else(|| "-".to_string())
    };
    let project = account
        .project
        .as_ref()
        .and_then(|p| p.title.clone())
        .unwrap_or_else(|| "-".to_string());

    rsx! {
        DataTableRow { highlight: frozen,
            DataTableCell { "{project}" }
            DataTableCell { {name(account.owner.as_ref())} }
            DataTableCell { {name(account.contractor.as_ref())} }
            DataTableCell { align_end: true, {format_currency(account.total_amount)} }
            DataTableCell { align_end: true, {format_currency(account.remaining_balance)} }
            DataTableCell { PercentBar { percent: account.released_percent() } }
            DataTableCell { StatusBadge { status: account.status.clone() } }
            DataTableCell { align_end: true,
                div { class: "row-actions",
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        disabled: busy || frozen,
                        onclick: move |_| release(EscrowAction::Release),
                        "Release"
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        disabled: busy,
                        onclick: move |_| {
                            toggle(if frozen { EscrowAction::Unfreeze } else { EscrowAction::Freeze })
                        },
                        if frozen { "Unfreeze" } else { "Freeze" }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        disabled: busy,
                        onclick: move |_| refund(EscrowAction::Refund),
                        "Refund"
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        disabled: busy,
                        onclick: move |_| adjust(EscrowAction::Adjust),
                        "Adjust"
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        size: ButtonSize::Small,
                        disabled: busy,
                        onclick: move |_| on_report.call(report_account.clone()),
                        "Report"
                    }
                }
            }
        }
    }
}

/// One dialog for every escrow action. The amount field only shows for
/// actions that take one; inputs are validated by the request builders.
#[component]
fn EscrowActionDialog(
    target: Option<(EscrowAccount, EscrowAction)>,
    busy: bool,
    on_submit: EventHandler<ActionInput>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut input = use_signal(ActionInput::default);
    let open = target.is_some();

    use_effect(use_reactive((&open,), move |(open,)| {
        if open {
            input.set(ActionInput::default());
        }
    }));

    let Some((account, action)) = target else {
        return rsx! {};
    };
    let project = account
        .project
        .as_ref()
        .and_then(|p| p.title.clone())
        .unwrap_or_else(|| account.id.clone());
    let unfreeze = action == EscrowAction::Unfreeze;

    rsx! {
        DialogRoot {
            open,
            on_open_change: move |open: bool| {
                if !open {
                    on_cancel.call(());
                }
            },
            DialogContent {
                DialogTitle { "{action.title()}" }
                DialogDescription {
                    "{project}: balance {format_currency(account.remaining_balance)} of {format_currency(account.total_amount)}"
                }
                if let Some(label) = action.amount_label() {
                    Input {
                        label: label.to_string(),
                        input_type: "number",
                        required: action != EscrowAction::Refund,
                        value: input().amount,
                        on_input: move |e: FormEvent| input.write().amount = e.value(),
                    }
                }
                Textarea {
                    label: "Reason",
                    required: !unfreeze,
                    rows: 3,
                    value: input().reason,
                    on_input: move |e: FormEvent| input.write().reason = e.value(),
                }
                DialogActions {
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: if matches!(action, EscrowAction::Freeze | EscrowAction::Refund) {
                            ButtonVariant::Danger
                        } else {
                            ButtonVariant::Primary
                        },
                        loading: busy,
                        onclick: move |_| on_submit.call(input()),
                        "{action.title()}"
                    }
                }
            }
        }
    }
}
