use admin_client::bulk::{self, BulkAction};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBan, LdDownload, LdSend};
use dioxus_free_icons::Icon;
use shared_ui::{use_toast, Button, ButtonSize, ButtonVariant, ToastOptions};

use super::ReasonDialog;
use crate::auth::use_api;
use crate::download::save_export;
use crate::feedback;

/// Toolbar acting on the users picked in the table.
///
/// After a suspend or notify succeeds `on_complete` fires so the owner can
/// clear the selection and reload.
#[component]
pub fn BulkActions(selected: Vec<String>, on_complete: EventHandler<BulkAction>) -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut pending = use_signal(|| None::<BulkAction>);
    let mut dialog = use_signal(|| None::<BulkAction>);

    let count = selected.len();
    let busy = pending().is_some();

    let run_export = {
        let api = api.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            spawn(async move {
                pending.set(Some(BulkAction::Export));
                let today = chrono::Utc::now().date_naive();
                let result = match bulk::export_users(&api, today).await {
                    Ok(file) => save_export(&file),
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => feedback::success(toast, BulkAction::Export.success_message(count)),
                    Err(e) => toast.error(BulkAction::Export.failure_message(&e), ToastOptions::new()),
                }
                pending.set(None);
            });
        }
    };

    let submit = {
        let selected = selected.clone();
        move |text: String| {
            let Some(action) = dialog() else {
                return;
            };
            let api = api.clone();
            let ids = selected.clone();
            spawn(async move {
                pending.set(Some(action));
                let result = match action {
                    BulkAction::Suspend => bulk::suspend_users(&api, &ids, &text).await,
                    BulkAction::Notify => bulk::notify_users(&api, &ids, &text).await,
                    BulkAction::Export => Ok(0),
                };
                pending.set(None);
                match result {
                    Ok(n) => {
                        feedback::success(toast, action.success_message(n));
                        dialog.set(None);
                        on_complete.call(action);
                    }
                    Err(e) => toast.error(action.failure_message(&e), ToastOptions::new()),
                }
            });
        }
    };

    let (title, description, label, confirm) = match dialog() {
        Some(BulkAction::Suspend) => (
            format!("Suspend {count} users"),
            "Suspended users cannot sign in until the suspension is lifted.".to_string(),
            "Reason".to_string(),
            "Suspend users".to_string(),
        ),
        _ => (
            format!("Notify {count} users"),
            "Each selected user receives this message.".to_string(),
            "Message".to_string(),
            "Send".to_string(),
        ),
    };

    rsx! {
        div { class: "bulk-actions",
            span { class: "bulk-actions-count", "{count} selected" }
            Button {
                variant: ButtonVariant::Outline,
                size: ButtonSize::Small,
                loading: pending() == Some(BulkAction::Export),
                loading_text: "Exporting...",
                disabled: busy,
                onclick: run_export,
                Icon::<LdDownload> { icon: LdDownload, width: 14, height: 14 }
                "Export CSV"
            }
            Button {
                variant: ButtonVariant::Outline,
                size: ButtonSize::Small,
                disabled: busy || count == 0,
                onclick: move |_| dialog.set(Some(BulkAction::Notify)),
                Icon::<LdSend> { icon: LdSend, width: 14, height: 14 }
                "Notify"
            }
            Button {
                variant: ButtonVariant::Danger,
                size: ButtonSize::Small,
                disabled: busy || count == 0,
                onclick: move |_| dialog.set(Some(BulkAction::Suspend)),
                Icon::<LdBan> { icon: LdBan, width: 14, height: 14 }
                "Suspend"
            }
        }
        ReasonDialog {
            open: dialog().is_some(),
            title,
            description,
            label,
            confirm_label: confirm,
            destructive: dialog() == Some(BulkAction::Suspend),
            busy,
            on_submit: submit,
            on_cancel: move |_| dialog.set(None),
        }
    }
}
