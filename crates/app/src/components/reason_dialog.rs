use dioxus::prelude::*;
use shared_ui::{
    Button, ButtonVariant, DialogActions, DialogContent, DialogDescription, DialogRoot, DialogTitle,
    Textarea,
};

/// Dialog that collects one free-text field (a reason or a message) before
/// an action runs.
///
/// The text is handed to `on_submit` as typed; the caller validates it so
/// validation messages come from one place. The field clears each time the
/// dialog opens.
#[component]
pub fn ReasonDialog(
    open: bool,
    title: String,
    description: String,
    #[props(default = "Reason".to_string())] label: String,
    #[props(default = "Confirm".to_string())] confirm_label: String,
    #[props(default)] destructive: bool,
    #[props(default)] busy: bool,
    on_submit: EventHandler<String>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut text = use_signal(String::new);

    use_effect(use_reactive((&open,), move |(open,)| {
        if open {
            text.set(String::new());
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
                DialogTitle { "{title}" }
                DialogDescription { "{description}" }
                Textarea {
                    label,
                    required: true,
                    rows: 4,
                    value: text(),
                    on_input: move |evt: FormEvent| text.set(evt.value()),
                }
                DialogActions {
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: if destructive { ButtonVariant::Danger } else { ButtonVariant::Primary },
                        loading: busy,
                        onclick: move |_| on_submit.call(text()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}
