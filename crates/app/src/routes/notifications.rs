use dioxus::prelude::*;
use shared_types::{
    template_variables, ListState, NotificationSettings, NotificationTemplate, TemplateInput,
    ViewState, TEMPLATE_TYPES,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardHeader, Choice, ConfirmDialog, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableEmpty, DataTableHeader, DataTableRow, DialogActions, DialogContent,
    DialogDescription, DialogRoot, DialogTitle, FormSelect, Input, PageHeader, SkeletonRows,
    StatusBadge, Textarea,
};

use crate::auth::use_api;
use crate::feedback;
use crate::format_helpers::format_snake_case_title;

/// Template being created (`id` is `None`) or edited.
#[derive(Debug, Clone, PartialEq)]
struct TemplateDraft {
    id: Option<String>,
    input: TemplateInput,
}

impl TemplateDraft {
    fn new_template() -> Self {
        Self {
            id: None,
            input: TemplateInput {
                template_type: "email".to_string(),
                ..TemplateInput::default()
            },
        }
    }

    fn edit(template: &NotificationTemplate) -> Self {
        Self {
            id: Some(template.id.clone()),
            input: TemplateInput::from_template(template),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TemplateAction {
    Edit,
    Test,
    Delete,
}

/// Notification templates and channel settings.
#[component]
pub fn Notifications() -> Element {
    let api = use_api();
    let toast = use_toast();

    let mut list = use_signal(ListState::<NotificationTemplate>::default);
    let mut settings = use_signal(ViewState::<NotificationSettings>::default);
    let mut editing = use_signal(|| None::<TemplateDraft>);
    let mut test_target = use_signal(|| None::<NotificationTemplate>);
    let mut delete_target = use_signal(|| None::<NotificationTemplate>);
    let mut saving = use_signal(|| false);

    let mut templates = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                list.write().begin();
                let result = api.notification_templates().await;
                if let Some(err) = list.write().finish(result) {
                    feedback::failure(toast, &err, "Failed to load templates");
                }
            }
        }
    });

    let _settings = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                settings.write().begin();
                let result = api.notification_settings().await;
                if let Some(err) = settings.write().finish(result) {
                    feedback::failure(toast, &err, "Failed to load notification settings");
                }
            }
        }
    });

    let save = {
        let api = api.clone();
        move |draft: TemplateDraft| {
            let api = api.clone();
            spawn(async move {
                saving.set(true);
                let result = match draft.input.validated() {
                    Ok(input) => match &draft.id {
                        Some(id) => api.update_template(id, &input).await,
                        None => api.create_template(&input).await,
                    },
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => {
                        let msg = if draft.id.is_some() { "Template updated" } else { "Template created" };
                        feedback::success(toast, msg);
                        editing.set(None);
                        templates.restart();
                    }
                    Err(e) => feedback::failure(toast, &e, "Failed to save template"),
                }
                saving.set(false);
            });
        }
    };

    let send_test = {
        let api = api.clone();
        move |email: String| {
            let Some(template) = test_target() else {
                return;
            };
            let api = api.clone();
            spawn(async move {
                saving.set(true);
                match api.send_test_notification(&template.id, &email).await {
                    Ok(()) => {
                        feedback::success(toast, "Test notification sent");
                        test_target.set(None);
                    }
                    Err(e) => feedback::failure(toast, &e, "Failed to send test notification"),
                }
                saving.set(false);
            });
        }
    };

    let delete = {
        let api = api.clone();
        move |_: ()| {
            let Some(template) = delete_target() else {
                return;
            };
            let api = api.clone();
            spawn(async move {
                saving.set(true);
                match api.delete_template(&template.id).await {
                    Ok(()) => {
                        feedback::success(toast, "Template deleted");
                        delete_target.set(None);
                        templates.restart();
                    }
                    Err(e) => feedback::failure(toast, &e, "Failed to delete template"),
                }
                saving.set(false);
            });
        }
    };

    let row_action = move |(template, action): (NotificationTemplate, TemplateAction)| match action {
        TemplateAction::Edit => editing.set(Some(TemplateDraft::edit(&template))),
        TemplateAction::Test => test_target.set(Some(template)),
        TemplateAction::Delete => delete_target.set(Some(template)),
    };

    let state = list.read();
    let initial_load = state.is_initial_load();
    let rows = state.items().to_vec();
    drop(state);
    let busy = saving();

    rsx! {
        PageHeader {
            title: "Notifications",
            description: "Message templates and delivery channels",
            Button {
                onclick: move |_| editing.set(Some(TemplateDraft::new_template())),
                "New template"
            }
        }

        match &*settings.read() {
            ViewState::Loading => rsx! { SkeletonRows { count: 1 } },
            ViewState::Empty => rsx! {},
            ViewState::Loaded(channels) => rsx! { ChannelSettings { settings: channels.clone() } },
        }

        Card {
            CardHeader { title: "Templates" }
            CardContent {
                if initial_load {
                    SkeletonRows {}
                } else {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Name" }
                            DataTableColumn { "Channel" }
                            DataTableColumn { "Subject" }
                            DataTableColumn { "Variables" }
                            DataTableColumn { align_end: true, "Actions" }
                        }
                        DataTableBody {
                            if rows.is_empty() {
                                DataTableEmpty { colspan: 5, message: "No templates yet." }
                            }
                            for template in rows {
                                TemplateRow {
                                    key: "{template.id}",
                                    busy,
                                    template,
                                    on_action: row_action,
                                }
                            }
                        }
                    }
                }
            }
        }

        TemplateEditor {
            draft: editing(),
            busy,
            on_save: save,
            on_cancel: move |_| editing.set(None),
        }

        TestSendDialog {
            open: test_target().is_some(),
            template_name: test_target().map(|t| t.name).unwrap_or_default(),
            busy,
            on_send: send_test,
            on_cancel: move |_| test_target.set(None),
        }

        ConfirmDialog {
            open: delete_target().is_some(),
            title: "Delete template",
            description: match delete_target() {
                Some(t) => format!("Delete the \"{}\" template?", t.name),
                None => String::new(),
            },
            confirm_label: "Delete",
            busy,
            on_confirm: delete,
            on_cancel: move |_| delete_target.set(None),
        }
    }
}

#[component]
fn ChannelSettings(settings: NotificationSettings) -> Element {
    let channels = [
        ("Email", settings.email_enabled),
        ("SMS", settings.sms_enabled),
        ("Push", settings.push_enabled),
        ("In-app", settings.in_app_enabled),
    ];

    rsx! {
        Card {
            CardHeader { title: "Channels", description: "Managed by the platform configuration" }
            CardContent {
                div { class: "status-counts",
                    for (name, enabled) in channels {
                        div { key: "{name}", class: "status-count",
                            span { "{name}" }
                            StatusBadge { status: if enabled { "active".to_string() } else { "inactive".to_string() } }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TemplateRow(
    template: NotificationTemplate,
    busy: bool,
    on_action: EventHandler<(NotificationTemplate, TemplateAction)>,
) -> Element {
    let action = {
        let template = template.clone();
        move |kind: TemplateAction| on_action.call((template.clone(), kind))
    };
    let (edit, test, remove) = (action.clone(), action.clone(), action);

    rsx! {
        DataTableRow {
            DataTableCell { "{template.name}" }
            DataTableCell {
                Badge { variant: BadgeVariant::Outline, {format_snake_case_title(&template.template_type)} }
            }
            DataTableCell { {template.subject.clone().unwrap_or_else(|| "-".into())} }
            DataTableCell {
                for var in template.variables.iter() {
                    code { key: "{var}", class: "template-variable", "{{{{{var}}}}}" }
                }
            }
            DataTableCell { align_end: true,
                div { class: "row-actions",
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        disabled: busy,
                        onclick: move |_| edit(TemplateAction::Edit),
                        "Edit"
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        disabled: busy,
                        onclick: move |_| test(TemplateAction::Test),
                        "Send test"
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        disabled: busy,
                        onclick: move |_| remove(TemplateAction::Delete),
                        "Delete"
                    }
                }
            }
        }
    }
}

/// Create/edit form. Variables are listed live from the subject and body;
/// the saved list is rebuilt by `TemplateInput::validated`.
#[component]
fn TemplateEditor(
    draft: Option<TemplateDraft>,
    busy: bool,
    on_save: EventHandler<TemplateDraft>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut form = use_signal(TemplateDraft::new_template);

    use_effect(use_reactive((&draft,), move |(draft,)| {
        if let Some(draft) = draft {
            form.set(draft);
        }
    }));

    let open = draft.is_some();
    let current = form();
    let mut detected = template_variables(current.input.subject.as_deref().unwrap_or_default());
    for v in template_variables(&current.input.content) {
        if !detected.contains(&v) {
            detected.push(v);
        }
    }

    rsx! {
        DialogRoot {
            open,
            on_open_change: move |open: bool| {
                if !open {
                    on_cancel.call(());
                }
            },
            DialogContent {
                DialogTitle { if current.id.is_some() { "Edit template" } else { "New template" } }
                DialogDescription { "Use {{{{name}}}} style markers for values filled in at send time." }
                Input {
                    label: "Name",
                    required: true,
                    value: current.input.name.clone(),
                    on_input: move |e: FormEvent| form.write().input.name = e.value(),
                }
                FormSelect {
                    label: "Channel",
                    value: current.input.template_type.clone(),
                    options: Choice::from_values(TEMPLATE_TYPES),
                    onchange: move |e: FormEvent| form.write().input.template_type = e.value(),
                }
                Input {
                    label: "Subject",
                    value: current.input.subject.clone().unwrap_or_default(),
                    on_input: move |e: FormEvent| form.write().input.subject = Some(e.value()),
                }
                Textarea {
                    label: "Content",
                    required: true,
                    rows: 6,
                    value: current.input.content.clone(),
                    on_input: move |e: FormEvent| form.write().input.content = e.value(),
                }
                if !detected.is_empty() {
                    p { class: "template-variables",
                        "Variables: "
                        for var in detected {
                            code { key: "{var}", class: "template-variable", "{var}" }
                        }
                    }
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
                        onclick: move |_| on_save.call(form()),
                        "Save template"
                    }
                }
            }
        }
    }
}

#[component]
fn TestSendDialog(
    open: bool,
    template_name: String,
    busy: bool,
    on_send: EventHandler<String>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut email = use_signal(String::new);

    use_effect(use_reactive((&open,), move |(open,)| {
        if open {
            email.set(String::new());
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
                DialogTitle { "Send test" }
                DialogDescription { "Send \"{template_name}\" with sample values." }
                Input {
                    label: "Recipient email",
                    input_type: "email",
                    required: true,
                    value: email(),
                    on_input: move |e: FormEvent| email.set(e.value()),
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
                        onclick: move |_| on_send.call(email()),
                        "Send"
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
    fn editing_copies_the_template() {
        let template = NotificationTemplate {
            id: "tpl-1".into(),
            name: "Bid awarded".into(),
            template_type: "sms".into(),
            subject: None,
            content: "Hi {{name}}".into(),
            variables: vec!["name".into()],
        };
        let draft = TemplateDraft::edit(&template);
        assert_eq!(draft.id.as_deref(), Some("tpl-1"));
        assert_eq!(draft.input.template_type, "sms");
        assert_eq!(draft.input.variables, vec!["name".to_string()]);
        assert_eq!(TemplateDraft::new_template().input.template_type, "email");
    }
}
