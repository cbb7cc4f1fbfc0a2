use dioxus::prelude::*;
use shared_types::{search_jobs, Job, JobFilters, ListState, JOB_STATUSES};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card, CardContent, Choice,
    ConfirmDialog, DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty,
    DataTableHeader, DataTableRow, FormSelect, PageHeader, SearchBar, SearchInput, SkeletonRows,
};

use crate::auth::use_api;
use crate::components::{JobFilterPanel, ReasonDialog};
use crate::feedback;
use crate::format_helpers::{format_date, format_optional_currency};

const LOAD_FAILED: &str = "Failed to load jobs";

#[derive(Debug, Clone, Copy, PartialEq)]
enum JobAction {
    Flag,
    ToggleFeatured,
    Delete,
}

/// Job postings: server-side filters, client-side search, moderation actions.
#[component]
pub fn Jobs() -> Element {
    let api = use_api();
    let toast = use_toast();

    let mut filters = use_signal(JobFilters::new);
    let mut search = use_signal(String::new);
    let mut list = use_signal(ListState::<Job>::default);
    let mut working = use_signal(|| None::<String>);
    let mut flag_target = use_signal(|| None::<Job>);
    let mut delete_target = use_signal(|| None::<Job>);

    let mut jobs = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let filters = filters();
            async move {
                list.write().begin();
                let result = api.list_jobs(&filters).await;
                if let Some(err) = list.write().finish(result) {
                    feedback::failure(toast, &err, LOAD_FAILED);
                }
            }
        }
    });

    let change_status = {
        let api = api.clone();
        move |(job, status): (Job, String)| {
            let api = api.clone();
            spawn(async move {
                working.set(Some(job.id.clone()));
                match api.update_job_status(&job.id, &status).await {
                    Ok(()) => {
                        feedback::success(toast, "Job status updated");
                        jobs.restart();
                    }
                    Err(e) => feedback::failure(toast, &e, "Failed to update job status"),
                }
                working.set(None);
            });
        }
    };

    let row_action = {
        let api = api.clone();
        move |(job, action): (Job, JobAction)| match action {
            JobAction::Flag => flag_target.set(Some(job)),
            JobAction::Delete => delete_target.set(Some(job)),
            JobAction::ToggleFeatured => {
                let api = api.clone();
                spawn(async move {
                    working.set(Some(job.id.clone()));
                    let featured = !job.featured;
                    match api.feature_job(&job.id, featured).await {
                        Ok(()) => {
                            let msg = if featured { "Job featured" } else { "Job unfeatured" };
                            feedback::success(toast, msg);
                            jobs.restart();
                        }
                        Err(e) => feedback::failure(toast, &e, "Failed to update job"),
                    }
                    working.set(None);
                });
            }
        }
    };

    let flag = {
        let api = api.clone();
        move |reason: String| {
            let Some(job) = flag_target() else {
                return;
            };
            let api = api.clone();
            spawn(async move {
                working.set(Some(job.id.clone()));
                match api.flag_job(&job.id, &reason).await {
                    Ok(()) => {
                        feedback::success(toast, "Job flagged for review");
                        flag_target.set(None);
                        jobs.restart();
                    }
                    Err(e) => feedback::failure(toast, &e, "Failed to flag job"),
                }
                working.set(None);
            });
        }
    };

    let delete = {
        let api = api.clone();
        move |_: ()| {
            let Some(job) = delete_target() else {
                return;
            };
            let api = api.clone();
            spawn(async move {
                working.set(Some(job.id.clone()));
                match api.delete_job(&job.id).await {
                    Ok(()) => {
                        feedback::success(toast, "Job deleted");
                        delete_target.set(None);
                        jobs.restart();
                    }
                    Err(e) => feedback::failure(toast, &e, "Failed to delete job"),
                }
                working.set(None);
            });
        }
    };

    let state = list.read();
    let initial_load = state.is_initial_load();
    let rows: Vec<Job> = search_jobs(state.items(), &search()).into_iter().cloned().collect();
    drop(state);
    let busy_id = working();
    let status_choices = Choice::from_values(JOB_STATUSES);

    rsx! {
        PageHeader {
            title: "Jobs",
            description: "Posted jobs across the marketplace",
        }

        JobFilterPanel {
            filters: filters(),
            on_change: move |next: JobFilters| filters.set(next),
            on_reset: move |next: JobFilters| filters.set(next),
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
                            DataTableColumn { "Location" }
                            DataTableColumn { align_end: true, "Budget" }
                            DataTableColumn { align_end: true, "Applications" }
                            DataTableColumn { "Status" }
                            DataTableColumn { "Posted" }
                            DataTableColumn { align_end: true, "Actions" }
                        }
                        DataTableBody {
                            if rows.is_empty() {
                                DataTableEmpty { colspan: 8, message: "No jobs found." }
                            }
                            for job in rows {
                                JobRow {
                                    key: "{job.id}",
                                    busy: busy_id.as_deref() == Some(job.id.as_str()),
                                    status_choices: status_choices.clone(),
                                    job,
                                    on_status: change_status.clone(),
                                    on_action: row_action.clone(),
                                }
                            }
                        }
                    }
                }
            }
        }

        ReasonDialog {
            open: flag_target().is_some(),
            title: "Flag job",
            description: match flag_target() {
                Some(job) => format!("Flag \"{}\" for review.", job.title),
                None => String::new(),
            },
            confirm_label: "Flag job",
            busy: busy_id.is_some(),
            on_submit: flag,
            on_cancel: move |_| flag_target.set(None),
        }

        ConfirmDialog {
            open: delete_target().is_some(),
            title: "Delete job",
            description: match delete_target() {
                Some(job) => format!("Delete \"{}\"? Applications on it are removed too.", job.title),
                None => String::new(),
            },
            confirm_label: "Delete",
            busy: busy_id.is_some(),
            on_confirm: delete,
            on_cancel: move |_| delete_target.set(None),
        }
    }
}

#[component]
fn JobRow(
    job: Job,
    busy: bool,
    status_choices: Vec<Choice>,
    on_status: EventHandler<(Job, String)>,
    on_action: EventHandler<(Job, JobAction)>,
) -> Element {
    let (j1, j2, j3, j4) = (job.clone(), job.clone(), job.clone(), job.clone());
    let poster = job
        .posted_by
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "-".to_string());

    rsx! {
        DataTableRow {
            DataTableCell {
                div { class: "title-cell",
                    span { class: "title-cell-main",
                        "{job.title}"
                        if job.featured {
                            Badge { variant: BadgeVariant::Info, "Featured" }
                        }
                    }
                    span { class: "title-cell-sub", "by {poster}" }
                }
            }
            DataTableCell { {job.trade_type.clone().unwrap_or_else(|| "-".into())} }
            DataTableCell { {job.location.clone().unwrap_or_else(|| "-".into())} }
            DataTableCell { align_end: true, {format_optional_currency(job.budget)} }
            DataTableCell { align_end: true, "{job.applications_count}" }
            DataTableCell {
                FormSelect {
                    value: job.status.clone(),
                    options: status_choices,
                    disabled: busy,
                    onchange: move |evt: FormEvent| {
                        let status = evt.value();
                        if status != j1.status {
                            on_status.call((j1.clone(), status));
                        }
                    },
                }
            }
            DataTableCell { {format_date(job.created_at.as_ref())} }
            DataTableCell { align_end: true,
                div { class: "row-actions",
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        disabled: busy,
                        onclick: move |_| on_action.call((j2.clone(), JobAction::ToggleFeatured)),
                        if job.featured { "Unfeature" } else { "Feature" }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        disabled: busy,
                        onclick: move |_| on_action.call((j3.clone(), JobAction::Flag)),
                        "Flag"
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        disabled: busy,
                        onclick: move |_| on_action.call((j4.clone(), JobAction::Delete)),
                        "Delete"
                    }
                }
            }
        }
    }
}
