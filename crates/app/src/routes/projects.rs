use admin_client::export::ExportFile;
use chrono::Utc;
use dioxus::prelude::*;
use shared_types::{
    search_projects, ListState, Project, ProjectQuery, ProjectsSummary, ViewState, ALL,
    PROJECT_STATUSES, TRADE_TYPES,
};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, Choice, DataTable,
    DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow,
    FormSelect, Input, PageHeader, PercentBar, SearchBar, SearchInput, SkeletonRows, StatCard,
    StatGrid, StatusBadge,
};

use crate::auth::use_api;
use crate::download::save_export;
use crate::feedback;
use crate::format_helpers::{
    format_count, format_currency, format_date, format_days, format_optional_currency,
    format_percent, parse_optional_date, parse_optional_number,
};

/// Raw text of the project filter form. Turned into a `ProjectQuery` on apply
/// so half-typed numbers never reach the server.
#[derive(Debug, Clone, PartialEq)]
struct ProjectFilterDraft {
    status: String,
    trade_type: String,
    owner_id: String,
    contractor_id: String,
    budget_min: String,
    budget_max: String,
    start_from: String,
    start_to: String,
    completion_min: String,
    completion_max: String,
}

impl Default for ProjectFilterDraft {
    fn default() -> Self {
        Self {
            status: ALL.to_string(),
            trade_type: ALL.to_string(),
            owner_id: String::new(),
            contractor_id: String::new(),
            budget_min: String::new(),
            budget_max: String::new(),
            start_from: String::new(),
            start_to: String::new(),
            completion_min: String::new(),
            completion_max: String::new(),
        }
    }
}

impl ProjectFilterDraft {
    fn to_query(&self) -> ProjectQuery {
        ProjectQuery {
            status: self.status.clone(),
            owner_id: self.owner_id.trim().to_string(),
            contractor_id: self.contractor_id.trim().to_string(),
            trade_type: self.trade_type.clone(),
            budget_min: parse_optional_number(&self.budget_min),
            budget_max: parse_optional_number(&self.budget_max),
            start_date_from: parse_optional_date(&self.start_from),
            start_date_to: parse_optional_date(&self.start_to),
            completion_percentage_min: parse_optional_number(&self.completion_min),
            completion_percentage_max: parse_optional_number(&self.completion_max),
        }
    }
}

#[component]
pub fn Projects() -> Element {
    let api = use_api();
    let toast = use_toast();

    let mut summary = use_signal(ViewState::<ProjectsSummary>::default);
    let mut list = use_signal(ListState::<Project>::default);
    let mut query = use_signal(ProjectQuery::default);
    let mut search = use_signal(String::new);
    let mut exporting = use_signal(|| false);

    let _summary = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                summary.write().begin();
                let result = api.projects_summary().await;
                if let Some(err) = summary.write().finish(result) {
                    feedback::failure(toast, &err, "Failed to load project summary");
                }
            }
        }
    });

    let _projects = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let query = query();
            async move {
                list.write().begin();
                let result = api.list_projects(&query).await;
                if let Some(err) = list.write().finish(result) {
                    feedback::failure(toast, &err, "Failed to load projects");
                }
            }
        }
    });

    let export = {
        let api = api.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            spawn(async move {
                exporting.set(true);
                let today = Utc::now().date_naive();
                let result = match api.export_projects(&query()).await {
                    Ok(bytes) => save_export(&ExportFile::csv("projects", today, bytes)),
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => feedback::success(toast, "Projects exported successfully"),
                    Err(e) => feedback::failure(toast, &e, "Failed to export projects"),
                }
                exporting.set(false);
            });
        }
    };

    let state = list.read();
    let initial_load = state.is_initial_load();
    let rows: Vec<Project> = search_projects(state.items(), &search()).into_iter().cloned().collect();
    drop(state);

    rsx! {
        PageHeader {
            title: "Projects",
            description: "Active work, completion and payment release",
            Button {
                variant: ButtonVariant::Outline,
                loading: exporting(),
                loading_text: "Exporting...",
                onclick: export,
                "Export CSV"
            }
        }

        match &*summary.read() {
            ViewState::Loading => rsx! { SkeletonRows { count: 2 } },
            ViewState::Empty => rsx! {},
            ViewState::Loaded(data) => rsx! { SummaryCards { summary: data.clone() } },
        }

        ProjectFilterForm { on_apply: move |next: ProjectQuery| query.set(next) }

        Card {
            CardContent {
                SearchBar {
                    SearchInput {
                        value: search(),
                        placeholder: "Search title, owner or contractor",
                        on_search: move |q: String| search.set(q),
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
                            DataTableColumn { align_end: true, "Budget" }
                            DataTableColumn { "Progress" }
                            DataTableColumn { "Started" }
                            DataTableColumn { "Status" }
                        }
                        DataTableBody {
                            if rows.is_empty() {
                                DataTableEmpty { colspan: 7, message: "No projects match these filters." }
                            }
                            for project in rows {
                                DataTableRow { key: "{project.id}", highlight: project.dispute_count > 0,
                                    DataTableCell {
                                        div { class: "title-cell",
                                            span { class: "title-cell-main", "{project.title}" }
                                            if project.dispute_count > 0 {
                                                span { class: "title-cell-sub", "{project.dispute_count} open disputes" }
                                            }
                                        }
                                    }
                                    DataTableCell { {display_name(project.owner.as_ref())} }
                                    DataTableCell { {display_name(project.contractor.as_ref())} }
                                    DataTableCell { align_end: true, {format_optional_currency(project.budget)} }
                                    DataTableCell { PercentBar { percent: project.completion_percentage } }
                                    DataTableCell { {format_date(project.start_date.as_ref())} }
                                    DataTableCell { StatusBadge { status: project.status.clone() } }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn display_name(user: Option<&shared_types::UserRef>) -> String {
    user.map(|u| u.display_name().to_string()).unwrap_or_else(|| "-".to_string())
}

#[component]
fn SummaryCards(summary: ProjectsSummary) -> Element {
    let releases = &summary.payment_release_stats;

    rsx! {
        StatGrid {
            StatCard { label: "Active projects", value: format_count(summary.active_projects_count) }
            StatCard { label: "Average completion", value: format_days(summary.average_completion_time) }
            StatCard { label: "On-time completion", value: format_percent(summary.on_time_completion_rate) }
            StatCard { label: "Dispute rate", value: format_percent(summary.dispute_rate) }
            StatCard {
                label: "Payments released",
                value: format_currency(releases.total_released),
                detail: format!("{} pending", format_currency(releases.total_pending)),
            }
        }
        if !summary.projects_by_status.is_empty() {
            Card {
                CardHeader { title: "Projects by status" }
                CardContent {
                    div { class: "status-counts",
                        for (status, count) in summary.projects_by_status.iter() {
                            div { key: "{status}", class: "status-count",
                                StatusBadge { status: status.clone() }
                                span { class: "status-count-value", {format_count(*count)} }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ProjectFilterForm(on_apply: EventHandler<ProjectQuery>) -> Element {
    let mut draft = use_signal(ProjectFilterDraft::default);
    let d = draft();

    rsx! {
        Card {
            CardContent {
                div { class: "filter-grid",
                    FormSelect {
                        label: "Status",
                        value: d.status.clone(),
                        all_label: "All statuses",
                        options: Choice::from_values(PROJECT_STATUSES),
                        onchange: move |e: FormEvent| draft.write().status = e.value(),
                    }
                    FormSelect {
                        label: "Trade",
                        value: d.trade_type.clone(),
                        all_label: "All trades",
                        options: Choice::from_values(TRADE_TYPES),
                        onchange: move |e: FormEvent| draft.write().trade_type = e.value(),
                    }
                    Input {
                        label: "Owner ID",
                        value: d.owner_id.clone(),
                        on_input: move |e: FormEvent| draft.write().owner_id = e.value(),
                    }
                    Input {
                        label: "Contractor ID",
                        value: d.contractor_id.clone(),
                        on_input: move |e: FormEvent| draft.write().contractor_id = e.value(),
                    }
                    Input {
                        label: "Budget min",
                        input_type: "number",
                        value: d.budget_min.clone(),
                        on_input: move |e: FormEvent| draft.write().budget_min = e.value(),
                    }
                    Input {
                        label: "Budget max",
                        input_type: "number",
                        value: d.budget_max.clone(),
                        on_input: move |e: FormEvent| draft.write().budget_max = e.value(),
                    }
                    Input {
                        label: "Started from",
                        input_type: "date",
                        value: d.start_from.clone(),
                        on_input: move |e: FormEvent| draft.write().start_from = e.value(),
                    }
                    Input {
                        label: "Started to",
                        input_type: "date",
                        value: d.start_to.clone(),
                        on_input: move |e: FormEvent| draft.write().start_to = e.value(),
                    }
                    Input {
                        label: "Completion min %",
                        input_type: "number",
                        value: d.completion_min.clone(),
                        on_input: move |e: FormEvent| draft.write().completion_min = e.value(),
                    }
                    Input {
                        label: "Completion max %",
                        input_type: "number",
                        value: d.completion_max.clone(),
                        on_input: move |e: FormEvent| draft.write().completion_max = e.value(),
                    }
                }
                div { class: "filter-actions",
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| {
                            draft.set(ProjectFilterDraft::default());
                            on_apply.call(ProjectQuery::default());
                        },
                        "Reset"
                    }
                    Button {
                        onclick: move |_| on_apply.call(draft.read().to_query()),
                        "Apply filters"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_draft_sends_no_filters() {
        assert!(ProjectFilterDraft::default().to_query().to_query().is_empty());
    }

    #[test]
    fn draft_drops_unparseable_fields() {
        let draft = ProjectFilterDraft {
            status: "completed".into(),
            owner_id: " u-9 ".into(),
            budget_min: "5000".into(),
            budget_max: "lots".into(),
            start_from: "2026-01-01".into(),
            start_to: "soon".into(),
            ..ProjectFilterDraft::default()
        };
        let query = draft.to_query();
        assert_eq!(query.status, "completed");
        assert_eq!(query.owner_id, "u-9");
        assert_eq!(query.budget_min, Some(5000.0));
        assert_eq!(query.budget_max, None);
        assert_eq!(query.start_date_from, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(query.start_date_to, None);
        assert_eq!(query.trade_type, "all");
    }
}
