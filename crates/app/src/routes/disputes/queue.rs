use admin_client::disputes::{load_disputes, LOAD_FAILED};
use chrono::Utc;
use dioxus::prelude::*;
use shared_types::{
    search_disputes, Dispute, DisputeQuery, DisputeSort, ListState, DISPUTE_STATUSES, DISPUTE_TYPES,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card, CardContent, Choice,
    DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader,
    DataTableRow, FormSelect, Input, PageHeader, SearchBar, SearchInput, SkeletonRows,
    StatusBadge,
};

use crate::auth::use_api;
use crate::feedback;
use crate::format_helpers::{
    format_date, format_optional_currency, format_snake_case_title, parse_optional_date,
    parse_optional_number,
};

/// Text of the advanced filter fields as typed.
#[derive(Debug, Clone, Default, PartialEq)]
struct AdvancedDraft {
    filed_from: String,
    filed_to: String,
    project_id: String,
    filed_by: String,
    amount_min: String,
    amount_max: String,
    assigned_admin: String,
}

impl AdvancedDraft {
    /// Copy the advanced fields onto `query`, keeping its status and type.
    fn apply(&self, query: &DisputeQuery) -> DisputeQuery {
        DisputeQuery {
            status: query.status.clone(),
            dispute_type: query.dispute_type.clone(),
            filed_date_from: parse_optional_date(&self.filed_from),
            filed_date_to: parse_optional_date(&self.filed_to),
            project_id: self.project_id.trim().to_string(),
            filed_by: self.filed_by.trim().to_string(),
            amount_min: parse_optional_number(&self.amount_min),
            amount_max: parse_optional_number(&self.amount_max),
            assigned_admin: self.assigned_admin.trim().to_string(),
        }
    }
}

fn priority_variant(priority: &str) -> BadgeVariant {
    match priority {
        "urgent" => BadgeVariant::Danger,
        "high" => BadgeVariant::Warning,
        "normal" => BadgeVariant::Info,
        _ => BadgeVariant::Neutral,
    }
}

/// Dispute queue.
///
/// Status, type and the advanced filters go to the server; every change
/// refetches and re-sorts. The search box only narrows the last fetched list.
#[component]
pub fn DisputeQueue() -> Element {
    let api = use_api();
    let toast = use_toast();

    let mut query = use_signal(DisputeQuery::default);
    let mut sort = use_signal(DisputeSort::default);
    let mut search = use_signal(String::new);
    let mut show_advanced = use_signal(|| false);
    let mut list = use_signal(ListState::<Dispute>::default);

    let mut disputes = use_resource(move || {
        let api = api.clone();
        let query = query();
        let sort = sort();
        async move {
            list.write().begin();
            let result = load_disputes(&api, &query, sort).await;
            if let Some(err) = list.write().finish(result) {
                feedback::fixed_failure(toast, &err, LOAD_FAILED);
            }
        }
    });

    let state = list.read();
    let initial_load = state.is_initial_load();
    let refreshing = state.is_loading();
    let rows: Vec<Dispute> = search_disputes(state.items(), &search()).into_iter().cloned().collect();
    drop(state);
    let now = Utc::now();
    let current = query();

    rsx! {
        PageHeader {
            title: "Disputes",
            description: "Open disputes between owners and contractors",
            Button {
                variant: ButtonVariant::Outline,
                loading: refreshing && !initial_load,
                loading_text: "Refreshing...",
                onclick: move |_| disputes.restart(),
                "Refresh"
            }
        }

        Card {
            CardContent {
                div { class: "filter-row",
                    FormSelect {
                        label: "Status",
                        value: current.status.clone(),
                        all_label: "All statuses",
                        options: Choice::from_values(DISPUTE_STATUSES),
                        onchange: move |e: FormEvent| query.write().status = e.value(),
                    }
                    FormSelect {
                        label: "Type",
                        value: current.dispute_type.clone(),
                        all_label: "All types",
                        options: Choice::from_values(DISPUTE_TYPES),
                        onchange: move |e: FormEvent| query.write().dispute_type = e.value(),
                    }
                    FormSelect {
                        label: "Sort by",
                        value: sort().as_str().to_string(),
                        options: vec![Choice::new("priority", "Priority"), Choice::new("date", "Filing date")],
                        onchange: move |e: FormEvent| sort.set(DisputeSort::parse(&e.value())),
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        onclick: move |_| show_advanced.toggle(),
                        if show_advanced() { "Hide advanced" } else { "Advanced filters" }
                    }
                }
                if show_advanced() {
                    AdvancedFilters {
                        on_apply: move |draft: AdvancedDraft| {
                            let next = draft.apply(&query.peek());
                            query.set(next);
                        },
                        on_reset: move |_| {
                            let mut next = DisputeQuery::default();
                            next.status = query.peek().status.clone();
                            next.dispute_type = query.peek().dispute_type.clone();
                            query.set(next);
                        },
                    }
                }
            }
        }

        Card {
            CardContent {
                SearchBar {
                    SearchInput {
                        value: search(),
                        placeholder: "Search id, description, project or filer",
                        on_search: move |q: String| search.set(q),
                    }
                }
                if initial_load {
                    SkeletonRows {}
                } else {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "ID" }
                            DataTableColumn { "Type" }
                            DataTableColumn { "Status" }
                            DataTableColumn { "Priority" }
                            DataTableColumn { "Project" }
                            DataTableColumn { "Filed by" }
                            DataTableColumn { align_end: true, "Amount" }
                            DataTableColumn { "Deadline" }
                        }
                        DataTableBody {
                            if rows.is_empty() {
                                DataTableEmpty { colspan: 8, message: "No disputes found." }
                            }
                            for dispute in rows {
                                DataTableRow { key: "{dispute.id}", highlight: dispute.is_overdue(now),
                                    DataTableCell { code { class: "dispute-id", {dispute.short_id()} } }
                                    DataTableCell {
                                        Badge { variant: BadgeVariant::Outline, {format_snake_case_title(&dispute.dispute_type)} }
                                    }
                                    DataTableCell { StatusBadge { status: dispute.status.clone() } }
                                    DataTableCell {
                                        Badge { variant: priority_variant(&dispute.priority), "{dispute.priority}" }
                                    }
                                    DataTableCell { {dispute.project_title().unwrap_or("-").to_string()} }
                                    DataTableCell { {dispute.filer_name().unwrap_or("-").to_string()} }
                                    DataTableCell { align_end: true, {format_optional_currency(dispute.amount_disputed)} }
                                    DataTableCell {
                                        span { class: if dispute.is_overdue(now) { "deadline overdue" } else { "deadline" },
                                            {format_date(dispute.deadline.as_ref())}
                                        }
                                    }
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
fn AdvancedFilters(on_apply: EventHandler<AdvancedDraft>, on_reset: EventHandler<()>) -> Element {
    let mut draft = use_signal(AdvancedDraft::default);
    let d = draft();

    rsx! {
        div { class: "filter-grid",
            Input {
                label: "Filed from",
                input_type: "date",
                value: d.filed_from.clone(),
                on_input: move |e: FormEvent| draft.write().filed_from = e.value(),
            }
            Input {
                label: "Filed to",
                input_type: "date",
                value: d.filed_to.clone(),
                on_input: move |e: FormEvent| draft.write().filed_to = e.value(),
            }
            Input {
                label: "Project ID",
                value: d.project_id.clone(),
                on_input: move |e: FormEvent| draft.write().project_id = e.value(),
            }
            Input {
                label: "Filed by (user ID)",
                value: d.filed_by.clone(),
                on_input: move |e: FormEvent| draft.write().filed_by = e.value(),
            }
            Input {
                label: "Amount min",
                input_type: "number",
                value: d.amount_min.clone(),
                on_input: move |e: FormEvent| draft.write().amount_min = e.value(),
            }
            Input {
                label: "Amount max",
                input_type: "number",
                value: d.amount_max.clone(),
                on_input: move |e: FormEvent| draft.write().amount_max = e.value(),
            }
            Input {
                label: "Assigned admin",
                value: d.assigned_admin.clone(),
                on_input: move |e: FormEvent| draft.write().assigned_admin = e.value(),
            }
        }
        div { class: "filter-actions",
            Button {
                variant: ButtonVariant::Ghost,
                onclick: move |_| {
                    draft.set(AdvancedDraft::default());
                    on_reset.call(());
                },
                "Clear"
            }
            Button { onclick: move |_| on_apply.call(draft()), "Apply" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use shared_types::ALL;

    #[test]
    fn advanced_draft_keeps_status_and_type() {
        let base = DisputeQuery {
            status: "open".into(),
            ..DisputeQuery::default()
        };
        let draft = AdvancedDraft {
            filed_from: "2026-01-05".into(),
            amount_min: "250".into(),
            amount_max: "".into(),
            assigned_admin: " admin-1 ".into(),
            ..AdvancedDraft::default()
        };
        let query = draft.apply(&base);
        assert_eq!(query.status, "open");
        assert_eq!(query.dispute_type, ALL);
        assert_eq!(query.filed_date_from, NaiveDate::from_ymd_opt(2026, 1, 5));
        assert_eq!(query.amount_min, Some(250.0));
        assert_eq!(query.amount_max, None);
        assert_eq!(query.assigned_admin, "admin-1");
    }

    #[test]
    fn empty_draft_adds_no_parameters() {
        let query = AdvancedDraft::default().apply(&DisputeQuery::default());
        assert!(query.to_query().is_empty());
    }
}
