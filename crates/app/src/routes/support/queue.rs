use dioxus::prelude::*;
use shared_types::{
    search_tickets, ListState, SupportTicket, TicketQuery, TICKET_CATEGORIES, TICKET_PRIORITIES,
    TICKET_STATUSES,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, Choice, DataTable,
    DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow,
    FormSelect, PageHeader, SearchBar, SearchInput, SkeletonRows, StatusBadge,
};

use crate::auth::use_api;
use crate::feedback;
use crate::format_helpers::{format_datetime, format_snake_case_title};

/// Support tickets filtered by status, priority and category.
#[component]
pub fn SupportQueue() -> Element {
    let api = use_api();
    let toast = use_toast();

    let mut query = use_signal(TicketQuery::default);
    let mut search = use_signal(String::new);
    let mut list = use_signal(ListState::<SupportTicket>::default);

    let mut tickets = use_resource(move || {
        let api = api.clone();
        let query = query();
        async move {
            list.write().begin();
            let result = api.support_tickets(&query).await;
            if let Some(err) = list.write().finish(result) {
                feedback::failure(toast, &err, "Failed to load support tickets");
            }
        }
    });

    let state = list.read();
    let initial_load = state.is_initial_load();
    let refreshing = state.is_loading();
    let rows: Vec<SupportTicket> = search_tickets(state.items(), &search()).into_iter().cloned().collect();
    drop(state);
    let current = query();

    rsx! {
        PageHeader {
            title: "Support Tickets",
            description: "Requests from owners and contractors",
            Button {
                variant: ButtonVariant::Outline,
                loading: refreshing && !initial_load,
                loading_text: "Refreshing...",
                onclick: move |_| tickets.restart(),
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
                        options: Choice::from_values(TICKET_STATUSES),
                        onchange: move |e: FormEvent| query.write().status = e.value(),
                    }
                    FormSelect {
                        label: "Priority",
                        value: current.priority.clone(),
                        all_label: "All priorities",
                        options: Choice::from_values(TICKET_PRIORITIES),
                        onchange: move |e: FormEvent| query.write().priority = e.value(),
                    }
                    FormSelect {
                        label: "Category",
                        value: current.category.clone(),
                        all_label: "All categories",
                        options: Choice::from_values(TICKET_CATEGORIES),
                        onchange: move |e: FormEvent| query.write().category = e.value(),
                    }
                }
                SearchBar {
                    SearchInput {
                        value: search(),
                        placeholder: "Search subject, ticket number or requester",
                        on_search: move |q: String| search.set(q),
                    }
                }
                if initial_load {
                    SkeletonRows {}
                } else {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Ticket" }
                            DataTableColumn { "Subject" }
                            DataTableColumn { "Requester" }
                            DataTableColumn { "Category" }
                            DataTableColumn { "Priority" }
                            DataTableColumn { "Status" }
                            DataTableColumn { "Assignee" }
                            DataTableColumn { "Opened" }
                        }
                        DataTableBody {
                            if rows.is_empty() {
                                DataTableEmpty { colspan: 8, message: "No tickets found." }
                            }
                            for ticket in rows {
                                DataTableRow { key: "{ticket.id}", highlight: ticket.priority == "urgent",
                                    DataTableCell {
                                        code { {ticket.ticket_number.clone().unwrap_or_else(|| ticket.id.clone())} }
                                    }
                                    DataTableCell { "{ticket.subject}" }
                                    DataTableCell {
                                        {ticket.user.as_ref().map(|u| u.display_name().to_string()).unwrap_or_else(|| "-".into())}
                                    }
                                    DataTableCell {
                                        Badge { variant: BadgeVariant::Outline, {format_snake_case_title(&ticket.category)} }
                                    }
                                    DataTableCell { StatusBadge { status: ticket.priority.clone() } }
                                    DataTableCell { StatusBadge { status: ticket.status.clone() } }
                                    DataTableCell { {ticket.assigned_to.clone().unwrap_or_else(|| "Unassigned".into())} }
                                    DataTableCell { {format_datetime(ticket.created_at.as_ref())} }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
