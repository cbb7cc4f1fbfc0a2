use admin_client::export::ExportFile;
use chrono::Utc;
use dioxus::prelude::*;
use shared_types::{
    search_transactions, FinancialMetrics, ListState, Period, Transaction, TransactionQuery,
    ViewState, TRANSACTION_STATUSES, TRANSACTION_TYPES,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardHeader, Choice,
    DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader,
    DataTableRow, EmptyState, FormSelect, Input, PageHeader, SearchBar, SearchInput, SkeletonRows,
    StatCard, StatGrid, StatTone, StatusBadge,
};

use crate::auth::use_api;
use crate::components::PeriodSelect;
use crate::download::save_export;
use crate::feedback;
use crate::format_helpers::{
    format_count, format_currency, format_datetime, format_percent, format_snake_case_title,
    parse_optional_date, parse_optional_number,
};

/// Date and amount bounds as typed. Type and status apply immediately.
#[derive(Debug, Clone, Default, PartialEq)]
struct RangeDraft {
    date_from: String,
    date_to: String,
    amount_min: String,
    amount_max: String,
}

impl RangeDraft {
    fn apply(&self, query: &TransactionQuery) -> TransactionQuery {
        TransactionQuery {
            transaction_type: query.transaction_type.clone(),
            status: query.status.clone(),
            date_from: parse_optional_date(&self.date_from),
            date_to: parse_optional_date(&self.date_to),
            amount_min: parse_optional_number(&self.amount_min),
            amount_max: parse_optional_number(&self.amount_max),
        }
    }
}

/// Payment metrics for a period and the transaction ledger.
#[component]
pub fn Payments() -> Element {
    let api = use_api();
    let toast = use_toast();

    let mut period = use_signal(|| Period::Monthly);
    let mut metrics = use_signal(ViewState::<FinancialMetrics>::default);
    let mut query = use_signal(TransactionQuery::default);
    let mut draft = use_signal(RangeDraft::default);
    let mut search = use_signal(String::new);
    let mut list = use_signal(ListState::<Transaction>::default);
    let mut exporting = use_signal(|| false);

    let _metrics = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let period = period();
            async move {
                metrics.write().begin();
                let result = api.financial_metrics(period).await;
                if let Some(err) = metrics.write().finish(result) {
                    feedback::failure(toast, &err, "Failed to load financial metrics");
                }
            }
        }
    });

    let _transactions = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let query = query();
            async move {
                list.write().begin();
                let result = api.list_transactions(&query).await;
                if let Some(err) = list.write().finish(result) {
                    feedback::failure(toast, &err, "Failed to load transactions");
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
                let result = match api.export_transactions(&query()).await {
                    Ok(bytes) => save_export(&ExportFile::csv("transactions", today, bytes)),
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => feedback::success(toast, "Transactions exported successfully"),
                    Err(e) => feedback::failure(toast, &e, "Failed to export transactions"),
                }
                exporting.set(false);
            });
        }
    };

    let state = list.read();
    let initial_load = state.is_initial_load();
    let rows: Vec<Transaction> = search_transactions(state.items(), &search()).into_iter().cloned().collect();
    drop(state);
    let current = query();
    let d = draft();

    rsx! {
        PageHeader {
            title: "Payments",
            description: "Volume, fees and the transaction ledger",
            PeriodSelect { value: period(), on_change: move |p| period.set(p) }
        }

        match &*metrics.read() {
            ViewState::Loading => rsx! { SkeletonRows { count: 3 } },
            ViewState::Empty => rsx! { EmptyState { message: "No financial data for this period." } },
            ViewState::Loaded(data) => rsx! { FinancialCards { metrics: data.clone() } },
        }

        Card {
            CardHeader {
                title: "Transactions",
                actions: rsx! {
                    Button {
                        variant: ButtonVariant::Outline,
                        loading: exporting(),
                        loading_text: "Exporting...",
                        onclick: export,
                        "Export CSV"
                    }
                },
            }
            CardContent {
                div { class: "filter-grid",
                    FormSelect {
                        label: "Type",
                        value: current.transaction_type.clone(),
                        all_label: "All types",
                        options: Choice::from_values(TRANSACTION_TYPES),
                        onchange: move |e: FormEvent| query.write().transaction_type = e.value(),
                    }
                    FormSelect {
                        label: "Status",
                        value: current.status.clone(),
                        all_label: "All statuses",
                        options: Choice::from_values(TRANSACTION_STATUSES),
                        onchange: move |e: FormEvent| query.write().status = e.value(),
                    }
                    Input {
                        label: "From",
                        input_type: "date",
                        value: d.date_from.clone(),
                        on_input: move |e: FormEvent| draft.write().date_from = e.value(),
                    }
                    Input {
                        label: "To",
                        input_type: "date",
                        value: d.date_to.clone(),
                        on_input: move |e: FormEvent| draft.write().date_to = e.value(),
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
                }
                div { class: "filter-actions",
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| {
                            draft.set(RangeDraft::default());
                            query.set(TransactionQuery::default());
                        },
                        "Reset"
                    }
                    Button {
                        onclick: move |_| {
                            let next = draft.read().apply(&query.peek());
                            query.set(next);
                        },
                        "Apply"
                    }
                }
                SearchBar {
                    SearchInput {
                        value: search(),
                        placeholder: "Search reference, payer or payee",
                        on_search: move |q: String| search.set(q),
                    }
                }
                if initial_load {
                    SkeletonRows {}
                } else {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Reference" }
                            DataTableColumn { "Type" }
                            DataTableColumn { "Payer" }
                            DataTableColumn { "Payee" }
                            DataTableColumn { align_end: true, "Amount" }
                            DataTableColumn { "Status" }
                            DataTableColumn { "Initiated" }
                        }
                        DataTableBody {
                            if rows.is_empty() {
                                DataTableEmpty { colspan: 7, message: "No transactions found." }
                            }
                            for tx in rows {
                                DataTableRow { key: "{tx.id}", highlight: tx.status == "failed",
                                    DataTableCell { code { {tx.reference().to_string()} } }
                                    DataTableCell {
                                        Badge { variant: BadgeVariant::Outline, {format_snake_case_title(&tx.transaction_type)} }
                                    }
                                    DataTableCell { {party(tx.payer.as_ref())} }
                                    DataTableCell { {party(tx.payee.as_ref())} }
                                    DataTableCell { align_end: true, {format_currency(tx.amount)} }
                                    DataTableCell { StatusBadge { status: tx.status.clone() } }
                                    DataTableCell { {format_datetime(tx.initiated_at.as_ref())} }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn party(user: Option<&shared_types::UserRef>) -> String {
    user.map(|u| u.display_name().to_string()).unwrap_or_else(|| "-".to_string())
}

#[component]
fn FinancialCards(metrics: FinancialMetrics) -> Element {
    let failing = if metrics.failed_payments > 0 { StatTone::Negative } else { StatTone::Neutral };

    rsx! {
        StatGrid {
            StatCard {
                label: "Total volume",
                value: format_currency(metrics.total_volume),
                detail: format!("{} today", format_currency(metrics.daily_volume)),
            }
            StatCard { label: "Weekly volume", value: format_currency(metrics.weekly_volume) }
            StatCard { label: "Monthly volume", value: format_currency(metrics.monthly_volume) }
            StatCard { label: "Platform fees", value: format_currency(metrics.platform_fees) }
            StatCard {
                label: "Escrow balance",
                value: format_currency(metrics.escrow_balance),
                detail: format!("{} active accounts", format_count(metrics.active_escrow_accounts)),
            }
            StatCard {
                label: "Pending",
                value: format_count(metrics.pending_payments),
                detail: format!("{} in payouts", format_currency(metrics.pending_payouts)),
            }
            StatCard { label: "Failed payments", value: format_count(metrics.failed_payments), tone: failing }
            StatCard { label: "Refunds", value: format_currency(metrics.refunds_processed) }
            StatCard { label: "Average transaction", value: format_currency(metrics.average_transaction_size) }
            StatCard { label: "Success rate", value: format_percent(metrics.payment_success_rate) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn range_draft_keeps_type_and_status() {
        let base = TransactionQuery {
            transaction_type: "refund".into(),
            ..TransactionQuery::default()
        };
        let draft = RangeDraft {
            date_to: "2026-02-28".into(),
            amount_min: "abc".into(),
            ..RangeDraft::default()
        };
        let query = draft.apply(&base);
        assert_eq!(query.transaction_type, "refund");
        assert_eq!(query.amount_min, None);
        assert_eq!(query.date_to.map(|d| d.to_string()), Some("2026-02-28".to_string()));
        assert_eq!(query.to_query(), vec![("type", "refund".to_string()), ("date_to", "2026-02-28".to_string())]);
    }
}
