//! Filter panels for the bid, job and user lists.
//!
//! Each panel keeps a `FilterComposer` as its own shadow copy so inputs
//! respond immediately, and hands the full updated set to `on_change` after
//! every edit. Reset hands an empty set to `on_reset`.

use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdFilter, LdX};
use dioxus_free_icons::Icon;
use shared_types::{
    format_query_number, BidFilterKey, BidFilters, FilterComposer, FilterKey, FilterSet, FilterValue,
    JobFilterKey, JobFilters, UserFilterKey, UserFilters, BID_FILTER_STATUSES, JOB_FILTER_STATUSES,
    TRADE_TYPES, USER_FILTER_ROLES, USER_STATUSES, VERIFICATION_STATUSES,
};
use shared_ui::{Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Choice, FormSelect, Input};

/// Text input to a filter value. Blank input removes the key.
fn text_value(input: &str) -> Option<FilterValue> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| FilterValue::text(trimmed))
}

fn shown_select<K: FilterKey>(filters: &FilterSet<K>, key: K) -> String {
    filters
        .text(key)
        .filter(|s| !s.is_empty())
        .unwrap_or(shared_types::ALL)
        .to_string()
}

fn shown_text<K: FilterKey>(filters: &FilterSet<K>, key: K) -> String {
    match filters.get(key) {
        Some(FilterValue::Text(s)) => s.clone(),
        Some(FilterValue::Number(n)) => format_query_number(*n),
        _ => String::new(),
    }
}

/// Keep the shadow copy in step when the owner replaces its filters.
fn use_composer<K: FilterKey>(filters: &FilterSet<K>) -> Signal<FilterComposer<K>> {
    let initial = filters.clone();
    let mut composer = use_signal(move || FilterComposer::new(initial));
    use_effect(use_reactive((filters,), move |(filters,)| {
        if composer.peek().current() != &filters {
            composer.write().sync(filters);
        }
    }));
    composer
}

// ---------------------------------------------------------------------------
// Field components
// ---------------------------------------------------------------------------

#[component]
fn SelectFilter<K: FilterKey>(
    composer: Signal<FilterComposer<K>>,
    field: K,
    all_label: String,
    options: Vec<Choice>,
    on_change: EventHandler<FilterSet<K>>,
) -> Element {
    let value = shown_select(composer.read().current(), field);
    rsx! {
        FormSelect {
            label: field.label().to_string(),
            value,
            all_label,
            options,
            onchange: move |evt: FormEvent| {
                let next = composer.write().change_select(field, &evt.value());
                on_change.call(next);
            },
        }
    }
}

#[component]
fn NumberFilter<K: FilterKey>(
    composer: Signal<FilterComposer<K>>,
    field: K,
    on_change: EventHandler<FilterSet<K>>,
) -> Element {
    let value = shown_text(composer.read().current(), field);
    rsx! {
        Input {
            label: field.label().to_string(),
            input_type: "number",
            value,
            on_input: move |evt: FormEvent| {
                let next = composer.write().change_number(field, &evt.value());
                on_change.call(next);
            },
        }
    }
}

/// Free text or a `date` input, depending on `input_type`.
#[component]
fn TextFilter<K: FilterKey>(
    composer: Signal<FilterComposer<K>>,
    field: K,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] placeholder: String,
    on_change: EventHandler<FilterSet<K>>,
) -> Element {
    let value = shown_text(composer.read().current(), field);
    rsx! {
        Input {
            label: field.label().to_string(),
            input_type,
            placeholder,
            value,
            on_input: move |evt: FormEvent| {
                let next = composer.write().change(field, text_value(&evt.value()));
                on_change.call(next);
            },
        }
    }
}

/// Panel chrome: toggle with active count, field grid, and removable chips.
#[component]
fn FilterFrame<K: FilterKey>(
    composer: Signal<FilterComposer<K>>,
    on_change: EventHandler<FilterSet<K>>,
    on_reset: EventHandler<FilterSet<K>>,
    children: Element,
) -> Element {
    let mut expanded = use_signal(|| false);
    let active = composer.read().active_count();
    let chips = composer.read().current().chips();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./filter_panel.css") }
        div { class: "filter-panel",
            div { class: "filter-panel-bar",
                Button {
                    variant: ButtonVariant::Outline,
                    size: ButtonSize::Small,
                    onclick: move |_| expanded.toggle(),
                    Icon::<LdFilter> { icon: LdFilter, width: 14, height: 14 }
                    "Filters"
                    if active > 0 {
                        Badge { variant: BadgeVariant::Info, "{active}" }
                    }
                }
                for chip in chips {
                    span { class: "filter-chip", key: "{chip.label}",
                        "{chip.label}"
                        button {
                            class: "filter-chip-remove",
                            title: "Remove filter",
                            onclick: move |_| {
                                let next = composer.write().remove_chip(&chip);
                                on_change.call(next);
                            },
                            Icon::<LdX> { icon: LdX, width: 12, height: 12 }
                        }
                    }
                }
                if active > 0 {
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        onclick: move |_| {
                            let next = composer.write().reset();
                            on_reset.call(next);
                        },
                        "Reset"
                    }
                }
            }
            if expanded() {
                div { class: "filter-panel-grid", {children} }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

#[component]
pub fn BidFilterPanel(
    filters: BidFilters,
    on_change: EventHandler<BidFilters>,
    on_reset: EventHandler<BidFilters>,
) -> Element {
    let composer = use_composer(&filters);
    rsx! {
        FilterFrame { composer, on_change, on_reset,
            SelectFilter {
                composer,
                field: BidFilterKey::Status,
                all_label: "All statuses",
                options: Choice::from_values(BID_FILTER_STATUSES),
                on_change,
            }
            SelectFilter {
                composer,
                field: BidFilterKey::TradeType,
                all_label: "All trades",
                options: Choice::from_values(TRADE_TYPES),
                on_change,
            }
            NumberFilter { composer, field: BidFilterKey::BudgetMin, on_change }
            NumberFilter { composer, field: BidFilterKey::BudgetMax, on_change }
            TextFilter { composer, field: BidFilterKey::DeadlineFrom, input_type: "date", on_change }
            TextFilter { composer, field: BidFilterKey::DeadlineTo, input_type: "date", on_change }
            TextFilter { composer, field: BidFilterKey::CreatedBy, placeholder: "User ID", on_change }
        }
    }
}

#[component]
pub fn JobFilterPanel(
    filters: JobFilters,
    on_change: EventHandler<JobFilters>,
    on_reset: EventHandler<JobFilters>,
) -> Element {
    let composer = use_composer(&filters);
    rsx! {
        FilterFrame { composer, on_change, on_reset,
            SelectFilter {
                composer,
                field: JobFilterKey::Status,
                all_label: "All statuses",
                options: Choice::from_values(JOB_FILTER_STATUSES),
                on_change,
            }
            SelectFilter {
                composer,
                field: JobFilterKey::TradeType,
                all_label: "All trades",
                options: Choice::from_values(TRADE_TYPES),
                on_change,
            }
            TextFilter { composer, field: JobFilterKey::DateFrom, input_type: "date", on_change }
            TextFilter { composer, field: JobFilterKey::DateTo, input_type: "date", on_change }
            NumberFilter { composer, field: JobFilterKey::BudgetMin, on_change }
            NumberFilter { composer, field: JobFilterKey::BudgetMax, on_change }
            TextFilter { composer, field: JobFilterKey::Location, placeholder: "City or region", on_change }
            TextFilter { composer, field: JobFilterKey::PostedBy, placeholder: "User ID", on_change }
        }
    }
}

#[component]
pub fn UserFilterPanel(
    filters: UserFilters,
    on_change: EventHandler<UserFilters>,
    on_reset: EventHandler<UserFilters>,
) -> Element {
    let composer = use_composer(&filters);
    rsx! {
        FilterFrame { composer, on_change, on_reset,
            TextFilter { composer, field: UserFilterKey::Search, placeholder: "Name, email or role", on_change }
            SelectFilter {
                composer,
                field: UserFilterKey::Role,
                all_label: "All roles",
                options: Choice::from_pairs(USER_FILTER_ROLES),
                on_change,
            }
            SelectFilter {
                composer,
                field: UserFilterKey::Status,
                all_label: "All statuses",
                options: Choice::from_values(USER_STATUSES),
                on_change,
            }
            SelectFilter {
                composer,
                field: UserFilterKey::VerificationStatus,
                all_label: "Any verification",
                options: Choice::from_values(VERIFICATION_STATUSES),
                on_change,
            }
            TextFilter { composer, field: UserFilterKey::DateFrom, input_type: "date", on_change }
            TextFilter { composer, field: UserFilterKey::DateTo, input_type: "date", on_change }
            NumberFilter { composer, field: UserFilterKey::TrustScoreMin, on_change }
            NumberFilter { composer, field: UserFilterKey::TrustScoreMax, on_change }
            TextFilter { composer, field: UserFilterKey::Location, placeholder: "City or region", on_change }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_clears_the_key() {
        assert_eq!(text_value("   "), None);
        assert_eq!(text_value(" Austin "), Some(FilterValue::text("Austin")));
    }

    #[test]
    fn select_shows_sentinel_when_unset() {
        let filters = JobFilters::new().with(JobFilterKey::TradeType, FilterValue::text("plumbing"));
        assert_eq!(shown_select(&filters, JobFilterKey::Status), "all");
        assert_eq!(shown_select(&filters, JobFilterKey::TradeType), "plumbing");
    }

    #[test]
    fn numbers_display_without_trailing_zeros() {
        let filters = BidFilters::new().with(BidFilterKey::BudgetMin, FilterValue::Number(2500.0));
        assert_eq!(shown_text(&filters, BidFilterKey::BudgetMin), "2500");
        assert_eq!(shown_text(&filters, BidFilterKey::BudgetMax), "");
    }
}
