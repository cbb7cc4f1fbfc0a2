use dioxus::prelude::*;
use shared_types::Period;
use shared_ui::{Choice, FormSelect};

/// Reporting period picker for the analytics and payments dashboards.
#[component]
pub fn PeriodSelect(value: Period, on_change: EventHandler<Period>) -> Element {
    let options = Period::ALL
        .iter()
        .map(|p| Choice::new(p.as_str(), p.label()))
        .collect::<Vec<_>>();

    rsx! {
        FormSelect {
            value: value.as_str().to_string(),
            options,
            onchange: move |evt: FormEvent| {
                if let Some(period) = Period::parse(&evt.value()) {
                    on_change.call(period);
                }
            },
        }
    }
}
