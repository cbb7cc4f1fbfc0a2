use dioxus::prelude::*;
use dioxus_primitives::progress as prim;

#[component]
pub fn Progress(mut props: prim::ProgressProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "progress", None, false));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::Progress { ..props }
    }
}

#[component]
pub fn ProgressIndicator(mut props: prim::ProgressIndicatorProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "progress-fill", None, false));

    rsx! {
        prim::ProgressIndicator { ..props }
    }
}

/// Percentage bar with the rounded figure beside it. `percent` is clamped to 0..=100.
#[component]
pub fn PercentBar(percent: f64) -> Element {
    let value = percent.clamp(0.0, 100.0);
    rsx! {
        div { class: "percent-bar",
            Progress { value: Some(value), max: 100.0,
                ProgressIndicator {}
            }
            span { class: "percent-bar-label", "{value:.0}%" }
        }
    }
}
