use dioxus::prelude::*;
use dioxus_primitives::checkbox as prim;

pub use prim::CheckboxState;

#[component]
pub fn Checkbox(mut props: prim::CheckboxProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "checkbox", None, false));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::Checkbox { ..props }
    }
}

/// Check mark drawn inside a `Checkbox` while it is checked.
#[component]
pub fn CheckboxMark() -> Element {
    rsx! {
        prim::CheckboxIndicator { class: "checkbox-mark",
            svg {
                xmlns: "http://www.w3.org/2000/svg",
                width: "12",
                height: "12",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "3",
                path { d: "M20 6L9 17l-5-5" }
            }
        }
    }
}

/// Row-selection checkbox driven by a plain `bool`.
#[component]
pub fn SelectCheckbox(checked: bool, on_toggle: EventHandler<bool>) -> Element {
    let state = if checked { CheckboxState::Checked } else { CheckboxState::Unchecked };
    rsx! {
        Checkbox {
            checked: state,
            on_checked_change: move |next: CheckboxState| on_toggle.call(next == CheckboxState::Checked),
            CheckboxMark {}
        }
    }
}
