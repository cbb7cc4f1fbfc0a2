use dioxus::prelude::*;

/// Labelled multi-line input for reasons, messages and template bodies.
#[component]
pub fn Textarea(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = 3)] rows: u32,
    #[props(default = false)] disabled: bool,
    #[props(default = false)] required: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "textarea", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label { class: "textarea-field",
            if !label.is_empty() {
                span { class: "textarea-label",
                    "{label}"
                    if required {
                        span { class: "textarea-required", " *" }
                    }
                }
            }
            textarea {
                value,
                placeholder,
                disabled,
                rows: "{rows}",
                oninput: move |evt| on_input.call(evt),
                ..merged,
            }
        }
    }
}
