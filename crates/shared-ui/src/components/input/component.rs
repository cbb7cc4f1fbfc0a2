use dioxus::prelude::*;

/// Labelled single-line input. `input_type` passes through to the element
/// (`text`, `number`, `date`, `email`, `password`).
#[component]
pub fn Input(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = false)] disabled: bool,
    #[props(default = false)] required: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "input", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label { class: "field",
            if !label.is_empty() {
                span { class: "field-label",
                    "{label}"
                    if required {
                        span { class: "field-required", " *" }
                    }
                }
            }
            input {
                r#type: "{input_type}",
                value,
                placeholder,
                disabled,
                required,
                oninput: move |evt| on_input.call(evt),
                ..merged,
            }
        }
    }
}
