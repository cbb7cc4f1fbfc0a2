use dioxus::prelude::*;

/// One `<option>` of a `FormSelect`.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Options whose label is the value with underscores spaced out and
    /// the first letter capitalised.
    pub fn from_values(values: &[&str]) -> Vec<Choice> {
        values.iter().map(|v| Choice::new(*v, humanize(v))).collect()
    }

    /// Options from `(value, label)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Vec<Choice> {
        pairs.iter().map(|(v, l)| Choice::new(*v, *l)).collect()
    }
}

pub fn humanize(value: &str) -> String {
    let spaced = value.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Native `<select>` for filters and form fields.
///
/// `options` are `(value, label)` pairs. When `all_label` is set a leading
/// option with value `"all"` is rendered, which filter code treats as "no
/// filter".
#[component]
pub fn FormSelect(
    #[props(default)] value: String,
    #[props(default)] onchange: Option<EventHandler<Event<FormData>>>,
    #[props(default)] label: String,
    all_label: Option<String>,
    #[props(default)] options: Vec<Choice>,
    #[props(default = false)] disabled: bool,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label { class: "form-select-field",
            if !label.is_empty() {
                span { class: "form-select-label", "{label}" }
            }
            select {
                class: "form-select",
                value: value.clone(),
                disabled,
                onchange: move |evt| {
                    if let Some(handler) = &onchange {
                        handler.call(evt);
                    }
                },
                if let Some(all) = all_label {
                    option { value: "all", selected: value == "all" || value.is_empty(), "{all}" }
                }
                for choice in options {
                    option {
                        value: "{choice.value}",
                        selected: choice.value == value,
                        "{choice.label}"
                    }
                }
                {children}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn choices_from_values_are_humanized() {
        assert_eq!(
            Choice::from_values(&["in_progress", "open"]),
            vec![Choice::new("in_progress", "In progress"), Choice::new("open", "Open")]
        );
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn all_option_selected_for_sentinel() {
        let html = dioxus_ssr::render_element(rsx! {
            FormSelect {
                value: "all",
                all_label: "All statuses",
                options: Choice::from_values(&["open"]),
            }
        });
        assert!(html.contains("All statuses"));
        assert!(html.contains(r#"value="open""#));
    }
}
