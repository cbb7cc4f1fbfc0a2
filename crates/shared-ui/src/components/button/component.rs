use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Outline,
    Ghost,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Danger => "danger",
            ButtonVariant::Outline => "outline",
            ButtonVariant::Ghost => "ghost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
}

impl ButtonSize {
    fn class(&self) -> &'static str {
        match self {
            ButtonSize::Small => "sm",
            ButtonSize::Medium => "md",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    #[props(default)]
    pub variant: ButtonVariant,
    #[props(default)]
    pub size: ButtonSize,
    #[props(default = false)]
    pub disabled: bool,
    /// While true the button is disabled and shows `loading_text` instead of its children.
    #[props(default = false)]
    pub loading: bool,
    #[props(default = "Working...".to_string())]
    pub loading_text: String,
    /// Render as a form submit button instead of a plain button.
    #[props(default = false)]
    pub submit: bool,
    #[props(default)]
    pub onclick: Option<EventHandler<MouseEvent>>,
    #[props(extends = GlobalAttributes)]
    pub attributes: Vec<Attribute>,
    pub children: Element,
}

#[component]
pub fn Button(props: ButtonProps) -> Element {
    let base = vec![
        Attribute::new("class", "button", None, false),
        Attribute::new("data-variant", props.variant.class(), None, false),
        Attribute::new("data-size", props.size.class(), None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, props.attributes]);
    let busy = props.loading;

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        button {
            r#type: if props.submit { "submit" } else { "button" },
            disabled: props.disabled || busy,
            "aria-busy": busy,
            onclick: move |evt| {
                if let Some(handler) = &props.onclick {
                    handler.call(evt);
                }
            },
            ..merged,
            if busy {
                "{props.loading_text}"
            } else {
                {props.children}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_button_is_disabled_and_relabelled() {
        let html = dioxus_ssr::render_element(rsx! {
            Button { loading: true, loading_text: "Saving...", "Save" }
        });
        assert!(html.contains("Saving..."));
        assert!(!html.contains(">Save<"));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn variant_and_size_attributes() {
        let html = dioxus_ssr::render_element(rsx! {
            Button { variant: ButtonVariant::Danger, size: ButtonSize::Small, "Delete" }
        });
        assert!(html.contains(r#"data-variant="danger""#));
        assert!(html.contains(r#"data-size="sm""#));
    }
}
