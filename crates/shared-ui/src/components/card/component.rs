use dioxus::prelude::*;

/// Bordered panel used for dashboard sections and empty states.
#[component]
pub fn Card(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "card", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        section {
            ..merged,
            {children}
        }
    }
}

/// Title row of a card. `actions` render right-aligned next to the title.
#[component]
pub fn CardHeader(
    title: String,
    description: Option<String>,
    actions: Option<Element>,
) -> Element {
    rsx! {
        header { class: "card-header",
            div { class: "card-heading",
                h3 { class: "card-title", "{title}" }
                if let Some(description) = description {
                    p { class: "card-description", "{description}" }
                }
            }
            if let Some(actions) = actions {
                div { class: "card-actions", {actions} }
            }
        }
    }
}

#[component]
pub fn CardContent(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "card-content", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        div {
            ..merged,
            {children}
        }
    }
}

#[component]
pub fn CardFooter(children: Element) -> Element {
    rsx! {
        footer { class: "card-footer", {children} }
    }
}

/// Card holding a single centred message, for "nothing here" and error states.
#[component]
pub fn EmptyState(message: String, children: Element) -> Element {
    rsx! {
        Card {
            CardContent {
                div { class: "empty-state",
                    p { "{message}" }
                    {children}
                }
            }
        }
    }
}
