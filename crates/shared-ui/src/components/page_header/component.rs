use dioxus::prelude::*;

/// Top of a feature page: title, optional one-line description, and action
/// buttons on the right.
#[component]
pub fn PageHeader(
    title: String,
    description: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "page-header",
            div {
                h1 { class: "page-title", "{title}" }
                if let Some(description) = description {
                    p { class: "page-description", "{description}" }
                }
            }
            div { class: "page-actions", {children} }
        }
    }
}
