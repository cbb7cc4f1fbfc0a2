use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        div { class: "not-found-page",
            div { class: "not-found-code", "404" }
            h1 { "Page not found" }
            p {
                "Nothing lives at "
                code { "{path}" }
                "."
            }
            Link { to: Route::Overview {}, class: "not-found-link", "Back to the dashboard" }
        }
    }
}
