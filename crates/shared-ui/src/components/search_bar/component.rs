use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdSearch;
use dioxus_free_icons::Icon;

/// Search box with a leading magnifier icon. Reports every keystroke.
#[component]
pub fn SearchInput(
    value: String,
    on_search: EventHandler<String>,
    #[props(default = "Search...".to_string())] placeholder: String,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "search-input",
            Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 }
            input {
                r#type: "search",
                value,
                placeholder,
                oninput: move |evt: FormEvent| on_search.call(evt.value()),
            }
        }
    }
}

/// Flex row holding a search box, filter selects and action buttons.
#[component]
pub fn SearchBar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "search-bar",
            {children}
        }
    }
}
