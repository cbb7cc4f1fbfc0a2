use dioxus::prelude::*;
use dioxus_primitives::tabs as prim;

/// A tab heading with the number of rows behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct CountedTab {
    pub value: String,
    pub label: String,
    pub count: usize,
}

impl CountedTab {
    pub fn new(value: impl Into<String>, label: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            count,
        }
    }
}

/// Horizontal tab strip. The first tab starts selected; pass one `TabPanel`
/// per tab as children, indexed in the same order as `tabs`.
#[component]
pub fn CountedTabs(tabs: Vec<CountedTab>, children: Element) -> Element {
    let default_value = tabs.first().map(|t| t.value.clone()).unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::Tabs { class: "tabs", default_value, horizontal: true,
            prim::TabList { class: "tabs-list",
                for (index, tab) in tabs.into_iter().enumerate() {
                    prim::TabTrigger {
                        key: "{tab.value}",
                        class: "tabs-trigger",
                        value: tab.value.clone(),
                        index,
                        "{tab.label}"
                        span { class: "tabs-count", "{tab.count}" }
                    }
                }
            }
            {children}
        }
    }
}

#[component]
pub fn TabPanel(value: String, index: usize, children: Element) -> Element {
    rsx! {
        prim::TabContent { class: "tabs-panel", value, index,
            {children}
        }
    }
}
