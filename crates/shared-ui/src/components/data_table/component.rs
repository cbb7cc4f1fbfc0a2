use dioxus::prelude::*;

/// Horizontally scrollable table with co-located styles.
#[component]
pub fn DataTable(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "data-table",
            table {
                {children}
            }
        }
    }
}

/// Header row. Children are `DataTableColumn`s.
#[component]
pub fn DataTableHeader(children: Element) -> Element {
    rsx! {
        thead {
            tr { {children} }
        }
    }
}

#[component]
pub fn DataTableBody(children: Element) -> Element {
    rsx! {
        tbody { {children} }
    }
}

#[component]
pub fn DataTableColumn(#[props(default)] align_end: bool, children: Element) -> Element {
    rsx! {
        th { class: if align_end { "align-end" } else { "" }, {children} }
    }
}

/// Body row. `highlight` marks rows needing attention (overdue, flagged);
/// `selected` marks rows picked for a bulk action.
#[component]
pub fn DataTableRow(
    #[props(default)] selected: bool,
    #[props(default)] highlight: bool,
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let mut class = String::from("data-table-row");
    if onclick.is_some() {
        class.push_str(" clickable");
    }
    if selected {
        class.push_str(" selected");
    }
    if highlight {
        class.push_str(" highlight");
    }

    rsx! {
        tr {
            class,
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn DataTableCell(#[props(default)] align_end: bool, children: Element) -> Element {
    rsx! {
        td { class: if align_end { "align-end" } else { "" }, {children} }
    }
}

/// Single full-width row shown when a table has nothing to list.
#[component]
pub fn DataTableEmpty(colspan: u32, message: String) -> Element {
    rsx! {
        tr { class: "data-table-empty",
            td { colspan: "{colspan}", "{message}" }
        }
    }
}
