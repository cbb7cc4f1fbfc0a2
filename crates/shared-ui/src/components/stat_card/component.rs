use dioxus::prelude::*;

/// Tone of a stat card's accent stripe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StatTone {
    #[default]
    Neutral,
    Positive,
    Caution,
    Negative,
}

impl StatTone {
    fn class(&self) -> &'static str {
        match self {
            StatTone::Neutral => "neutral",
            StatTone::Positive => "positive",
            StatTone::Caution => "caution",
            StatTone::Negative => "negative",
        }
    }
}

/// A single headline metric: label, pre-formatted value, optional detail
/// line and icon.
#[component]
pub fn StatCard(
    label: String,
    value: String,
    detail: Option<String>,
    #[props(default)] tone: StatTone,
    icon: Option<Element>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "stat-card", "data-tone": tone.class(),
            div { class: "stat-card-body",
                span { class: "stat-card-label", "{label}" }
                span { class: "stat-card-value", "{value}" }
                if let Some(detail) = detail {
                    span { class: "stat-card-detail", "{detail}" }
                }
            }
            if let Some(icon) = icon {
                div { class: "stat-card-icon", {icon} }
            }
        }
    }
}

/// Responsive grid of `StatCard`s.
#[component]
pub fn StatGrid(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "stat-grid", {children} }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_value_and_detail() {
        let html = dioxus_ssr::render_element(rsx! {
            StatCard {
                label: "Escrow held",
                value: "$1,234.56",
                detail: "3 frozen",
                tone: StatTone::Caution,
            }
        });
        assert!(html.contains("$1,234.56"));
        assert!(html.contains("3 frozen"));
        assert!(html.contains(r#"data-tone="caution""#));
    }
}
