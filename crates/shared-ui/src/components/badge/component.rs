use dioxus::prelude::*;

/// Colour family for a badge. Status badges pick one with `BadgeVariant::for_status`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BadgeVariant {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
    Outline,
}

impl BadgeVariant {
    fn class(&self) -> &'static str {
        match self {
            BadgeVariant::Neutral => "neutral",
            BadgeVariant::Info => "info",
            BadgeVariant::Success => "success",
            BadgeVariant::Warning => "warning",
            BadgeVariant::Danger => "danger",
            BadgeVariant::Outline => "outline",
        }
    }

    /// Variant for a lifecycle or priority value as the admin API spells it.
    pub fn for_status(status: &str) -> Self {
        match status {
            "active" | "open" | "completed" | "verified" | "resolved" | "approved" | "awarded"
            | "released" | "low" => BadgeVariant::Success,
            "pending" | "in_review" | "in_progress" | "investigating" | "unverified" | "normal" => {
                BadgeVariant::Info
            }
            "frozen" | "on_hold" | "escalated" | "high" | "inactive" | "locked" => BadgeVariant::Warning,
            "suspended" | "cancelled" | "failed" | "deleted" | "urgent" | "critical" | "rejected"
            | "removed" => BadgeVariant::Danger,
            _ => BadgeVariant::Neutral,
        }
    }
}

/// Inline label for statuses, priorities and counts.
#[component]
pub fn Badge(
    #[props(default)] variant: BadgeVariant,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![
        Attribute::new("class", "badge", None, false),
        Attribute::new("data-variant", variant.class(), None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        span {
            ..merged,
            {children}
        }
    }
}

/// Badge whose colour and text both come from a status string, with
/// underscores shown as spaces.
#[component]
pub fn StatusBadge(status: String) -> Element {
    let variant = BadgeVariant::for_status(&status);
    let text = status.replace('_', " ");
    rsx! {
        Badge { variant, "{text}" }
    }
}
