use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoSettings {
    #[serde(default = "default_sitemap")]
    pub sitemap_enabled: bool,
    #[serde(default)]
    pub robots_txt: String,
    #[serde(default)]
    pub meta_tags: BTreeMap<String, String>,
    #[serde(default)]
    pub schema_markup: serde_json::Value,
}

fn default_sitemap() -> bool {
    true
}

impl Default for SeoSettings {
    fn default() -> Self {
        Self {
            sitemap_enabled: true,
            robots_txt: String::new(),
            meta_tags: BTreeMap::new(),
            schema_markup: serde_json::Value::Object(Default::default()),
        }
    }
}

/// Settings payload, sent either bare or under a `settings` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeoSettingsPayload {
    Wrapped { settings: SeoSettings },
    Bare(SeoSettings),
}

impl SeoSettingsPayload {
    pub fn into_settings(self) -> SeoSettings {
        match self {
            SeoSettingsPayload::Wrapped { settings } => settings,
            SeoSettingsPayload::Bare(settings) => settings,
        }
    }
}

/// Parse `name: content` lines into a meta tag map. Blank and malformed lines are skipped.
pub fn parse_meta_tags(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}

pub fn format_meta_tags(tags: &BTreeMap<String, String>) -> String {
    tags.iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_tags_text_roundtrip() {
        let text = "description: Find vetted contractors\n\nkeywords: roofing, hvac\nbroken line";
        let tags = parse_meta_tags(text);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags["keywords"], "roofing, hvac");
        assert_eq!(
            format_meta_tags(&tags),
            "description: Find vetted contractors\nkeywords: roofing, hvac"
        );
    }

    #[test]
    fn settings_payload_shapes() {
        let wrapped: SeoSettingsPayload =
            serde_json::from_str(r#"{"settings":{"robots_txt":"User-agent: *"}}"#).unwrap();
        let s = wrapped.into_settings();
        assert!(s.sitemap_enabled);
        assert_eq!(s.robots_txt, "User-agent: *");
    }
}
