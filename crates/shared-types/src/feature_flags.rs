use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional admin sections are shown.
///
/// Loaded from `config.toml` at startup. Every field defaults to `true` so
/// that a missing or incomplete config file shows the full console.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureFlags {
    #[serde(default = "enabled")]
    pub escrow_actions: bool,
    #[serde(default = "enabled")]
    pub seo: bool,
    #[serde(default = "enabled")]
    pub referrals: bool,
}

fn enabled() -> bool {
    true
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            escrow_actions: true,
            seo: true,
            referrals: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_all_true() {
        let flags = FeatureFlags::default();
        assert!(flags.escrow_actions);
        assert!(flags.seo);
        assert!(flags.referrals);
    }

    #[test]
    fn deserialize_json_with_missing_fields_defaults() {
        let flags: FeatureFlags = serde_json::from_str("{}").unwrap();
        assert_eq!(flags, FeatureFlags::default());
    }

    #[test]
    fn deserialize_partial_json() {
        let flags: FeatureFlags = serde_json::from_str(r#"{"seo":false}"#).unwrap();
        assert!(!flags.seo);
        assert!(flags.referrals);
    }
}
