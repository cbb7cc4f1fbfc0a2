use serde::{Deserialize, Serialize};

use crate::feature_flags::FeatureFlags;

/// Port the admin API listens on when reached by bare host.
pub const DEFAULT_API_PORT: u16 = 5000;
pub const PRODUCTION_API_URL: &str = "https://api.marketplace-admin.app";
pub const API_PREFIX: &str = "/api/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// `[api]` section of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub features: FeatureFlags,
}

/// Resolve the API root including the `/api/v1` prefix.
///
/// An explicit URL (environment first, then config) wins. Otherwise the page
/// host decides: local hosts and dotted IPv4 hosts talk to port 5000 on that
/// host, anything else goes to production.
pub fn resolve_api_base(env_url: Option<&str>, configured: Option<&str>, page_host: Option<&str>) -> String {
    let explicit = env_url
        .or(configured)
        .map(str::trim)
        .filter(|u| !u.is_empty());

    let root = match explicit {
        Some(url) => url.trim_end_matches('/').to_string(),
        None => match page_host.map(str::trim) {
            Some("localhost") | Some("127.0.0.1") => format!("http://localhost:{DEFAULT_API_PORT}"),
            Some(host) if is_ipv4(host) => format!("http://{host}:{DEFAULT_API_PORT}"),
            _ => PRODUCTION_API_URL.to_string(),
        },
    };
    format!("{root}{API_PREFIX}")
}

fn is_ipv4(host: &str) -> bool {
    host.parse::<std::net::Ipv4Addr>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.page_size, 50);
    }

    #[test]
    fn deserialize_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://staging.example.com/"

            [features]
            seo = false
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://staging.example.com/"));
        assert_eq!(config.api.page_size, 50);
        assert!(!config.features.seo);
        assert!(config.features.escrow_actions);
    }

    #[test]
    fn env_url_wins_and_trailing_slash_is_trimmed() {
        assert_eq!(
            resolve_api_base(Some("https://api.test/"), Some("https://ignored"), Some("localhost")),
            "https://api.test/api/v1"
        );
        assert_eq!(
            resolve_api_base(None, Some("https://cfg.test"), None),
            "https://cfg.test/api/v1"
        );
    }

    #[test]
    fn blank_explicit_url_falls_through() {
        assert_eq!(
            resolve_api_base(Some("  "), None, Some("127.0.0.1")),
            "http://localhost:5000/api/v1"
        );
    }

    #[test]
    fn host_based_resolution() {
        assert_eq!(resolve_api_base(None, None, Some("localhost")), "http://localhost:5000/api/v1");
        assert_eq!(resolve_api_base(None, None, Some("192.168.1.20")), "http://192.168.1.20:5000/api/v1");
        assert_eq!(
            resolve_api_base(None, None, Some("admin.example.com")),
            "https://api.marketplace-admin.app/api/v1"
        );
        assert_eq!(resolve_api_base(None, None, None), "https://api.marketplace-admin.app/api/v1");
    }
}
