use shared_types::{resolve_api_base, AppConfig, FeatureFlags};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Environment variable holding the admin API origin.
pub const API_URL_ENV: &str = "ADMIN_API_URL";

/// Parse config file contents. Unparseable input falls back to defaults.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(error = %e, path = CONFIG_PATH, "Failed to parse config, using defaults");
        AppConfig::default()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn read_config() -> AppConfig {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => parse_config(&contents),
        Err(e) => {
            tracing::info!(error = %e, path = CONFIG_PATH, "Config file not found, using defaults");
            AppConfig::default()
        }
    }
}

// The browser has no filesystem; the file is baked in at build time.
#[cfg(target_arch = "wasm32")]
fn read_config() -> AppConfig {
    parse_config(include_str!("../../../config.toml"))
}

/// Load `config.toml` once and keep it for the life of the process.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let config = read_config();
        tracing::info!(features = ?config.features, page_size = config.api.page_size, "Loaded admin console config");
        config
    })
}

pub fn feature_flags() -> &'static FeatureFlags {
    &load_config().features
}

pub fn page_size() -> u32 {
    load_config().api.page_size.max(1)
}

#[cfg(not(target_arch = "wasm32"))]
fn env_api_url() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(API_URL_ENV).ok()
}

#[cfg(target_arch = "wasm32")]
fn env_api_url() -> Option<String> {
    option_env!("ADMIN_API_URL").map(str::to_string)
}

/// API root for this process, `page_host` being the browser's hostname when
/// there is one.
pub fn api_base_url(page_host: Option<&str>) -> String {
    let env_url = env_api_url();
    resolve_api_base(
        env_url.as_deref(),
        load_config().api.base_url.as_deref(),
        page_host,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_config_uses_defaults() {
        let config = parse_config("[api\nbase_url = ");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn parse_config_reads_flags() {
        let config = parse_config("[features]\nreferrals = false\n");
        assert!(!config.features.referrals);
        assert!(config.features.seo);
    }
}
