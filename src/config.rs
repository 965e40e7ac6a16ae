//! Application configuration.
//!
//! Values are layered, later sources winning:
//! 1. Build environment (`GISTDA_API_KEY`, `PUBLIC_APP_URL`)
//! 2. [`MapSettings`] from localStorage
//! 3. URL query parameters

use crate::state::settings::MapSettings;
use crate::state::url_state::UrlParams;
use std::time::Duration;

/// Errors raised while assembling the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No GISTDA API key was provided by any source.
    MissingApiKey,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingApiKey => write!(
                f,
                "GISTDA API key missing: build with GISTDA_API_KEY set or open the page with ?key=..."
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Values baked in at build time.
#[derive(Debug, Default, Clone)]
pub struct BuildEnv {
    pub api_key: Option<&'static str>,
    pub public_base_url: Option<&'static str>,
}

impl BuildEnv {
    pub fn current() -> Self {
        Self {
            api_key: option_env!("GISTDA_API_KEY"),
            public_base_url: option_env!("PUBLIC_APP_URL"),
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// GISTDA sphere API key
    pub api_key: String,
    /// Public URL of the deployed page, used for share links
    pub public_base_url: Option<String>,
    /// Time allowed for the SDK to load and become ready
    pub load_timeout: Duration,
    /// Location selected on startup
    pub initial_selection: Option<String>,
}

impl AppConfig {
    /// Loads configuration from every source available on this platform.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(
            &BuildEnv::current(),
            &MapSettings::load(),
            &crate::state::url_state::parse_from_url(),
        )
    }

    pub fn resolve(
        env: &BuildEnv,
        settings: &MapSettings,
        url: &UrlParams,
    ) -> Result<Self, ConfigError> {
        let api_key = url
            .api_key
            .as_deref()
            .or(env.api_key)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?
            .to_string();

        let public_base_url = env
            .public_base_url
            .map(|u| u.trim().trim_end_matches('/'))
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        let initial_selection = url
            .location
            .clone()
            .or_else(|| settings.initial_selection.clone());

        Ok(Self {
            api_key,
            public_base_url,
            load_timeout: Duration::from_secs(settings.load_timeout_secs),
            initial_selection,
        })
    }

    /// Shareable link to a location, if a public URL is configured.
    pub fn share_link(&self, location_id: &str) -> Option<String> {
        self.public_base_url.as_ref().map(|base| {
            format!(
                "{}/{}",
                base,
                crate::state::url_state::selection_query(location_id)
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(key: Option<&'static str>) -> BuildEnv {
        BuildEnv {
            api_key: key,
            public_base_url: Some("https://oasis-h.example/"),
        }
    }

    #[test]
    fn test_missing_key() {
        let result = AppConfig::resolve(&env(None), &MapSettings::default(), &UrlParams::default());
        assert_eq!(result, Err(ConfigError::MissingApiKey));

        let blank = AppConfig::resolve(&env(Some("  ")), &MapSettings::default(), &UrlParams::default());
        assert_eq!(blank, Err(ConfigError::MissingApiKey));
    }

    #[test]
    fn test_url_overrides_build_env() {
        let url = UrlParams {
            api_key: Some("from-url".to_string()),
            location: Some("A1".to_string()),
        };
        let settings = MapSettings {
            load_timeout_secs: 12,
            initial_selection: Some("B2".to_string()),
        };

        let config = AppConfig::resolve(&env(Some("from-build")), &settings, &url).unwrap();
        assert_eq!(config.api_key, "from-url");
        assert_eq!(config.initial_selection.as_deref(), Some("A1"));
        assert_eq!(config.load_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_url_key_survives_selection() {
        let url = UrlParams::from_query("?key=abc&loc=A1");
        let after_click = UrlParams::from_query(&crate::state::url_state::reload_query(&url, "B1"));

        let config = AppConfig::resolve(&env(None), &MapSettings::default(), &after_click).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.initial_selection.as_deref(), Some("B1"));

        // Shared links never carry the key
        assert_eq!(
            config.share_link("B1").as_deref(),
            Some("https://oasis-h.example/?loc=B1")
        );
    }

    #[test]
    fn test_defaults() {
        let config =
            AppConfig::resolve(&env(Some("k")), &MapSettings::default(), &UrlParams::default())
                .unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.initial_selection, None);
        assert_eq!(config.load_timeout, Duration::from_secs(30));
        assert_eq!(
            config.share_link("B1").as_deref(),
            Some("https://oasis-h.example/?loc=B1")
        );
    }
}
