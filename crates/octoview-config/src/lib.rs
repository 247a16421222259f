//! Settings loading and application wiring for octoview.
//!
//! TOML settings file + `OCTOVIEW_*` environment overrides, merged over
//! serialized defaults with figment, and translation into a ready
//! [`AppContext`] (clients built, keyring token store attached).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use octoview_api::{IdentityClient, IssuesClient, MessageCatalog, TransportConfig};
use octoview_core::{AppContext, KeyringTokenStore, TokenStore};

/// Keyring service name under which the session token is stored.
pub const KEYRING_SERVICE: &str = "octoview";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize settings: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("settings loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] octoview_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML settings struct ────────────────────────────────────────────

/// Top-level TOML settings.
#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Identity backend API root.
    #[serde(default = "default_identity_url")]
    pub identity_url: String,

    /// Issue-tracking API root.
    #[serde(default = "default_issues_url")]
    pub issues_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Extra backend-message → user-facing message mappings, merged over
    /// the built-in catalog.
    #[serde(default)]
    pub catalog_overrides: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            identity_url: default_identity_url(),
            issues_url: default_issues_url(),
            timeout_secs: default_timeout(),
            catalog_overrides: HashMap::new(),
        }
    }
}

fn default_identity_url() -> String {
    "http://localhost:1337/api".into()
}
fn default_issues_url() -> String {
    "https://api.github.com".into()
}
fn default_timeout() -> u64 {
    30
}

// ── Settings file path ──────────────────────────────────────────────

/// Resolve the settings file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "octoview", "octoview").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("settings.toml");
            p
        },
        |dirs| dirs.config_dir().join("settings.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("octoview");
    p
}

// ── Settings loading / saving ───────────────────────────────────────

/// Load settings from file + environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("OCTOVIEW_"));

    let settings: Settings = figment.extract()?;
    Ok(settings)
}

/// Load settings, returning the defaults if the file doesn't exist or
/// doesn't parse.
pub fn load_settings_or_default() -> Settings {
    load_settings().unwrap_or_default()
}

/// Serialize settings to TOML and write to the canonical path.
pub fn save_settings(settings: &Settings) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(settings)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Wiring ──────────────────────────────────────────────────────────

/// Build a ready [`AppContext`] from settings: HTTP clients with the
/// configured endpoints and timeout, the message catalog extended by any
/// configured overrides, and the keyring token store.
pub fn settings_to_context(settings: &Settings) -> Result<AppContext, ConfigError> {
    let identity_url: Url =
        settings
            .identity_url
            .parse()
            .map_err(|_| ConfigError::Validation {
                field: "identity_url".into(),
                reason: format!("invalid URL: {}", settings.identity_url),
            })?;
    let issues_url: Url = settings
        .issues_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "issues_url".into(),
            reason: format!("invalid URL: {}", settings.issues_url),
        })?;

    let transport = TransportConfig {
        timeout: Duration::from_secs(settings.timeout_secs),
        ..TransportConfig::default()
    };

    let mut catalog = MessageCatalog::default();
    catalog.extend_overrides(settings.catalog_overrides.clone());

    let identity = IdentityClient::new(identity_url, &transport, catalog)?;
    let issues = IssuesClient::new(issues_url, &transport)?;
    let tokens: Arc<dyn TokenStore> = Arc::new(KeyringTokenStore::new(KEYRING_SERVICE));

    Ok(AppContext::new(identity, issues, tokens))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_point_at_local_backend_and_public_api() {
        let settings = Settings::default();
        assert_eq!(settings.identity_url, "http://localhost:1337/api");
        assert_eq!(settings.issues_url, "https://api.github.com");
        assert_eq!(settings.timeout_secs, 30);
        assert!(settings.catalog_overrides.is_empty());
    }

    #[test]
    fn toml_overrides_the_defaults() {
        let figment = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::string(
                r#"
                identity_url = "https://auth.example.com/api"
                timeout_secs = 5

                [catalog_overrides]
                "Invalid identifier or password" = "Wrong login"
                "#,
            ));

        let settings: Settings = figment.extract().unwrap();
        assert_eq!(settings.identity_url, "https://auth.example.com/api");
        assert_eq!(settings.issues_url, "https://api.github.com");
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(
            settings
                .catalog_overrides
                .get("Invalid identifier or password")
                .map(String::as_str),
            Some("Wrong login")
        );
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let mut settings = Settings::default();
        settings
            .catalog_overrides
            .insert("Quota exceeded".into(), "Too many requests".into());

        let text = toml::to_string_pretty(&settings).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();

        assert_eq!(back.identity_url, settings.identity_url);
        assert_eq!(back.timeout_secs, settings.timeout_secs);
        assert_eq!(
            back.catalog_overrides.get("Quota exceeded").map(String::as_str),
            Some("Too many requests")
        );
    }

    #[test]
    fn invalid_identity_url_is_rejected_with_the_field_name() {
        let settings = Settings {
            identity_url: "not a url".into(),
            ..Settings::default()
        };

        match settings_to_context(&settings) {
            Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "identity_url"),
            Err(other) => panic!("expected Validation error, got: {other:?}"),
            Ok(_) => panic!("expected Validation error, got a context"),
        }
    }
}
