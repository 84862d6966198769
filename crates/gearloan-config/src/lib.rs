//! Shared configuration for gearloan.
//!
//! TOML profiles, environment overrides, and translation to
//! `gearloan_core::StoreConfig`. The CLI layers its flags on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gearloan_core::{StatusLabels, StoreConfig, TlsVerification};

/// Prefix for environment overrides, e.g. `GEARLOAN_DEFAULT_PROFILE`.
pub const ENV_PREFIX: &str = "GEARLOAN_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named record store profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Profile names, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.into(),
                available: self.available(),
            })
    }

    /// Make `name` the default profile. It must already exist.
    pub fn use_profile(&mut self, name: &str) -> Result<(), ConfigError> {
        self.profile(name)?;
        self.default_profile = Some(name.into());
        Ok(())
    }

    fn available(&self) -> String {
        let names = self.profile_names();
        if names.is_empty() {
            "(none)".into()
        } else {
            names.join(", ")
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: None,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// A named record store profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Read/write endpoint (e.g., "https://script.google.com/macros/s/…/exec").
    pub endpoint: String,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Skip TLS verification.
    pub insecure: Option<bool>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Status cell text meaning "ready to lend".
    pub ready_label: Option<String>,

    /// Status cell text meaning "on loan".
    pub borrowed_label: Option<String>,
}

/// Keys accepted by [`Profile::set`].
pub const PROFILE_KEYS: &[&str] = &[
    "endpoint",
    "timeout",
    "insecure",
    "ca_cert",
    "ready_label",
    "borrowed_label",
];

impl Profile {
    /// Set one field from its string form. Dashes and underscores are
    /// interchangeable in `key`.
    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key.replace('-', "_").as_str() {
            "endpoint" => {
                parse_endpoint(&value)?;
                self.endpoint = value;
            }
            "timeout" => {
                self.timeout = Some(value.parse().map_err(|_| ConfigError::Validation {
                    field: "timeout".into(),
                    reason: "must be a number (seconds)".into(),
                })?);
            }
            "insecure" => {
                self.insecure = Some(value.parse().map_err(|_| ConfigError::Validation {
                    field: "insecure".into(),
                    reason: "must be 'true' or 'false'".into(),
                })?);
            }
            "ca_cert" => self.ca_cert = Some(value.into()),
            "ready_label" => self.ready_label = Some(non_blank("ready_label", value)?),
            "borrowed_label" => self.borrowed_label = Some(non_blank("borrowed_label", value)?),
            other => {
                return Err(ConfigError::Validation {
                    field: other.into(),
                    reason: format!(
                        "unknown config key '{other}'. Valid keys: {}",
                        PROFILE_KEYS.join(", ")
                    ),
                });
            }
        }
        Ok(())
    }

    /// Status vocabulary, falling back to the defaults per label.
    pub fn labels(&self) -> StatusLabels {
        let defaults = StatusLabels::default();
        StatusLabels {
            ready: self.ready_label.clone().unwrap_or(defaults.ready),
            borrowed: self.borrowed_label.clone().unwrap_or(defaults.borrowed),
        }
    }
}

fn non_blank(field: &str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::Validation {
            field: field.into(),
            reason: "cannot be empty".into(),
        })
    } else {
        Ok(value)
    }
}

/// Parse an endpoint URL, accepting only http(s).
pub fn parse_endpoint(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "endpoint".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Validation {
            field: "endpoint".into(),
            reason: format!("unsupported scheme '{other}' (expected http or https)"),
        }),
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "gearloan", "gearloan").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("gearloan");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn file_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = file_figment(&config_path()).merge(Env::prefixed(ENV_PREFIX).split("__"));
    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config from a specific file, without environment overrides.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = file_figment(path).extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `StoreConfig` from a profile and the global defaults.
///
/// `insecure` wins over `ca_cert`. The profile timeout wins over the
/// default one; with neither set, requests have no timeout.
pub fn profile_to_store_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<StoreConfig, ConfigError> {
    let endpoint = parse_endpoint(&profile.endpoint)?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(StoreConfig {
        endpoint,
        tls,
        timeout: profile.timeout.or(defaults.timeout).map(Duration::from_secs),
        labels: profile.labels(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn profile(endpoint: &str) -> Profile {
        Profile {
            endpoint: endpoint.into(),
            ..Profile::default()
        }
    }

    #[test]
    fn round_trips_through_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        let mut office = profile("https://store.example/exec");
        office.set("ready-label", "Available".into()).unwrap();
        office.set("timeout", "15".into()).unwrap();
        cfg.profiles.insert("office".into(), office);
        cfg.use_profile("office").unwrap();
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.default_profile.as_deref(), Some("office"));
        let office = loaded.profile("office").unwrap();
        assert_eq!(office.endpoint, "https://store.example/exec");
        assert_eq!(office.timeout, Some(15));
        assert_eq!(office.labels().ready, "Available");
        assert_eq!(office.labels().borrowed, StatusLabels::default().borrowed);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.output, "table");
        assert!(cfg.defaults.timeout.is_none());
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn reads_hand_written_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "lab"

[defaults]
output = "json"
timeout = 20

[profiles.lab]
endpoint = "http://localhost:8080/exec"
insecure = true
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.defaults.output, "json");
        let store = profile_to_store_config(cfg.profile("lab").unwrap(), &cfg.defaults).unwrap();
        assert_eq!(store.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(store.timeout, Some(Duration::from_secs(20)));
        assert_eq!(store.labels, StatusLabels::default());
    }

    #[test]
    fn store_config_has_no_timeout_by_default() {
        let store =
            profile_to_store_config(&profile("https://store.example/exec"), &Defaults::default())
                .unwrap();
        assert!(store.timeout.is_none());
        assert_eq!(store.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn rejects_bad_endpoints() {
        assert!(parse_endpoint("not a url").is_err());
        assert!(parse_endpoint("ftp://store.example/").is_err());
        assert!(parse_endpoint("https://store.example/exec").is_ok());
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut p = Profile::default();
        assert!(matches!(
            p.set("colour", "red".into()),
            Err(ConfigError::Validation { .. })
        ));
        assert!(p.set("timeout", "soon".into()).is_err());
        assert!(p.set("borrowed_label", "  ".into()).is_err());
        p.set("ca-cert", "/etc/ssl/store.pem".into()).unwrap();
        assert_eq!(p.ca_cert, Some(PathBuf::from("/etc/ssl/store.pem")));
    }

    #[test]
    fn use_profile_requires_existing_profile() {
        let mut cfg = Config::default();
        cfg.profiles.insert("b".into(), profile("https://b.example/"));
        cfg.profiles.insert("a".into(), profile("https://a.example/"));

        match cfg.use_profile("c").unwrap_err() {
            ConfigError::ProfileNotFound { available, .. } => assert_eq!(available, "a, b"),
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
    }
}
