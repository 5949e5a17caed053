//! Client configuration.
//!
//! A [`Config`] is a partial set of overrides; [`Settings`] is the finalized,
//! immutable record a client uses for every call. Resolution layers three
//! sources, lowest precedence first:
//!
//! 1. built-in defaults (service root address, `POST`, crate user agent),
//! 2. process-wide defaults edited through [`configure`],
//! 3. the per-instance overrides handed to the client builder.

use crate::{Error, ErrorContext, Result};
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_BASE_URI: &str = "https://api.aylien.com/api/v1";

pub const DEFAULT_USER_AGENT: &str = concat!("aylien-textapi-rust/", env!("CARGO_PKG_VERSION"));

/// HTTP method used to call the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    #[default]
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            other => Err(Error::configuration_with_context(
                format!("unsupported request method '{}'", other),
                ErrorContext::new()
                    .with_field_path("config.method")
                    .with_details("expected GET or POST")
                    .with_source("config"),
            )),
        }
    }
}

/// Partial configuration. Every `None` falls through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, alias = "appId", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, alias = "appKey", skip_serializing_if = "Option::is_none")]
    pub app_key: Option<String>,
    #[serde(default, alias = "baseUri", skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
    #[serde(default, alias = "userAgent", skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = Some(app_key.into());
        self
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Overlay `other` on top of `self`: keys set in `other` win.
    pub fn merge(&self, other: &Config) -> Config {
        Config {
            app_id: other.app_id.clone().or_else(|| self.app_id.clone()),
            app_key: other.app_key.clone().or_else(|| self.app_key.clone()),
            base_uri: other.base_uri.clone().or_else(|| self.base_uri.clone()),
            method: other.method.or(self.method),
            user_agent: other.user_agent.clone().or_else(|| self.user_agent.clone()),
        }
    }

    /// Build from free-form `(key, value)` pairs. Both `snake_case` and
    /// `camelCase` keys are accepted; unknown keys are logged and skipped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut cfg = Config::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "app_id" | "appId" => cfg.app_id = Some(value),
                "app_key" | "appKey" => cfg.app_key = Some(value),
                "base_uri" | "baseUri" => cfg.base_uri = Some(value),
                "method" => cfg.method = Some(value.parse()?),
                "user_agent" | "userAgent" => cfg.user_agent = Some(value),
                other => {
                    tracing::warn!(key = other, "ignoring unknown configuration key");
                }
            }
        }
        Ok(cfg)
    }

    /// Read `TEXTAPI_APP_ID`, `TEXTAPI_APP_KEY`, `TEXTAPI_BASE_URI`,
    /// `TEXTAPI_METHOD` and `TEXTAPI_USER_AGENT`.
    pub fn from_env() -> Result<Self> {
        let pairs = [
            ("app_id", "TEXTAPI_APP_ID"),
            ("app_key", "TEXTAPI_APP_KEY"),
            ("base_uri", "TEXTAPI_BASE_URI"),
            ("method", "TEXTAPI_METHOD"),
            ("user_agent", "TEXTAPI_USER_AGENT"),
        ]
        .into_iter()
        .filter_map(|(key, var)| std::env::var(var).ok().map(|v| (key, v)));
        Self::from_pairs(pairs)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let raw: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str(yaml).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid configuration YAML: {}", e),
                ErrorContext::new().with_source("config_loader"),
            )
        })?;

        let known = [
            "app_id", "appId", "app_key", "appKey", "base_uri", "baseUri", "method", "user_agent",
            "userAgent",
        ];
        for key in raw.keys().filter(|k| !known.contains(&k.as_str())) {
            tracing::warn!(key = key.as_str(), "ignoring unknown configuration key");
        }

        let mut pairs = Vec::new();
        for (key, value) in raw {
            if !known.contains(&key.as_str()) {
                continue;
            }
            let value = match value {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Null => continue,
                other => {
                    return Err(Error::configuration_with_context(
                        "configuration values must be strings",
                        ErrorContext::new()
                            .with_field_path(format!("config.{}", key))
                            .with_details(format!("got {:?}", other))
                            .with_source("config_loader"),
                    ))
                }
            };
            pairs.push((key, value));
        }
        Self::from_pairs(pairs)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }
}

/// Finalized settings for one client.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    pub base_uri: String,
    pub method: Method,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_id: None,
            app_key: None,
            base_uri: DEFAULT_BASE_URI.to_string(),
            method: Method::Post,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

// Keep the application key out of logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_id", &self.app_id)
            .field("app_key", &self.app_key.as_ref().map(|_| "<redacted>"))
            .field("base_uri", &self.base_uri)
            .field("method", &self.method)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Settings {
    /// Resolve `overrides` against the current process-wide defaults.
    pub fn resolve(overrides: &Config) -> Settings {
        Self::resolve_with(&defaults(), overrides)
    }

    /// Resolve against an explicit defaults layer. Pure function of its inputs.
    pub fn resolve_with(process_defaults: &Config, overrides: &Config) -> Settings {
        let merged = process_defaults.merge(overrides);
        let builtin = Settings::default();
        Settings {
            app_id: merged.app_id,
            app_key: merged.app_key,
            base_uri: merged.base_uri.unwrap_or(builtin.base_uri),
            method: merged.method.unwrap_or(builtin.method),
            user_agent: merged.user_agent.unwrap_or(builtin.user_agent),
        }
    }

    /// Check the base URI is an absolute `http(s)` URL.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_uri).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base URI: {}", e),
                ErrorContext::new()
                    .with_field_path("config.base_uri")
                    .with_details(self.base_uri.clone())
                    .with_source("config"),
            )
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::configuration_with_context(
                "base URI must use http or https",
                ErrorContext::new()
                    .with_field_path("config.base_uri")
                    .with_details(self.base_uri.clone())
                    .with_source("config"),
            ));
        }
        Ok(())
    }

    /// Absolute URL for an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_uri.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn has_credentials(&self) -> bool {
        self.app_id.is_some() && self.app_key.is_some()
    }
}

static PROCESS_DEFAULTS: Lazy<ArcSwap<Config>> =
    Lazy::new(|| ArcSwap::from_pointee(Config::default()));

/// Snapshot of the process-wide defaults.
pub fn defaults() -> Config {
    (**PROCESS_DEFAULTS.load()).clone()
}

/// Edit the process-wide defaults. Clients built afterwards pick up the
/// change; existing clients keep the settings they were built with.
pub fn configure<F>(f: F)
where
    F: Fn(&mut Config),
{
    PROCESS_DEFAULTS.rcu(|current| {
        let mut next = current.as_ref().clone();
        f(&mut next);
        Arc::new(next)
    });
}

/// Restore the process-wide defaults to their empty state.
pub fn reset_defaults() {
    PROCESS_DEFAULTS.store(Arc::new(Config::default()));
}
