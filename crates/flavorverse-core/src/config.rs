//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `FLAVORVERSE_*`
//! env vars. Provides helpers to expand `~` and `${VAR}` and to resolve
//! relative paths against a known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

pub const ENV_PREFIX: &str = "FLAVORVERSE_";

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    /// Wrap an already assembled figment, e.g. one built in a test.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    /// The `[search]` section layered over the built-in defaults.
    pub fn engine_settings(&self) -> Result<EngineSettings> {
        let figment = Figment::from(Serialized::defaults(EngineSettings::default()))
            .merge(self.figment.focus("search"));
        let settings: EngineSettings = figment
            .extract()
            .map_err(|e| Error::InvalidConfig(format!("Failed to read [search]: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.figment.contains("search") {
            self.engine_settings()?;
        }
        Ok(())
    }
}

/// Tunables for the search engine and its collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Directory holding the JSON content feeds.
    pub content_dir: String,
    /// Maximum number of remembered queries.
    pub history_capacity: usize,
    pub max_suggestions: usize,
    /// How many of `max_suggestions` may come from search history.
    pub history_suggestions: usize,
    /// Result limit applied when a search does not specify one.
    pub default_limit: Option<usize>,
    /// Per-feed load timeout.
    pub load_timeout_ms: u64,
    /// Where filter preferences are persisted, if anywhere.
    pub preferences_path: Option<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            content_dir: "./data".to_string(),
            history_capacity: 100,
            max_suggestions: 5,
            history_suggestions: 3,
            default_limit: None,
            load_timeout_ms: 5_000,
            preferences_path: None,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(Error::InvalidConfig("search.history_capacity must be at least 1".to_string()));
        }
        if self.history_suggestions > self.max_suggestions {
            return Err(Error::InvalidConfig(format!(
                "search.history_suggestions ({}) exceeds search.max_suggestions ({})",
                self.history_suggestions, self.max_suggestions
            )));
        }
        if self.default_limit == Some(0) {
            return Err(Error::InvalidConfig("search.default_limit must be positive when set".to_string()));
        }
        Ok(())
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    pub fn content_dir_in(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.content_dir)
    }

    pub fn preferences_path_in(&self, base: &Path) -> Option<PathBuf> {
        self.preferences_path.as_ref().map(|p| resolve_with_base(base, p))
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
