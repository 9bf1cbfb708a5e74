//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use ghlog_api::{DEFAULT_API_URL, DEFAULT_PER_PAGE};
use ghlog_core::DEFAULT_MAX_PAGES;
use serde::{Deserialize, Deserializer, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub token used for every request.
    pub token: Option<String>,
    /// API root, e.g. `https://api.github.com`.
    pub api_url: String,
    /// Organizations whose feeds are read after the personal feed.
    #[serde(default, deserialize_with = "string_list")]
    pub orgs: Vec<String>,
    /// Event types to keep; empty keeps all.
    #[serde(default, deserialize_with = "string_list")]
    pub events: Vec<String>,
    /// Events requested per page.
    pub per_page: u8,
    /// Pages fetched per feed at most.
    pub max_pages: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .field("orgs", &self.orgs)
            .field("events", &self.events)
            .field("per_page", &self.per_page)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            orgs: Vec::new(),
            events: Vec::new(),
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: defaults, `config.toml` in the config directory,
    /// `config_path`, `GITHUB_TOKEN`, then `GHLOG_*` variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // The conventional variable, honored for the token only
        figment = figment.merge(
            Env::raw()
                .only(&["GITHUB_TOKEN"])
                .map(|_| "token".into()),
        );

        figment = figment.merge(Env::prefixed("GHLOG_"));

        figment.extract()
    }
}

/// Accepts either a list or a single comma-separated string, so
/// `GHLOG_ORGS=acme,globex` works as well as `orgs = ["acme"]` in TOML.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum List {
        Joined(String),
        Items(Vec<String>),
    }

    let items = match List::deserialize(deserializer)? {
        List::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        List::Items(items) => items,
    };
    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

/// Returns the platform-specific config directory for ghlog.
///
/// On Linux: `~/.config/ghlog`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ghlog"))
}
