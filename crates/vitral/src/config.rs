// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Pipeline configuration.
//!
//! Configuration is loaded from `vitral.toml` at the project root and is
//! read-only once the pipeline is constructed.
//!
//! # Example Configuration
//!
//! ```toml
//! [routing]
//! routes_dir = "app"
//! max_layout_depth = 10
//!
//! [locales]
//! supported = ["en", "de", "es"]
//! default_locale = "en"
//!
//! [auth]
//! login_route = "/login"
//! session_cookie = "session"
//!
//! [cache]
//! enabled = true
//! capacity = 256
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure loaded from `vitral.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Route discovery settings.
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Locale resolution settings.
    #[serde(default)]
    pub locales: LocaleConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Render result cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Settings for the file-based route discoverer.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// Directory containing the template tree (default: "app").
    #[serde(default = "default_routes_dir")]
    pub routes_dir: String,

    /// File name marking a page template (default: "+page.vit").
    #[serde(default = "default_page_file")]
    pub page_file: String,

    /// File name marking a layout template (default: "+layout.vit").
    #[serde(default = "default_layout_file")]
    pub layout_file: String,

    /// File name marking an error template (default: "+error.vit").
    #[serde(default = "default_error_file")]
    pub error_file: String,

    /// Extension of side-car descriptor files (default: "toml").
    ///
    /// The descriptor for `+page.vit` is `+page.toml` in the same directory.
    #[serde(default = "default_descriptor_ext")]
    pub descriptor_ext: String,

    /// Upper bound on the ancestor walk for layout and error lookup
    /// (default: 10).
    #[serde(default = "default_max_layout_depth")]
    pub max_layout_depth: usize,
}

/// Settings for per-request locale resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// Locales the application ships translations for (default: `["en"]`).
    #[serde(default = "default_supported")]
    pub supported: Vec<String>,

    /// Locale used when a request carries no locale signal (default: "en").
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

/// Settings for the auth gate and the bundled session store.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Route the gate redirects to when a requirement names no redirect of
    /// its own. When unset, denials answer with a bare 401/403 instead of
    /// guessing a destination.
    #[serde(default)]
    pub login_route: Option<String>,

    /// Cookie carrying the session id (default: "session").
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,

    /// Session lifetime in seconds (default: 86400).
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
}

/// Settings for the render result cache.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Whether successful public GET renders are cached (default: false).
    #[serde(default)]
    pub enabled: bool,

    /// Maximum number of cached pages (default: 256).
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

fn default_routes_dir() -> String {
    "app".to_string()
}

fn default_page_file() -> String {
    "+page.vit".to_string()
}

fn default_layout_file() -> String {
    "+layout.vit".to_string()
}

fn default_error_file() -> String {
    "+error.vit".to_string()
}

fn default_descriptor_ext() -> String {
    "toml".to_string()
}

fn default_max_layout_depth() -> usize {
    10
}

fn default_supported() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_session_cookie() -> String {
    "session".to_string()
}

fn default_session_ttl() -> u64 {
    86400
}

fn default_cache_capacity() -> usize {
    256
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            routes_dir: default_routes_dir(),
            page_file: default_page_file(),
            layout_file: default_layout_file(),
            error_file: default_error_file(),
            descriptor_ext: default_descriptor_ext(),
            max_layout_depth: default_max_layout_depth(),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: default_supported(),
            default_locale: default_locale(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_route: None,
            session_cookie: default_session_cookie(),
            session_ttl_secs: default_session_ttl(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            capacity: default_cache_capacity(),
        }
    }
}

impl Config {
    /// Loads configuration from `vitral.toml` in the current directory.
    ///
    /// If no configuration file exists, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be
    /// parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("vitral.toml"))
    }

    /// Loads configuration from a specific path, defaulting when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| crate::error::VitralError::ConfigParse {
                file: path.display().to_string(),
                source: e,
            })?;
        Ok(config)
    }
}
