//! Application configuration for SiteProfiler.
//!
//! User config lives at `~/.siteprofiler/siteprofiler.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteProfilerError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "siteprofiler.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".siteprofiler";

// ---------------------------------------------------------------------------
// Config structs (matching siteprofiler.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Browser-render fallback service.
    #[serde(default)]
    pub render: RenderConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Main-page fetch timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Auxiliary-page fetch timeout in seconds.
    #[serde(default = "default_aux_timeout_secs")]
    pub aux_timeout_secs: u64,

    /// Upper bound on auxiliary pages fetched per run.
    #[serde(default = "default_max_aux_pages")]
    pub max_aux_pages: usize,

    /// Upper bound on bio-page fetch attempts per run.
    #[serde(default = "default_max_bio_fetches")]
    pub max_bio_fetches: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            aux_timeout_secs: default_aux_timeout_secs(),
            max_aux_pages: default_max_aux_pages(),
            max_bio_fetches: default_max_bio_fetches(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}
fn default_aux_timeout_secs() -> u64 {
    10
}
fn default_max_aux_pages() -> usize {
    24
}
fn default_max_bio_fetches() -> usize {
    10
}

/// `[render]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Base URL of a browserless-compatible render service. Unset disables
    /// the render fallback.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Name of the env var holding the render token (never store the token).
    #[serde(default = "default_render_token_env")]
    pub token_env: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            token_env: default_render_token_env(),
        }
    }
}

fn default_render_token_env() -> String {
    "SITEPROFILER_RENDER_TOKEN".into()
}

// ---------------------------------------------------------------------------
// Profile config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime profiling configuration after merging config file and CLI flags.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Main-page fetch timeout in seconds.
    pub timeout_secs: u64,
    /// Auxiliary-page fetch timeout in seconds.
    pub aux_timeout_secs: u64,
    /// Upper bound on auxiliary pages fetched per run.
    pub max_aux_pages: usize,
    /// Upper bound on bio-page fetch attempts per run.
    pub max_bio_fetches: usize,
    /// Render service base URL, when the fallback is enabled.
    pub render_endpoint: Option<String>,
    /// Render service token, resolved from the configured env var.
    pub render_token: Option<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ProfileConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.defaults.timeout_secs,
            aux_timeout_secs: config.defaults.aux_timeout_secs,
            max_aux_pages: config.defaults.max_aux_pages,
            max_bio_fetches: config.defaults.max_bio_fetches,
            render_endpoint: config.render.endpoint.clone(),
            render_token: None,
        }
    }
}

/// Resolve the render token from the env var the config names.
pub fn render_token(config: &AppConfig) -> Option<String> {
    std::env::var(&config.render.token_env)
        .ok()
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.siteprofiler/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SiteProfilerError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.siteprofiler/siteprofiler.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SiteProfilerError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        SiteProfilerError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| SiteProfilerError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SiteProfilerError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SiteProfilerError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
