//! Application configuration for CareerGuide.
//!
//! User config lives at `~/.careerguide/careerguide.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CareerGuideError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "careerguide.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".careerguide";

// ---------------------------------------------------------------------------
// Config structs (matching careerguide.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiSettings,

    /// Extraction denylists.
    #[serde(default)]
    pub filters: FilterConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Base URL of the careers site.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds applied at the transport boundary.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://techguide.sh".into()
}
fn default_timeout_secs() -> u64 {
    10
}

/// `[gemini]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiSettings {
    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model used for summaries and answers.
    #[serde(default = "default_model")]
    pub model: String,

    /// REST endpoint root for `generateContent` calls.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            model: default_model(),
            endpoint: default_endpoint(),
        }
    }
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".into()
}
fn default_model() -> String {
    "gemini-2.0-flash-lite".into()
}
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".into()
}

/// `[filters]` section — the boilerplate denylists.
///
/// Patterns are matched case-insensitively as substrings of the trimmed
/// text. The defaults reproduce the institutional/social vocabulary the
/// source site requires; changing them changes filtering behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Headings matching any of these patterns are dropped.
    #[serde(default = "default_heading_denylist")]
    pub heading_denylist: Vec<String>,

    /// Lists with any item matching any of these patterns are dropped whole.
    #[serde(default = "default_list_denylist")]
    pub list_denylist: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            heading_denylist: default_heading_denylist(),
            list_denylist: default_list_denylist(),
        }
    }
}

fn default_heading_denylist() -> Vec<String> {
    [
        "youtube",
        "facebook",
        "twitter",
        "instagram",
        "playstore",
        "appstore",
        "tiktok",
        "guia em formato",
        "descubra o que dominar",
        "desafie-se",
        "dúvidas e respostas",
        "logo",
        "versão",
        "alura",
        "pm3",
        "fiap",
    ]
    .map(String::from)
    .to_vec()
}

fn default_list_denylist() -> Vec<String> {
    [
        "youtube",
        "facebook",
        "twitter",
        "instagram",
        "playstore",
        "appstore",
        "tiktok",
    ]
    .map(String::from)
    .to_vec()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.careerguide/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CareerGuideError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.careerguide/careerguide.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| CareerGuideError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| CareerGuideError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CareerGuideError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| CareerGuideError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CareerGuideError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the Gemini API key from the configured env var.
///
/// The key is resolved here, once, and passed explicitly to the bridge —
/// there is no process-wide implicit default.
pub fn resolve_api_key(config: &AppConfig) -> Result<String> {
    let var_name = &config.gemini.api_key_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(CareerGuideError::config(format!(
            "Gemini API key not found. Set the {var_name} environment variable.\n\
             Get a key at https://aistudio.google.com/apikey"
        ))),
    }
}
