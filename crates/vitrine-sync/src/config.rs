use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{SyncError, SyncResult};

/// Configuration for vitrine.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. Environment variables (VITRINE_* prefix)
/// 2. Config file (~/.config/vitrine/config.toml)
/// 3. Built-in defaults (lowest priority)
///
/// Credentials live here as plain in-memory fields and are handed
/// directly to the edit client at connect time; no shared credential
/// files are written or chmod-ed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Wikidata account username.
    ///
    /// Can be set via:
    /// - ENV: VITRINE_USERNAME
    /// - Config: username = "..."
    pub username: Option<String>,

    /// Bot username (the `user@botname` form from Special:BotPasswords).
    pub bot_username: Option<String>,

    /// Bot password from Special:BotPasswords.
    pub bot_password: Option<String>,

    /// SPARQL query service endpoint.
    #[serde(default = "default_sparql_endpoint")]
    pub sparql_endpoint: String,

    /// MediaWiki Action API endpoint used for all writes.
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Seconds to wait after creating an entity before the follow-up
    /// claim write. The query service indexes new items with a lag; a
    /// dependent write issued too early can act on a stale view.
    #[serde(default = "default_post_create_delay")]
    pub post_create_delay_secs: u64,

    /// Language code for labels and descriptions.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            username: None,
            bot_username: None,
            bot_password: None,
            sparql_endpoint: default_sparql_endpoint(),
            api_endpoint: default_api_endpoint(),
            user_agent: default_user_agent(),
            post_create_delay_secs: default_post_create_delay(),
            language: default_language(),
        }
    }
}

impl SyncConfig {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/vitrine/config.toml
    /// Reads environment variables with VITRINE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("vitrine");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// The post-create indexing delay as a [`Duration`].
    pub fn post_create_delay(&self) -> Duration {
        Duration::from_secs(self.post_create_delay_secs)
    }

    /// Check that all three credentials are present and non-empty.
    ///
    /// Called before any remote write; an incomplete credential set must
    /// never reach the API.
    pub fn validate_credentials(&self) -> SyncResult<()> {
        for (field, value) in [
            ("username", &self.username),
            ("bot_username", &self.bot_username),
            ("bot_password", &self.bot_password),
        ] {
            match value {
                Some(v) if !v.is_empty() => {}
                _ => return Err(SyncError::Credentials { field }),
            }
        }
        Ok(())
    }
}

fn default_sparql_endpoint() -> String {
    "https://query.wikidata.org/sparql".to_string()
}

fn default_api_endpoint() -> String {
    "https://www.wikidata.org/w/api.php".to_string()
}

fn default_user_agent() -> String {
    "vitrine/0.1.0 (https://github.com/openaccess-museum/vitrine)".to_string()
}

fn default_post_create_delay() -> u64 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/vitrine/config.toml
/// - macOS: ~/Library/Application Support/vitrine/config.toml
/// - Windows: %APPDATA%\vitrine\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitrine")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Vitrine Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. Environment variables (VITRINE_* prefix)
# 2. This config file
# 3. Built-in defaults (lowest priority)

# Wikidata account credentials. The bot username and password come from
# Special:BotPasswords on wikidata.org.
#
# Can also be set via:
# - Environment: VITRINE_USERNAME / VITRINE_BOT_USERNAME / VITRINE_BOT_PASSWORD
username = "YourUserName"
bot_username = "YourUserName@vitrine"
bot_password = "your-bot-password-here"

# Seconds to wait after creating an item before the follow-up claim
# write, covering the query service's indexing lag.
#post_create_delay_secs = 10

# Endpoints; only change these when running against a test wiki.
#sparql_endpoint = "https://query.wikidata.org/sparql"
#api_endpoint = "https://www.wikidata.org/w/api.php"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
