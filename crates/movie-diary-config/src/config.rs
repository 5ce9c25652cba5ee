use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// Required for enrichment; the TMDB_API_KEY environment variable
    /// overrides the stored value.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Ordered CORS relay endpoints; a proxied URL is the endpoint followed
    /// by the percent-encoded target URL.
    #[serde(default = "default_relays")]
    pub relays: Vec<String>,
    /// Throttle between successful diary page fetches.
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
    /// Delay after each successful metadata lookup.
    #[serde(default = "default_lookup_delay_ms")]
    pub lookup_delay_ms: u64,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_relays() -> Vec<String> {
    vec![
        "https://corsproxy.io/?".to_string(),
        "https://api.allorigins.win/raw?url=".to_string(),
        "https://api.codetabs.com/v1/proxy?quest=".to_string(),
        "https://cors-anywhere.herokuapp.com/".to_string(),
    ]
}

fn default_page_delay_ms() -> u64 {
    350
}

fn default_lookup_delay_ms() -> u64 {
    150
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_language(),
            base_url: default_tmdb_base_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            relays: default_relays(),
            page_delay_ms: default_page_delay_ms(),
            lookup_delay_ms: default_lookup_delay_ms(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults. Either way
    /// environment overrides apply.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            let mut config = Config::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            if !key.is_empty() {
                self.tmdb.api_key = key;
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.api_key.is_empty() {
            return Err(anyhow::anyhow!(
                "TMDB API key is not configured. Run `reelwrap config tmdb` or set TMDB_API_KEY."
            ));
        }
        if self.fetch.relays.is_empty() {
            return Err(anyhow::anyhow!("fetch.relays cannot be empty"));
        }
        if self.fetch.page_delay_ms > 60_000 {
            return Err(anyhow::anyhow!("fetch.page_delay_ms must be at most 60000"));
        }
        if self.fetch.lookup_delay_ms > 60_000 {
            return Err(anyhow::anyhow!("fetch.lookup_delay_ms must be at most 60000"));
        }
        Ok(())
    }
}
