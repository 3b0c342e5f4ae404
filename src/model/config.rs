use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "GRC_ENGINE_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Similarity a match must exceed (strictly) to qualify.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;

/// Ranked matches kept per source control.
pub const DEFAULT_MAX_MATCHES: usize = 3;

/// Compliance boilerplate removed before similarity comparison.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "shall",
    "must",
    "should",
    "implement",
    "establish",
    "maintain",
    "ensure",
    "monitor",
    "review",
    "control",
];

/// Control mapper tuning.
///
/// Matching behavior is configuration, not code: the stop-word list and the
/// threshold can be adjusted per deployment without edits.
#[derive(Debug, Clone, Deserialize)]
pub struct MapperConfig {
    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
    /// When true, source controls with no qualifying match produce a
    /// zero-confidence entry instead of being dropped from the result.
    #[serde(default)]
    pub report_unmatched: bool,
}

fn default_stop_words() -> Vec<String> {
    DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect()
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_max_matches() -> usize {
    DEFAULT_MAX_MATCHES
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            stop_words: default_stop_words(),
            similarity_threshold: default_similarity_threshold(),
            max_matches: default_max_matches(),
            report_unmatched: false,
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub mapper: Option<MapperConfig>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub mapper: MapperConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mapper: MapperConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mapper = Self::load_config_file(&config_path)
            .and_then(|cf| cf.mapper)
            .unwrap_or_default();

        Self { mapper, port, host }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                // Handle empty file
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
