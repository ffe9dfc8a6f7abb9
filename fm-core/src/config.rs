use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_SUBMISSION_DELAY_MS: u64 = 2000;
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1500;
pub const DEFAULT_SESSION_KEY: &str = "fm_user";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn default_true() -> bool {
    true
}

/// YAML config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigYaml {
    /// Simulated distribution request latency. None = default.
    pub submission_delay_ms: Option<u64>,
    /// Simulated login latency. None = default.
    pub login_delay_ms: Option<u64>,
    /// Key of the session record in the key-value store
    pub session_key: Option<String>,
    /// Seed the release catalog with demo submissions on startup
    #[serde(default = "default_true")]
    pub seed_demo_catalog: bool,
}

/// Application configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Directory holding config.yaml
    pub config_dir: PathBuf,
    pub submission_delay: Duration,
    pub login_delay: Duration,
    pub session_key: String,
    pub seed_demo_catalog: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(".fm-station"),
            submission_delay: Duration::from_millis(DEFAULT_SUBMISSION_DELAY_MS),
            login_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            seed_demo_catalog: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let dev_mode = std::env::var("FM_DEV_MODE").is_ok() || dotenvy::dotenv().is_ok();
        if dev_mode {
            info!("Dev mode activated - loading from environment");
            Self::from_lookup(|key| std::env::var(key).ok())
        } else {
            info!("Production mode - loading from config.yaml");
            Self::from_config_file()
        }
    }

    /// Build a config from `FM_*` variables, resolved through `lookup`.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let read_ms = |key: &str| -> Result<Option<u64>, ConfigError> {
            read(key)
                .map(|v| {
                    v.trim()
                        .parse::<u64>()
                        .map_err(|e| ConfigError::Config(format!("{key}={v}: {e}")))
                })
                .transpose()
        };

        let defaults = Self::default();
        let config_dir = read("FM_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.config_dir);
        let submission_delay = read_ms("FM_SUBMISSION_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.submission_delay);
        let login_delay = read_ms("FM_LOGIN_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.login_delay);
        let seed_demo_catalog = match read("FM_SEED_DEMO_CATALOG") {
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(ConfigError::Config(format!(
                        "FM_SEED_DEMO_CATALOG={other}: expected true or false"
                    )))
                }
            },
            None => defaults.seed_demo_catalog,
        };

        Ok(Self {
            config_dir,
            submission_delay,
            login_delay,
            session_key: read("FM_SESSION_KEY").unwrap_or(defaults.session_key),
            seed_demo_catalog,
        })
    }

    fn from_config_file() -> Result<Self, ConfigError> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| ConfigError::Config("Failed to get home directory".to_string()))?;
        Self::load_from_dir(&home_dir.join(".fm-station"))
    }

    /// Read `config.yaml` from `config_dir`. A missing file yields defaults.
    pub fn load_from_dir(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.yaml");
        if !config_path.exists() {
            info!(
                "No config.yaml at {}, using defaults",
                config_path.display()
            );
            return Ok(Self {
                config_dir: config_dir.to_path_buf(),
                ..Self::default()
            });
        }

        let content = std::fs::read_to_string(&config_path)?;
        let yaml: ConfigYaml = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::Serialization(format!("Failed to parse {}: {}", config_path.display(), e))
        })?;

        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            submission_delay: Duration::from_millis(
                yaml.submission_delay_ms
                    .unwrap_or(DEFAULT_SUBMISSION_DELAY_MS),
            ),
            login_delay: Duration::from_millis(
                yaml.login_delay_ms.unwrap_or(DEFAULT_LOGIN_DELAY_MS),
            ),
            session_key: yaml
                .session_key
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| DEFAULT_SESSION_KEY.to_string()),
            seed_demo_catalog: yaml.seed_demo_catalog,
        })
    }

    pub fn is_dev_mode() -> bool {
        std::env::var("FM_DEV_MODE").is_ok() || Path::new(".env").exists()
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.yaml")
    }

    pub fn save_to_config_yaml(&self) -> Result<PathBuf, ConfigError> {
        std::fs::create_dir_all(&self.config_dir)?;
        let yaml = ConfigYaml {
            submission_delay_ms: Some(self.submission_delay.as_millis() as u64),
            login_delay_ms: Some(self.login_delay.as_millis() as u64),
            session_key: Some(self.session_key.clone()),
            seed_demo_catalog: self.seed_demo_catalog,
        };
        let content =
            serde_yaml::to_string(&yaml).map_err(|e| ConfigError::Serialization(e.to_string()))?;
        let path = self.config_path();
        std::fs::write(&path, content)?;
        Ok(path)
    }
}
