use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server address (e.g., "0.0.0.0:8080")
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
    /// Roster store configuration
    #[serde(default)]
    pub roster: RosterConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RosterConfig {
    /// Populate the store with the demo organization at startup
    #[serde(default)]
    pub seed_demo: bool,
    /// Buffered change events per subscriber before it lags
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
    /// Number of entries in the dashboard's recent hires list
    #[serde(default = "default_recent_hires_limit")]
    pub recent_hires_limit: usize,
    /// Base URL for generated avatars
    #[serde(default = "default_avatar_base_url")]
    pub avatar_base_url: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            seed_demo: false,
            event_capacity: default_event_capacity(),
            recent_hires_limit: default_recent_hires_limit(),
            avatar_base_url: default_avatar_base_url(),
        }
    }
}

// Default value functions
fn default_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_event_capacity() -> usize {
    256
}

fn default_recent_hires_limit() -> usize {
    5
}

fn default_avatar_base_url() -> String {
    "https://api.dicebear.com/7.x/avataaars/svg".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            log: LogConfig::default(),
            roster: RosterConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        if config.roster.event_capacity == 0 {
            anyhow::bail!("roster.event_capacity must be greater than zero");
        }
        Ok(config)
    }
}
