/// Chairspot runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token
    pub discord_token: Option<String>,
    /// Google Cloud Vision API key
    pub vision_api_key: Option<String>,
    /// Detection label that triggers a crop
    pub label: String,
    /// Text stamped onto each crop
    pub caption: String,
    /// Path to the caption typeface
    pub font_path: String,
    /// Concurrent message-handler cap
    pub max_handlers: usize,
    /// Directory for the rolling log file
    pub log_dir: String,
    /// Log level fallback when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord_token: None,
            vision_api_key: None,
            label: "Chair".to_string(),
            caption: "CHAIR".to_string(),
            font_path: "impact.ttf".to_string(),
            max_handlers: 8,
            log_dir: "logs".to_string(),
            log_level: "debug".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Self {
            discord_token: std::env::var("DISCORD_TOKEN").ok(),
            vision_api_key: std::env::var("VISION_API_KEY").ok(),
            label: std::env::var("CHAIRSPOT_LABEL").unwrap_or(defaults.label),
            caption: std::env::var("CHAIRSPOT_CAPTION").unwrap_or(defaults.caption),
            font_path: std::env::var("CHAIRSPOT_FONT").unwrap_or(defaults.font_path),
            max_handlers: std::env::var("CHAIRSPOT_MAX_HANDLERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_handlers),
            log_dir: std::env::var("CHAIRSPOT_LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}
