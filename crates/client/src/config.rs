use shared_types::{AppConfig, AppError};
use std::path::Path;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();
static DEFAULT: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Environment variables that override file settings.
pub const ENV_API_URL: &str = "STUDIO_API_URL";
pub const ENV_SESSION_PATH: &str = "STUDIO_SESSION_PATH";

/// Parse the contents of a config file.
pub fn parse_config(contents: &str) -> Result<AppConfig, AppError> {
    toml::from_str(contents).map_err(|e| AppError::bad_request(format!("Invalid config: {}", e)))
}

/// Read and parse a config file. Missing or unparseable files yield defaults.
pub fn read_config_file(path: &Path) -> AppConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents).unwrap_or_else(|e| {
            eprintln!("[config] Failed to parse {}: {}; using defaults", path.display(), e);
            AppConfig::default()
        }),
        Err(e) => {
            eprintln!("[config] {} not found ({}); using defaults", path.display(), e);
            AppConfig::default()
        }
    }
}

/// Apply environment overrides through `lookup`.
pub fn apply_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        config.api.base_url = url;
    }
    if let Some(path) = lookup(ENV_SESSION_PATH).filter(|v| !v.trim().is_empty()) {
        config.session.path = path;
    }
}

/// Read `config.toml` and `.env` overrides into the global `OnceLock`.
/// Only the first call has effect.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let mut config = read_config_file(Path::new(CONFIG_PATH));
        apply_overrides(&mut config, |key| std::env::var(key).ok());
        eprintln!("[config] API base URL: {}", config.api.base_url);
        config
    })
}

/// The loaded configuration, or defaults if `load_config()` hasn't run.
pub fn config() -> &'static AppConfig {
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}
