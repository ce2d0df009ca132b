use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static INSIGHTS_CONFIG: OnceCell<InsightsConfig> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub insights: InsightsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with the built frontend bundle
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InsightsConfig {
    /// Glyph prefixed to every amount on the dashboards
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Insert demo partners and documents on startup
    #[serde(default)]
    pub seed_demo_data: bool,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            seed_demo_data: false,
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "dist".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000
static_dir = "dist"

[database]
path = "target/db/insights.db"

[insights]
currency_symbol = "₹"
seed_demo_data = false
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Keeps the dashboard section for request handlers. Only the first call wins.
pub fn set_insights_config(config: InsightsConfig) {
    if INSIGHTS_CONFIG.set(config).is_err() {
        tracing::warn!("Insights configuration already set, ignoring");
    }
}

/// Dashboard settings, the defaults until [`set_insights_config`] ran
pub fn insights_config() -> InsightsConfig {
    INSIGHTS_CONFIG.get().cloned().unwrap_or_default()
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    resolve_path(&config.database.path)
}

pub fn get_static_dir(config: &Config) -> PathBuf {
    resolve_path(&config.server.static_dir)
}

fn resolve_path(raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/insights.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.insights.currency_symbol, "₹");
        assert!(!config.insights.seed_demo_data);
    }

    #[test]
    fn test_workspace_sample_matches_default() {
        let sample = parse_config(include_str!("../../../../config.toml")).unwrap();
        let default = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(sample.database.path, default.database.path);
        assert_eq!(sample.server.port, default.server.port);
        assert_eq!(sample.insights.currency_symbol, default.insights.currency_symbol);
        assert!(!sample.insights.seed_demo_data);
    }

    #[test]
    fn test_missing_sections_fall_back() {
        let config = parse_config(
            r#"
            [database]
            path = "/var/lib/insights.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, "dist");
        assert_eq!(config.insights.currency_symbol, "₹");
        assert_eq!(
            get_database_path(&config),
            PathBuf::from("/var/lib/insights.db")
        );
    }

    #[test]
    fn test_currency_override() {
        let config = parse_config(
            r#"
            [database]
            path = "db.sqlite"

            [insights]
            currency_symbol = "$"
            "#,
        )
        .unwrap();
        assert_eq!(config.insights.currency_symbol, "$");
        assert!(get_database_path(&config).ends_with("db.sqlite"));
    }
}
