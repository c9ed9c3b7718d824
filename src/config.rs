use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use toml;
use tracing::{info, warn};

/// Configuration for the DealerHub application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Base URL of the external dealer service
    pub dealer_url: String,
    /// Base URL of the external sentiment analyzer
    pub sentiment_url: String,
    /// Port the HTTP server listens on
    pub port: u16,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    /// Optional update for database URL
    #[serde(default)]
    pub database_url: Option<String>,
    /// Optional update for the dealer service base URL
    #[serde(default)]
    pub dealer_url: Option<String>,
    /// Optional update for the sentiment analyzer base URL
    #[serde(default)]
    pub sentiment_url: Option<String>,
    /// Optional update for the listen port
    #[serde(default)]
    pub port: Option<u16>,
}

/// Command line arguments for the application
#[derive(Parser, Debug)]
#[clap(name = "dealerhub", about = "A car dealership review backend")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Dealer service base URL
    #[clap(long, env = "DEALER_URL")]
    pub dealer_url: Option<String>,

    /// Sentiment analyzer base URL
    #[clap(long, env = "SENTIMENT_URL")]
    pub sentiment_url: Option<String>,

    /// Port to listen on
    #[clap(long, env = "PORT")]
    pub port: Option<u16>,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            dealer_url: update.dealer_url.unwrap_or(self.dealer_url),
            sentiment_url: update.sentiment_url.unwrap_or(self.sentiment_url),
            port: update.port.unwrap_or(self.port),
        }
    }
}

/// Returns the base (default) configuration
pub fn base_config(config_path: Option<PathBuf>) -> Config {
    let database_url = config_path.map_or("dealerhub.db".to_string(), |path| {
        path.join("dealerhub.db").to_string_lossy().to_string()
    });

    Config {
        database_url,
        dealer_url: "http://localhost:3030".to_string(),
        sentiment_url: "http://localhost:5050".to_string(),
        port: 8000,
    }
}

/// Loads configuration from a TOML file
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    // if the config path is None, return the default config
    if config_path.is_none() {
        return Ok(ConfigUpdate::default());
    }

    let config_path = config_path.unwrap();

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url,
        dealer_url: args.dealer_url,
        sentiment_url: args.sentiment_url,
        port: args.port,
    }
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: CliArgs) -> Config {
    let mut config_path = match ProjectDirs::from("com", "dealerhub", "dealerhub") {
        Some(proj_dirs) => {
            let config_dir = proj_dirs.config_dir();
            let path = PathBuf::from(config_dir);
            Some(path)
        }
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    };

    config_path = config_path.and_then(|path| {
        if !path.exists() {
            info!("Config path not found at {:?}, using defaults", path);
            None
        } else {
            Some(path)
        }
    });

    let base = base_config(config_path.clone());

    // Apply updates in order of increasing precedence
    let config = base
        .apply_update(config_from_file(config_path).unwrap_or_default())
        .apply_update(config_from_args(args));

    info!(
        "Final configuration: database_url={}, dealer_url={}, sentiment_url={}, port={}",
        config.database_url, config.dealer_url, config.sentiment_url, config.port
    );

    config
}
