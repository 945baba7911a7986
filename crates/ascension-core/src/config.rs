//! Loading the tracker configuration and the static game-data table.

use std::io::Read;
use std::path::Path;

use ascension_logic::config::TrackerConfig;
use ascension_logic::gamedata::GameData;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Read a JSON config file. A missing file means defaults.
pub fn load_config(path: &Path) -> Result<TrackerConfig, ConfigError> {
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return Ok(TrackerConfig::default());
    }
    let mut text = String::new();
    std::fs::File::open(path)?.read_to_string(&mut text)?;
    let config: TrackerConfig = serde_json::from_str(&text)?;
    log::info!(
        "Loaded config from {}: rate={}, policy={:?}",
        path.display(),
        config.conversion_rate,
        config.talent_availability_policy
    );
    Ok(config)
}

pub fn parse_game_data(json: &str) -> Result<GameData, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_game_data(path: &Path) -> Result<GameData, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let data = parse_game_data(&text)?;
    log::info!(
        "Loaded {} characters and {} weapons from {}",
        data.characters.len(),
        data.weapons.len(),
        path.display()
    );
    Ok(data)
}
