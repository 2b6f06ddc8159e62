use std::{env, fs, io};
use std::path::Path;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_RANKING_URL: &str = "https://api.beatleader.xyz";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{key} must be a numeric id, got {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("config.json could not be read: {0}")]
    Io(#[from] io::Error),
    #[error("config.json is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub token: String,
    pub region_role_id: u64,
    pub verify_channel_id: u64,
    #[serde(default)]
    pub guild_id: Option<u64>,
    #[serde(default = "default_ranking_url")]
    pub ranking_api_url: String,
}

fn default_ranking_url() -> String {
    DEFAULT_RANKING_URL.to_string()
}

impl Config {
    /// Reads `config.json` if it exists, falling back to the environment (and `.env`).
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new("config.json");

        if path.exists() {
            let config_json = fs::read_to_string(path)?;
            return Config::from_json(&config_json);
        }

        dotenvy::dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_json(config_json: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_json::from_str(config_json)?;
        config.validate()
    }

    // Discord ids are never 0, and serenity panics when asked to build one.
    fn validate(self) -> Result<Config, ConfigError> {
        check_id("region_role_id", self.region_role_id)?;
        check_id("verify_channel_id", self.verify_channel_id)?;
        if let Some(guild_id) = self.guild_id {
            check_id("guild_id", guild_id)?;
        }

        Ok(self)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let read = |key: &'static str| lookup(key).filter(|o| !o.trim().is_empty());

        let token = read("TOKEN").ok_or(ConfigError::Missing("TOKEN"))?;
        // EU_ROLE_ID is what older deployments call it.
        let region_role = read("REGION_ROLE_ID")
            .map(|o| ("REGION_ROLE_ID", o))
            .or_else(|| read("EU_ROLE_ID").map(|o| ("EU_ROLE_ID", o)))
            .ok_or(ConfigError::Missing("REGION_ROLE_ID"))?;
        let verify_channel = read("VERIFY_CHANNEL_ID").ok_or(ConfigError::Missing("VERIFY_CHANNEL_ID"))?;

        Ok(Config {
            token,
            region_role_id: parse_id(region_role.0, region_role.1)?,
            verify_channel_id: parse_id("VERIFY_CHANNEL_ID", verify_channel)?,
            guild_id: read("GUILD_ID").map(|o| parse_id("GUILD_ID", o)).transpose()?,
            ranking_api_url: read("RANKING_API_URL").unwrap_or_else(default_ranking_url),
        })
    }
}

fn check_id(key: &'static str, id: u64) -> Result<u64, ConfigError> {
    if id == 0 {
        return Err(ConfigError::Invalid { key, value: id.to_string() });
    }

    Ok(id)
}

fn parse_id(key: &'static str, value: String) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}
