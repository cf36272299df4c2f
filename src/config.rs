use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const MAX_COLLECTION_NAME_LEN: usize = 63;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Settings read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_endpoint: String,
    pub store_key: String,
    pub store_database: String,
    pub users_collection: String,
    pub votes_collection: String,
    pub max_connections: u32,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenvy::dotenv().is_ok() {
            debug!("Loaded .env file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let config = Self {
            store_endpoint: required("STORE_ENDPOINT")?,
            store_key: required("STORE_KEY")?,
            store_database: required("STORE_DATABASE")?,
            users_collection: collection_name(
                "STORE_USERS_COLLECTION",
                required("STORE_USERS_COLLECTION")?,
            )?,
            votes_collection: collection_name(
                "STORE_VOTES_COLLECTION",
                required("STORE_VOTES_COLLECTION")?,
            )?,
            port: optional(&lookup, "PORT", DEFAULT_PORT)?,
            max_connections: optional(&lookup, "STORE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        };

        if config.users_collection == config.votes_collection {
            return Err(ConfigError::Invalid {
                key: "STORE_VOTES_COLLECTION",
                reason: "must differ from STORE_USERS_COLLECTION".to_string(),
            });
        }

        Ok(config)
    }
}

fn optional<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|value| !value.is_empty()) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

// Collection names end up as table identifiers.
fn collection_name(key: &'static str, name: String) -> Result<String, ConfigError> {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if starts_ok && rest_ok && name.len() <= MAX_COLLECTION_NAME_LEN {
        Ok(name)
    } else {
        Err(ConfigError::Invalid {
            key,
            reason: format!("{name:?} is not a valid collection name"),
        })
    }
}
