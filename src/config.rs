use std::str::FromStr;

use crate::errors::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Postgres,
    Memory,
}

impl FromStr for Storage {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "postgres" => Ok(Storage::Postgres),
            "memory" => Ok(Storage::Memory),
            _ => Err(ConfigError::Invalid {
                name: "STORAGE",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub host: String,
    pub port: u16,
    pub storage: Storage,
    pub database_url: String,
    pub pool_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let storage = match dotenvy::var("STORAGE") {
            Ok(value) => value.parse()?,
            Err(_) => Storage::Postgres,
        };
        let database_url = match (storage, dotenvy::var("DATABASE_URL")) {
            (_, Ok(url)) => url,
            (Storage::Memory, Err(_)) => String::new(),
            (Storage::Postgres, Err(_)) => return Err(ConfigError::Missing("DATABASE_URL")),
        };
        Ok(Self {
            app_name: dotenvy::var("APP_NAME").unwrap_or_else(|_| "todo-api".to_string()),
            host: dotenvy::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("APP_PORT", 8080)?,
            storage,
            database_url,
            pool_size: parse_var("DATABASE_POOL_SIZE", 10)?,
        })
    }

    pub fn new_database_url(database_url: String) -> Self {
        Self {
            app_name: "todo-api".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            storage: Storage::Postgres,
            database_url,
            pool_size: 2,
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match dotenvy::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
