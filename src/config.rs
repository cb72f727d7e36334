use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Postgres connection string
    pub pg_dsn: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// The single browser origin allowed to call the API
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

const fn default_pool_max_size() -> usize {
    16
}

impl Config {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn load_from_file(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(Into::into)
}

fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    envy::from_env::<Config>().map_err(Into::into)
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path = env::var("NOTES_API_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return load_from_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return load_from_file("config.yaml");
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    load_from_env().map_err(|e| {
        format!(
            "Config file not found and environment variables are incomplete. \
             Tried: '{config_path}', 'config.yaml' and environment variables. Error: {e}"
        )
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_yaml() {
        let cfg: Config = serde_yaml::from_str("pg_dsn: host=localhost user=notes").unwrap();

        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.cors_origin, "http://localhost:3000");
        assert_eq!(cfg.pool_max_size, 16);
        assert_eq!(cfg.socket_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_full_yaml() {
        let cfg: Config = serde_yaml::from_str(
            "pg_dsn: postgres://notes@db/notes\n\
             host: 127.0.0.1\n\
             port: 9000\n\
             cors_origin: https://notes.example.com\n\
             pool_max_size: 4\n",
        )
        .unwrap();

        assert_eq!(cfg.socket_addr(), "127.0.0.1:9000");
        assert_eq!(cfg.cors_origin, "https://notes.example.com");
        assert_eq!(cfg.pool_max_size, 4);
    }

    #[test]
    fn test_missing_dsn_is_rejected() {
        assert!(serde_yaml::from_str::<Config>("port: 9000").is_err());
    }

    #[test]
    fn test_from_env_pairs() {
        let vars = vec![
            ("PG_DSN".to_string(), "host=db".to_string()),
            ("PORT".to_string(), "8081".to_string()),
        ];
        let cfg: Config = envy::from_iter(vars).unwrap();

        assert_eq!(cfg.pg_dsn, "host=db");
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.host, "0.0.0.0");
    }
}
