use std::collections::HashMap;

use domain::{ConfigError, DatabaseConfig};

use crate::api::CorsPolicy;

const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub cors: CorsPolicy,
    /// A database misconfiguration must not keep the server from starting,
    /// so the error is kept and reported by `/db` instead.
    pub database: Result<DatabaseConfig, ConfigError>,
}

impl AppConfig {
    pub fn from_environment() -> Result<AppConfig, String> {
        dotenvy::dotenv().ok();

        let vars: HashMap<String, String> = std::env::vars().collect();
        AppConfig::from_vars(&vars)
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<AppConfig, String> {
        let port = match vars.get("PORT").filter(|port| !port.is_empty()) {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| format!("PORT needs to be an integer, got \"{port}\""))?,
            None => DEFAULT_PORT,
        };

        Ok(AppConfig {
            port,
            cors: CorsPolicy::from_vars(vars),
            database: DatabaseConfig::from_vars(vars),
        })
    }
}
