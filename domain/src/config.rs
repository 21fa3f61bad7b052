use std::{collections::HashMap, fmt::Display};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_USER: &str = "admin";
const DEFAULT_PASSWORD: &str = "secret";
const DEFAULT_DATABASE: &str = "mydb";

/// Hosts on these domains only accept TLS connections.
const MANAGED_HOST_DOMAINS: [&str; 1] = ["render.com"];

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DB_PORT needs to be an integer between 0 and 65535, got \"{0}\"")]
    InvalidPort(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TlsMode {
    Disabled,
    /// Encrypt the transport without verifying the server certificate chain.
    Permissive,
}

#[derive(Clone, Debug)]
pub enum ConnectionTarget {
    Url(SecretString),
    Discrete {
        host: String,
        port: u16,
        user: String,
        password: SecretString,
        database: String,
    },
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub target: ConnectionTarget,
    pub tls: TlsMode,
}

impl DatabaseConfig {
    /// Resolves the configuration from the process environment, loading a
    /// `.env` file first when one exists.
    pub fn from_environment() -> Result<DatabaseConfig, ConfigError> {
        dotenvy::dotenv().ok();

        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Resolves the configuration from an environment map.
    ///
    /// `DB_URL` takes precedence over the discrete `DB_*` variables and always
    /// enables permissive TLS. Empty values are treated as unset.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<DatabaseConfig, ConfigError> {
        if let Some(url) = lookup(vars, "DB_URL") {
            return Ok(DatabaseConfig {
                target: ConnectionTarget::Url(SecretString::new(url.to_owned())),
                tls: TlsMode::Permissive,
            });
        }

        let host = lookup(vars, "DB_HOST").unwrap_or(DEFAULT_HOST).to_owned();
        let port = match lookup(vars, "DB_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.to_owned()))?,
            None => DEFAULT_PORT,
        };
        let user = lookup(vars, "DB_USER").unwrap_or(DEFAULT_USER).to_owned();
        let password =
            SecretString::new(lookup(vars, "DB_PASSWORD").unwrap_or(DEFAULT_PASSWORD).to_owned());
        let database = lookup(vars, "DB_NAME").unwrap_or(DEFAULT_DATABASE).to_owned();

        let is_production = lookup(vars, "NODE_ENV") == Some("production");
        let is_managed_host = MANAGED_HOST_DOMAINS
            .iter()
            .any(|domain| host.contains(domain));
        let ssl_requested = lookup(vars, "DB_SSL") == Some("true");

        let tls = if is_production || is_managed_host || ssl_requested {
            TlsMode::Permissive
        } else {
            TlsMode::Disabled
        };

        Ok(DatabaseConfig {
            target: ConnectionTarget::Discrete {
                host,
                port,
                user,
                password,
                database,
            },
            tls,
        })
    }

    /// Renders a libpq connection string for the driver.
    ///
    /// Permissive TLS maps onto `sslmode=require`. An `sslmode` already
    /// present in a connection URL is kept as is.
    pub fn connection_string(&self) -> SecretString {
        let sslmode = match self.tls {
            TlsMode::Disabled => "disable",
            TlsMode::Permissive => "require",
        };

        let rendered = match &self.target {
            ConnectionTarget::Url(url) => {
                let url = url.expose_secret();
                if url.contains("sslmode=") {
                    url.clone()
                } else if !url.contains("://") {
                    format!("{url} sslmode={sslmode}")
                } else if url.contains('?') {
                    format!("{url}&sslmode={sslmode}")
                } else {
                    format!("{url}?sslmode={sslmode}")
                }
            }
            ConnectionTarget::Discrete {
                host,
                port,
                user,
                password,
                database,
            } => format!(
                "host={} port={port} user={} password={} dbname={} sslmode={sslmode}",
                quote(host),
                quote(user),
                quote(password.expose_secret()),
                quote(database),
            ),
        };

        SecretString::new(rendered)
    }

    /// A summary of the target that is safe to log.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl Display for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tls = match self.tls {
            TlsMode::Disabled => "tls disabled",
            TlsMode::Permissive => "tls permissive",
        };

        match &self.target {
            ConnectionTarget::Url(_) => write!(f, "connection url ({tls})"),
            ConnectionTarget::Discrete {
                host,
                port,
                database,
                ..
            } => write!(f, "{host}:{port}/{database} ({tls})"),
        }
    }
}

fn lookup<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// Quotes a value for a libpq keyword/value connection string.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn connection_string(pairs: &[(&str, &str)]) -> String {
        DatabaseConfig::from_vars(&vars(pairs))
            .unwrap()
            .connection_string()
            .expose_secret()
            .clone()
    }

    #[test]
    fn from_vars_should_use_defaults_when_nothing_is_set() {
        let config = DatabaseConfig::from_vars(&HashMap::new()).unwrap();

        assert_eq!(config.tls, TlsMode::Disabled);
        match config.target {
            ConnectionTarget::Discrete {
                host,
                port,
                user,
                password,
                database,
            } => {
                assert_eq!(host, "localhost");
                assert_eq!(port, 5432);
                assert_eq!(user, "admin");
                assert_eq!(password.expose_secret(), "secret");
                assert_eq!(database, "mydb");
            }
            ConnectionTarget::Url(_) => panic!("expected discrete target"),
        }
    }

    #[test]
    fn from_vars_should_prefer_db_url_and_enable_tls() {
        let config = DatabaseConfig::from_vars(&vars(&[
            ("DB_URL", "postgres://u:p@db.example.org/app"),
            ("DB_HOST", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.tls, TlsMode::Permissive);
        match config.target {
            ConnectionTarget::Url(url) => {
                assert_eq!(url.expose_secret(), "postgres://u:p@db.example.org/app")
            }
            ConnectionTarget::Discrete { .. } => panic!("expected url target"),
        }
    }

    #[test]
    fn from_vars_should_treat_empty_db_url_as_unset() {
        let config = DatabaseConfig::from_vars(&vars(&[("DB_URL", "")])).unwrap();

        assert!(matches!(config.target, ConnectionTarget::Discrete { .. }));
    }

    #[test]
    fn from_vars_should_enable_tls_in_production() {
        let config = DatabaseConfig::from_vars(&vars(&[("NODE_ENV", "production")])).unwrap();

        assert_eq!(config.tls, TlsMode::Permissive);
    }

    #[test]
    fn from_vars_should_enable_tls_for_managed_hosts() {
        let config = DatabaseConfig::from_vars(&vars(&[(
            "DB_HOST",
            "dpg-abc123.oregon-postgres.render.com",
        )]))
        .unwrap();

        assert_eq!(config.tls, TlsMode::Permissive);
    }

    #[test]
    fn from_vars_should_enable_tls_when_requested() {
        let enabled = DatabaseConfig::from_vars(&vars(&[("DB_SSL", "true")])).unwrap();
        let other = DatabaseConfig::from_vars(&vars(&[("DB_SSL", "yes")])).unwrap();

        assert_eq!(enabled.tls, TlsMode::Permissive);
        assert_eq!(other.tls, TlsMode::Disabled);
    }

    #[test]
    fn from_vars_should_reject_non_numeric_port() {
        let result = DatabaseConfig::from_vars(&vars(&[("DB_PORT", "five")]));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidPort("five".to_owned())
        );
    }

    #[test]
    fn connection_string_should_render_discrete_fields() {
        assert_eq!(
            connection_string(&[("DB_HOST", "db"), ("DB_PORT", "6543")]),
            "host='db' port=6543 user='admin' password='secret' dbname='mydb' sslmode=disable"
        );
    }

    #[test]
    fn connection_string_should_escape_quotes() {
        assert_eq!(
            connection_string(&[("DB_PASSWORD", r"it's\x"), ("DB_SSL", "true")]),
            r"host='localhost' port=5432 user='admin' password='it\'s\\x' dbname='mydb' sslmode=require"
        );
    }

    #[test]
    fn connection_string_should_append_sslmode_to_url() {
        assert_eq!(
            connection_string(&[("DB_URL", "postgres://u:p@h/db")]),
            "postgres://u:p@h/db?sslmode=require"
        );
        assert_eq!(
            connection_string(&[("DB_URL", "postgres://u:p@h/db?application_name=x")]),
            "postgres://u:p@h/db?application_name=x&sslmode=require"
        );
    }

    #[test]
    fn connection_string_should_keep_explicit_sslmode() {
        assert_eq!(
            connection_string(&[("DB_URL", "postgres://u:p@h/db?sslmode=disable")]),
            "postgres://u:p@h/db?sslmode=disable"
        );
    }

    #[test]
    fn describe_should_not_leak_credentials() {
        let discrete = DatabaseConfig::from_vars(&vars(&[("DB_PASSWORD", "hunter2")])).unwrap();
        let url = DatabaseConfig::from_vars(&vars(&[("DB_URL", "postgres://u:hunter2@h/db")]))
            .unwrap();

        assert_eq!(discrete.describe(), "localhost:5432/mydb (tls disabled)");
        assert_eq!(url.describe(), "connection url (tls permissive)");
        assert!(!format!("{discrete:?}").contains("hunter2"));
        assert!(!format!("{url:?}").contains("hunter2"));
    }
}
