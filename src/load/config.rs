//! PostgreSQL credential file.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::LoadResult;

/// Connection settings read from a JSON object with the keys `username`, `password`, `host`,
/// `port`, and `database`. All keys are required; unknown keys are ignored.
///
/// ```
/// use tabular_pg_loader::load::PostgresConfig;
///
/// let cfg = PostgresConfig::from_json(
///     r#"{"username":"etl","password":"pw","host":"localhost","port":"5432","database":"warehouse"}"#,
/// )
/// .unwrap();
/// assert_eq!(cfg.port, 5432);
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct PostgresConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    /// Accepts a JSON number or a numeric string.
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    pub database: String,
}

impl PostgresConfig {
    /// Read and parse a credential file.
    pub fn from_path(path: impl AsRef<Path>) -> LoadResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse credentials from a JSON document.
    pub fn from_json(text: &str) -> LoadResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the driver-level connection configuration.
    pub fn to_pg_config(&self) -> postgres::Config {
        let mut cfg = postgres::Config::new();
        cfg.user(&self.username)
            .password(&self.password)
            .host(&self.host)
            .port(self.port)
            .dbname(&self.database)
            .application_name(env!("CARGO_PKG_NAME"));
        cfg
    }
}

impl fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(n) => Ok(n),
        Port::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid port '{s}'"))),
    }
}
