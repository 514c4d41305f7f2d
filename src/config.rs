//! Connection configuration.

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_database() -> String {
    "database".to_string()
}

fn default_username() -> String {
    "username".to_string()
}

fn default_password() -> String {
    "password".to_string()
}

/// Connection settings consumed at session construction.
///
/// The settings are passed through to the driver unvalidated. `port` of
/// `None` means the driver default (5432).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Database host
    #[serde(default = "default_host")]
    pub host: String,
    /// Database port; `None` uses the driver default
    #[serde(default)]
    pub port: Option<u16>,
    /// Database name
    #[serde(default = "default_database")]
    pub database: String,
    /// Login user
    #[serde(default = "default_username")]
    pub username: String,
    /// Login password
    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
            database: default_database(),
            username: default_username(),
            password: default_password(),
        }
    }
}

impl ConnectionConfig {
    /// Create a configuration with the placeholder defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the database name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the login user.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Set the login password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Convert to a driver configuration.
    pub fn to_pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .dbname(&self.database)
            .user(&self.username)
            .password(&self.password);
        if let Some(port) = self.port {
            config.port(port);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_placeholders() {
        let config = ConnectionConfig::new();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, None);
        assert_eq!(config.database, "database");
        assert_eq!(config.username, "username");
        assert_eq!(config.password, "password");
    }

    #[test]
    fn setters_chain() {
        let config = ConnectionConfig::new()
            .host("db.internal")
            .port(5433)
            .database("app")
            .username("svc")
            .password("secret");
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, Some(5433));
        assert_eq!(config.database, "app");
    }
}
