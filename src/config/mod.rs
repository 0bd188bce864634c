use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub agency: AgencyConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AgencyConfig {
    pub name: String,
    /// Inbox that receives new-lead notifications.
    pub inbox_email: String,
}

impl Default for AgencyConfig {
    fn default() -> Self {
        Self {
            name: "TripDesk Travels".to_string(),
            inbox_email: "enquiries@tripdesk.local".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MailConfig {
    #[serde(default)]
    pub enabled: bool,
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: Option<String>,
}

fn default_smtp_port() -> u16 {
    587
}

/// Stand-in for the external route guard: back-office routes require this
/// bearer token when set. Left unset, the guard is disabled (local dev).
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    pub api_token: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.base_url", "http://localhost:8080")?
            .set_default("database.max_connections", 10)?
            .set_default("mail.enabled", false)?
            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (with TRIPDESK__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("TRIPDESK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite://tripdesk.db".to_string(),
                max_connections: 10,
            },
            agency: AgencyConfig::default(),
            mail: MailConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}
