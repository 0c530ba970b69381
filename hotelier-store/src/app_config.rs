use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub identity: IdentityConfig,
    #[serde(default)]
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Rooms must be rated strictly above this to count as top rated.
    #[serde(default = "default_top_rated_threshold")]
    pub top_rated_threshold: f64,
    #[serde(default = "default_top_rated_limit")]
    pub top_rated_limit: usize,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            top_rated_threshold: default_top_rated_threshold(),
            top_rated_limit: default_top_rated_limit(),
        }
    }
}

fn default_top_rated_threshold() -> f64 { 4.5 }
fn default_top_rated_limit() -> usize { 6 }

/// Signing settings for session tokens issued by `POST /jwt`.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

/// Verification settings for bearer identity tokens.
#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    pub secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Without a url the server runs on the in-memory store.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 { 5 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `HOTELIER__DATABASE__URL=postgres://...`
            .add_source(config::Environment::with_prefix("HOTELIER").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Session tokens are self-issued, so they must never be signed with the
    /// key that identity tokens are checked against.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.auth.jwt_secret == self.identity.secret {
            return Err(config::ConfigError::Message(
                "auth.jwt_secret and identity.secret must differ".to_string(),
            ));
        }
        Ok(())
    }
}
