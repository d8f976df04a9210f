use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Configuration options for the storefront service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Path to the SQLite database file.
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Session cookie key shared with the identity provider; at least 64 bytes.
    pub secret: String,
    /// Where unauthenticated admins are sent to sign in.
    pub sign_in_url: String,
    /// Used in page titles and the navigation bar.
    pub store_name: String,
    /// ISO 4217 code advertised in product metadata.
    pub currency_code: String,
    /// Symbol printed in front of prices on the storefront.
    pub currency_symbol: String,
    /// Glob passed to Tera.
    pub templates_dir: String,
}

impl ServerConfig {
    /// Loads `config/default.yaml`, the optional `config/{app_env}.yaml` and
    /// `APP_*` environment variables, later sources overriding earlier ones.
    pub fn load(app_env: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
