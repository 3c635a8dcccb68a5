use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub airtable: AirtableSettings,
    #[serde(default)]
    pub geocoding: GeocodingSettings,
    #[serde(default)]
    pub matrix: MatrixSettings,
    #[serde(default)]
    pub drive_times: DriveTimeSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Record source (Airtable table) settings
#[derive(Debug, Clone, Deserialize)]
pub struct AirtableSettings {
    #[serde(default = "default_airtable_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub base_id: String,
    #[serde(default = "default_table_name")]
    pub table_name: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

impl AirtableSettings {
    /// The record source is usable only with a base id, a table and a token
    pub fn is_configured(&self) -> bool {
        !self.base_id.trim().is_empty()
            && !self.table_name.trim().is_empty()
            && !self.token.trim().is_empty()
    }
}

impl Default for AirtableSettings {
    fn default() -> Self {
        Self {
            endpoint: default_airtable_endpoint(),
            base_id: String::new(),
            table_name: default_table_name(),
            token: String::new(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_airtable_endpoint() -> String { "https://api.airtable.com/v0".to_string() }
fn default_table_name() -> String { "Restaurants".to_string() }
fn default_page_size() -> u32 { 100 }
fn default_max_pages() -> usize { 200 }

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingSettings {
    #[serde(default = "default_geocoding_endpoint")]
    pub endpoint: String,
    /// Nominatim blocks clients that do not identify themselves
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GeocodingSettings {
    fn default() -> Self {
        Self {
            endpoint: default_geocoding_endpoint(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_geocoding_endpoint() -> String {
    crate::services::geocoder::DEFAULT_GEOCODE_URL.to_string()
}
fn default_user_agent() -> String {
    crate::services::geocoder::DEFAULT_USER_AGENT.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixSettings {
    #[serde(default = "default_matrix_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
}

impl MatrixSettings {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for MatrixSettings {
    fn default() -> Self {
        Self {
            endpoint: default_matrix_endpoint(),
            api_key: String::new(),
        }
    }
}

fn default_matrix_endpoint() -> String {
    crate::services::matrix::DEFAULT_MATRIX_URL.to_string()
}

/// Batching and pacing knobs for drive-time computation
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DriveTimeSettings {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl DriveTimeSettings {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for DriveTimeSettings {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            pause_ms: default_pause_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_chunk_size() -> usize { crate::core::batching::DEFAULT_CHUNK_SIZE }
fn default_pause_ms() -> u64 { 800 }
fn default_request_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with DRIVETIMES__)
    /// 5. Plain deployment variables (AIRTABLE_TOKEN, ORS_API_KEY, ...)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DRIVETIMES__MATRIX__API_KEY -> matrix.api_key
            .add_source(prefixed_environment())
            .build()?;

        apply_plain_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(prefixed_environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn prefixed_environment() -> Environment {
    Environment::with_prefix("DRIVETIMES")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Variables commonly set by hosting platforms, mapped onto config keys
const PLAIN_ENV_OVERRIDES: &[(&[&str], &str)] = &[
    (&["AIRTABLE_BASE_ID"], "airtable.base_id"),
    (&["AIRTABLE_TABLE_NAME"], "airtable.table_name"),
    (&["AIRTABLE_TOKEN"], "airtable.token"),
    (&["ORS_API_KEY", "NEXT_PUBLIC_ORS_API_KEY"], "matrix.api_key"),
];

fn apply_plain_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    for (names, key) in PLAIN_ENV_OVERRIDES {
        let value = names
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());

        if let Some(value) = value {
            builder = builder.set_override(*key, value)?;
        }
    }

    builder.build()
}
