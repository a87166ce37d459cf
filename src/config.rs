use serde::Deserialize;
use std::fmt;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_ALLOWED_ORIGIN: &str = "https://karigarsaathi.zenifex.in";
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_DATABASE: &str = "karigar";

/// Service account document for the user database, supplied as JSON.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    pub connection_uri: String,
    #[serde(default)]
    pub database: Option<String>,
}

impl ServiceAccount {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::InvalidCredential(e.to_string()))
    }

    /// Database name: explicit `database`, then `project_id`, then the URI path.
    pub fn database_name(&self) -> String {
        if let Some(db) = self.database.as_deref().filter(|s| !s.is_empty()) {
            return db.to_string();
        }
        if let Some(project) = self.project_id.as_deref().filter(|s| !s.is_empty()) {
            return project.to_string();
        }

        // mongodb://host:port/<db>?options
        self.connection_uri
            .split("://")
            .nth(1)
            .and_then(|rest| rest.split_once('/'))
            .map(|(_, path)| path.split('?').next().unwrap_or(""))
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_DATABASE)
            .to_string()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    InvalidCredential(String),
    InvalidValue(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::InvalidCredential(msg) => {
                write!(f, "DATABASE_SERVICE_ACCOUNT is not a valid credential: {}", msg)
            }
            ConfigError::InvalidValue(key, value) => write!(f, "invalid value for {}: {}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub allowed_origin: String,
    pub static_dir: String,
    pub service_account: ServiceAccount,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub expose_error_details: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_account = lookup("DATABASE_SERVICE_ACCOUNT")
            .ok_or(ConfigError::Missing("DATABASE_SERVICE_ACCOUNT"))?;
        let service_account = ServiceAccount::parse(&raw_account)?;

        let gemini_api_key = lookup("GEMINI_API_KEY").ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("PORT", raw))?,
            None => DEFAULT_PORT,
        };

        let expose_error_details = match lookup("EXPOSE_ERROR_DETAILS").as_deref() {
            None => true,
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => {
                return Err(ConfigError::InvalidValue("EXPOSE_ERROR_DETAILS", other.to_string()))
            }
        };

        // A single concrete origin; wildcards are not accepted by the CORS layer
        let allowed_origin =
            lookup("ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        if !(allowed_origin.starts_with("https://") || allowed_origin.starts_with("http://")) {
            return Err(ConfigError::InvalidValue("ALLOWED_ORIGIN", allowed_origin));
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            allowed_origin,
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            service_account,
            gemini_api_key,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_base: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            expose_error_details,
        })
    }
}
