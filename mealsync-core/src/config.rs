//! Destination configuration, read from the environment before the
//! pipeline starts. Missing values are fatal.

use std::env;
use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

/// Root of TheMealDB's free JSON API.
pub const DEFAULT_SOURCE_URL: &str = "https://www.themealdb.com/api/json/v1/1/";

pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const DATABASE_URL: &str = "DATABASE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },

    #[error("Unknown destination {0:?} (expected \"supabase\" or \"postgres\")")]
    UnknownDestination(String),
}

/// Which destination the import writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DestinationKind {
    /// Supabase's REST endpoint, authenticated with the service role key.
    #[default]
    Supabase,
    /// A direct Postgres connection.
    Postgres,
}

impl FromStr for DestinationKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supabase" => Ok(DestinationKind::Supabase),
            "postgres" | "postgresql" => Ok(DestinationKind::Postgres),
            other => Err(ConfigError::UnknownDestination(other.to_string())),
        }
    }
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationKind::Supabase => f.write_str("supabase"),
            DestinationKind::Postgres => f.write_str("postgres"),
        }
    }
}

pub enum DestinationConfig {
    Supabase {
        url: url::Url,
        service_role_key: SecretString,
    },
    Postgres {
        database_url: SecretString,
    },
}

impl fmt::Debug for DestinationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationConfig::Supabase { url, .. } => f
                .debug_struct("Supabase")
                .field("url", &url.as_str())
                .field("service_role_key", &"REDACTED")
                .finish(),
            DestinationConfig::Postgres { .. } => f
                .debug_struct("Postgres")
                .field("database_url", &"REDACTED")
                .finish(),
        }
    }
}

impl DestinationConfig {
    /// Read the variables `kind` needs from the process environment.
    pub fn from_env(kind: DestinationKind) -> Result<Self, ConfigError> {
        Self::from_lookup(kind, |name: &str| env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`. Blank values
    /// count as missing.
    pub fn from_lookup(
        kind: DestinationKind,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        match kind {
            DestinationKind::Supabase => {
                let raw_url = required(SUPABASE_URL)?;
                let url = url::Url::parse(raw_url.trim()).map_err(|e| ConfigError::InvalidUrl {
                    var: SUPABASE_URL,
                    reason: e.to_string(),
                })?;
                let service_role_key = SecretString::from(required(SUPABASE_SERVICE_ROLE_KEY)?);

                Ok(DestinationConfig::Supabase {
                    url,
                    service_role_key,
                })
            }
            DestinationKind::Postgres => Ok(DestinationConfig::Postgres {
                database_url: SecretString::from(required(DATABASE_URL)?),
            }),
        }
    }
}
