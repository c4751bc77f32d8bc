//! Service configuration
//!
//! Layered with the `config` crate, later layers winning:
//! 1. built-in defaults
//! 2. a config file (`helpdesk.yaml`/`.toml`/`.json` in the working
//!    directory, or the path given with `--config`)
//! 3. `HELPDESK__*` environment variables, `__` separating nested keys
//!    (e.g. `HELPDESK__SERVER__PORT=9000`)

use crate::core::{Identity, Role, UserId};
use crate::error::{HelpdeskError, Result};
use ::config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Base name of the config file looked up in the working directory
pub const DEFAULT_CONFIG_NAME: &str = "helpdesk";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "HELPDESK";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
    /// Static bearer tokens and the identities they authenticate
    pub tokens: Vec<TokenEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".helpdesk"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// One bearer token of the authentication collaborator
///
/// `role` has no default; an entry without a valid role fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub token: String,
    pub user_id: UserId,
    pub role: Role,
    #[serde(default)]
    pub is_superuser: bool,
}

impl TokenEntry {
    #[must_use]
    pub const fn identity(&self) -> Identity {
        Identity {
            id: self.user_id,
            role: self.role,
            is_superuser: self.is_superuser,
        }
    }
}

impl Config {
    /// Load configuration from defaults, file and environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config: Self = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check invariants the deserializer cannot express
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(HelpdeskError::config("server.port must be non-zero"));
        }
        if self.storage.path.as_os_str().is_empty() {
            return Err(HelpdeskError::config("storage.path must not be empty"));
        }

        let mut seen = HashSet::new();
        for entry in &self.tokens {
            if entry.token.trim().is_empty() {
                return Err(HelpdeskError::config(format!(
                    "empty token configured for user {}",
                    entry.user_id
                )));
            }
            if !seen.insert(entry.token.as_str()) {
                return Err(HelpdeskError::config(format!(
                    "duplicate token configured for user {}",
                    entry.user_id
                )));
            }
        }
        Ok(())
    }

    /// `host:port` to bind the HTTP listener to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
