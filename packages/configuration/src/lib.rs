//! Configuration data structures for the Roomtracker.
//!
//! The configuration is loaded from a [TOML](https://toml.io/en/) file
//! `roomtracker.toml` in the working directory, or from the
//! `ROOMTRACKER_CONFIG_TOML` environment variable holding the same content.
//! Individual options can be overridden with environment variables prefixed
//! with `ROOMTRACKER_CONFIG_OVERRIDE_`, using `__` as the nesting separator.
//! For example:
//!
//! ```text
//! ROOMTRACKER_CONFIG_OVERRIDE_CORE__NET__PORT=6969
//! ```
//!
//! On top of that the tracker honors a handful of well-known deployment
//! variables so it can run with no configuration file at all:
//!
//! - `PORT`: the plain-HTTP listen port (default `1337`).
//! - `DOMAINS`: comma-separated hostnames; when set (and TLS cert/key paths
//!   are configured) the tracker serves HTTPS on 443 and redirects HTTP to
//!   HTTPS on 80.
//! - `DOMAIN`: the canonical hostname used as redirect target.
//! - `TRUSTED_PROXIES`: comma-separated CIDRs or addresses whose
//!   `X-Forwarded-For` header is honored.
//!
//! When no source provides a value, the default configuration is used.
pub mod core;
pub mod logging;
pub mod network;

use std::env;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::core::{AnnouncePolicy, Core};
pub use crate::logging::{Logging, Threshold};
pub use crate::network::{Network, TslConfig};

/// Environment variable holding the whole configuration in TOML format.
pub const ENV_VAR_CONFIG_TOML: &str = "ROOMTRACKER_CONFIG_TOML";

/// Environment variable holding the path to the configuration file.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "ROOMTRACKER_CONFIG_TOML_PATH";

/// Default path of the configuration file.
pub const DEFAULT_CONFIG_TOML_PATH: &str = "./roomtracker.toml";

/// Prefix for env vars that overwrite individual configuration options.
const CONFIG_OVERRIDE_PREFIX: &str = "ROOMTRACKER_CONFIG_OVERRIDE_";

/// Path separator in env var names for nested values in configuration.
const CONFIG_OVERRIDE_SEPARATOR: &str = "__";

/// The configuration sources gathered from the process environment before
/// the configuration itself is built.
#[derive(Debug, Default, Clone)]
pub struct Info {
    pub config_toml: Option<String>,
    pub config_toml_path: String,
    pub port: Option<String>,
    pub domains: Option<String>,
    pub domain: Option<String>,
    pub trusted_proxies: Option<String>,
}

impl Info {
    /// Gathers the configuration sources from the process environment.
    #[must_use]
    pub fn gather_from_env() -> Self {
        Self {
            config_toml: env::var(ENV_VAR_CONFIG_TOML).ok(),
            config_toml_path: env::var(ENV_VAR_CONFIG_TOML_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_TOML_PATH.to_string()),
            port: env::var("PORT").ok(),
            domains: env::var("DOMAINS").ok(),
            domain: env::var("DOMAIN").ok(),
            trusted_proxies: env::var("TRUSTED_PROXIES").ok(),
        }
    }
}

/// Core configuration for the tracker.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Default, Clone)]
pub struct Configuration {
    /// Logging configuration.
    pub logging: Logging,

    /// Core configuration.
    pub core: Core,
}

impl Configuration {
    /// Loads the configuration from the given sources.
    ///
    /// Priority, highest first: the well-known deployment variables, the
    /// `ROOMTRACKER_CONFIG_OVERRIDE_` variables, the TOML contents (env var or
    /// file), the defaults.
    ///
    /// # Errors
    ///
    /// Will return an error if any source holds a malformed value.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = if let Some(config_toml) = &info.config_toml {
            Figment::from(Toml::string(config_toml))
        } else {
            Figment::from(Toml::file(&info.config_toml_path))
        };

        let figment = figment
            .merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX).split(CONFIG_OVERRIDE_SEPARATOR))
            .join(Serialized::defaults(Configuration::default()));

        let mut config: Configuration = figment.extract()?;

        config.apply_deployment_overrides(info)?;

        Ok(config)
    }

    /// Applies the well-known deployment variables on top of the extracted
    /// configuration.
    fn apply_deployment_overrides(&mut self, info: &Info) -> Result<(), Error> {
        if let Some(raw_port) = &info.port {
            self.core.net.port = raw_port.parse().map_err(|_| Error::InvalidPort {
                raw_value: raw_port.clone(),
            })?;
        }

        if let Some(domains) = &info.domains {
            self.core.net.domains = split_csv(domains);
        }

        if let Some(domain) = &info.domain {
            self.core.net.domain = Some(domain.trim().to_string());
        }

        if let Some(trusted_proxies) = &info.trusted_proxies {
            self.core.net.trusted_proxies = split_csv(trusted_proxies);
        }

        Ok(())
    }

    /// Encodes the configuration to TOML.
    ///
    /// # Panics
    ///
    /// Will panic if it can't be converted to TOML.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string(self).expect("Could not encode TOML value")
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to load the configuration from the sources: {source}")]
    Figment {
        #[from]
        source: figment::Error,
    },

    #[error("Invalid PORT value: {raw_value}")]
    InvalidPort { raw_value: String },
}
