//! Configuration errors.

use camino::Utf8PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while loading or resolving configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A required setting is set in no layer.
    #[error(
        "missing setting '{key}', set it in the config file, as {env} or on the command line"
    )]
    Missing {
        /// Setting name as used in the config file.
        key: &'static str,
        /// Environment variable that can provide it.
        env: String,
    },

    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Config file path.
        path: Utf8PathBuf,
        /// Filesystem error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The layers could not be merged: the file is not valid YAML or a
    /// value has the wrong type.
    #[error("failed to load settings: {0}")]
    Load(#[source] Arc<::config::ConfigError>),

    /// A setting holds a value the domain rejects.
    #[error("invalid setting '{key}': {reason}")]
    Invalid {
        /// Setting name.
        key: &'static str,
        /// Validation message.
        reason: String,
    },
}

impl ConfigError {
    /// Builds a missing-setting error for `key`.
    #[must_use]
    pub fn missing(key: &'static str) -> Self {
        Self::Missing {
            key,
            env: super::layer::env_var_name(key),
        }
    }

    /// Wraps a failure of the layered loader.
    #[must_use]
    pub fn load(source: ::config::ConfigError) -> Self {
        Self::Load(Arc::new(source))
    }

    /// Builds an invalid-setting error from a validation failure.
    pub fn invalid(key: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Invalid {
            key,
            reason: reason.to_string(),
        }
    }
}
