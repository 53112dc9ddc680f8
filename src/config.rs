//! User settings.
//!
//! # Example
//!
//! ```
//! use show_hidden_channels::HiddenChannelsConfig;
//!
//! // Hidden channels stay in their own categories by default.
//! let config = HiddenChannelsConfig::default();
//! assert!(!config.group_under_hidden_category());
//!
//! let config = HiddenChannelsConfig { sort_native: false };
//! assert!(config.group_under_hidden_category());
//! ```

use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Environment variable read by [`HiddenChannelsConfig::from_env`].
pub const SORT_NATIVE_VAR: &str = "SHC_SORT_NATIVE";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HiddenChannelsConfig {
    /// Keep hidden channels in their real categories (default: true).
    /// When false they are grouped under a synthetic "hidden" category.
    #[serde(default = "default_sort_native")]
    pub sort_native: bool,
}

fn default_sort_native() -> bool {
    true
}

impl Default for HiddenChannelsConfig {
    fn default() -> Self {
        Self {
            sort_native: default_sort_native(),
        }
    }
}

impl HiddenChannelsConfig {
    pub fn group_under_hidden_category(&self) -> bool {
        !self.sort_native
    }

    /// Read the config from `SHC_SORT_NATIVE`, defaulting when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigErrorType::InvalidValue`] if the variable is set to
    /// something other than a boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(SORT_NATIVE_VAR) {
            config.sort_native =
                parse_bool(&value).ok_or_else(|| ConfigError::invalid(SORT_NATIVE_VAR, value))?;
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration could not be read.
#[derive(Debug)]
pub struct ConfigError {
    kind: ConfigErrorType,
}

impl ConfigError {
    fn invalid(name: &'static str, value: String) -> Self {
        Self {
            kind: ConfigErrorType::InvalidValue { name, value },
        }
    }

    /// Immutable reference to the type of error that occurred.
    #[must_use = "retrieving the type has no effect if left unused"]
    pub const fn kind(&self) -> &ConfigErrorType {
        &self.kind
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.kind {
            ConfigErrorType::InvalidValue { name, value } => {
                write!(f, "{name} must be a boolean, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Type of [`ConfigError`] that occurred.
#[derive(Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ConfigErrorType {
    InvalidValue { name: &'static str, value: String },
}
