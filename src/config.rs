//! # Configuration Management
//!
//! Centralized configuration for the recipe codec.
//!
//! The codec limits bound every peer-controlled count and length so that a
//! hostile buffer cannot make the decoder allocate more than the configured
//! maximums. Logging settings control the `tracing` subscriber installed by
//! [`crate::utils::logging::init_logging`].
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - TOML strings via `from_toml()`
//! - Environment overrides via `from_env()`
//! - Direct instantiation with defaults

use crate::error::constants::{
    ERR_CONFIG_OPEN, ERR_CONFIG_PARSE, ERR_CONFIG_READ, ERR_CONFIG_SERIALIZE, ERR_CONFIG_WRITE,
};
use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::Level;

/// Default maximum number of recipes accepted in one collection
pub const MAX_RECIPES: usize = 65_536;

/// Default maximum length of any nested list (ingredients, results, potion tables)
pub const MAX_LIST_LEN: usize = 4_096;

/// Default maximum byte length of a string or opaque byte array
pub const MAX_STRING_LEN: usize = 32_767;

/// Default maximum width or height of a shaped recipe grid
pub const MAX_GRID_DIMENSION: i32 = 16;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProtocolConfig {
    /// Decoder limits
    #[serde(default)]
    pub codec: CodecConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProtocolConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ProtocolError::ConfigError(format!("{ERR_CONFIG_OPEN}: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ProtocolError::ConfigError(format!("{ERR_CONFIG_READ}: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("{ERR_CONFIG_PARSE}: {e}")))
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("RECIPE_PROTOCOL_MAX_RECIPES") {
            if let Ok(val) = value.parse::<usize>() {
                config.codec.max_recipes = val;
            }
        }

        if let Ok(value) = std::env::var("RECIPE_PROTOCOL_MAX_LIST_LEN") {
            if let Ok(val) = value.parse::<usize>() {
                config.codec.max_list_len = val;
            }
        }

        if let Ok(value) = std::env::var("RECIPE_PROTOCOL_MAX_STRING_LEN") {
            if let Ok(val) = value.parse::<usize>() {
                config.codec.max_string_len = val;
            }
        }

        if let Ok(value) = std::env::var("RECIPE_PROTOCOL_LOG_LEVEL") {
            if let Ok(level) = Level::from_str(&value) {
                config.logging.log_level = level;
            }
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ProtocolError::ConfigError(format!("{ERR_CONFIG_SERIALIZE}: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| ProtocolError::ConfigError(format!("{ERR_CONFIG_WRITE}: {e}")))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.codec.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Limits applied while decoding peer-supplied recipe data
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Maximum number of recipes in one collection
    pub max_recipes: usize,

    /// Maximum length of nested lists (ingredients, results, auxiliary tables)
    pub max_list_len: usize,

    /// Maximum byte length of strings and opaque item data
    pub max_string_len: usize,

    /// Maximum width or height of a shaped recipe grid
    pub max_grid_dimension: i32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_recipes: MAX_RECIPES,
            max_list_len: MAX_LIST_LEN,
            max_string_len: MAX_STRING_LEN,
            max_grid_dimension: MAX_GRID_DIMENSION,
        }
    }
}

impl CodecConfig {
    /// Validate codec limits
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_recipes == 0 {
            errors.push("Max recipes must be greater than 0".to_string());
        } else if self.max_recipes > 10_000_000 {
            errors.push(format!(
                "Max recipes too large: {} (max recommended: 10,000,000)",
                self.max_recipes
            ));
        }

        if self.max_list_len == 0 {
            errors.push("Max list length must be greater than 0".to_string());
        } else if self.max_list_len > 1_000_000 {
            errors.push(format!(
                "Max list length too large: {} (max recommended: 1,000,000)",
                self.max_list_len
            ));
        }

        if self.max_string_len == 0 {
            errors.push("Max string length must be greater than 0".to_string());
        } else if self.max_string_len > 16 * 1024 * 1024 {
            errors.push(format!(
                "Max string length too large: {} bytes (maximum: 16 MB)",
                self.max_string_len
            ));
        }

        if self.max_grid_dimension < 1 {
            errors.push("Max grid dimension must be at least 1".to_string());
        } else if self.max_grid_dimension > 64 {
            errors.push(format!(
                "Max grid dimension too large: {} (maximum: 64)",
                self.max_grid_dimension
            ));
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,

    /// Whether to include the module target in each line
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("recipe-protocol"),
            log_level: Level::INFO,
            json_format: false,
            with_target: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
