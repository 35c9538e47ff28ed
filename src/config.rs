use crate::domain::version::{FIRST_TEST_VERSION, MAX_COMPONENT};
use crate::error::{Result, TagVersionError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "tagversion.toml";

/// Represents the complete configuration for tag-version.
///
/// Contains the recognized product numbers, the test-version threshold and
/// the version stamped into builds whose HEAD carries no version tag.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_product_numbers")]
    pub product_numbers: Vec<u32>,

    #[serde(default = "default_first_test_version")]
    pub first_test_version: u32,

    #[serde(default)]
    pub placeholder: PlaceholderConfig,
}

/// Returns the default list of recognized software article numbers.
fn default_product_numbers() -> Vec<u32> {
    vec![10006000, 10006001, 10006010, 10006020, 10006030]
}

fn default_first_test_version() -> u32 {
    FIRST_TEST_VERSION
}

/// Version used for untagged (development) builds.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlaceholderConfig {
    #[serde(default = "default_placeholder_major")]
    pub major: u32,

    #[serde(default)]
    pub minor: u32,
}

fn default_placeholder_major() -> u32 {
    90
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        PlaceholderConfig {
            major: default_placeholder_major(),
            minor: 0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            product_numbers: default_product_numbers(),
            first_test_version: default_first_test_version(),
            placeholder: PlaceholderConfig::default(),
        }
    }
}

impl Config {
    /// Reject settings the version model cannot represent
    pub fn validate(&self) -> Result<()> {
        if self.product_numbers.is_empty() {
            return Err(TagVersionError::config(
                "product_numbers must list at least one product",
            ));
        }
        if self.placeholder.minor > MAX_COMPONENT {
            return Err(TagVersionError::config(format!(
                "placeholder.minor must be between 0 and {}, got {}",
                MAX_COMPONENT, self.placeholder.minor
            )));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `tagversion.toml` in current directory
/// 3. `.tagversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local_path = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local_path.exists() {
        fs::read_to_string(local_path)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse and validate configuration text
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| TagVersionError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
