use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the JSON configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use wordcrawl::config::load_config;
///
/// let config = load_config(Path::new("config.json")).unwrap();
/// println!("Max depth: {}", config.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    parse_config(&content)
}

/// Parses and validates a configuration from a JSON string
///
/// # Example
///
/// ```
/// use wordcrawl::config::parse_config;
///
/// let config = parse_config(r#"{"startPages": ["http://a/"], "maxDepth": 2}"#).unwrap();
/// assert_eq!(config.max_depth, 2);
/// assert_eq!(config.timeout_seconds, 1);
/// ```
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config = parse_config_unchecked(content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Parses a configuration without validating it
pub(crate) fn parse_config_unchecked(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// This identifies which configuration a run was started with.
///
/// # Arguments
///
/// * `path` - Path to the JSON configuration file
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
