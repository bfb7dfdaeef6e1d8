use crate::config::types::Config;
use crate::url::compile_full_match;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_limits(config)?;
    validate_start_pages(&config.start_pages)?;
    validate_patterns(&config.ignored_urls)?;
    validate_patterns(&config.ignored_words)?;
    Ok(())
}

/// Validates the numeric crawl limits
fn validate_limits(config: &Config) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.timeout_seconds == 0 {
        return Err(ConfigError::Validation(
            "timeout_seconds must be greater than 0".to_string(),
        ));
    }

    if config.parallelism < 1 {
        return Err(ConfigError::Validation(format!(
            "parallelism must be at least 1, got {}",
            config.parallelism
        )));
    }

    Ok(())
}

/// Validates that every seed URL is non-blank
///
/// Seeds are otherwise opaque; a seed the page source cannot load simply
/// fails at crawl time.
fn validate_start_pages(start_pages: &[String]) -> Result<(), ConfigError> {
    if let Some(index) = start_pages.iter().position(|p| p.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "start page #{} is blank",
            index
        )));
    }
    Ok(())
}

/// Validates that every pattern compiles as a full-match regular expression
fn validate_patterns(patterns: &[String]) -> Result<(), ConfigError> {
    for pattern in patterns {
        compile_full_match(pattern)?;
    }
    Ok(())
}
