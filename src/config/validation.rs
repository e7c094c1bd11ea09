//! Configuration validation logic.

use regex::Regex;

use crate::api::client::parse_base_url;
use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
///
/// Collection ID zero and the output directory are checked by the downloader
/// itself, right before it starts.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_api_key(&config.account.api_key)?;
    parse_base_url(&config.api.base_url)?;
    validate_timeout(config.api.timeout_seconds)?;

    if let Some(collection) = &config.options.collection {
        parse_collection_id(collection)?;
    }

    Ok(())
}

/// Validate the access token.
pub fn validate_api_key(api_key: &str) -> Result<()> {
    if api_key.trim().is_empty() {
        return Err(Error::MissingConfig("api_key".to_string()));
    }

    // Check for placeholder values
    let key_lower = api_key.to_lowercase();
    if key_lower.contains("replaceme") || key_lower.contains("your_api_key") {
        return Err(Error::ConfigValidation {
            field: "api_key".to_string(),
            message: "API key appears to be a placeholder. Please provide your Raindrop.io token."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate the request timeout.
pub fn validate_timeout(timeout_seconds: u64) -> Result<()> {
    if timeout_seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "timeout_seconds".to_string(),
            message: "Timeout must be at least 1 second".to_string(),
        });
    }
    Ok(())
}

/// Extract a collection ID from a URL or a direct ID string.
///
/// Accepts `123`, `-1` and URLs such as `https://app.raindrop.io/my/123`.
pub fn parse_collection_id(input: &str) -> Result<i64> {
    let input = input.trim();

    let digits = if input.starts_with("http://") || input.starts_with("https://") {
        // Pattern: https://app.raindrop.io/my/1234567
        let url_pattern = Regex::new(r"/my/(-?\d+)(?:[/?#]|$)")
            .map_err(|e| Error::Config(e.to_string()))?;

        url_pattern
            .captures(input)
            .and_then(|captures| captures.get(1))
            .map(|id| id.as_str())
            .ok_or_else(|| Error::ConfigValidation {
                field: "collection".to_string(),
                message: format!("Could not extract collection ID from URL: {}", input),
            })?
    } else {
        input
    };

    let id_pattern = Regex::new(r"^-?\d+$").map_err(|e| Error::Config(e.to_string()))?;
    if !id_pattern.is_match(digits) {
        return Err(Error::ConfigValidation {
            field: "collection".to_string(),
            message: format!(
                "Invalid collection ID: '{}'. Must be a number or a Raindrop.io collection URL.",
                input
            ),
        });
    }

    digits.parse().map_err(|_| Error::ConfigValidation {
        field: "collection".to_string(),
        message: format!("Collection ID out of range: '{}'", input),
    })
}
