use scraper::Selector;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Catalog base URL is http(s)
/// - Timeout is not 0
/// - Detail path is absolute
/// - Every selector parses
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let catalog = &config.catalog;

    if !(catalog.base_url.starts_with("http://") || catalog.base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "catalog.base_url must be an http(s) URL, got '{}'",
            catalog.base_url
        )));
    }

    if catalog.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.timeout_secs cannot be 0".to_string(),
        ));
    }

    if !catalog.detail_path.starts_with('/') {
        return Err(ConfigError::ValidationError(
            "catalog.detail_path must start with '/'".to_string(),
        ));
    }

    for (name, selector) in catalog.selectors.named(catalog.search_tab) {
        if let Err(e) = Selector::parse(&selector) {
            return Err(ConfigError::ValidationError(format!(
                "catalog.selectors.{} is not a valid selector: {}",
                name, e
            )));
        }
    }

    Ok(())
}
