use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

const ENV_PREFIX: &str = "SVSCRAPER_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    load_config_or_default(Some(path))
}

/// Load configuration starting from built-in defaults.
///
/// The file is merged only if it exists; `SVSCRAPER_` variables are merged
/// last, using `__` between nested keys (e.g. `SVSCRAPER_CATALOG__BASE_URL`).
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(path) = path {
        figment = figment.merge(Toml::file(path));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[catalog]
base_url = "http://localhost:9000"
timeout_secs = 5

[output]
download_poster = false
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.catalog.base_url, "http://localhost:9000");
        assert_eq!(config.catalog.timeout_secs, 5);
        assert_eq!(config.catalog.search_tab, 1);
        assert!(!config.output.download_poster);
        assert!(config.output.overwrite);
    }

    #[test]
    fn test_load_config_from_str_empty_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.catalog.base_url, "https://www.skatevideosite.com");
        assert!(!config.catalog.use_source_id);
        assert!(config.output.download_poster);
    }

    #[test]
    fn test_load_config_from_str_bad_type() {
        let toml = r#"
[catalog]
timeout_secs = "soon"
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/svscraper.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let config = load_config_or_default(Some(Path::new("/nonexistent/svscraper.toml"))).unwrap();
        assert_eq!(config.catalog.detail_path, "/videos/");
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[catalog]
use_source_id = true

[catalog.selectors]
title = "h1"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert!(config.catalog.use_source_id);
        assert_eq!(config.catalog.selectors.title, "h1");
        // untouched selectors keep their defaults
        assert!(config.catalog.selectors.cast.ends_with("> span"));
    }
}
