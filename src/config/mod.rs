pub mod schema;

pub use schema::{EndpointConfig, ExtractorConfig, RetryConfig};

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ExtractError;

impl ExtractorConfig {
    /// Load from an explicit TOML file. A missing file is not an error,
    /// the defaults apply; a present-but-broken file is.
    pub fn load_from(path: &Path) -> Result<Self, ExtractError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|e| ExtractError::Config(format!("read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| ExtractError::Config(format!("parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the platform config dir (`structout/config.toml`), falling
    /// back to defaults when the dir or file does not exist.
    pub fn load_or_default() -> Result<Self, ExtractError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "structout").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExtractorConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.endpoint.model, "llama3");
    }

    #[test]
    fn file_overrides_win() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "[retry]\nmax_attempts = 5\ndelay_ms = 250").unwrap();
        let config = ExtractorConfig::load_from(&path).unwrap();
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.delay_ms, 250);
        assert_eq!(config.endpoint.base_url, "http://localhost:11434");
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "endpoint = 3").unwrap();
        assert!(matches!(
            ExtractorConfig::load_from(&path),
            Err(ExtractError::Config(_))
        ));
    }

    #[test]
    fn invalid_values_fail_validation_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[retry]\nmax_attempts = 0").unwrap();
        assert!(ExtractorConfig::load_from(&path).is_err());
    }
}
