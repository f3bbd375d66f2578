/// Application settings
///
/// Settings are read from a JSON file in the user's config directory:
/// - Linux: ~/.config/image-finder/settings.json
/// - macOS: ~/Library/Application Support/image-finder/settings.json
/// - Windows: %APPDATA%\image-finder\settings.json
///
/// Every field is optional. Environment variables win over the file.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";
pub const DEFAULT_PER_PAGE: u32 = 12;
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 256;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Page sizes the search endpoint accepts
pub const PER_PAGE_RANGE: RangeInclusive<u32> = 3..=200;

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "PIXABAY_API_KEY";
pub const ENV_BASE_URL: &str = "IMAGE_FINDER_BASE_URL";
pub const ENV_PER_PAGE: &str = "IMAGE_FINDER_PER_PAGE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Pixabay API key (None until provided by file or environment)
    pub api_key: Option<String>,
    /// Search endpoint
    pub base_url: String,
    /// Hits requested per page (Pixabay accepts 3..=200)
    pub per_page: u32,
    /// Longest edge of gallery thumbnails, in pixels
    pub thumbnail_size: u32,
    /// HTTP timeout for every request, in seconds
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from the default location and apply environment overrides.
    /// A missing settings file is not an error.
    /// Both the file and the environment are validated.
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = match Self::settings_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        settings.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(settings)
    }

    /// Where the settings file lives, if the platform has a config directory
    pub fn settings_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("image-finder");
        path.push("settings.json");
        Some(path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the API or the gallery cannot work with.
    /// A blank API key counts as no key.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.api_key = self
            .api_key
            .take()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if !PER_PAGE_RANGE.contains(&self.per_page) {
            return Err(ConfigError::Invalid {
                name: "per_page",
                value: self.per_page.to_string(),
                expected: "between 3 and 200",
            });
        }
        if self.thumbnail_size == 0 {
            return Err(ConfigError::Invalid {
                name: "thumbnail_size",
                value: self.thumbnail_size.to_string(),
                expected: "a positive integer",
            });
        }
        Ok(())
    }

    /// Apply overrides looked up by variable name. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key.trim().to_string());
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url.trim().to_string();
        }
        if let Some(raw) = get(ENV_PER_PAGE) {
            self.per_page = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| PER_PAGE_RANGE.contains(n))
                .ok_or(ConfigError::Invalid {
                    name: ENV_PER_PAGE,
                    value: raw,
                    expected: "between 3 and 200",
                })?;
        }
        self.validate()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api_key, None);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.per_page, 12);
        assert_eq!(settings.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "api_key": "abc", "per_page": 40 }}"#).unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("abc"));
        assert_eq!(settings.per_page, 40);
        assert_eq!(settings.thumbnail_size, DEFAULT_THUMBNAIL_SIZE);
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut settings = Settings {
            api_key: Some("from-file".into()),
            ..Settings::default()
        };
        settings
            .apply_overrides(env(&[
                (ENV_API_KEY, " from-env "),
                (ENV_PER_PAGE, "20"),
            ]))
            .unwrap();

        assert_eq!(settings.api_key.as_deref(), Some("from-env"));
        assert_eq!(settings.per_page, 20);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_blank_env_ignored() {
        let mut settings = Settings::default();
        settings.apply_overrides(env(&[(ENV_API_KEY, "   ")])).unwrap();
        assert_eq!(settings.api_key, None);
    }

    #[test]
    fn test_bad_per_page() {
        let mut settings = Settings::default();
        let err = settings
            .apply_overrides(env(&[(ENV_PER_PAGE, "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert_eq!(settings.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_per_page_below_api_minimum() {
        let mut settings = Settings::default();
        let err = settings
            .apply_overrides(env(&[(ENV_PER_PAGE, "2")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: ENV_PER_PAGE, .. }));
        assert_eq!(settings.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_per_page_above_api_maximum() {
        let mut settings = Settings::default();
        assert!(settings
            .apply_overrides(env(&[(ENV_PER_PAGE, "201")]))
            .is_err());

        settings.apply_overrides(env(&[(ENV_PER_PAGE, "200")])).unwrap();
        assert_eq!(settings.per_page, 200);
    }

    fn file_with(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json).unwrap();
        file
    }

    #[test]
    fn test_file_per_page_out_of_range() {
        let file = file_with(r#"{ "per_page": 0 }"#);
        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "per_page", .. }));

        let file = file_with(r#"{ "per_page": 500 }"#);
        assert!(Settings::from_file(file.path()).is_err());
    }

    #[test]
    fn test_file_zero_thumbnail_size() {
        let file = file_with(r#"{ "thumbnail_size": 0 }"#);
        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "thumbnail_size", .. }));
    }

    #[test]
    fn test_file_blank_api_key_is_no_key() {
        let file = file_with(r#"{ "api_key": "  " }"#);
        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.api_key, None);

        let file = file_with(r#"{ "api_key": " abc " }"#);
        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("abc"));
    }
}
