//! Configuration constants and profile loading for raspberry-awards
//!
//! Settings live in an INI file with one section per profile:
//!
//! ```ini
//! [default]
//! api_base_url = https://challenge.outsera.tech/api/movies
//! page_size = 15
//! debounce_ms = 500
//! ```
//!
//! A missing file, section or key falls back to the built-in default.

use crate::app::services::{DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE};
use crate::app::view_models::{MoviesSettings, DEFAULT_QUIET_PERIOD};
use anyhow::{bail, Context, Result};
use ini::{Ini, Properties};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default profile file path for raspberry-awards
pub const DEFAULT_PROFILE_PATH: &str = "~/.raspberry/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "RASPBERRY_PROFILE_PATH";

/// Log file used when `--log-file` is not given. The terminal belongs to
/// the interface, so logs never go to stdout or stderr.
pub const DEFAULT_LOG_PATH: &str = "~/.raspberry/raspberry.log";

/// Environment variable holding the tracing filter
pub const LOG_LEVEL_ENV_VAR: &str = "RASPBERRY_LOG_LEVEL";

pub const API_BASE_URL_KEY: &str = "api_base_url";
pub const PAGE_SIZE_KEY: &str = "page_size";
pub const DEBOUNCE_MS_KEY: &str = "debounce_ms";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Log destination: `log_file` when given, otherwise [`DEFAULT_LOG_PATH`]
pub fn get_log_path(log_file: Option<&PathBuf>) -> PathBuf {
    match log_file {
        Some(path) => path.clone(),
        None => PathBuf::from(shellexpand::tilde(DEFAULT_LOG_PATH).as_ref()),
    }
}

/// Settings resolved from one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub page_size: u32,
    pub debounce: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_QUIET_PERIOD,
        }
    }
}

impl Settings {
    /// Load `profile_name` from the INI file at `profile_path` (`~` expanded)
    pub fn load(profile_path: &str, profile_name: &str) -> Result<Self> {
        let path = shellexpand::tilde(profile_path);
        tracing::debug!("Loading profile '{}' from '{}'", profile_name, path);

        let ini = match Ini::load_from_file(path.as_ref()) {
            Ok(ini) => ini,
            Err(ini::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Profile file '{}' not found, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read profile file '{path}'"))
            }
        };

        Self::from_ini(&ini, profile_name)
    }

    /// Resolve `profile_name` from already parsed INI content
    pub fn from_ini(ini: &Ini, profile_name: &str) -> Result<Self> {
        let Some(section) = ini.section(Some(profile_name)) else {
            tracing::debug!("Profile '{}' not found, using defaults", profile_name);
            return Ok(Self::default());
        };

        let defaults = Self::default();
        let page_size = parse_key(section, PAGE_SIZE_KEY)?.unwrap_or(defaults.page_size);
        if page_size == 0 {
            bail!("Invalid value '0' for '{PAGE_SIZE_KEY}': must be greater than zero");
        }

        Ok(Self {
            api_base_url: section
                .get(API_BASE_URL_KEY)
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url),
            page_size,
            debounce: parse_key(section, DEBOUNCE_MS_KEY)?
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce),
        })
    }

    pub fn movies_settings(&self) -> MoviesSettings {
        MoviesSettings {
            page_size: self.page_size,
            quiet_period: self.debounce,
        }
    }
}

fn parse_key<T>(section: &Properties, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    section
        .get(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value '{value}' for '{key}'"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_profile(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.raspberry/profile");
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(PROFILE_PATH_ENV_VAR, "RASPBERRY_PROFILE_PATH");
    }

    #[test]
    fn test_get_profile_path_env_override_and_default() {
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        std::env::remove_var(PROFILE_PATH_ENV_VAR);
        assert_eq!(get_profile_path(), DEFAULT_PROFILE_PATH);

        let test_path = "/custom/profile/path";
        std::env::set_var(PROFILE_PATH_ENV_VAR, test_path);
        assert_eq!(get_profile_path(), test_path);

        match original {
            Some(val) => std::env::set_var(PROFILE_PATH_ENV_VAR, val),
            None => std::env::remove_var(PROFILE_PATH_ENV_VAR),
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope");

        let settings = Settings::load(path.to_str().unwrap(), "default").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.page_size, 15);
        assert_eq!(settings.debounce, Duration::from_millis(500));
    }

    #[test]
    fn test_profile_values_override_defaults() {
        let file = write_profile(
            "[default]\napi_base_url = http://localhost:8080/api/movies\npage_size = 20\n\n[slow]\ndebounce_ms = 1200\n",
        );
        let path = file.path().to_str().unwrap();

        let default = Settings::load(path, "default").unwrap();
        assert_eq!(default.api_base_url, "http://localhost:8080/api/movies");
        assert_eq!(default.page_size, 20);
        assert_eq!(default.debounce, DEFAULT_QUIET_PERIOD);

        let slow = Settings::load(path, "slow").unwrap();
        assert_eq!(slow.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(slow.debounce, Duration::from_millis(1200));
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let file = write_profile("[other]\npage_size = 5\n");
        let settings = Settings::load(file.path().to_str().unwrap(), "default").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_number_names_key() {
        let file = write_profile("[default]\npage_size = lots\n");
        let error = Settings::load(file.path().to_str().unwrap(), "default").unwrap_err();
        assert!(format!("{error:#}").contains("page_size"));
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let ini = Ini::load_from_str("[default]\npage_size = 0\n").unwrap();
        let error = Settings::from_ini(&ini, "default").unwrap_err();
        assert!(error.to_string().contains("page_size"));
    }

    #[test]
    fn test_log_path_defaults_next_to_profile() {
        let path = get_log_path(None);
        assert!(path.ends_with(".raspberry/raspberry.log"));
        assert!(!path.starts_with("~"));
    }

    #[test]
    fn test_log_path_prefers_explicit_file() {
        let explicit = PathBuf::from("/tmp/raspberry-test.log");
        assert_eq!(get_log_path(Some(&explicit)), explicit);
    }

    #[test]
    fn test_movies_settings_conversion() {
        let settings = Settings {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: 30,
            debounce: Duration::from_millis(100),
        };
        assert_eq!(
            settings.movies_settings(),
            MoviesSettings {
                page_size: 30,
                quiet_period: Duration::from_millis(100)
            }
        );
    }
}
