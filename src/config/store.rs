//! Persisted key/value configuration for the command line client.
//!
//! Values live in the `[cloudlaunch-cli]` section of the INI file
//! `~/.cloudlaunch`. The file is read once when the store is opened and
//! rewritten on every `set`. `CLOUDLAUNCH_URL` and `CLOUDLAUNCH_TOKEN`
//! override the persisted values at read time without being written back.

use std::path::{Path, PathBuf};

use ini::Ini;

use super::{ApiConfig, ApiUrl, AuthToken};
use crate::error::ConfigError;

/// File name of the configuration file in the home directory.
pub const CONFIG_FILE_NAME: &str = ".cloudlaunch";

/// INI section holding the client's values.
pub const SECTION: &str = "cloudlaunch-cli";

/// Environment variable overriding the persisted `url`.
pub const URL_ENV: &str = "CLOUDLAUNCH_URL";

/// Environment variable overriding the persisted `token`.
pub const TOKEN_ENV: &str = "CLOUDLAUNCH_TOKEN";

const KEY_URL: &str = "url";
const KEY_TOKEN: &str = "token";
const KEYS: [&str; 2] = [KEY_URL, KEY_TOKEN];

/// Resolves environment variable names to values.
pub type EnvLookup = fn(&str) -> Option<String>;

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// The `~/.cloudlaunch` configuration file.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    ini: Ini,
    env: EnvLookup,
}

impl ConfigStore {
    /// Opens the configuration file in the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDirectory`] if the home directory is
    /// unknown, or [`ConfigError::Read`] if the file exists but cannot be
    /// parsed.
    pub fn open_default() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Self::open(home.join(CONFIG_FILE_NAME))
    }

    /// Opens the configuration file at `path`, reading overrides from the
    /// process environment. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::open_with_env(path, process_env)
    }

    /// Opens the configuration file at `path`, reading overrides through
    /// `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be parsed.
    pub fn open_with_env(path: impl Into<PathBuf>, env: EnvLookup) -> Result<Self, ConfigError> {
        let path = path.into();
        let ini = if path.exists() {
            Ini::load_from_file(&path).map_err(|e| ConfigError::Read {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        } else {
            Ini::new()
        };
        tracing::debug!("Loaded configuration from {}", path.display());

        Ok(Self { path, ini, env })
    }

    /// Returns the path of the configuration file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the API base URL, preferring `CLOUDLAUNCH_URL`.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.effective(KEY_URL, URL_ENV)
    }

    /// Returns the auth token, preferring `CLOUDLAUNCH_TOKEN`.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.effective(KEY_TOKEN, TOKEN_ENV)
    }

    /// Validates and persists the API base URL.
    ///
    /// The stored value is truncated after the API root segment.
    ///
    /// # Errors
    ///
    /// Returns the validation error from [`ApiUrl::new`], or
    /// [`ConfigError::Write`] if the file cannot be written.
    pub fn set_url(&mut self, value: &str) -> Result<(), ConfigError> {
        let url = ApiUrl::new(value)?;
        self.persist(KEY_URL, url.as_ref())
    }

    /// Persists the auth token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] for an empty token, or
    /// [`ConfigError::Write`] if the file cannot be written.
    pub fn set_token(&mut self, value: &str) -> Result<(), ConfigError> {
        let token = AuthToken::new(value.trim())?;
        self.persist(KEY_TOKEN, token.as_ref())
    }

    /// Sets a configuration value by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for names other than `url` and
    /// `token`, plus any error of the specific setter.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        match name {
            KEY_URL => self.set_url(value),
            KEY_TOKEN => self.set_token(value),
            _ => Err(ConfigError::UnknownKey {
                name: name.to_string(),
                expected: KEYS.join(", "),
            }),
        }
    }

    /// Returns the persisted key/value pairs, without environment overrides.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        self.ini
            .section(Some(SECTION))
            .map(|section| {
                section
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Builds an [`ApiConfig`] from the effective URL and token.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::default();
        config.set_url(self.url());
        config.set_token(self.token().and_then(|token| AuthToken::new(token).ok()));
        config
    }

    fn effective(&self, key: &str, env_name: &str) -> Option<String> {
        (self.env)(env_name).or_else(|| {
            self.ini
                .section(Some(SECTION))
                .and_then(|section| section.get(key))
                .filter(|value| !value.is_empty())
                .map(ToString::to_string)
        })
    }

    fn persist(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.ini.with_section(Some(SECTION)).set(key, value);
        self.ini
            .write_to_file(&self.path)
            .map_err(|source| ConfigError::Write {
                path: self.path.display().to_string(),
                source,
            })?;
        tracing::debug!("Saved '{}' to {}", key, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::open_with_env(dir.path().join(CONFIG_FILE_NAME), no_env).unwrap();
        assert!(store.url().is_none());
        assert!(store.token().is_none());
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store =
            ConfigStore::open_with_env(dir.path().join(CONFIG_FILE_NAME), no_env).unwrap();
        let result = store.set("colour", "blue");
        assert!(matches!(result, Err(ConfigError::UnknownKey { .. })));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_invalid_url_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut store =
            ConfigStore::open_with_env(dir.path().join(CONFIG_FILE_NAME), no_env).unwrap();
        assert!(store.set("url", "https://launch.example.org/").is_err());
        assert!(store.url().is_none());
    }

    #[test]
    fn test_env_override_is_not_persisted() {
        fn env(name: &str) -> Option<String> {
            (name == TOKEN_ENV).then(|| "from-env".to_string())
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut store = ConfigStore::open_with_env(&path, env).unwrap();
        store.set_token("from-file").unwrap();

        assert_eq!(store.token().as_deref(), Some("from-env"));
        assert_eq!(
            store.entries(),
            vec![("token".to_string(), "from-file".to_string())]
        );
    }
}
