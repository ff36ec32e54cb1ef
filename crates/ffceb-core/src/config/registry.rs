//! Layered configuration store
//!
//! Resolves a key from multiple sources with priority:
//! 1. Command-line flags (only when explicitly set)
//! 2. Environment variables (`FFCEB_<KEY>`)
//! 3. Settings file
//! 4. Built-in defaults
//!
//! The first non-empty value wins. Absence is a valid outcome, never an error.

use std::path::Path;
use tracing::debug;

use super::discovery::ConfigError;
use super::provider::{
    DefaultProvider, EnvProvider, EnvSource, FileProvider, FlagProvider, Provider, StdEnv,
    ENV_PREFIX,
};
use super::types::{ConfigFormat, Value};

/// Process-wide configuration values, gathered from layered providers
#[derive(Debug)]
pub struct SourceRegistry {
    flags: FlagProvider,
    env: EnvProvider,
    file: Option<FileProvider>,
    defaults: DefaultProvider,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceRegistry {
    /// Registry reading `FFCEB_*` variables from the process environment
    pub fn new() -> Self {
        Self::with_env(StdEnv)
    }

    /// Registry reading `FFCEB_*` variables from `source`
    pub fn with_env(source: impl EnvSource + 'static) -> Self {
        Self::with_env_source(Box::new(source))
    }

    pub(crate) fn with_env_source(source: Box<dyn EnvSource>) -> Self {
        Self {
            flags: FlagProvider::default(),
            env: EnvProvider::new(ENV_PREFIX, source),
            file: None,
            defaults: DefaultProvider::default(),
        }
    }

    /// Register a flag as the top-priority provider for `key`.
    ///
    /// Pass `None` for a flag the caller did not set; it then falls through
    /// to the lower layers.
    pub fn bind(&mut self, key: &str, flag_value: Option<&str>) {
        self.flags.bind(key, flag_value);
    }

    /// Register a built-in default for `key`
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) {
        self.defaults.set(key, value.into());
    }

    /// Parse the file at `path` and install it as the file layer.
    ///
    /// Replaces any previously loaded file, so loading the same file twice
    /// yields the same values. The registry is unchanged on error.
    pub fn load(&mut self, path: &Path, format: ConfigFormat) -> Result<(), ConfigError> {
        let file = FileProvider::from_path(path, format)?;
        self.file = Some(file);
        Ok(())
    }

    /// Like [`load`](Self::load), but failures are logged at debug level
    /// and reported as `false`.
    pub fn try_load(&mut self, path: &Path, format: ConfigFormat) -> bool {
        match self.load(path, format) {
            Ok(()) => true,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "config file not loaded");
                false
            }
        }
    }

    /// Effective value for `key`, or `None` if no layer supplies one
    pub fn get(&self, key: &str) -> Option<Value> {
        self.resolve(key).map(|(_, value)| value)
    }

    /// Effective value for `key` rendered as a string
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| match value.as_str() {
            Some(s) => s.to_string(),
            None => value.to_string(),
        })
    }

    /// Effective value for `key` interpreted as a boolean
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|value| value.as_bool())
    }

    /// Name of the provider that supplied the effective value for `key`
    pub fn source_of(&self, key: &str) -> Option<&str> {
        self.resolve(key).map(|(provider, _)| provider.name())
    }

    /// Path of the loaded settings file, if any
    pub fn config_file_used(&self) -> Option<&Path> {
        self.file.as_ref().map(FileProvider::path)
    }

    /// Whether the flag for `key` was explicitly set
    pub fn is_flag_set(&self, key: &str) -> bool {
        self.flags.is_set(&key.to_ascii_lowercase())
    }

    /// Providers in priority order
    pub fn providers(&self) -> impl Iterator<Item = &dyn Provider> {
        let file = self.file.as_ref().map(|f| f as &dyn Provider);
        [
            Some(&self.flags as &dyn Provider),
            Some(&self.env as &dyn Provider),
            file,
            Some(&self.defaults as &dyn Provider),
        ]
        .into_iter()
        .flatten()
    }

    fn resolve(&self, key: &str) -> Option<(&dyn Provider, Value)> {
        let key = key.to_ascii_lowercase();
        self.providers().find_map(|provider| {
            provider
                .lookup(&key)
                .filter(|value| !value.is_empty())
                .map(|value| (provider, value))
        })
    }
}
