//! Settings-file discovery and context resolution

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::provider::{EnvSource, StdEnv};
use super::registry::SourceRegistry;
use super::types::{ConfigFormat, GlobalFlags, ResolvedConfig, Verbosity};
use crate::home::get_home_dir;

/// Conventional settings-file name, without extension
pub const CONFIG_FILE_NAME: &str = ".ffceb";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Settings file does not exist
    #[error("Configuration not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Home directory lookup failed during discovery
    #[error("Could not determine home directory")]
    HomeDirUnavailable,
}

/// Candidate settings-file paths, in search order: home, then working directory
pub fn candidate_paths(home_dir: &Path, current_dir: &Path, format: ConfigFormat) -> Vec<PathBuf> {
    let file_name = format!("{CONFIG_FILE_NAME}.{}", format.extension());
    let mut candidates = vec![home_dir.join(&file_name)];
    let local = current_dir.join(&file_name);
    if !candidates.contains(&local) {
        candidates.push(local);
    }
    candidates
}

/// Builds the [`ResolvedConfig`] for one invocation
///
/// 1. Bind `profile` from the flags
/// 2. Use the explicit `--config` path, or discover `.ffceb.toml` in the
///    home directory and then the working directory
/// 3. Load the first candidate that parses; no file is not an error
/// 4. Derive verbosity (`--silent` beats `--verbose`)
#[derive(Debug)]
pub struct ContextResolver {
    flags: GlobalFlags,
    env: Box<dyn EnvSource>,
    home_dir: Option<PathBuf>,
    current_dir: PathBuf,
    format: ConfigFormat,
}

impl ContextResolver {
    /// Create a resolver. `home_dir` is `None` when the lookup failed.
    pub fn new(flags: GlobalFlags, home_dir: Option<PathBuf>, current_dir: PathBuf) -> Self {
        Self {
            flags,
            env: Box::new(StdEnv),
            home_dir,
            current_dir,
            format: ConfigFormat::Toml,
        }
    }

    /// Read environment overrides from `env` instead of the process environment
    pub fn with_env(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Run resolution to completion.
    ///
    /// # Errors
    ///
    /// `HomeDirUnavailable` if no `--config` path was given and the home
    /// directory is unknown. A missing or malformed settings file is not an
    /// error.
    pub fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
        let mut registry = SourceRegistry::with_env_source(self.env);
        registry.bind("profile", self.flags.profile.as_deref());

        let mut search_paths = Vec::new();
        match self.flags.config_path() {
            Some(path) => {
                if !registry.try_load(path, self.format) {
                    debug!(path = %path.display(), "continuing without config file");
                }
            }
            None => {
                let home_dir = self.home_dir.ok_or(ConfigError::HomeDirUnavailable)?;
                search_paths = candidate_paths(&home_dir, &self.current_dir, self.format);
                for candidate in &search_paths {
                    if candidate.exists() && registry.try_load(candidate, self.format) {
                        break;
                    }
                }
            }
        }

        let verbosity = Verbosity::from_flags(self.flags.verbose, self.flags.silent);
        let config_file = registry.config_file_used().map(Path::to_path_buf);
        if let Some(path) = &config_file {
            debug!(path = %path.display(), "using config file");
        }

        Ok(ResolvedConfig {
            profile: registry.get_string("profile").map(PathBuf::from),
            config_file,
            search_paths,
            verbosity,
            registry,
        })
    }
}

/// Resolve the configuration for this process.
///
/// The home directory is only looked up when discovery needs it.
pub fn resolve(flags: &GlobalFlags) -> Result<ResolvedConfig, ConfigError> {
    let home_dir = if flags.config_path().is_none() {
        match get_home_dir() {
            Ok(home) => Some(home),
            Err(e) => {
                debug!("home directory lookup failed: {e:#}");
                None
            }
        }
    } else {
        None
    };
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    ContextResolver::new(flags.clone(), home_dir, current_dir).resolve()
}
