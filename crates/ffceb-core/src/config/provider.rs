//! Configuration providers
//!
//! Each provider is one named layer with a single capability: look up a key.
//! The [`SourceRegistry`](super::SourceRegistry) consults them in
//! [`ProviderKind`] order.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use super::discovery::ConfigError;
use super::types::{ConfigFormat, Value};

/// Prefix for environment variable overrides (`FFCEB_PROFILE`, ...)
pub const ENV_PREFIX: &str = "FFCEB";

/// Provider layers, declared in priority order (highest first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProviderKind {
    /// Explicit command-line flag
    Flag,
    /// Environment variable
    Env,
    /// Settings file
    File,
    /// Built-in default
    Default,
}

impl ProviderKind {
    /// Short label used in diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Flag => "flag",
            ProviderKind::Env => "env",
            ProviderKind::File => "file",
            ProviderKind::Default => "default",
        }
    }
}

/// A named source of configuration values
pub trait Provider: fmt::Debug {
    /// Human-readable name of this provider
    fn name(&self) -> &str {
        self.kind().as_str()
    }

    /// Which layer this provider occupies
    fn kind(&self) -> ProviderKind;

    /// Look up a (lowercased) key
    fn lookup(&self, key: &str) -> Option<Value>;
}

/// Explicitly supplied command-line flags
#[derive(Debug, Default)]
pub struct FlagProvider {
    values: BTreeMap<String, Option<String>>,
}

impl FlagProvider {
    /// Bind a flag. `None` records the flag but supplies nothing.
    pub fn bind(&mut self, key: &str, value: Option<&str>) {
        self.values
            .insert(key.to_ascii_lowercase(), value.map(str::to_string));
    }

    /// Whether the flag for `key` was explicitly set by the caller
    pub fn is_set(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(Some(_)))
    }
}

impl Provider for FlagProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Flag
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        self.values.get(key)?.clone().map(Value::String)
    }
}

/// Abstraction over the process environment so tests need not mutate it.
pub trait EnvSource: fmt::Debug {
    /// Get the value of an environment variable by name
    fn get(&self, name: &str) -> Option<String>;
}

/// Environment source that reads the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment source backed by a map
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// `<PREFIX>_<KEY>` environment variables
#[derive(Debug)]
pub struct EnvProvider {
    prefix: String,
    source: Box<dyn EnvSource>,
}

impl EnvProvider {
    /// Create a provider reading `prefix`-ed variables from `source`
    pub fn new(prefix: impl Into<String>, source: Box<dyn EnvSource>) -> Self {
        Self {
            prefix: prefix.into(),
            source,
        }
    }

    /// Environment variable name for a key: `profile` -> `FFCEB_PROFILE`
    pub fn var_name(&self, key: &str) -> String {
        let key = key.to_ascii_uppercase().replace(['.', '-'], "_");
        format!("{}_{key}", self.prefix.to_ascii_uppercase())
    }
}

impl Provider for EnvProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Env
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        self.source.get(&self.var_name(key)).map(Value::String)
    }
}

/// Values parsed from a settings file
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    table: toml::Table,
}

impl FileProvider {
    /// Read and parse the settings file at `path`
    ///
    /// # Errors
    ///
    /// `NotFound` if the file does not exist, `Io` if it cannot be read,
    /// `TomlParse` if it is not valid TOML.
    pub fn from_path(path: &Path, format: ConfigFormat) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let table = match format {
            ConfigFormat::Toml => toml::from_str::<toml::Table>(&contents)?,
        };
        Ok(Self {
            path: path.to_path_buf(),
            table,
        })
    }

    /// Path the values were read from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Provider for FileProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::File
    }

    /// Dotted keys walk nested tables: `backup.dir` -> `[backup] dir = ...`
    fn lookup(&self, key: &str) -> Option<Value> {
        let mut table = &self.table;
        let mut parts = key.split('.').peekable();
        while let Some(part) = parts.next() {
            let value = get_ignore_case(table, part)?;
            if parts.peek().is_none() {
                return Value::from_toml(value);
            }
            table = value.as_table()?;
        }
        None
    }
}

fn get_ignore_case<'a>(table: &'a toml::Table, key: &str) -> Option<&'a toml::Value> {
    table.get(key).or_else(|| {
        table
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

/// Built-in defaults
#[derive(Debug, Default)]
pub struct DefaultProvider {
    values: BTreeMap<String, Value>,
}

impl DefaultProvider {
    /// Register a default value
    pub fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_ascii_lowercase(), value);
    }
}

impl Provider for DefaultProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Default
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flag_unset_supplies_nothing() {
        let mut flags = FlagProvider::default();
        flags.bind("profile", None);

        assert!(!flags.is_set("profile"));
        assert!(flags.lookup("profile").is_none());
    }

    #[test]
    fn test_flag_set() {
        let mut flags = FlagProvider::default();
        flags.bind("Profile", Some("/tmp/p"));

        assert!(flags.is_set("profile"));
        assert_eq!(flags.lookup("profile"), Some(Value::from("/tmp/p")));
    }

    #[test]
    fn test_env_var_name() {
        let env = EnvProvider::new("ffceb", Box::new(MapEnv::new()));
        assert_eq!(env.var_name("profile"), "FFCEB_PROFILE");
        assert_eq!(env.var_name("backup.dir"), "FFCEB_BACKUP_DIR");
        assert_eq!(env.var_name("dry-run"), "FFCEB_DRY_RUN");
    }

    #[test]
    fn test_env_lookup() {
        let source = MapEnv::new().with("FFCEB_PROFILE", "/env/profile");
        let env = EnvProvider::new(ENV_PREFIX, Box::new(source));

        assert_eq!(env.lookup("profile"), Some(Value::from("/env/profile")));
        assert!(env.lookup("other").is_none());
    }

    #[test]
    fn test_file_lookup_nested_and_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".ffceb.toml");
        std::fs::write(
            &path,
            "Profile = \"/file/profile\"\n\n[backup]\ndir = \"/backups\"\ncompress = true\n",
        )
        .unwrap();

        let file = FileProvider::from_path(&path, ConfigFormat::Toml).unwrap();
        assert_eq!(file.path(), path.as_path());
        assert_eq!(file.lookup("profile"), Some(Value::from("/file/profile")));
        assert_eq!(file.lookup("backup.dir"), Some(Value::from("/backups")));
        assert_eq!(file.lookup("backup.compress"), Some(Value::Bool(true)));
        assert!(file.lookup("backup").is_none());
        assert!(file.lookup("profile.nested").is_none());
    }

    #[test]
    fn test_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let err = FileProvider::from_path(&path, ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_file_unreadable() {
        let temp_dir = TempDir::new().unwrap();

        let err = FileProvider::from_path(temp_dir.path(), ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_provider_names_follow_kind() {
        let flags = FlagProvider::default();
        let env = EnvProvider::new(ENV_PREFIX, Box::new(MapEnv::new()));
        let defaults = DefaultProvider::default();

        assert_eq!(flags.name(), "flag");
        assert_eq!(env.name(), "env");
        assert_eq!(defaults.name(), ProviderKind::Default.as_str());
    }

    #[test]
    fn test_file_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        std::fs::write(&path, "invalid toml [[[").unwrap();

        let err = FileProvider::from_path(&path, ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_provider_kind_order() {
        assert!(ProviderKind::Flag < ProviderKind::Env);
        assert!(ProviderKind::Env < ProviderKind::File);
        assert!(ProviderKind::File < ProviderKind::Default);
    }
}
