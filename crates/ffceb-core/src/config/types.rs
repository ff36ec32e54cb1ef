//! Configuration types

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

use super::registry::SourceRegistry;

/// A single configuration value
///
/// Flag and environment values are always strings; file values keep their
/// TOML scalar type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// String value
    String(String),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Float value
    Float(f64),
}

impl Value {
    /// Borrow the value as a string, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret the value as a boolean
    ///
    /// String values accept `true/false`, `1/0`, `yes/no` and `on/off`
    /// (case-insensitive).
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Integer(i) => Some(*i != 0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" => Some(false),
                _ => None,
            },
            Value::Float(_) => None,
        }
    }

    /// Empty strings count as "no value" during resolution.
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Value::String(s) if s.is_empty())
    }

    /// Convert a TOML scalar. Arrays, tables and datetimes are not values.
    pub(crate) fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::String(s) => Some(Value::String(s.clone())),
            toml::Value::Boolean(b) => Some(Value::Bool(*b)),
            toml::Value::Integer(i) => Some(Value::Integer(*i)),
            toml::Value::Float(f) => Some(Value::Float(*f)),
            toml::Value::Datetime(_) | toml::Value::Array(_) | toml::Value::Table(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// Log verbosity for an invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Informational output (default)
    #[default]
    Normal,
    /// Debug output (`--verbose`)
    Debug,
    /// Errors only (`--silent`)
    Silent,
}

impl Verbosity {
    /// Derive verbosity from the `--verbose` and `--silent` flags.
    ///
    /// `silent` wins when both are set.
    pub fn from_flags(verbose: bool, silent: bool) -> Self {
        if silent {
            Verbosity::Silent
        } else if verbose {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Maximum level that should reach the output
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Normal => LevelFilter::INFO,
            Verbosity::Debug => LevelFilter::DEBUG,
            Verbosity::Silent => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verbosity::Normal => "normal",
            Verbosity::Debug => "debug",
            Verbosity::Silent => "silent",
        };
        f.write_str(s)
    }
}

/// Structured formats a settings file may use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML
    #[default]
    Toml,
}

impl ConfigFormat {
    /// File extension used during discovery
    pub fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "toml",
        }
    }
}

/// Global command-line flags that steer resolution
#[derive(Debug, Clone, Default)]
pub struct GlobalFlags {
    /// Explicit settings-file path (`--config`)
    pub config: Option<PathBuf>,
    /// Firefox profile directory (`--profile`); the only flag bound into the registry
    pub profile: Option<String>,
    /// Show debug output (`--verbose`)
    pub verbose: bool,
    /// Errors only; overrides `verbose` (`--silent`)
    pub silent: bool,
}

impl GlobalFlags {
    /// Explicit settings-file path; an empty `--config ""` counts as unset
    pub fn config_path(&self) -> Option<&Path> {
        self.config
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// Effective configuration for one invocation
///
/// Built once by the context resolver and handed to command handlers.
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Firefox profile directory, if any layer supplied one
    pub profile: Option<PathBuf>,
    /// Settings file that was loaded, if any
    pub config_file: Option<PathBuf>,
    /// Paths considered during discovery; empty when `--config` was given
    pub search_paths: Vec<PathBuf>,
    /// Log verbosity
    pub verbosity: Verbosity,
    /// Layered values, for keys beyond the ones above
    pub registry: SourceRegistry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_overrides_verbose() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Silent);
        assert_eq!(Verbosity::from_flags(true, true).level_filter(), LevelFilter::ERROR);
    }

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Silent);
        assert_eq!(Verbosity::Debug.level_filter(), LevelFilter::DEBUG);
        assert_eq!(Verbosity::Normal.level_filter(), LevelFilter::INFO);
    }

    #[test]
    fn test_value_as_bool() {
        assert_eq!(Value::from("Yes").as_bool(), Some(true));
        assert_eq!(Value::from("off").as_bool(), Some(false));
        assert_eq!(Value::from("maybe").as_bool(), None);
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Integer(0).as_bool(), Some(false));
    }

    #[test]
    fn test_value_from_toml_skips_tables() {
        let table: toml::Table = toml::from_str("a = 1\n[b]\nc = 2\n").unwrap();
        assert_eq!(Value::from_toml(&table["a"]), Some(Value::Integer(1)));
        assert!(Value::from_toml(&table["b"]).is_none());
    }

    #[test]
    fn test_empty_config_path_is_unset() {
        let flags = GlobalFlags {
            config: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(flags.config_path().is_none());

        let flags = GlobalFlags {
            config: Some(PathBuf::from("custom.toml")),
            ..Default::default()
        };
        assert_eq!(flags.config_path(), Some(Path::new("custom.toml")));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("/tmp/p").to_string(), "/tmp/p");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }
}
