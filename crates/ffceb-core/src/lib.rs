//! Core configuration resolution for ffceb
//!
//! This crate decides, before any command runs, which Firefox profile
//! directory, which settings file and which log verbosity apply to an
//! invocation. Values come from layered providers:
//! - Explicit command-line flags
//! - `FFCEB_*` environment variables
//! - An optional `.ffceb.toml` settings file
//! - Built-in defaults
//!
//! The result is a [`ResolvedConfig`] that is built once and handed to
//! command handlers by reference.

pub mod config;
pub mod home;
pub mod logging;

pub use config::{
    resolve, ConfigError, ConfigFormat, ContextResolver, GlobalFlags, ResolvedConfig,
    SourceRegistry, Value, Verbosity,
};
