//! Configuration resolution
//!
//! Resolves configuration from multiple sources with priority:
//! 1. Command-line flags (only `--profile` is bound)
//! 2. Environment variables (`FFCEB_<KEY>`)
//! 3. Settings file (`--config`, else `~/.ffceb.toml`, else `./.ffceb.toml`)
//! 4. Defaults

mod discovery;
mod provider;
mod registry;
mod types;

pub use discovery::{candidate_paths, resolve, ConfigError, ContextResolver, CONFIG_FILE_NAME};
pub use provider::{
    DefaultProvider, EnvProvider, EnvSource, FileProvider, FlagProvider, MapEnv, Provider,
    ProviderKind, StdEnv, ENV_PREFIX,
};
pub use registry::SourceRegistry;
pub use types::{ConfigFormat, GlobalFlags, ResolvedConfig, Value, Verbosity};
