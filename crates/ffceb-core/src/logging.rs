//! Logging initialization for the ffceb binary.
//!
//! The threshold comes from the [`Verbosity`] the caller passes in; nothing
//! here reads a global level handle or an environment variable.

use std::sync::OnceLock;

use crate::config::Verbosity;

static INIT: OnceLock<()> = OnceLock::new();

/// Initialize process-level tracing output at the given verbosity.
///
/// Output goes to stderr without timestamps or targets. Safe to call more
/// than once; only the first call installs the subscriber.
pub fn init(verbosity: Verbosity) {
    if INIT.get().is_some() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_max_level(verbosity.level_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
    let _ = INIT.set(());
}
