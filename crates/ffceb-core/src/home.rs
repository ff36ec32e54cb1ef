//! Canonical home directory resolution for ffceb
//!
//! The home directory is the primary anchor for settings-file discovery.
//! Everything in the workspace goes through [`get_home_dir`] rather than
//! calling `dirs::home_dir()` directly, so the lookup behaves the same way
//! on every platform.
//!
//! # Platform Behavior
//!
//! - **Linux/macOS**: `dirs::home_dir()` uses the `$HOME` environment variable
//! - **Windows**: `dirs::home_dir()` uses the Windows API (`SHGetKnownFolderPath`)
//!
//! # Testing
//!
//! Integration tests point `HOME` (and `USERPROFILE`) at a temp dir:
//!
//! ```ignore
//! use assert_cmd::cargo;
//! use tempfile::TempDir;
//!
//! let temp_dir = TempDir::new().unwrap();
//! let mut cmd = cargo::cargo_bin_cmd!("ffceb");
//! cmd.env("HOME", temp_dir.path());
//! ```

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the home directory for ffceb operations
///
/// # Errors
///
/// Returns an error if the platform home directory cannot be determined,
/// or if it resolves to an empty path.
pub fn get_home_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    if home.as_os_str().is_empty() {
        anyhow::bail!("Could not determine home directory");
    }
    Ok(home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_home_follows_home_env() {
        use std::env;

        let original = env::var("HOME").ok();
        unsafe { env::set_var("HOME", "/custom/home") };

        let home = get_home_dir().unwrap();
        assert_eq!(home, PathBuf::from("/custom/home"));

        // Restore
        unsafe {
            match original {
                Some(v) => env::set_var("HOME", v),
                None => env::remove_var("HOME"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_multiple_calls_consistent() {
        let home1 = get_home_dir().unwrap();
        let home2 = get_home_dir().unwrap();
        assert_eq!(home1, home2);
    }
}
