//! Application directory paths for sift.
//!
//! Uses the [`dirs`] crate for platform-appropriate resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Config | `~/Library/Application Support/sift/` | `~/.config/sift/` |
//!
//! Override with the `SIFT_CONFIG_DIR` environment variable.

use std::path::PathBuf;

/// Environment variable that overrides [`config_dir`].
pub const CONFIG_DIR_ENV: &str = "SIFT_CONFIG_DIR";

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/sift/` by default.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("sift"))
        .unwrap_or_else(|| PathBuf::from("/tmp/sift-config"))
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
