//! Path utilities for krent.
//!
//! All user data lives under `~/.krent/`:
//! - `~/.krent/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the krent home directory (`~/.krent/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".krent")
}

/// Returns the default config file path (`~/.krent/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
