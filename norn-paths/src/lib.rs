//! XDG Base Directory paths for norn.
//!
//! The monitor follows XDG paths on every platform so config lives in the
//! same place as the other CLI tools an operator already uses.

use std::path::PathBuf;

/// Get the norn config directory.
///
/// Returns `$XDG_CONFIG_HOME/norn` if set, otherwise `~/.config/norn`.
///
/// # Examples
///
/// ```
/// use norn_paths::config_dir;
///
/// let config = config_dir();
/// let file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Get the norn data directory.
///
/// Returns `$XDG_DATA_HOME/norn` if set, otherwise `~/.local/share/norn`.
/// The monitor's log file is written here while the TUI owns the terminal.
pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

/// Path of the user-level config file.
pub fn user_config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Path of the log file used by interactive sessions.
pub fn log_file() -> PathBuf {
    data_dir().join("norn.log")
}

fn xdg_dir(env_var: &str, home_fallback: &str) -> PathBuf {
    if let Ok(base) = std::env::var(env_var)
        && !base.is_empty()
    {
        PathBuf::from(base).join("norn")
    } else if let Some(home) = dirs::home_dir() {
        home.join(home_fallback).join("norn")
    } else {
        PathBuf::from(home_fallback).join("norn")
    }
}
