use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::types::{
    ApiConfig, DEFAULT_REFRESH_SECS, DEFAULT_TIMEOUT_SECS, MonitorConfig, NornConfig,
    RawApiConfig, RawMonitorConfig, RawNornConfig,
};

/// Environment variable that overrides `[api] url`.
pub const API_URL_ENV: &str = "NORN_API_URL";

/// Environment variable that relocates the project config directory.
pub const PROJECT_CONFIG_DIR_ENV: &str = "NORN_PROJECT_CONFIG_DIR";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (defaults, user, project, environment)
    pub fn load() -> Result<NornConfig> {
        Self::load_layers(&Self::user_config_path(), &Self::project_config_path())
    }

    /// Get user config path (`$XDG_CONFIG_HOME/norn/config.toml`)
    pub fn user_config_path() -> PathBuf {
        norn_paths::user_config_file()
    }

    /// Get project config path
    /// Can be overridden with NORN_PROJECT_CONFIG_DIR
    pub fn project_config_path() -> PathBuf {
        match std::env::var(PROJECT_CONFIG_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join("config.toml"),
            _ => PathBuf::from(".norn/config.toml"),
        }
    }

    fn load_layers(user_path: &Path, project_path: &Path) -> Result<NornConfig> {
        let mut raw = RawNornConfig::default();

        // Layer 1: User config
        if let Some(user_config) = Self::read_layer(user_path)? {
            raw = Self::merge_raw(raw, user_config);
        }

        // Layer 2: Project config
        if let Some(project_config) = Self::read_layer(project_path)? {
            raw = Self::merge_raw(raw, project_config);
        }

        // Layer 3: Environment
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            debug!(%url, "API url taken from {}", API_URL_ENV);
            raw.api.url = Some(url);
        }

        Self::finalize(raw)
    }

    fn read_layer(path: &Path) -> Result<Option<RawNornConfig>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!(path = %path.display(), "Loaded config layer");
        Ok(Some(config))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawNornConfig, overlay: RawNornConfig) -> RawNornConfig {
        RawNornConfig {
            api: RawApiConfig {
                url: overlay.api.url.or(base.api.url),
                timeout_secs: overlay.api.timeout_secs.or(base.api.timeout_secs),
            },
            monitor: RawMonitorConfig {
                refresh_secs: overlay.monitor.refresh_secs.or(base.monitor.refresh_secs),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawNornConfig) -> Result<NornConfig> {
        let config = NornConfig {
            api: ApiConfig {
                url: raw
                    .api
                    .url
                    .unwrap_or_else(|| norn_tui::DEFAULT_API_URL.to_string()),
                timeout_secs: raw.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
            monitor: MonitorConfig {
                refresh_secs: raw.monitor.refresh_secs.unwrap_or(DEFAULT_REFRESH_SECS),
            },
        };

        if config.api.timeout_secs == 0 {
            bail!("[api] timeout_secs must be at least 1");
        }
        if config.monitor.refresh_secs == 0 {
            bail!("[monitor] refresh_secs must be at least 1");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", contents).unwrap();
        path
    }

    fn clear_env() {
        unsafe {
            std::env::remove_var(API_URL_ENV);
            std::env::remove_var(PROJECT_CONFIG_DIR_ENV);
        }
    }

    #[test]
    #[serial]
    fn test_load_without_files_returns_defaults() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();

        let config = ConfigLoader::load_layers(
            &temp_dir.path().join("user.toml"),
            &temp_dir.path().join("project.toml"),
        )
        .unwrap();

        assert_eq!(config, NornConfig::default());
    }

    #[test]
    #[serial]
    fn test_project_overrides_user() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let user = write(
            &temp_dir,
            "user.toml",
            "[api]\nurl = \"http://user:8000\"\ntimeout_secs = 30\n\n[monitor]\nrefresh_secs = 20",
        );
        let project = write(&temp_dir, "project.toml", "[api]\nurl = \"http://project:8000\"");

        let config = ConfigLoader::load_layers(&user, &project).unwrap();

        assert_eq!(config.api.url, "http://project:8000");
        // Unset project keys fall through to the user layer.
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.monitor.refresh_secs, 20);
    }

    #[test]
    #[serial]
    fn test_env_overrides_files() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let project = write(&temp_dir, "project.toml", "[api]\nurl = \"http://project:8000\"");

        unsafe { std::env::set_var(API_URL_ENV, "http://env:9000") };
        let config = ConfigLoader::load_layers(&temp_dir.path().join("none.toml"), &project);
        clear_env();

        assert_eq!(config.unwrap().api.url, "http://env:9000");
    }

    #[test]
    #[serial]
    fn test_blank_env_is_ignored() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();

        unsafe { std::env::set_var(API_URL_ENV, "  ") };
        let config = ConfigLoader::load_layers(
            &temp_dir.path().join("user.toml"),
            &temp_dir.path().join("project.toml"),
        );
        clear_env();

        assert_eq!(config.unwrap().api.url, norn_tui::DEFAULT_API_URL);
    }

    #[test]
    #[serial]
    fn test_invalid_toml_returns_error() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let bad = write(&temp_dir, "bad.toml", "this is not valid toml {{{{");

        let result = ConfigLoader::load_layers(&bad, &temp_dir.path().join("none.toml"));

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("bad.toml"));
    }

    #[test]
    #[serial]
    fn test_zero_refresh_is_rejected() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let user = write(&temp_dir, "user.toml", "[monitor]\nrefresh_secs = 0");

        let result = ConfigLoader::load_layers(&user, &temp_dir.path().join("none.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_raw_none_preserves_base() {
        let base = RawNornConfig {
            api: RawApiConfig {
                url: Some("http://base:8000".into()),
                timeout_secs: Some(5),
            },
            monitor: RawMonitorConfig {
                refresh_secs: Some(7),
            },
        };

        let merged = ConfigLoader::merge_raw(base, RawNornConfig::default());

        assert_eq!(merged.api.url.as_deref(), Some("http://base:8000"));
        assert_eq!(merged.api.timeout_secs, Some(5));
        assert_eq!(merged.monitor.refresh_secs, Some(7));
    }

    #[test]
    #[serial]
    fn test_project_config_path() {
        clear_env();
        assert_eq!(
            ConfigLoader::project_config_path(),
            PathBuf::from(".norn/config.toml")
        );

        unsafe { std::env::set_var(PROJECT_CONFIG_DIR_ENV, "/tmp/norn-e2e") };
        let path = ConfigLoader::project_config_path();
        clear_env();

        assert_eq!(path, PathBuf::from("/tmp/norn-e2e/config.toml"));
    }

    #[test]
    fn test_user_config_path_is_under_norn() {
        let path = ConfigLoader::user_config_path();
        assert!(path.ends_with("norn/config.toml"));
    }
}
