//! # Configuration Loader / 配置加载器
//!
//! Pure data loading: read the TOML file and map it to [`ManagerConfig`].
//! Nothing is validated here. Missing sections come back as defaults and
//! path existence is left to whoever opens the path.

use std::path::Path;

use anyhow::Context;
use fl_core::ManagerConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML for
/// [`ManagerConfig`].
pub fn load_config(config_path: impl AsRef<Path>) -> anyhow::Result<ManagerConfig> {
    let config_path = config_path.as_ref();
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content).context("Failed to parse config as TOML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let file = write_config(
            r#"
            [app]
            app_id = "my-app"
            app_secret = "s3cret"
            app_name = "My App"

            [storage]
            database_path = "/path/to/buttons.db"

            [logging]
            directory = "/path/to/logs"
            level = "fl_app=trace"
        "#,
        );

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.app.app_id.as_deref(), Some("my-app"));
        assert_eq!(config.app.app_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.app.app_name.as_deref(), Some("My App"));
        assert_eq!(
            config.storage.database_path,
            Some(PathBuf::from("/path/to/buttons.db"))
        );
        assert_eq!(config.logging.directory, Some(PathBuf::from("/path/to/logs")));
        assert_eq!(config.logging.level.as_deref(), Some("fl_app=trace"));
    }

    #[test]
    fn test_load_config_returns_defaults_when_missing() {
        let file = write_config(
            r#"
            [app]
            # credentials are provided at runtime
        "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config, ManagerConfig::default());
    }

    #[test]
    fn test_load_config_does_not_validate_paths() {
        let file = write_config(
            r#"
            [storage]
            database_path = ""
        "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.storage.database_path, Some(PathBuf::new()));
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let err = load_config("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_reports_invalid_toml() {
        let file = write_config("this is = = not toml");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }
}
