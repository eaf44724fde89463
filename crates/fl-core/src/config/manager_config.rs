use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Manager configuration DTO (pure data, no logic)
/// 管理器配置 DTO（纯数据，无逻辑）
///
/// Every section is optional; a missing section deserializes to its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub app: AppSection,
    pub storage: StorageSection,
    pub logging: LoggingSection,
}

/// Credentials used to pre-seed the write-once app credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
    /// Name shown to the user by the button service.
    pub app_name: Option<String>,
}

impl std::fmt::Debug for AppSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSection")
            .field("app_id", &self.app_id)
            .field("app_secret", &self.app_secret.as_ref().map(|_| "[REDACTED]"))
            .field("app_name", &self.app_name)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// SQLite file holding the known-button allow-list (no existence check).
    pub database_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Directory for rolling log files; stdout only when absent.
    pub directory: Option<PathBuf>,
    /// `EnvFilter` directive, e.g. `info` or `fl_app=debug`.
    pub level: Option<String>,
}
