//! # Dependency Injection / 依赖注入模块
//!
//! Assembles a [`ButtonManager`] from configuration: the SQLite allow-list,
//! the manufacturer-key verifier, pre-seeded credentials and the channel
//! delivery loop. The host still supplies the two collaborators only it can
//! provide, the service binder and the pairing UI flow.
//!
//! Assembly only. Nothing here decides what the manager does.

use std::path::PathBuf;
use std::sync::Arc;

use fl_app::{ButtonManager, ButtonManagerDeps};
use fl_core::config::{AppSection, ManagerConfig};
use fl_core::credentials::AppCredentials;
use fl_core::pairing::PairingVerifier;
use fl_core::ports::{PairingFlowPort, ServiceBinderPort};
use fl_infra::{notification_channel, spawn_delivery_loop, SqliteKnownButtonStore};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::info;

const APP_DIR_NAME: &str = "fliclib";
const DATABASE_FILE_NAME: &str = "fliclib.db";

pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("No local data directory available to hold the database")]
    DataDirUnavailable,

    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    #[error("Manufacturer key could not be loaded: {0}")]
    ManufacturerKey(String),
}

/// A wired manager plus the delivery loop feeding its dispatcher.
///
/// The loop ends when the manager and every service holding its sink are
/// dropped.
pub struct WiredManager {
    pub manager: ButtonManager,
    pub delivery: JoinHandle<()>,
}

/// Configured database path, or `<data_local_dir>/fliclib/fliclib.db`.
pub fn resolve_database_path(config: &ManagerConfig) -> WiringResult<PathBuf> {
    if let Some(path) = &config.storage.database_path {
        return Ok(path.clone());
    }
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(DATABASE_FILE_NAME))
        .ok_or(WiringError::DataDirUnavailable)
}

/// Build a manager from `config`.
///
/// The delivery loop runs as a blocking task on `runtime`; notifications the
/// service pushes are queued and dispatched from that one task.
pub fn build_manager(
    config: &ManagerConfig,
    runtime: &Handle,
    binder: Arc<dyn ServiceBinderPort>,
    pairing_flow: Arc<dyn PairingFlowPort>,
) -> WiringResult<WiredManager> {
    let db_path = resolve_database_path(config)?;
    let store = SqliteKnownButtonStore::open(&db_path)
        .map_err(|e| WiringError::DatabaseInit(format!("{e:#}")))?;
    info!(path = %db_path.display(), "Known button store opened");

    let verifier = PairingVerifier::with_builtin_key()
        .map_err(|e| WiringError::ManufacturerKey(e.to_string()))?;

    let credentials = Arc::new(AppCredentials::new());
    seed_credentials(&credentials, &config.app);

    let (sink, receiver) = notification_channel();
    let manager = ButtonManager::new(ButtonManagerDeps {
        credentials,
        binder,
        known_buttons: Arc::new(store),
        pairing_flow,
        verifier,
    })
    .with_notification_sink(Arc::new(sink));

    let delivery = spawn_delivery_loop(runtime, receiver, manager.dispatcher());

    Ok(WiredManager { manager, delivery })
}

/// Seed whichever credential fields are configured. Each field stays
/// write-once, so a later `set_app_credentials` cannot override them.
fn seed_credentials(credentials: &AppCredentials, app: &AppSection) {
    if let Some(app_id) = &app.app_id {
        credentials.set_app_id(app_id.as_str());
    }
    if let Some(app_secret) = &app.app_secret {
        credentials.set_app_secret(app_secret.as_str());
    }
    if let Some(app_name) = &app.app_name {
        credentials.set_app_name(app_name.as_str());
    }
}
