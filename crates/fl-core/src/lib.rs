//! # fl-core
//!
//! Core domain models and business rules for fliclib.
//!
//! This crate has no infrastructure dependencies. It owns the button identity
//! and event taxonomy, the pairing handshake verification, and the ports
//! through which the application layer talks to the button service, the
//! persisted allow-list and the pairing UI flow.

pub mod broadcast;
pub mod button;
pub mod config;
pub mod credentials;
pub mod error;
pub mod ids;
pub mod notification;
pub mod pairing;
pub mod ports;
pub mod security;

// Re-export commonly used types at the crate root
pub use button::{
    ButtonEvent, ConnectionStatus, DisconnectReason, EventCategory, EventMask, EventTiming,
};
pub use config::ManagerConfig;
pub use credentials::{AppCredentials, AppCredentialsSnapshot};
pub use error::{ButtonError, ManagerError};
pub use ids::{ButtonId, ButtonIdError, ServiceSessionId};
pub use notification::{NotificationKind, ServiceNotification};
pub use pairing::{GrabResponse, ManufacturerKey, PairingError, PairingSession, PairingVerifier};
pub use security::SecretString;
