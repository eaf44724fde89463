//! Port interfaces for the application layer
//!
//! Ports define the contract between the button manager and its external
//! collaborators: the privileged button service, the persisted allow-list of
//! verified buttons and the pairing UI flow. Adapters live in `fl-infra` or
//! in the host application.
//!
//! All ports are synchronous. Every call that crosses to the button service
//! may block briefly and may fail with [`RemoteError`].

pub mod button_service;
pub mod errors;
pub mod known_button_store;
pub mod notification_sink;
pub mod pairing_flow;
pub mod service_binder;

pub use button_service::ButtonServicePort;
pub use errors::{KnownButtonStoreError, PairingFlowError, RemoteError};
pub use known_button_store::KnownButtonStorePort;
pub use notification_sink::NotificationSink;
pub use pairing_flow::{GrabRequest, PairingFlowPort};
pub use service_binder::ServiceBinderPort;

