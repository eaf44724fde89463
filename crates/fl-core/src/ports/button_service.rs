use std::sync::Arc;

use super::errors::RemoteError;
use super::notification_sink::NotificationSink;
use crate::broadcast::BroadcastPayload;
use crate::button::{ConnectionStatus, EventMask};
use crate::credentials::AppCredentialsSnapshot;
use crate::ids::{ButtonId, ServiceSessionId};

/// The privileged button service, as seen through its RPC boundary.
///
/// Every method except `register` takes the session id returned by
/// `register`.
pub trait ButtonServicePort: Send + Sync {
    /// Register a notification sink under the given credentials.
    fn register(
        &self,
        sink: Arc<dyn NotificationSink>,
        credentials: &AppCredentialsSnapshot,
    ) -> Result<ServiceSessionId, RemoteError>;

    fn unregister(&self, session: ServiceSessionId) -> Result<(), RemoteError>;

    /// Raw addresses of the buttons the service currently knows.
    fn list_buttons(&self, session: ServiceSessionId) -> Result<Vec<String>, RemoteError>;

    fn set_button_callbacks(
        &self,
        session: ServiceSessionId,
        button: &ButtonId,
        mask: EventMask,
    ) -> Result<(), RemoteError>;

    fn register_listen_for_broadcast(
        &self,
        session: ServiceSessionId,
        button: &ButtonId,
        mask: EventMask,
    ) -> Result<(), RemoteError>;

    fn listen_for_connection_callbacks(
        &self,
        session: ServiceSessionId,
        button: &ButtonId,
    ) -> Result<(), RemoteError>;

    fn unlisten_for_connection_callbacks(
        &self,
        session: ServiceSessionId,
        button: &ButtonId,
    ) -> Result<(), RemoteError>;

    fn connection_status(
        &self,
        session: ServiceSessionId,
        button: &ButtonId,
    ) -> Result<ConnectionStatus, RemoteError>;

    fn name(&self, session: ServiceSessionId, button: &ButtonId)
        -> Result<Option<String>, RemoteError>;

    fn color(
        &self,
        session: ServiceSessionId,
        button: &ButtonId,
    ) -> Result<Option<String>, RemoteError>;

    /// Returns whether the read was started; the value arrives later as a
    /// notification.
    fn read_remote_rssi(
        &self,
        session: ServiceSessionId,
        button: &ButtonId,
    ) -> Result<bool, RemoteError>;

    fn set_active_mode(
        &self,
        session: ServiceSessionId,
        button: &ButtonId,
        active: bool,
    ) -> Result<(), RemoteError>;

    fn grab_exclusivity(
        &self,
        session: ServiceSessionId,
        button: &ButtonId,
    ) -> Result<(), RemoteError>;

    fn release_exclusivity(
        &self,
        session: ServiceSessionId,
        button: &ButtonId,
    ) -> Result<(), RemoteError>;

    fn remove_button(&self, session: ServiceSessionId, button: &ButtonId)
        -> Result<(), RemoteError>;

    /// Whether a broadcast payload genuinely originated from the service.
    fn validate_payload(
        &self,
        session: ServiceSessionId,
        payload: &BroadcastPayload,
    ) -> Result<bool, RemoteError>;
}
