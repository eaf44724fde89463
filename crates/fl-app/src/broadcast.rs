//! Broadcast delivery path.
//!
//! Broadcast payloads reach the app even when no manager was running, so the
//! handler may be asked for credentials before the manager can be acquired.
//! Delivery itself runs once the manager is ready.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use fl_core::broadcast::BroadcastPayload;
use fl_core::button::ButtonEvent;
use fl_core::credentials::AppCredentials;
use fl_core::ids::ButtonId;
use tracing::{debug, error};

use crate::button::Button;
use crate::connection::ServiceConnection;
use crate::registry::ButtonRegistry;

/// Receiver of decoded broadcast events.
pub trait BroadcastHandler: Send + Sync {
    /// Called when a broadcast arrives before credentials were set. Set them
    /// on `credentials` to let delivery proceed.
    fn request_app_credentials(&self, credentials: &AppCredentials);

    fn on_button_event(&self, _button: &Button, _event: &ButtonEvent) {}
}

pub struct BroadcastDispatcher {
    registry: Arc<ButtonRegistry>,
    connection: Arc<ServiceConnection>,
}

impl BroadcastDispatcher {
    pub fn new(registry: Arc<ButtonRegistry>, connection: Arc<ServiceConnection>) -> Self {
        Self {
            registry,
            connection,
        }
    }

    /// Validate, decode and hand one payload to `handler`.
    ///
    /// Payloads the service does not vouch for are dropped.
    pub fn deliver(&self, payload: &BroadcastPayload, handler: &dyn BroadcastHandler) {
        let valid = self
            .connection
            .call(|service, session| service.validate_payload(session, payload))
            .unwrap_or(false);
        if !valid {
            debug!("Invalid broadcast payload received");
            return;
        }

        let decoded = match payload.decode() {
            Ok(decoded) => decoded,
            Err(err) => {
                debug!(error = %err, "Undecodable broadcast payload");
                return;
            }
        };
        let id = match ButtonId::parse(&decoded.button_id) {
            Ok(id) => id,
            Err(err) => {
                debug!(error = %err, "Broadcast for malformed button id");
                return;
            }
        };
        let button = self
            .registry
            .lookup(&id)
            .unwrap_or_else(|| self.registry.synthesize(id));

        let delivered = catch_unwind(AssertUnwindSafe(|| {
            handler.on_button_event(&button, &decoded.event)
        }));
        if delivered.is_err() {
            error!(button_id = %button.id(), "Broadcast handler panicked");
        }

        if decoded.event == ButtonEvent::Removed {
            self.registry.forget(&button);
            button.mark_forgotten();
        }
    }
}
