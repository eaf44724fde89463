//! Fan-out of inbound service notifications to button subscribers.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use fl_core::button::{ButtonEvent, EventCategory};
use fl_core::ids::ButtonId;
use fl_core::notification::{NotificationKind, ServiceNotification};
use fl_core::ports::NotificationSink;
use tracing::{debug, error, warn};

use crate::button::{Button, ButtonCallback};
use crate::registry::ButtonRegistry;

/// Delivers notifications to the subscribers of the addressed button.
///
/// Unknown ids get a synthesized handle so delivery never stalls. A removal
/// is delivered to every subscriber regardless of the button's mask and then
/// forgets the button.
pub struct CallbackDispatcher {
    registry: Arc<ButtonRegistry>,
}

impl CallbackDispatcher {
    pub fn new(registry: Arc<ButtonRegistry>) -> Self {
        Self { registry }
    }

    pub fn dispatch(&self, notification: ServiceNotification) {
        let id = match ButtonId::parse(&notification.button_id) {
            Ok(id) => id,
            Err(err) => {
                warn!(raw = %notification.button_id, error = %err, "Dropping notification for malformed button id");
                return;
            }
        };
        let button = self
            .registry
            .lookup(&id)
            .unwrap_or_else(|| self.registry.synthesize(id));

        let event = notification.kind.button_event();
        if let Some(event) = &event {
            let category = event.category();
            if category != EventCategory::Removed && !button.callback_flags().allows(category) {
                debug!(button_id = %button.id(), ?category, "Event filtered by button mask");
                return;
            }
        }

        for callback in button.callbacks_snapshot() {
            let delivered = catch_unwind(AssertUnwindSafe(|| {
                invoke(callback.as_ref(), &button, &notification.kind, event.as_ref())
            }));
            if delivered.is_err() {
                error!(button_id = %button.id(), "Button callback panicked; continuing delivery");
            }
        }

        if matches!(event, Some(ButtonEvent::Removed)) {
            self.registry.forget(&button);
            button.mark_forgotten();
        }
    }
}

impl NotificationSink for CallbackDispatcher {
    fn deliver(&self, notification: ServiceNotification) {
        self.dispatch(notification);
    }
}

fn invoke(
    callback: &dyn ButtonCallback,
    button: &Button,
    kind: &NotificationKind,
    event: Option<&ButtonEvent>,
) {
    match (kind, event) {
        (_, Some(event)) => callback.on_button_event(button, event),
        (NotificationKind::ConnectionStarted, None) => callback.on_connection_started(button),
        (NotificationKind::ConnectionCompleted, None) => callback.on_connection_completed(button),
        (NotificationKind::ConnectionFailed { status }, None) => {
            callback.on_connection_failed(button, *status)
        }
        (NotificationKind::Disconnected { .. }, None) => {
            if let Some(reason) = kind.disconnect_reason() {
                callback.on_disconnect(button, reason);
            }
        }
        (NotificationKind::RssiRead { rssi, status }, None) => {
            callback.on_read_remote_rssi(button, *rssi, *status)
        }
        (NotificationKind::Button { .. }, None) => {}
    }
}
