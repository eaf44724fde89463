use fl_core::button::{ButtonEvent, DisconnectReason};

use super::Button;

/// Subscriber for one button's notifications.
///
/// Every method has an empty default so a subscriber only overrides what it
/// cares about. Methods are called on the delivery thread with no library
/// lock held; a subscriber may add or remove subscribers from inside a call.
pub trait ButtonCallback: Send + Sync {
    fn on_connection_started(&self, _button: &Button) {}

    fn on_connection_completed(&self, _button: &Button) {}

    fn on_connection_failed(&self, _button: &Button, _status: i32) {}

    fn on_disconnect(&self, _button: &Button, _reason: DisconnectReason) {}

    /// Result of [`Button::read_remote_rssi`].
    fn on_read_remote_rssi(&self, _button: &Button, _rssi: i32, _status: i32) {}

    /// Input events and the final removal notice.
    fn on_button_event(&self, _button: &Button, _event: &ButtonEvent) {}
}
