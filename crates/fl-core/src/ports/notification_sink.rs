use crate::notification::ServiceNotification;

/// Receives notifications pushed by the button service.
///
/// Implementations are called on the service's threads and must not block
/// for long.
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, notification: ServiceNotification);
}
