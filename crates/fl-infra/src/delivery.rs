//! Channel-backed notification delivery.
//!
//! The button service calls [`ChannelNotificationSink::deliver`] on its own
//! threads; the call only enqueues. A single blocking task drains the queue
//! and hands each notification to the target sink, usually the manager's
//! `CallbackDispatcher`, so subscribers always run on one delivery thread.

use std::sync::Arc;

use fl_core::notification::ServiceNotification;
use fl_core::ports::NotificationSink;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Enqueueing side of the delivery channel.
#[derive(Debug, Clone)]
pub struct ChannelNotificationSink {
    sender: UnboundedSender<ServiceNotification>,
}

impl NotificationSink for ChannelNotificationSink {
    fn deliver(&self, notification: ServiceNotification) {
        if let Err(err) = self.sender.send(notification) {
            warn!(
                button_id = %err.0.button_id,
                "Delivery loop stopped; dropping notification"
            );
        }
    }
}

/// Create the sink and the receiver to pass to [`spawn_delivery_loop`].
pub fn notification_channel() -> (ChannelNotificationSink, UnboundedReceiver<ServiceNotification>)
{
    let (sender, receiver) = mpsc::unbounded_channel();
    (ChannelNotificationSink { sender }, receiver)
}

/// Drain `receiver` into `target` on a blocking task of `runtime`.
///
/// The loop ends once every [`ChannelNotificationSink`] clone is dropped.
pub fn spawn_delivery_loop(
    runtime: &Handle,
    mut receiver: UnboundedReceiver<ServiceNotification>,
    target: Arc<dyn NotificationSink>,
) -> JoinHandle<()> {
    runtime.spawn_blocking(move || {
        debug!("Notification delivery loop started");
        while let Some(notification) = receiver.blocking_recv() {
            target.deliver(notification);
        }
        debug!("Notification delivery loop finished");
    })
}
