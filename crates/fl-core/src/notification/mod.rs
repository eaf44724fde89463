//! Inbound notifications from the button service.

use serde::{Deserialize, Serialize};

use crate::button::{ButtonEvent, DisconnectReason, EventCategory, EventTiming};

/// One notification as delivered by the service, before identity resolution.
///
/// `button_id` is the raw address string; it is normalized by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceNotification {
    pub button_id: String,
    pub kind: NotificationKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    ConnectionStarted,
    ConnectionCompleted,
    Disconnected {
        error_code: i32,
    },
    ConnectionFailed {
        status: i32,
    },
    RssiRead {
        rssi: i32,
        status: i32,
    },
    /// Any of the five event categories, removal included.
    Button {
        category: EventCategory,
        was_queued: bool,
        time_diff: i32,
        action: i32,
    },
}

impl ServiceNotification {
    pub fn new(button_id: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            button_id: button_id.into(),
            kind,
        }
    }

    pub fn button(
        button_id: impl Into<String>,
        category: EventCategory,
        was_queued: bool,
        time_diff: i32,
        action: i32,
    ) -> Self {
        Self::new(
            button_id,
            NotificationKind::Button {
                category,
                was_queued,
                time_diff,
                action,
            },
        )
    }

    pub fn removed(button_id: impl Into<String>) -> Self {
        Self::button(button_id, EventCategory::Removed, false, 0, 0)
    }
}

impl NotificationKind {
    /// Decoded event for button input notifications.
    pub fn button_event(&self) -> Option<ButtonEvent> {
        match *self {
            Self::Button {
                category,
                was_queued,
                time_diff,
                action,
            } => Some(ButtonEvent::from_action(
                category,
                EventTiming::new(was_queued, time_diff),
                action,
            )),
            _ => None,
        }
    }

    pub fn disconnect_reason(&self) -> Option<DisconnectReason> {
        match *self {
            Self::Disconnected { error_code } => Some(DisconnectReason::from_code(error_code)),
            _ => None,
        }
    }
}
