//! Button event taxonomy.
//!
//! The service reports button input as a category plus a small integer
//! action code. [`ButtonEvent::from_action`] turns that pair into a tagged
//! event whose boolean fields follow a direct index mapping: code 0 sets the
//! first flag, 1 the second and 2 the third (three-way category only). Any
//! other code leaves every flag false.

use serde::{Deserialize, Serialize};

use super::EventMask;

/// Independent event categories a subscriber can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Press / release.
    UpOrDown,
    ClickOrHold,
    SingleOrDoubleClick,
    SingleOrDoubleClickOrHold,
    /// The button was removed in the button service, or this app was
    /// disconnected from it.
    Removed,
}

impl EventCategory {
    pub const ALL: [EventCategory; 5] = [
        EventCategory::UpOrDown,
        EventCategory::ClickOrHold,
        EventCategory::SingleOrDoubleClick,
        EventCategory::SingleOrDoubleClickOrHold,
        EventCategory::Removed,
    ];

    pub fn mask(self) -> EventMask {
        match self {
            Self::UpOrDown => EventMask::UP_OR_DOWN,
            Self::ClickOrHold => EventMask::CLICK_OR_HOLD,
            Self::SingleOrDoubleClick => EventMask::SINGLE_OR_DOUBLE_CLICK,
            Self::SingleOrDoubleClickOrHold => EventMask::SINGLE_OR_DOUBLE_CLICK_OR_HOLD,
            Self::Removed => EventMask::REMOVED,
        }
    }

    /// Name used for this category in broadcast payloads.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::UpOrDown => "UP_OR_DOWN",
            Self::ClickOrHold => "CLICK_OR_HOLD",
            Self::SingleOrDoubleClick => "SINGLE_OR_DOUBLE_CLICK",
            Self::SingleOrDoubleClickOrHold => "SINGLE_OR_DOUBLE_CLICK_OR_HOLD",
            Self::Removed => "REMOVED",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.wire_name() == name)
    }
}

/// Queue information attached to every input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventTiming {
    /// The event happened while the button was disconnected and was flushed
    /// from the button's own queue after reconnecting.
    pub was_queued: bool,
    /// Seconds since the event happened, when queued.
    pub time_diff: i32,
}

impl EventTiming {
    pub fn new(was_queued: bool, time_diff: i32) -> Self {
        Self {
            was_queued,
            time_diff,
        }
    }
}

/// A decoded button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonEvent {
    UpOrDown {
        timing: EventTiming,
        is_up: bool,
        is_down: bool,
    },
    ClickOrHold {
        timing: EventTiming,
        is_click: bool,
        is_hold: bool,
    },
    SingleOrDoubleClick {
        timing: EventTiming,
        is_single_click: bool,
        is_double_click: bool,
    },
    SingleOrDoubleClickOrHold {
        timing: EventTiming,
        is_single_click: bool,
        is_double_click: bool,
        is_hold: bool,
    },
    Removed,
}

impl ButtonEvent {
    pub fn from_action(category: EventCategory, timing: EventTiming, action: i32) -> Self {
        let flag = |index: i32| action == index;
        match category {
            EventCategory::UpOrDown => Self::UpOrDown {
                timing,
                is_up: flag(0),
                is_down: flag(1),
            },
            EventCategory::ClickOrHold => Self::ClickOrHold {
                timing,
                is_click: flag(0),
                is_hold: flag(1),
            },
            EventCategory::SingleOrDoubleClick => Self::SingleOrDoubleClick {
                timing,
                is_single_click: flag(0),
                is_double_click: flag(1),
            },
            EventCategory::SingleOrDoubleClickOrHold => Self::SingleOrDoubleClickOrHold {
                timing,
                is_single_click: flag(0),
                is_double_click: flag(1),
                is_hold: flag(2),
            },
            EventCategory::Removed => Self::Removed,
        }
    }

    pub fn category(&self) -> EventCategory {
        match self {
            Self::UpOrDown { .. } => EventCategory::UpOrDown,
            Self::ClickOrHold { .. } => EventCategory::ClickOrHold,
            Self::SingleOrDoubleClick { .. } => EventCategory::SingleOrDoubleClick,
            Self::SingleOrDoubleClickOrHold { .. } => EventCategory::SingleOrDoubleClickOrHold,
            Self::Removed => EventCategory::Removed,
        }
    }

    /// Queue information, absent for removal.
    pub fn timing(&self) -> Option<EventTiming> {
        match self {
            Self::UpOrDown { timing, .. }
            | Self::ClickOrHold { timing, .. }
            | Self::SingleOrDoubleClick { timing, .. }
            | Self::SingleOrDoubleClickOrHold { timing, .. } => Some(*timing),
            Self::Removed => None,
        }
    }
}
