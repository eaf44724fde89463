//! Broadcast payload decoding.
//!
//! Besides the live notification channel, the button service can deliver
//! events as string-keyed broadcast payloads that survive a process restart.
//! The payload carries the same event taxonomy as the live channel, encoded
//! as names instead of action codes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::button::{ButtonEvent, EventCategory, EventTiming};

pub mod keys {
    pub const BUTTON_ID: &str = "buttonId";
    pub const TYPE: &str = "type";
    pub const VALUE: &str = "value";
    pub const WAS_QUEUED: &str = "wasQueued";
    pub const TIME_DIFF: &str = "timeDiff";
}

pub mod values {
    pub const UP: &str = "UP";
    pub const DOWN: &str = "DOWN";
    pub const CLICK: &str = "CLICK";
    pub const HOLD: &str = "HOLD";
    pub const SINGLE_CLICK: &str = "SINGLE_CLICK";
    pub const DOUBLE_CLICK: &str = "DOUBLE_CLICK";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastDecodeError {
    #[error("broadcast payload is missing `{0}`")]
    MissingField(&'static str),

    #[error("unknown broadcast event type: {0}")]
    UnknownType(String),
}

/// Raw broadcast payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BroadcastPayload {
    extras: BTreeMap<String, String>,
}

/// A payload decoded into the event taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBroadcast {
    pub button_id: String,
    pub event: ButtonEvent,
}

impl BroadcastPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extras.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }

    pub fn extras(&self) -> &BTreeMap<String, String> {
        &self.extras
    }

    pub fn decode(&self) -> Result<DecodedBroadcast, BroadcastDecodeError> {
        let button_id = self
            .get(keys::BUTTON_ID)
            .ok_or(BroadcastDecodeError::MissingField(keys::BUTTON_ID))?
            .to_string();
        let type_name = self
            .get(keys::TYPE)
            .ok_or(BroadcastDecodeError::MissingField(keys::TYPE))?;
        let category = EventCategory::from_wire_name(type_name)
            .ok_or_else(|| BroadcastDecodeError::UnknownType(type_name.to_string()))?;

        let timing = EventTiming::new(
            self.get(keys::WAS_QUEUED)
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            self.get(keys::TIME_DIFF)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
        );
        let value = self.get(keys::VALUE).unwrap_or_default();
        let is = |expected: &str| value == expected;

        let event = match category {
            EventCategory::UpOrDown => ButtonEvent::UpOrDown {
                timing,
                is_up: is(values::UP),
                is_down: is(values::DOWN),
            },
            EventCategory::ClickOrHold => ButtonEvent::ClickOrHold {
                timing,
                is_click: is(values::CLICK),
                is_hold: is(values::HOLD),
            },
            EventCategory::SingleOrDoubleClick => ButtonEvent::SingleOrDoubleClick {
                timing,
                is_single_click: is(values::SINGLE_CLICK),
                is_double_click: is(values::DOUBLE_CLICK),
            },
            EventCategory::SingleOrDoubleClickOrHold => ButtonEvent::SingleOrDoubleClickOrHold {
                timing,
                is_single_click: is(values::SINGLE_CLICK),
                is_double_click: is(values::DOUBLE_CLICK),
                is_hold: is(values::HOLD),
            },
            EventCategory::Removed => ButtonEvent::Removed,
        };

        Ok(DecodedBroadcast { button_id, event })
    }
}
