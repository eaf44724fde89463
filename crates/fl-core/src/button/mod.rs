//! Button event taxonomy and connection status models.

pub mod event;
pub mod mask;
pub mod status;

pub use event::{ButtonEvent, EventCategory, EventTiming};
pub use mask::EventMask;
pub use status::{ConnectionStatus, DisconnectReason};
