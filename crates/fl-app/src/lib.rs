//! fliclib application orchestration layer
//!
//! This crate owns the runtime state of the library: the button handles and
//! their subscribers, the registry of verified buttons, inbound notification
//! dispatch, the grab (pairing) flow and the connection lifecycle to the
//! button service.

pub mod broadcast;
pub mod button;
pub mod connection;
pub mod dispatcher;
pub mod grab;
pub mod manager;
pub mod registry;

pub use broadcast::{BroadcastDispatcher, BroadcastHandler};
pub use button::{Button, ButtonCallback};
pub use dispatcher::CallbackDispatcher;
pub use grab::{GrabError, GrabFlow, GrabOutcome, GRAB_BUTTON_REQUEST_CODE};
pub use manager::{
    ButtonManager, ButtonManagerDeps, InitializedCallback, LifecycleState, UninitializedCallback,
};
pub use registry::ButtonRegistry;
