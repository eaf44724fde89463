//! fliclib: pair with Flic buttons, track the verified ones and dispatch
//! their events, all through a separate button service process.
//!
//! The workspace is split the same way as any hexagonal app:
//!
//! - [`fl_core`]: domain types, pairing verification and ports
//! - [`fl_app`]: registry, dispatcher, grab flow and the manager lifecycle
//! - [`fl_infra`]: SQLite/in-memory stores and the delivery loop
//! - [`bootstrap`]: configuration, tracing and wiring

pub mod bootstrap;

pub use fl_app;
pub use fl_core;
pub use fl_infra;

pub use fl_app::{
    BroadcastHandler, Button, ButtonCallback, ButtonManager, GrabOutcome,
    GRAB_BUTTON_REQUEST_CODE,
};
pub use fl_core::{ButtonEvent, ButtonId, EventMask, ManagerConfig, ManagerError};
