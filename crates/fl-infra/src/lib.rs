//! Infrastructure adapters for fliclib.
//!
//! - `db`: SQLite connection pool, embedded migrations and the executor
//! - `store`: known-button allow-list stores (SQLite and in-memory)
//! - `delivery`: channel-backed notification delivery on a dedicated thread

pub mod db;
pub mod delivery;
pub mod store;

pub use delivery::{notification_channel, spawn_delivery_loop, ChannelNotificationSink};
pub use store::{InMemoryKnownButtonStore, SqliteKnownButtonStore};
