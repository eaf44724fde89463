//! Known-button allow-list stores.

mod memory;
mod sqlite;

pub use memory::InMemoryKnownButtonStore;
pub use sqlite::SqliteKnownButtonStore;
