//! ID type wrappers for type safety.

pub mod button_id;
pub mod session_id;

pub use button_id::{ButtonId, ButtonIdError};
pub use session_id::ServiceSessionId;
