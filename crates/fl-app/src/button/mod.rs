//! Button handle and subscriber interface.

mod callback;
mod handle;

pub use callback::ButtonCallback;
pub use handle::Button;
