//! Secret material handling.

pub mod secret;

pub use secret::SecretString;
