use thiserror::Error;

use crate::ids::ButtonId;

/// Fatal errors surfaced to the caller that asked for the manager.
///
/// They are reported once per attempt and never retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagerError {
    #[error("app credentials were not provided")]
    CredentialsMissing,

    #[error("button service is not available: {0}")]
    ServiceUnavailable(String),
}

/// Errors raised by operations on a button handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ButtonError {
    /// The button was forgotten; the handle may only report its id.
    #[error("button has been forgotten: {id}")]
    Forgotten { id: ButtonId },
}
