use thiserror::Error;

/// Uniform failure of any call to the button service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("button service unavailable: {0}")]
    Unavailable(String),
}

impl RemoteError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnownButtonStoreError {
    #[error("known button store failed: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingFlowError {
    #[error("pairing flow could not be launched: {0}")]
    LaunchFailed(String),
}
