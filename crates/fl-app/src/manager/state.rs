use std::fmt;

/// Connection lifecycle of a [`ButtonManager`](super::ButtonManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Uninitialized,
    /// Bind requested or registration/reconcile in progress.
    Initializing,
    Ready,
}

impl LifecycleState {
    pub(crate) fn from_flags(connected: bool, initializing: bool) -> Self {
        match (connected, initializing) {
            (_, true) => Self::Initializing,
            (true, false) => Self::Ready,
            (false, false) => Self::Uninitialized,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
        };
        f.write_str(name)
    }
}
