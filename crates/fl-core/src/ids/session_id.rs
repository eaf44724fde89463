use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque id handed out by the button service when a notification sink
/// registers. Every later service call is scoped to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceSessionId(i64);

impl ServiceSessionId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }
}

impl Display for ServiceSessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ServiceSessionId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
