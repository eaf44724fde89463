use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, BitOrAssign};

use super::EventCategory;

/// Bitset of event categories.
///
/// The same type serves the per-button subscriber filter and the broadcast
/// registration mask. The numeric values are part of the service contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventMask(u32);

impl EventMask {
    pub const NONE: Self = Self(0);
    pub const UP_OR_DOWN: Self = Self(1);
    pub const CLICK_OR_HOLD: Self = Self(2);
    pub const SINGLE_OR_DOUBLE_CLICK: Self = Self(4);
    pub const SINGLE_OR_DOUBLE_CLICK_OR_HOLD: Self = Self(8);
    pub const REMOVED: Self = Self(16);
    pub const ALL: Self = Self(31);

    /// Build a mask from raw bits, dropping unknown bits.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn allows(self, category: EventCategory) -> bool {
        self.contains(category.mask())
    }
}

impl Default for EventMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for EventMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for EventMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for EventMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl From<EventCategory> for EventMask {
    fn from(category: EventCategory) -> Self {
        category.mask()
    }
}
