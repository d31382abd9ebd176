use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Area {
    One = 0,
    Two = 1,
    Three = 2,
}

impl Area {
    pub const LOOP: [Area; 3] = [Area::One, Area::Two, Area::Three];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Area::One),
            1 => Some(Area::Two),
            2 => Some(Area::Three),
            _ => None,
        }
    }

    /// Maps the 1-based label the operator uses to an area.
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Area::One),
            2 => Some(Area::Two),
            3 => Some(Area::Three),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn number(self) -> u8 {
        self as u8 + 1
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Area {}", self.number())
    }
}
