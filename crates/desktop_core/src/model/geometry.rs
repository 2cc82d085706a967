//! Window geometry primitives shared by descriptors and live windows.

use serde::{Deserialize, Serialize};

/// Window size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns whether both dimensions are non-negative.
    pub fn is_non_negative(&self) -> bool {
        self.width >= 0 && self.height >= 0
    }
}

/// Top-left window origin in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_non_negative(&self) -> bool {
        self.x >= 0 && self.y >= 0
    }
}
