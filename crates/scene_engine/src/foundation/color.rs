//! RGB color type shared by nodes, configuration and draw commands

use serde::{Deserialize, Serialize};

/// Linear RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

impl Color {
    /// Pure red, used for the X axis
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Pure green, used for the Y axis
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Pure blue, used for the Z axis
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    /// Magenta, the base color of freshly created nodes
    pub const MAGENTA: Self = Self::new(1.0, 0.0, 1.0);
    /// Soft green used to highlight the current selection
    pub const SELECTION: Self = Self::new(0.3, 0.8, 0.5);

    /// Create a new color
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Whether every component lies in `[0, 1]`
    pub fn is_normalized(&self) -> bool {
        [self.r, self.g, self.b].iter().all(|c| (0.0..=1.0).contains(c))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::MAGENTA
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::new(r, g, b)
    }
}
