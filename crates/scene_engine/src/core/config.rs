//! # Editor Configuration
//!
//! All tunable settings of the scene editor in one serializable structure.
//! Files may be written in TOML or RON; missing sections fall back to the
//! defaults below.
//!
//! ## Configuration Categories
//!
//! - **Logging**: default log filter when `RUST_LOG` is unset
//! - **Scene**: node colors, axis display, interface scale limits, draw toggles
//! - **Camera**: projection parameters and trackball speeds

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::foundation::color::Color;
use crate::render::DrawFlags;

/// # Logging Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter used when `RUST_LOG` is not set (e.g. "info", "scene_engine=debug")
    pub log_level: String,
}

impl LoggingConfig {
    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// # Scene Configuration
///
/// Defaults applied to new nodes plus the limits enforced on the interface
/// transform mirror.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Base color of newly created nodes
    pub default_color: Color,
    /// Color used for selected nodes when highlighting is enabled
    pub highlight_color: Color,
    /// Axis display scale of ordinary nodes
    pub axis_scale: f32,
    /// Axis display scale of the root
    pub root_axis_scale: f32,
    /// Lower bound for interface scale values
    pub scale_min: f32,
    /// Upper bound for interface scale values
    pub scale_max: f32,
    /// Draw each node's local axes
    pub show_axes: bool,
    /// Draw selected nodes in the highlight color
    pub highlight_selection: bool,
    /// Draw the open group alongside the main tree
    pub draw_open_group: bool,
}

impl SceneConfig {
    /// Set the base color of new nodes
    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    /// Set the interface scale limits
    pub fn with_scale_limits(mut self, min: f32, max: f32) -> Self {
        self.scale_min = min;
        self.scale_max = max;
        self
    }

    /// Enable or disable axis drawing
    pub fn with_axes(mut self, enabled: bool) -> Self {
        self.show_axes = enabled;
        self
    }

    /// Draw flags derived from the boolean toggles
    pub fn draw_flags(&self) -> DrawFlags {
        let mut flags = DrawFlags::empty();
        flags.set(DrawFlags::AXES, self.show_axes);
        flags.set(DrawFlags::HIGHLIGHT_SELECTION, self.highlight_selection);
        flags.set(DrawFlags::OPEN_GROUP, self.draw_open_group);
        flags
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.scale_min > 0.0) {
            return Err(format!("scale_min must be positive, got {}", self.scale_min));
        }
        if self.scale_min > self.scale_max {
            return Err(format!(
                "scale_min ({}) must not exceed scale_max ({})",
                self.scale_min, self.scale_max
            ));
        }
        if self.axis_scale < 0.0 || self.root_axis_scale < 0.0 {
            return Err("Axis scales cannot be negative".to_string());
        }
        if !self.default_color.is_normalized() || !self.highlight_color.is_normalized() {
            return Err("Colors must have components in [0, 1]".to_string());
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            default_color: Color::MAGENTA,
            highlight_color: Color::SELECTION,
            axis_scale: 0.5,
            root_axis_scale: 1.0,
            scale_min: 0.5,
            scale_max: 4.0,
            show_axes: true,
            highlight_selection: true,
            draw_open_group: true,
        }
    }
}

/// # Camera Configuration
///
/// Projection parameters and the gains applied to normalized mouse motion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Degrees of rotation per unit of normalized drag
    pub rotate_speed: f32,
    /// Degrees of twist per unit of horizontal drag
    pub twist_speed: f32,
    /// Distance moved per unit of vertical drag in zoom mode
    pub zoom_speed: f32,
    /// Distance moved per unit of drag in pan mode
    pub pan_speed: f32,
}

impl CameraConfig {
    /// Set field of view
    pub fn with_fov(mut self, degrees: f32) -> Self {
        self.fov_degrees = degrees;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(format!("fov_degrees must be in (0, 180), got {}", self.fov_degrees));
        }
        if !(self.near > 0.0) || self.far <= self.near {
            return Err(format!(
                "Clipping planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            ));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 1.0,
            far: 128.0,
            rotate_speed: 200.0,
            twist_speed: 100.0,
            zoom_speed: 5.0,
            pan_speed: 3.0,
        }
    }
}

/// # Complete Editor Configuration
///
/// Top-level configuration that encompasses every subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Scene graph defaults and limits
    pub scene: SceneConfig,
    /// Camera configuration
    pub camera: CameraConfig,
}

impl EditorConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scene.validate().map_err(ConfigError::Validation)?;
        self.camera.validate().map_err(ConfigError::Validation)?;
        Ok(())
    }
}

impl Config for EditorConfig {}
