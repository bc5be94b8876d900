//! # Trackball Camera
//!
//! Mouse-driven viewing transform for inspecting the scene. Dragging with the
//! bound button rotates, zooms, twists or pans depending on the active
//! [`CameraMode`]. Motion is measured in viewport-normalized units so the
//! feel is independent of window size.
//!
//! ## Matrix Convention
//! `view_matrix() = translation * rotation`: the scene is first spun about
//! the origin, then pushed away from the eye. New rotations are
//! pre-multiplied so they always act in eye space.

use std::fmt;
use std::str::FromStr;

use crate::core::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::scene::AABB;

/// Drags below this normalized distance are ignored
const MIN_MOTION: f32 = 1e-6;

/// What a drag does to the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Spin about an axis perpendicular to the drag
    #[default]
    Rotate,
    /// Move along the view axis with vertical drags
    Zoom,
    /// Roll about the view axis with horizontal drags
    Twist,
    /// Slide parallel to the image plane
    Pan,
}

impl CameraMode {
    /// Every mode, in menu order
    pub const ALL: [CameraMode; 4] = [
        CameraMode::Rotate,
        CameraMode::Zoom,
        CameraMode::Twist,
        CameraMode::Pan,
    ];

    /// Lowercase name used by the command console
    pub fn name(self) -> &'static str {
        match self {
            CameraMode::Rotate => "rotate",
            CameraMode::Zoom => "zoom",
            CameraMode::Twist => "twist",
            CameraMode::Pan => "pan",
        }
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CameraMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CameraMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

/// Mouse buttons reported by the host window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button; drives the trackball
    Left,
    /// Middle button
    Middle,
    /// Secondary button, usually bound to a context menu
    Right,
}

/// Trackball camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// Accumulated orientation
    rotation: Mat4,
    /// Eye-space offset applied after rotation
    translation: Vec3,
    mode: CameraMode,
    /// Last normalized cursor position while dragging
    drag_origin: Option<(f32, f32)>,
    width: u32,
    height: u32,
    config: CameraConfig,
}

impl Camera {
    /// Create a camera with the given projection and speed settings
    pub fn new(config: CameraConfig) -> Self {
        Self {
            rotation: Mat4::identity(),
            translation: Vec3::zeros(),
            mode: CameraMode::default(),
            drag_origin: None,
            width: 1,
            height: 1,
            config,
        }
    }

    /// Active drag mode
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Change the drag mode
    pub fn set_mode(&mut self, mode: CameraMode) {
        if self.mode != mode {
            log::debug!("Camera mode: {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Accumulated orientation
    pub fn rotation(&self) -> &Mat4 {
        &self.rotation
    }

    /// Eye-space offset
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Viewport width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Update the viewport size; zero dimensions are clamped to one pixel
    pub fn reshape(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        log::debug!("Viewport resized to {}x{}", self.width, self.height);
    }

    /// Mouse button event at pixel position `(x, y)`
    ///
    /// Only the left button drags; other buttons are left to the host
    /// (for example to open a menu).
    pub fn mouse(&mut self, button: MouseButton, pressed: bool, x: f32, y: f32) {
        if button != MouseButton::Left {
            return;
        }
        self.drag_origin = pressed.then(|| self.normalize(x, y));
    }

    /// Cursor motion to pixel position `(x, y)`
    ///
    /// Returns true when the camera changed and a redraw is needed.
    pub fn motion(&mut self, x: f32, y: f32) -> bool {
        let Some((last_x, last_y)) = self.drag_origin else {
            return false;
        };
        let (nx, ny) = self.normalize(x, y);
        let (dx, dy) = (nx - last_x, ny - last_y);
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < MIN_MOTION {
            return false;
        }
        self.drag_origin = Some((nx, ny));

        match self.mode {
            CameraMode::Rotate => {
                let spin = Mat4::rotation_axis_deg(Vec3::new(dy, dx, 0.0), distance * self.config.rotate_speed);
                self.rotation = spin * self.rotation;
            }
            CameraMode::Zoom => {
                self.translation.z -= dy * self.config.zoom_speed;
            }
            CameraMode::Twist => {
                self.rotation = Mat4::rotation_z_deg(dx * self.config.twist_speed) * self.rotation;
            }
            CameraMode::Pan => {
                self.translation.x += dx * self.config.pan_speed;
                self.translation.y -= dy * self.config.pan_speed;
            }
        }
        log::trace!("Camera {} by ({dx:.4}, {dy:.4})", self.mode);
        true
    }

    /// Frame `bounds` so the whole box is in view
    ///
    /// Keeps the current orientation, centres the rotated box (depth
    /// included) and backs off along the view axis until its diagonal fits
    /// the field of view.
    pub fn view_all(&mut self, bounds: &AABB) {
        let center = bounds.transformed(&self.rotation).center();
        let half_fov = utils::deg_to_rad(self.config.fov_degrees) * 0.5;
        let distance = (bounds.diagonal() * 0.5) / half_fov.tan();

        self.translation = Vec3::new(-center.x, -center.y, -center.z - distance);
        log::debug!("View all: distance {distance:.3}, translation {:?}", self.translation);
    }

    /// World to eye transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.translation) * self.rotation
    }

    /// Perspective projection for the current viewport
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(
            self.aspect_ratio(),
            utils::deg_to_rad(self.config.fov_degrees),
            self.config.near,
            self.config.far,
        )
    }

    fn normalize(&self, x: f32, y: f32) -> (f32, f32) {
        (x / self.width as f32, y / self.height as f32)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dragging_camera(mode: CameraMode) -> Camera {
        let mut camera = Camera::default();
        camera.reshape(100, 100);
        camera.set_mode(mode);
        camera.mouse(MouseButton::Left, true, 50.0, 50.0);
        camera
    }

    #[test]
    fn test_horizontal_drag_rotates_about_y() {
        let mut camera = dragging_camera(CameraMode::Rotate);
        assert!(camera.motion(60.0, 50.0));

        // 0.1 normalized units at 200 degrees per unit.
        let x = camera.rotation().transform_vector(&Vec3::x());
        let expected = 20.0f32.to_radians();
        assert_relative_eq!(x, Vec3::new(expected.cos(), 0.0, -expected.sin()), epsilon = 1e-5);
    }

    #[test]
    fn test_zoom_and_pan() {
        let mut camera = dragging_camera(CameraMode::Zoom);
        camera.motion(50.0, 70.0);
        assert_relative_eq!(camera.translation(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);

        camera.set_mode(CameraMode::Pan);
        camera.motion(60.0, 60.0);
        assert_relative_eq!(camera.translation(), Vec3::new(0.3, 0.3, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_twist_rolls_about_view_axis() {
        let mut camera = dragging_camera(CameraMode::Twist);
        camera.motion(59.0, 50.0);
        let x = camera.rotation().transform_vector(&Vec3::x());
        let expected = 9.0f32.to_radians();
        assert_relative_eq!(x, Vec3::new(expected.cos(), expected.sin(), 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_motion_requires_drag() {
        let mut camera = Camera::default();
        camera.reshape(100, 100);
        assert!(!camera.motion(10.0, 10.0));

        camera.mouse(MouseButton::Right, true, 0.0, 0.0);
        assert!(!camera.is_dragging());

        camera.mouse(MouseButton::Left, true, 0.0, 0.0);
        assert!(!camera.motion(0.0, 0.0));
        camera.mouse(MouseButton::Left, false, 0.0, 0.0);
        assert!(!camera.motion(30.0, 0.0));
        assert_eq!(camera.view_matrix(), Mat4::identity());
    }

    #[test]
    fn test_view_all_frames_bounds() {
        let mut camera = Camera::default();
        camera.view_all(&AABB::cube(1.0));
        // Half diagonal sqrt(3) over tan(30 degrees) is 3.
        assert_relative_eq!(camera.translation(), Vec3::new(0.0, 0.0, -3.0), epsilon = 1e-5);

        camera.view_all(&AABB::from_center_extents(Vec3::new(2.0, 0.0, 0.0), Vec3::repeat(1.0)));
        assert_relative_eq!(camera.translation(), Vec3::new(-2.0, 0.0, -3.0), epsilon = 1e-5);
    }

    #[test]
    fn test_view_all_centres_depth_in_eye_space() {
        let mut camera = Camera::default();
        camera.view_all(&AABB::from_center_extents(Vec3::new(0.0, 0.0, 2.0), Vec3::repeat(1.0)));
        assert_relative_eq!(camera.translation(), Vec3::new(0.0, 0.0, -5.0), epsilon = 1e-5);

        // A quarter turn about y carries a box centred on +x onto -z.
        camera.reshape(100, 100);
        camera.mouse(MouseButton::Left, true, 0.0, 0.0);
        camera.motion(45.0, 0.0);
        camera.view_all(&AABB::from_center_extents(Vec3::new(2.0, 0.0, 0.0), Vec3::repeat(1.0)));
        assert_relative_eq!(camera.translation(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-4);
    }

    #[test]
    fn test_reshape_clamps_and_sets_aspect() {
        let mut camera = Camera::default();
        camera.reshape(800, 0);
        assert_relative_eq!(camera.aspect_ratio(), 800.0);
        camera.reshape(800, 400);
        assert_relative_eq!(camera.aspect_ratio(), 2.0);

        let projection = camera.projection_matrix();
        assert_relative_eq!(projection[(1, 1)], 1.0 / 30.0f32.to_radians().tan(), epsilon = 1e-5);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Twist".parse::<CameraMode>(), Ok(CameraMode::Twist));
        assert!("orbit".parse::<CameraMode>().is_err());
    }
}
