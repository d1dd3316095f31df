//! Camera rig: projection parameter, orientation and position

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Which projection parameter the zoom value drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Zoom drives the orthographic size
    Orthographic,
    /// Zoom drives the vertical field of view
    Perspective,
}

/// Projection values at the zoomed-in end, at scene start and at the zoomed-out end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    pub minimum: f32,
    pub starting: f32,
    pub maximum: f32,
}

impl ZoomRange {
    pub fn new(minimum: f32, starting: f32, maximum: f32) -> Self {
        Self {
            minimum,
            starting,
            maximum,
        }
    }

    /// Distance between the two ends
    pub fn spread(&self) -> f32 {
        self.maximum - self.minimum
    }

    /// Normalized zoom value (0 = in, 1 = out) to projection value
    pub fn to_projection(&self, pct: f32) -> f32 {
        pct * self.spread() + self.minimum
    }

    /// Projection value to normalized zoom value
    pub fn to_pct(&self, projection: f32) -> f32 {
        (projection - self.minimum) / self.spread()
    }

    /// Normalized zoom value at scene start
    pub fn starting_pct(&self) -> f32 {
        self.to_pct(self.starting)
    }
}

/// Pitch limits applied while rotating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchClamp {
    pub minimum: f32,
    pub maximum: f32,
}

/// The zoom rig's camera
///
/// Orientation is held as yaw/pitch in degrees, roll is always zero.
#[derive(Debug, Clone)]
pub struct Camera {
    pub mode: ProjectionMode,
    pub range: ZoomRange,
    /// Current orthographic size or field of view
    pub projection: f32,
    pub rotation: Quat,
    pub position: Vec3,
}

impl Camera {
    /// Creates a camera at its starting projection value with identity orientation
    pub fn new(mode: ProjectionMode, range: ZoomRange) -> Self {
        Self {
            mode,
            range,
            projection: range.starting,
            rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
        }
    }

    /// Builder: starting orientation from yaw/pitch in degrees
    pub fn with_orientation(mut self, yaw: f32, pitch: f32) -> Self {
        self.rotation = Self::orientation(yaw, pitch);
        self
    }

    /// Rotation for a yaw/pitch pair in degrees, zero roll
    pub fn orientation(yaw: f32, pitch: f32) -> Quat {
        Quat::from_euler(EulerRot::YXZ, yaw.to_radians(), pitch.to_radians(), 0.0)
    }

    /// Current (yaw, pitch) in degrees
    pub fn yaw_pitch(&self) -> (f32, f32) {
        let (yaw, pitch, _roll) = self.rotation.to_euler(EulerRot::YXZ);
        (yaw.to_degrees(), pitch.to_degrees())
    }

    /// Sets the projection from a normalized zoom value and returns it
    pub fn zoom_to_pct(&mut self, pct: f32) -> f32 {
        self.projection = self.range.to_projection(pct);
        self.projection
    }

    /// Normalized zoom value of the current projection
    pub fn zoom_pct(&self) -> f32 {
        self.range.to_pct(self.projection)
    }

    /// Adds yaw/pitch in degrees, clamping pitch when limits are given
    ///
    /// Horizontal input turns yaw, vertical input lowers pitch.
    pub fn rotate_by(&mut self, yaw_delta: f32, pitch_delta: f32, clamp: Option<PitchClamp>) {
        let (mut yaw, mut pitch) = self.yaw_pitch();
        yaw += yaw_delta;
        pitch -= pitch_delta;
        if let Some(limits) = clamp {
            pitch = pitch.clamp(limits.minimum, limits.maximum);
        }
        self.rotation = Self::orientation(yaw, pitch);
    }

    /// Moves the orientation a fraction of the way toward `goal`
    pub fn blend_rotation(&mut self, goal: Quat, blend: f32) {
        self.rotation = self.rotation.lerp(goal, blend).normalize();
    }

    /// Angle in degrees between the current orientation and `goal`
    pub fn angle_to(&self, goal: Quat) -> f32 {
        self.rotation.angle_between(goal).to_degrees()
    }

    /// Moves the rig a fraction of the way toward `target`
    pub fn follow(&mut self, target: Vec3, blend: f32) {
        self.position = self.position.lerp(target, blend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> ZoomRange {
        ZoomRange::new(5.0, 12.5, 20.0)
    }

    #[test]
    fn test_zoom_range_conversions() {
        let range = range();
        assert_eq!(range.spread(), 15.0);
        assert_eq!(range.starting_pct(), 0.5);
        assert_eq!(range.to_projection(0.0), 5.0);
        assert_eq!(range.to_projection(1.0), 20.0);
        assert!((range.to_pct(8.75) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_camera_starts_at_starting_value() {
        let camera = Camera::new(ProjectionMode::Perspective, range());
        assert_eq!(camera.projection, 12.5);
        assert_eq!(camera.zoom_pct(), 0.5);
    }

    #[test]
    fn test_camera_zoom_to_pct() {
        let mut camera = Camera::new(ProjectionMode::Orthographic, range());
        assert_eq!(camera.zoom_to_pct(1.0), 20.0);
        assert_eq!(camera.projection, 20.0);
    }

    #[test]
    fn test_rotate_clamps_pitch_and_zeroes_roll() {
        let mut camera =
            Camera::new(ProjectionMode::Orthographic, range()).with_orientation(0.0, 30.0);
        let clamp = Some(PitchClamp {
            minimum: 2.0,
            maximum: 80.0,
        });

        camera.rotate_by(10.0, -100.0, clamp);
        let (yaw, pitch) = camera.yaw_pitch();
        assert!((yaw - 10.0).abs() < 1e-3);
        assert!((pitch - 80.0).abs() < 1e-3);

        let (_, _, roll) = camera.rotation.to_euler(EulerRot::YXZ);
        assert!(roll.abs() < 1e-5);
    }

    #[test]
    fn test_rotate_without_clamp() {
        let mut camera = Camera::new(ProjectionMode::Orthographic, range());
        camera.rotate_by(0.0, 20.0, None);
        let (_, pitch) = camera.yaw_pitch();
        assert!((pitch + 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_blend_rotation_converges() {
        let mut camera =
            Camera::new(ProjectionMode::Orthographic, range()).with_orientation(90.0, 45.0);
        let goal = Camera::orientation(0.0, 20.0);
        let start = camera.angle_to(goal);
        camera.blend_rotation(goal, 0.25);
        assert!(camera.angle_to(goal) < start);
    }

    #[test]
    fn test_follow_moves_halfway() {
        let mut camera = Camera::new(ProjectionMode::Orthographic, range());
        camera.follow(Vec3::new(2.0, 0.0, -4.0), 0.5);
        assert_eq!(camera.position, Vec3::new(1.0, 0.0, -2.0));
    }
}
