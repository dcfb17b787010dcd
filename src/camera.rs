//! Camera rig: idle float, pointer-follow scene tilt, and the matrices the
//! renderer needs.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

/// Resting camera position.
pub const CAMERA_HOME: Vec3 = Vec3::new(0.0, 20.0, 200.0);
/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 75.0;

/// Floating camera that also tilts the whole scene toward the pointer.
#[derive(Clone, Debug)]
pub struct CameraRig {
    /// Float phase, advanced every frame.
    pub time: f32,
    /// Phase advance per reference frame.
    pub float_speed: f32,
    /// Float amplitude in world units.
    pub float_amount: f32,
    /// Fraction of the remaining pointer offset closed per reference frame.
    pub damping: f32,
    /// Latest pointer offset (x, y), already scaled to radians.
    pub pointer: Vec2,
    /// Current scene tilt (x = pitch, y = yaw) in radians.
    pub scene_rotation: Vec2,
}

impl CameraRig {
    pub fn new(float_speed: f32, float_amount: f32, damping: f32) -> Self {
        Self {
            time: 0.0,
            float_speed,
            float_amount,
            damping,
            pointer: Vec2::ZERO,
            scene_rotation: Vec2::ZERO,
        }
    }

    /// Advance the float phase by `frames` reference frames.
    pub fn float(&mut self, frames: f32) {
        self.time += self.float_speed * frames;
    }

    /// Ease the scene tilt toward the pointer.
    ///
    /// Pointer x steers yaw and pointer y steers pitch.
    pub fn follow_pointer(&mut self, frames: f32) {
        let k = 1.0 - (1.0 - self.damping.clamp(0.0, 1.0)).powf(frames.max(0.0));
        let target = Vec2::new(self.pointer.y, self.pointer.x);
        self.scene_rotation += (target - self.scene_rotation) * k;
    }

    /// Camera position including the float offset.
    pub fn position(&self) -> Vec3 {
        let t = self.time;
        let amount = self.float_amount;
        CAMERA_HOME
            + Vec3::new(
                (t * 1.5).cos() * amount * 0.5,
                (t * 2.0).sin() * amount,
                t.sin() * amount * 0.3,
            )
    }

    /// Gentle roll around the view axis.
    pub fn roll(&self) -> f32 {
        (self.time * 0.5).sin() * 0.02
    }

    /// The camera looks down -Z; only the roll rotates it.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(Quat::from_rotation_z(self.roll()), self.position()).inverse()
    }

    /// Scene tilt applied to everything drawn.
    pub fn scene_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.scene_rotation.x, self.scene_rotation.y, 0.0)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_DEGREES.to_radians(), aspect.max(1e-3), 0.1, 2000.0)
    }

    /// Projection × view × scene tilt.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view_matrix() * self.scene_matrix()
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(0.0003, 8.0, 0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_stays_near_home() {
        let mut rig = CameraRig::default();
        for _ in 0..10_000 {
            rig.float(1.0);
            let offset = rig.position() - CAMERA_HOME;
            assert!(offset.y.abs() <= 8.0 + 1e-4);
            assert!(offset.x.abs() <= 4.0 + 1e-4);
            assert!(offset.z.abs() <= 2.4 + 1e-4);
            assert!(rig.roll().abs() <= 0.02);
        }
    }

    #[test]
    fn test_pointer_follow_converges() {
        let mut rig = CameraRig::default();
        rig.pointer = Vec2::new(0.2, -0.1);
        for _ in 0..500 {
            rig.follow_pointer(1.0);
        }
        assert!((rig.scene_rotation.y - 0.2).abs() < 1e-4);
        assert!((rig.scene_rotation.x + 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_pointer_follow_single_frame() {
        let mut rig = CameraRig::default();
        rig.pointer = Vec2::new(1.0, 0.0);
        rig.follow_pointer(1.0);
        assert!((rig.scene_rotation.y - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_at_rest() {
        let rig = CameraRig::default();
        let origin = rig.view_matrix().transform_point3(Vec3::ZERO);
        // The origin sits straight ahead (negative Z) of the camera
        assert!(origin.z < -150.0);
        assert!(rig.view_proj(16.0 / 9.0).is_finite());
    }
}
