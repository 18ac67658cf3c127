//! Camera and pose types shared between the core and the host.
//!
//! These types avoid platform-specific APIs. The host derives a [`Camera`]
//! from the orbit controller each frame and hands it to selection, focus and
//! the render back end.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn looking_at(eye: Vec3, target: Vec3, aspect: f32, fovy_radians: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians,
            znear: 0.1,
            zfar: 200.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }

    /// World-space orientation of the camera. Local -Z looks forward, so an
    /// object given this rotation shows its +Z face to the camera.
    pub fn orientation(&self) -> Quat {
        Quat::from_mat4(&self.view_matrix().inverse()).normalize()
    }

    /// Size of the view rectangle at `distance` in front of the eye.
    pub fn visible_extent_at(&self, distance: f32) -> Vec2 {
        let height = 2.0 * distance * (self.fovy_radians * 0.5).tan();
        Vec2::new(height * self.aspect, height)
    }

    /// Project a world point to normalized device coordinates. Returns `None`
    /// for points behind the eye.
    pub fn project_ndc(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    /// World-space ray through an NDC point (x right, y up, both in \[-1, 1\]).
    ///
    /// Returns `(ray_origin, ray_direction)`.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        (self.eye, (p1 - self.eye).normalize_or_zero())
    }
}

/// Position, orientation and scale handed to the render back end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Pose {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// External two-valued tree state the transition engine chases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TreeState {
    #[default]
    Chaos,
    Formed,
}

impl TreeState {
    /// Transition value this state pulls towards.
    #[inline]
    pub fn target(self) -> f32 {
        match self {
            Self::Chaos => 0.0,
            Self::Formed => 1.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Chaos => Self::Formed,
            Self::Formed => Self::Chaos,
        }
    }
}
