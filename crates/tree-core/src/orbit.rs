//! Yaw/zoom orbit around the tree with inertia and idle spin.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::config::OrbitConfig;
use crate::easing::approach_alpha;
use crate::state::Camera;

#[derive(Clone, Debug)]
pub struct OrbitController {
    cfg: OrbitConfig,
    yaw: f32,
    yaw_velocity: f32,
    distance: f32,
    target_distance: f32,
}

impl OrbitController {
    pub fn new(cfg: OrbitConfig) -> Self {
        let distance = cfg.distance.clamp(cfg.min_distance, cfg.max_distance);
        Self {
            cfg,
            yaw: 0.0,
            yaw_velocity: 0.0,
            distance,
            target_distance: distance,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn yaw_velocity(&self) -> f32 {
        self.yaw_velocity
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn target_distance(&self) -> f32 {
        self.target_distance
    }

    /// Add horizontal drag to the spin velocity. Ignored while a photo is
    /// focused; returns whether the input was applied.
    pub fn drag(&mut self, dx: f32, focus_active: bool) -> bool {
        if focus_active {
            log::trace!("[orbit] drag suppressed during focus");
            return false;
        }
        let max = self.cfg.max_velocity;
        self.yaw_velocity = (self.yaw_velocity + dx * self.cfg.drag_speed).clamp(-max, max);
        true
    }

    /// Move the zoom target; positive `dy` pulls the camera back.
    pub fn zoom(&mut self, dy: f32, focus_active: bool) -> bool {
        if focus_active {
            log::trace!("[orbit] zoom suppressed during focus");
            return false;
        }
        self.target_distance = (self.target_distance + dy * self.cfg.zoom_speed)
            .clamp(self.cfg.min_distance, self.cfg.max_distance);
        true
    }

    pub fn update(&mut self, dt_sec: f32) {
        let dt = dt_sec.max(0.0);
        self.yaw_velocity *= (-self.cfg.velocity_decay_per_sec * dt).exp();
        self.yaw = (self.yaw + (self.yaw_velocity + self.cfg.auto_rotate) * dt).rem_euclid(TAU);
        let alpha = approach_alpha(1.0 / self.cfg.zoom_tau_sec, dt);
        self.distance += (self.target_distance - self.distance) * alpha;
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.distance,
            self.cfg.height,
            self.yaw.cos() * self.distance,
        )
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera::looking_at(
            self.eye(),
            Vec3::new(0.0, self.cfg.look_at_y, 0.0),
            aspect,
            self.cfg.fovy_degrees.to_radians(),
        )
    }
}
