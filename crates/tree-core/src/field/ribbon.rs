use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use super::{polar, random_in_shell, GroupKind, ParticleGroup};
use crate::config::{RibbonConfig, Silhouette};

// Ribbons stop short of the tip where the cone collapses to a point.
const TOP_CUTOFF: f32 = 0.95;

/// Two interleaved spiral bands, half a turn apart, wound from base to tip.
pub fn generate<R: Rng + ?Sized>(
    shape: &Silhouette,
    cfg: &RibbonConfig,
    rng: &mut R,
) -> ParticleGroup {
    let n = cfg.count;
    let mut formed = Vec::with_capacity(n);
    let mut chaos = Vec::with_capacity(n);
    let mut colors = Vec::with_capacity(n);
    let half_band = cfg.band_width.max(0.0) * 0.5;

    for i in 0..n {
        let band = i % 2;
        let h = rng.gen::<f32>() * TOP_CUTOFF;
        let angle = spiral_angle(cfg, h, band) + rng.gen_range(-1.0f32..=1.0) * cfg.jitter * 0.25;
        let radius = shape.radius_at(h) * cfg.radius_scale + rng.gen_range(-1.0f32..=1.0) * cfg.jitter;
        let dy = if half_band > 0.0 {
            rng.gen_range(-half_band..half_band)
        } else {
            0.0
        };
        formed.push(polar(angle, radius.max(0.0), shape.y_at(h) + dy));

        chaos.push(random_in_shell(rng, 0.0, cfg.chaos_radius) + Vec3::Y * cfg.chaos_lift);
        colors.push(cfg.colors[band]);
    }

    ParticleGroup::new(GroupKind::Ribbon, formed, chaos, Some(colors), None)
}

/// Angle of band `band` (0 or 1) at height fraction `h`, without jitter.
pub fn spiral_angle(cfg: &RibbonConfig, h: f32, band: usize) -> f32 {
    h * cfg.turns * TAU + band as f32 * PI
}
