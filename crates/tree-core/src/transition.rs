//! Chaos/formed transition engine.
//!
//! One scalar per tree chases the external [`TreeState`] by exponential
//! smoothing (frame-rate independent, never overshoots) and every particle's
//! live position is the blend of its chaos and formed coordinates at that
//! value. Within `snap_epsilon` of the target the value snaps onto it, so a
//! settled tree reads exactly 0 or 1.

use glam::Vec3;
use rand::Rng;

use crate::config::TransitionConfig;
use crate::easing::{approach_alpha, blend};
use crate::field::{ParticleField, ParticleGroup};
use crate::state::TreeState;

/// What one update changed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransitionReport {
    pub value: f32,
    /// Live buffers were rewritten this frame.
    pub wrote_live: bool,
    /// Snow particles that advanced their growth this frame.
    pub snow_grown: usize,
    /// Snow growth was reset this frame.
    pub snow_melted: bool,
}

#[derive(Clone, Debug)]
pub struct TransitionEngine {
    cfg: TransitionConfig,
    value: f32,
    // live buffers still need a write for the current value
    pending_write: bool,
}

impl TransitionEngine {
    /// Start fully scattered.
    pub fn new(cfg: TransitionConfig) -> Self {
        Self::with_value(cfg, 0.0)
    }

    pub fn with_value(cfg: TransitionConfig, value: f32) -> Self {
        Self {
            cfg,
            value: value.clamp(0.0, 1.0),
            pending_write: true,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_settled(&self, target: TreeState) -> bool {
        self.value == target.target()
    }

    /// Move the scalar towards `target` over `dt_sec`. Returns true if it moved.
    pub fn advance(&mut self, dt_sec: f32, target: TreeState) -> bool {
        let goal = target.target();
        if self.value == goal {
            return false;
        }
        let before = self.value;
        let alpha = approach_alpha(self.cfg.rate, dt_sec);
        let mut next = self.value + (goal - self.value) * alpha;
        if (goal - next).abs() < self.cfg.snap_epsilon {
            next = goal;
            log::debug!("[transition] settled at {goal}");
        }
        self.value = next.clamp(0.0, 1.0);
        self.value != before
    }

    /// Per-frame entry point: advance, accumulate or melt snow, and rewrite
    /// the live buffers of every group whose positions changed.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt_sec: f32,
        target: TreeState,
        field: &mut ParticleField,
        rng: &mut R,
    ) -> TransitionReport {
        let moved = self.advance(dt_sec, target);
        let mut report = TransitionReport {
            value: self.value,
            ..Default::default()
        };

        if self.value > self.cfg.snow_growth_threshold {
            let chance = (self.cfg.snow_growth_chance_per_sec * dt_sec).clamp(0.0, 1.0);
            report.snow_grown = grow_snow(&mut field.snow, chance, self.cfg.snow_growth_step, rng);
        } else if self.value < self.cfg.snow_melt_threshold {
            report.snow_melted = melt_snow(&mut field.snow);
        }

        let t = self.value;
        if moved || self.pending_write {
            for group in field.groups_mut() {
                write_live(group, t);
            }
            self.pending_write = false;
            report.wrote_live = true;
        } else if report.snow_grown > 0 || report.snow_melted {
            write_live(&mut field.snow, t);
            report.wrote_live = true;
        }
        report
    }
}

fn write_live(group: &mut ParticleGroup, t: f32) {
    let (chaos, formed, live, snow) = group.parts_mut();
    match snow {
        Some(snow) => {
            for (i, out) in live.iter_mut().enumerate() {
                let lift = snow.growth.get(i).copied().unwrap_or(0.0);
                *out = blend(chaos[i], formed[i] + Vec3::Y * lift, t);
            }
        }
        None => {
            for ((out, &c), &f) in live.iter_mut().zip(chaos).zip(formed) {
                *out = blend(c, f, t);
            }
        }
    }
}

/// Each particle independently rolls `chance` to advance by `step`, up to its
/// own cap. Returns how many advanced.
fn grow_snow<R: Rng + ?Sized>(group: &mut ParticleGroup, chance: f32, step: f32, rng: &mut R) -> usize {
    let Some(snow) = group.snow_mut() else {
        return 0;
    };
    let mut grown = 0;
    for (g, &cap) in snow.growth.iter_mut().zip(&snow.max_growth) {
        if *g < cap && rng.gen::<f32>() < chance {
            *g = (*g + step).min(cap);
            grown += 1;
        }
    }
    grown
}

fn melt_snow(group: &mut ParticleGroup) -> bool {
    let Some(snow) = group.snow_mut() else {
        return false;
    };
    if snow.growth.iter().all(|&g| g == 0.0) {
        return false;
    }
    snow.growth.fill(0.0);
    log::debug!("[transition] snow melted");
    true
}
