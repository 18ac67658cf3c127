//! Small scalar helpers shared by the animated systems.

/// Power ease-out: fast start, slow arrival. `t` is clamped to \[0, 1\].
#[inline]
pub fn ease_out_pow(t: f32, power: f32) -> f32 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powf(power)
}

/// Power ease-in: slow start, fast arrival. `t` is clamped to \[0, 1\].
#[inline]
pub fn ease_in_pow(t: f32, power: f32) -> f32 {
    t.clamp(0.0, 1.0).powf(power)
}

/// Blend factor for an exponential approach over `dt` seconds at `rate` (1/s).
/// Always in \[0, 1), so repeated application never overshoots.
#[inline]
pub fn approach_alpha(rate: f32, dt_sec: f32) -> f32 {
    1.0 - (-rate.max(0.0) * dt_sec.max(0.0)).exp()
}

/// Linear blend that returns `a` exactly at `t == 0` and `b` exactly at `t == 1`.
#[inline]
pub fn blend(a: glam::Vec3, b: glam::Vec3, t: f32) -> glam::Vec3 {
    a * (1.0 - t) + b * t
}
