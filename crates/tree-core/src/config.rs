//! Runtime configuration with TOML support.
//!
//! Every section uses `#[serde(default)]`, so a partial file that only
//! overrides e.g. `[gesture]` keeps defaults everywhere else.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Result, TreeError};

/// Shared cone silhouette used by foliage, ribbon and ornament placement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Silhouette {
    pub height: f32,
    pub base_y: f32,
    pub base_radius: f32,
    pub power: f32,
}

impl Default for Silhouette {
    fn default() -> Self {
        Self {
            height: TREE_HEIGHT,
            base_y: TREE_BASE_Y,
            base_radius: TREE_BASE_RADIUS,
            power: TREE_SILHOUETTE_POWER,
        }
    }
}

impl Silhouette {
    /// Radius of the cone at height fraction `h` in \[0, 1\].
    #[inline]
    pub fn radius_at(&self, h: f32) -> f32 {
        self.base_radius * (1.0 - h.clamp(0.0, 1.0)).powf(self.power)
    }

    /// World y at height fraction `h`.
    #[inline]
    pub fn y_at(&self, h: f32) -> f32 {
        self.base_y + h * self.height
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FoliageConfig {
    pub count: usize,
    pub tiers: u32,
    pub tier_indent: f32,
    pub volume_fill: f32,
    pub palette: Vec<[f32; 3]>,
    pub accent_color: [f32; 3],
    pub accent_chance: f32,
    pub chaos_inner: f32,
    pub chaos_outer: f32,
    pub chaos_lift: f32,
}

impl Default for FoliageConfig {
    fn default() -> Self {
        Self {
            count: FOLIAGE_COUNT,
            tiers: FOLIAGE_TIERS,
            tier_indent: FOLIAGE_TIER_INDENT,
            volume_fill: FOLIAGE_VOLUME_FILL,
            palette: FOLIAGE_PALETTE.to_vec(),
            accent_color: FOLIAGE_ACCENT_COLOR,
            accent_chance: FOLIAGE_ACCENT_CHANCE,
            chaos_inner: FOLIAGE_CHAOS_INNER,
            chaos_outer: FOLIAGE_CHAOS_OUTER,
            chaos_lift: FOLIAGE_CHAOS_LIFT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrunkConfig {
    pub count: usize,
    pub height: f32,
    pub radius: f32,
    pub root_fraction: f32,
    pub root_spread: f32,
    pub root_turns: f32,
    pub color: [f32; 3],
    pub chaos_radius: f32,
    pub chaos_thickness: f32,
    pub chaos_half_height: f32,
}

impl Default for TrunkConfig {
    fn default() -> Self {
        Self {
            count: TRUNK_COUNT,
            height: TRUNK_HEIGHT,
            radius: TRUNK_RADIUS,
            root_fraction: TRUNK_ROOT_FRACTION,
            root_spread: TRUNK_ROOT_SPREAD,
            root_turns: TRUNK_ROOT_TURNS,
            color: TRUNK_COLOR,
            chaos_radius: TRUNK_CHAOS_RADIUS,
            chaos_thickness: TRUNK_CHAOS_THICKNESS,
            chaos_half_height: TRUNK_CHAOS_HALF_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RibbonConfig {
    pub count: usize,
    pub turns: f32,
    pub radius_scale: f32,
    pub jitter: f32,
    pub band_width: f32,
    pub colors: [[f32; 3]; 2],
    pub chaos_radius: f32,
    pub chaos_lift: f32,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            count: RIBBON_COUNT,
            turns: RIBBON_TURNS,
            radius_scale: RIBBON_RADIUS_SCALE,
            jitter: RIBBON_JITTER,
            band_width: RIBBON_BAND_WIDTH,
            colors: RIBBON_COLORS,
            chaos_radius: RIBBON_CHAOS_RADIUS,
            chaos_lift: RIBBON_CHAOS_LIFT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SnowConfig {
    pub count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub terrain_amplitude: f32,
    pub max_growth: f32,
    pub min_growth_share: f32,
    pub color: [f32; 3],
    pub chaos_half_width: f32,
    pub chaos_depth: [f32; 2],
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            count: SNOW_COUNT,
            inner_radius: SNOW_INNER_RADIUS,
            outer_radius: SNOW_OUTER_RADIUS,
            terrain_amplitude: SNOW_TERRAIN_AMPLITUDE,
            max_growth: SNOW_MAX_GROWTH,
            min_growth_share: SNOW_MIN_GROWTH_SHARE,
            color: SNOW_COLOR,
            chaos_half_width: SNOW_CHAOS_HALF_WIDTH,
            chaos_depth: SNOW_CHAOS_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransitionConfig {
    /// Exponential approach rate in 1/s.
    pub rate: f32,
    /// Distance from the target under which the value snaps onto it.
    pub snap_epsilon: f32,
    pub snow_growth_threshold: f32,
    pub snow_melt_threshold: f32,
    pub snow_growth_chance_per_sec: f32,
    pub snow_growth_step: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            rate: TRANSITION_RATE,
            snap_epsilon: TRANSITION_SNAP_EPSILON,
            snow_growth_threshold: SNOW_GROWTH_THRESHOLD,
            snow_melt_threshold: SNOW_MELT_THRESHOLD,
            snow_growth_chance_per_sec: SNOW_GROWTH_CHANCE_PER_SEC,
            snow_growth_step: SNOW_GROWTH_STEP,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrnamentConfig {
    pub decoration_count: usize,
    /// Seed mixed into decoration placement; placement stays a pure function
    /// of (seed, index, kind).
    pub decoration_seed: u64,
    pub photo_angle_step: f32,
    pub photo_phase_offset: f32,
    pub photo_height_base: f32,
    pub photo_height_step: f32,
    pub photo_height_span: f32,
    pub surface_scale: f32,
    pub photo_frame_size: f32,
    pub sway_amplitude: f32,
    pub sway_speed: f32,
    pub jiggle_decay_per_sec: f32,
    pub chaos_radius: f32,
}

impl Default for OrnamentConfig {
    fn default() -> Self {
        Self {
            decoration_count: DECORATION_COUNT,
            decoration_seed: 0x5EED_7EE5,
            photo_angle_step: PHOTO_ANGLE_STEP,
            photo_phase_offset: PHOTO_PHASE_OFFSET,
            photo_height_base: PHOTO_HEIGHT_BASE,
            photo_height_step: PHOTO_HEIGHT_STEP,
            photo_height_span: PHOTO_HEIGHT_SPAN,
            surface_scale: ORNAMENT_SURFACE_SCALE,
            photo_frame_size: PHOTO_FRAME_SIZE,
            sway_amplitude: SWAY_AMPLITUDE,
            sway_speed: SWAY_SPEED,
            jiggle_decay_per_sec: JIGGLE_DECAY_PER_SEC,
            chaos_radius: ORNAMENT_CHAOS_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// NDC radius around screen centre that counts as "centered". Zero
    /// disables the screen-space pass and selection falls back to distance.
    pub center_ndc_radius: f32,
    pub max_distance: f32,
    pub pick_radius_scale: f32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            center_ndc_radius: SELECT_CENTER_NDC_RADIUS,
            max_distance: SELECT_MAX_DISTANCE,
            pick_radius_scale: PICK_RADIUS_SCALE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FocusConfig {
    pub open_seconds: f32,
    pub close_seconds: f32,
    pub open_power: f32,
    pub close_power: f32,
    pub distance: f32,
    pub height_fraction: f32,
    pub width_fraction: f32,
    pub open_swoop: f32,
    pub close_swoop: f32,
    /// Enter from a random orientation instead of the ornament's own.
    pub wild_entry: bool,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            open_seconds: FOCUS_OPEN_SECONDS,
            close_seconds: FOCUS_CLOSE_SECONDS,
            open_power: FOCUS_OPEN_POWER,
            close_power: FOCUS_CLOSE_POWER,
            distance: FOCUS_DISTANCE,
            height_fraction: FOCUS_HEIGHT_FRACTION,
            width_fraction: FOCUS_WIDTH_FRACTION,
            open_swoop: FOCUS_OPEN_SWOOP,
            close_swoop: FOCUS_CLOSE_SWOOP,
            wild_entry: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    pub stability_frames: u32,
    pub fist_ratio: f32,
    pub open_ratio: f32,
    pub pinch_ratio: f32,
    /// Consecutive pinch frames before the pinch counts as one press.
    pub pinch_frames: u32,
    pub double_pinch_ms: u64,
    /// Suppress all recognition for `cooldown_ms` after form/chaos.
    pub cooldown: bool,
    pub cooldown_ms: u64,
    pub move_deadzone: f32,
    pub drag_gain: f32,
    pub zoom_gain: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            stability_frames: GESTURE_STABILITY_FRAMES,
            fist_ratio: GESTURE_FIST_RATIO,
            open_ratio: GESTURE_OPEN_RATIO,
            pinch_ratio: GESTURE_PINCH_RATIO,
            pinch_frames: GESTURE_PINCH_FRAMES,
            double_pinch_ms: GESTURE_DOUBLE_PINCH_MS,
            cooldown: true,
            cooldown_ms: GESTURE_COOLDOWN_MS,
            move_deadzone: GESTURE_MOVE_DEADZONE,
            drag_gain: GESTURE_DRAG_GAIN,
            zoom_gain: GESTURE_ZOOM_GAIN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub height: f32,
    pub look_at_y: f32,
    pub velocity_decay_per_sec: f32,
    pub zoom_tau_sec: f32,
    pub auto_rotate: f32,
    pub drag_speed: f32,
    pub max_velocity: f32,
    pub zoom_speed: f32,
    pub fovy_degrees: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            distance: ORBIT_DISTANCE,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            height: ORBIT_HEIGHT,
            look_at_y: ORBIT_LOOK_AT_Y,
            velocity_decay_per_sec: ORBIT_VELOCITY_DECAY_PER_SEC,
            zoom_tau_sec: ORBIT_ZOOM_TAU_SEC,
            auto_rotate: ORBIT_AUTO_ROTATE,
            drag_speed: ORBIT_DRAG_SPEED,
            max_velocity: ORBIT_MAX_VELOCITY,
            zoom_speed: ORBIT_ZOOM_SPEED,
            fovy_degrees: CAMERA_FOVY_DEGREES,
        }
    }
}

/// Top-level configuration container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TreeConfig {
    pub silhouette: Silhouette,
    pub foliage: FoliageConfig,
    pub trunk: TrunkConfig,
    pub ribbon: RibbonConfig,
    pub snow: SnowConfig,
    pub transition: TransitionConfig,
    pub ornaments: OrnamentConfig,
    pub selection: SelectionConfig,
    pub focus: FocusConfig,
    pub gesture: GestureConfig,
    pub orbit: OrbitConfig,
}

impl TreeConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&content)?;
        log::info!("[config] loaded {}", path.display());
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check cross-field invariants that serde alone cannot express.
    pub fn validate(&self) -> Result<()> {
        fn check(ok: bool, msg: &str) -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(TreeError::InvalidConfig(msg.to_owned()))
            }
        }
        let s = &self.silhouette;
        check(s.height > 0.0 && s.base_radius > 0.0, "silhouette must have positive size")?;
        check(s.power > 0.0, "silhouette.power must be positive")?;
        check(self.foliage.tiers > 0, "foliage.tiers must be at least 1")?;
        check(!self.foliage.palette.is_empty(), "foliage.palette is empty")?;
        check(
            (0.0..1.0).contains(&self.foliage.tier_indent),
            "foliage.tier_indent must be in [0, 1)",
        )?;
        check(
            (0.0..1.0).contains(&self.foliage.volume_fill),
            "foliage.volume_fill must be in [0, 1)",
        )?;
        check(
            self.foliage.chaos_inner <= self.foliage.chaos_outer,
            "foliage chaos shell inner radius exceeds outer radius",
        )?;
        check(
            self.trunk.chaos_half_height >= 0.0 && self.trunk.chaos_thickness >= 0.0,
            "trunk chaos extents must not be negative",
        )?;
        check(
            self.snow.inner_radius < self.snow.outer_radius,
            "snow inner radius must be below outer radius",
        )?;
        check(
            self.snow.chaos_depth[0] <= self.snow.chaos_depth[1],
            "snow.chaos_depth must be [low, high]",
        )?;
        let t = &self.transition;
        check(t.rate > 0.0, "transition.rate must be positive")?;
        check(
            t.snap_epsilon > 0.0 && t.snap_epsilon < 0.5,
            "transition.snap_epsilon must be in (0, 0.5)",
        )?;
        check(
            t.snow_melt_threshold < t.snow_growth_threshold,
            "snow melt threshold must be below growth threshold",
        )?;
        let o = &self.ornaments;
        check(
            o.photo_height_base >= 0.0 && o.photo_height_base + o.photo_height_span <= 1.0,
            "photo height band must stay within the tree",
        )?;
        check(o.photo_height_span > 0.0, "ornaments.photo_height_span must be positive")?;
        check(self.selection.max_distance > 0.0, "selection.max_distance must be positive")?;
        let f = &self.focus;
        check(
            f.open_seconds > 0.0 && f.close_seconds > 0.0,
            "focus durations must be positive",
        )?;
        check(f.open_power > 0.0 && f.close_power > 0.0, "focus easing powers must be positive")?;
        check(
            f.height_fraction > 0.0 && f.height_fraction <= 1.0,
            "focus.height_fraction must be in (0, 1]",
        )?;
        check(
            f.width_fraction > 0.0 && f.width_fraction <= 1.0,
            "focus.width_fraction must be in (0, 1]",
        )?;
        let g = &self.gesture;
        check(g.stability_frames > 0, "gesture.stability_frames must be at least 1")?;
        check(g.pinch_frames > 0, "gesture.pinch_frames must be at least 1")?;
        check(g.fist_ratio < g.open_ratio, "gesture.fist_ratio must be below open_ratio")?;
        check(g.pinch_ratio > 0.0, "gesture.pinch_ratio must be positive")?;
        let b = &self.orbit;
        check(
            b.min_distance > 0.0 && b.min_distance <= b.max_distance,
            "orbit distance range is empty",
        )?;
        check(
            (b.min_distance..=b.max_distance).contains(&b.distance),
            "orbit.distance outside [min_distance, max_distance]",
        )?;
        check(b.zoom_tau_sec > 0.0, "orbit.zoom_tau_sec must be positive")?;
        check(
            b.fovy_degrees > 1.0 && b.fovy_degrees < 179.0,
            "orbit.fovy_degrees out of range",
        )?;
        Ok(())
    }
}
