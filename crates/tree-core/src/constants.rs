// Shared tuning constants for the tree scene. Config defaults point here so the
// numbers live in one place.

// Tree silhouette (world units)
pub const TREE_HEIGHT: f32 = 13.0; // foliage height from base to tip
pub const TREE_BASE_Y: f32 = -5.5; // world y of the foliage base
pub const TREE_BASE_RADIUS: f32 = 5.2; // foliage radius at the base
pub const TREE_SILHOUETTE_POWER: f32 = 1.0; // (1-h)^p cone exponent

// Foliage
pub const FOLIAGE_COUNT: usize = 14_000;
pub const FOLIAGE_TIERS: u32 = 7; // stacked sawtooth tiers
pub const FOLIAGE_TIER_INDENT: f32 = 0.28; // fraction pulled in at each tier's lower edge
pub const FOLIAGE_VOLUME_FILL: f32 = 0.55; // max inward scatter as fraction of radius
pub const FOLIAGE_ACCENT_CHANCE: f32 = 0.035;
pub const FOLIAGE_PALETTE: [[f32; 3]; 3] = [
    [0.02, 0.32, 0.12], // deep pine
    [0.05, 0.45, 0.18], // emerald
    [0.12, 0.55, 0.25], // bright needle
];
pub const FOLIAGE_ACCENT_COLOR: [f32; 3] = [1.0, 0.82, 0.35]; // warm gold
pub const FOLIAGE_CHAOS_INNER: f32 = 11.0;
pub const FOLIAGE_CHAOS_OUTER: f32 = 22.0;
pub const FOLIAGE_CHAOS_LIFT: f32 = 2.0;

// Trunk
pub const TRUNK_COUNT: usize = 1_800;
pub const TRUNK_HEIGHT: f32 = 2.5; // ground sits this far below the foliage base
pub const TRUNK_RADIUS: f32 = 0.55;
pub const TRUNK_ROOT_FRACTION: f32 = 0.3; // bottom share of the trunk that flares into roots
pub const TRUNK_ROOT_SPREAD: f32 = 2.4; // root radius at the very bottom
pub const TRUNK_ROOT_TURNS: f32 = 2.5;
pub const TRUNK_COLOR: [f32; 3] = [0.28, 0.16, 0.08];
pub const TRUNK_CHAOS_RADIUS: f32 = 15.0;
pub const TRUNK_CHAOS_THICKNESS: f32 = 2.5;
pub const TRUNK_CHAOS_HALF_HEIGHT: f32 = 9.0;

// Ribbon
pub const RIBBON_COUNT: usize = 3_000;
pub const RIBBON_TURNS: f32 = 5.5;
pub const RIBBON_RADIUS_SCALE: f32 = 1.08; // sits just outside the foliage surface
pub const RIBBON_JITTER: f32 = 0.12;
pub const RIBBON_BAND_WIDTH: f32 = 0.35; // vertical thickness of a band
pub const RIBBON_COLORS: [[f32; 3]; 2] = [
    [0.85, 0.08, 0.12], // crimson band
    [1.0, 0.85, 0.45],  // gold band
];
pub const RIBBON_CHAOS_RADIUS: f32 = 20.0;
pub const RIBBON_CHAOS_LIFT: f32 = 4.0;

// Snow
pub const SNOW_COUNT: usize = 5_000;
pub const SNOW_INNER_RADIUS: f32 = 0.8;
pub const SNOW_OUTER_RADIUS: f32 = 10.0;
pub const SNOW_TERRAIN_AMPLITUDE: f32 = 0.35;
pub const SNOW_MAX_GROWTH: f32 = 0.9; // cap next to the trunk, falls off with distance
pub const SNOW_MIN_GROWTH_SHARE: f32 = 0.15; // cap share kept at the disk rim
pub const SNOW_COLOR: [f32; 3] = [0.92, 0.95, 1.0];
pub const SNOW_CHAOS_HALF_WIDTH: f32 = 30.0;
pub const SNOW_CHAOS_DEPTH: [f32; 2] = [-22.0, -12.0];

// Transition
pub const TRANSITION_RATE: f32 = 2.2; // 1/s, exponential approach
pub const TRANSITION_SNAP_EPSILON: f32 = 0.001;
pub const SNOW_GROWTH_THRESHOLD: f32 = 0.7;
pub const SNOW_MELT_THRESHOLD: f32 = 0.1;
pub const SNOW_GROWTH_CHANCE_PER_SEC: f32 = 1.2; // per-particle chance to advance, per second
pub const SNOW_GROWTH_STEP: f32 = 0.03;

// Ornaments
pub const DECORATION_COUNT: usize = 160;
pub const PHOTO_ANGLE_STEP: f32 = 2.399_963; // golden angle
pub const PHOTO_PHASE_OFFSET: f32 = 0.35;
pub const PHOTO_HEIGHT_BASE: f32 = 0.25;
pub const PHOTO_HEIGHT_STEP: f32 = 0.12;
pub const PHOTO_HEIGHT_SPAN: f32 = 0.55;
pub const ORNAMENT_SURFACE_SCALE: f32 = 1.12; // k in radius = base * (1-h)^p * k
pub const PHOTO_FRAME_SIZE: f32 = 1.1; // ambient frame height
pub const SWAY_AMPLITUDE: f32 = 0.18;
pub const SWAY_SPEED: f32 = 1.6; // rad/s at zero weight
pub const JIGGLE_DECAY_PER_SEC: f32 = 2.5;
pub const ORNAMENT_CHAOS_RADIUS: f32 = 18.0;

// Selection
pub const SELECT_CENTER_NDC_RADIUS: f32 = 0.35;
pub const SELECT_MAX_DISTANCE: f32 = 22.0;
pub const PICK_RADIUS_SCALE: f32 = 1.2; // pick sphere relative to ornament size

// Focus
pub const FOCUS_OPEN_SECONDS: f32 = 0.9;
pub const FOCUS_CLOSE_SECONDS: f32 = 0.7;
pub const FOCUS_OPEN_POWER: f32 = 3.0;
pub const FOCUS_CLOSE_POWER: f32 = 2.0;
pub const FOCUS_DISTANCE: f32 = 6.0; // in front of the camera
pub const FOCUS_HEIGHT_FRACTION: f32 = 0.7;
pub const FOCUS_WIDTH_FRACTION: f32 = 0.85;
pub const FOCUS_OPEN_SWOOP: f32 = 0.0;
pub const FOCUS_CLOSE_SWOOP: f32 = 2.5;

// Gesture
pub const GESTURE_STABILITY_FRAMES: u32 = 8;
pub const GESTURE_FIST_RATIO: f32 = 1.15; // fingertip-to-wrist / palm size
pub const GESTURE_OPEN_RATIO: f32 = 1.6;
pub const GESTURE_PINCH_RATIO: f32 = 0.28; // thumb-to-index / palm size
pub const GESTURE_PINCH_FRAMES: u32 = 1; // a pinch is short; one clean frame is enough
pub const GESTURE_DOUBLE_PINCH_MS: u64 = 450;
pub const GESTURE_COOLDOWN_MS: u64 = 800;
pub const GESTURE_MOVE_DEADZONE: f32 = 0.004; // normalized image units per frame
pub const GESTURE_DRAG_GAIN: f32 = 6.0;
pub const GESTURE_ZOOM_GAIN: f32 = 40.0;

// Orbit
pub const ORBIT_DISTANCE: f32 = 20.0;
pub const ORBIT_MIN_DISTANCE: f32 = 10.0;
pub const ORBIT_MAX_DISTANCE: f32 = 32.0;
pub const ORBIT_HEIGHT: f32 = 5.0;
pub const ORBIT_LOOK_AT_Y: f32 = 1.0;
pub const ORBIT_VELOCITY_DECAY_PER_SEC: f32 = 3.0;
pub const ORBIT_ZOOM_TAU_SEC: f32 = 0.25;
pub const ORBIT_AUTO_ROTATE: f32 = 0.12; // rad/s idle spin
pub const ORBIT_DRAG_SPEED: f32 = 1.0;
pub const ORBIT_MAX_VELOCITY: f32 = 4.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const CAMERA_FOVY_DEGREES: f32 = 45.0;
