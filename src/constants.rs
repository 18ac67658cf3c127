/// Host-side timing and interaction tuning.
///
/// Scene tuning (tree shape, transition rates, gesture thresholds) lives in
/// `tree_core::constants` and the TOML config; these only shape how the host
/// feeds input and drives frames.
// Frame loop
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after stalls so animations never jump
pub const HEADLESS_FRAME_MS: u64 = 16;
pub const HEADLESS_FRAMES: u64 = 600;

// Default viewport when the host has not reported one yet
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 720;

// Pointer
pub const CLICK_MAX_TRAVEL_PX: f32 = 6.0; // more travel than this turns a click into a drag
pub const POINTER_ORBIT_PER_PX: f32 = 0.004; // yaw velocity added per pixel of drag
pub const WHEEL_ZOOM_PER_UNIT: f32 = 0.02; // distance change per wheel delta unit

// Hand detection
pub const DETECTION_POLL_MS: u64 = 33; // roughly camera frame rate
pub const DETECTION_PALM_SIZE: f32 = 0.1; // palm length of the scripted hand, image units

// Render log cadence for the headless back end
pub const LOG_BACKEND_EVERY_N_FRAMES: u64 = 120;
