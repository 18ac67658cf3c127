pub mod config;
pub mod constants;
pub mod easing;
pub mod error;
pub mod field;
pub mod focus;
pub mod gesture;
pub mod orbit;
pub mod ornament;
pub mod state;
pub mod transition;

pub use config::TreeConfig;
pub use error::{Result, TreeError};
pub use field::{GroupKind, ParticleField, ParticleGroup};
pub use focus::{FocusController, FocusEvent, FocusFrame, FocusPhase};
pub use gesture::{GestureClassifier, GestureCommand, HandLandmarks, HandPose};
pub use orbit::OrbitController;
pub use ornament::{Ornament, OrnamentId, OrnamentKind, OrnamentRegistry};
pub use state::*;
pub use transition::{TransitionEngine, TransitionReport};
