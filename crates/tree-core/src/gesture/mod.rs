//! Hand-landmark gesture recognition.

mod classifier;
mod hand;
mod poses;

pub use classifier::{Commands, GestureClassifier, GestureCommand, StabilityCounters};
pub use hand::{HandLandmarks, Landmark, LANDMARK_COUNT};
pub use poses::HandPose;
