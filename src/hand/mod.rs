pub mod geometry;
pub mod landmark;

pub use geometry::{mean_displacement, ExtensionFlags, Finger, FingerState, HandGeometry};
pub use landmark::{Hand, HandFrame, Landmark, LandmarkIndex};
