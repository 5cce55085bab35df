pub mod detectors;

pub use detectors::{DetectionContext, Detector};
