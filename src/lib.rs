pub mod config;
pub mod dataset;
pub mod detector;
pub mod error;
pub mod granulation;
pub mod matrix;
pub mod metrics;

pub use detector::{Ball, Detector, Report};
pub use error::{GbError, GbResult};
