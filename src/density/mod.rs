pub mod kde;

use serde::Serialize;
use thiserror::Error;

pub use kde::{estimate, silverman_bandwidth};

pub const DEFAULT_NUM_POINTS: usize = 100;

#[derive(Debug, Error, PartialEq)]
pub enum DensityError {
    #[error("cannot estimate density of an empty sample")]
    EmptySample,
    /// Bandwidth not finite and positive: every sample equal, or a spread too
    /// small to survive the variance computation.
    #[error("degenerate bandwidth ({bandwidth}) for {n} samples in [{min}, {max}]")]
    DegenerateBandwidth {
        n: usize,
        min: f64,
        max: f64,
        bandwidth: f64,
    },
    #[error("sample contains a non-finite value at index {0}")]
    NonFiniteSample(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub bandwidth: f64,
}

impl DensityCurve {
    pub fn peak(&self) -> f64 {
        self.y.iter().copied().fold(0.0, f64::max)
    }

    /// Trapezoid integral over the evaluation grid.
    pub fn area(&self) -> f64 {
        self.x
            .windows(2)
            .zip(self.y.windows(2))
            .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) * 0.5)
            .sum()
    }
}
