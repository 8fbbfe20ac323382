use std::f64::consts::PI;

use crate::density::{DensityCurve, DensityError};

const SILVERMAN_FACTOR: f64 = 1.06;

fn gaussian_kernel(u: f64) -> f64 {
    (-0.5 * u * u).exp() / (2.0 * PI).sqrt()
}

/// Silverman's rule of thumb using the population standard deviation.
pub fn silverman_bandwidth(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let mean_sq = samples.iter().map(|x| x * x).sum::<f64>() / n;
    // Cancellation can push the difference slightly below zero.
    let std = (mean_sq - mean * mean).max(0.0).sqrt();
    SILVERMAN_FACTOR * std * n.powf(-0.2)
}

/// Gaussian KDE of `samples` evaluated on `num_points` evenly spaced points
/// spanning `[min, max]` inclusive.
///
/// A sample with no usable bandwidth (all values equal, or a spread lost to
/// rounding) is reported as [`DensityError::DegenerateBandwidth`] rather than
/// producing a curve of NaN.
pub fn estimate(samples: &[f64], num_points: usize) -> Result<DensityCurve, DensityError> {
    if samples.is_empty() {
        return Err(DensityError::EmptySample);
    }
    if let Some(idx) = samples.iter().position(|x| !x.is_finite()) {
        return Err(DensityError::NonFiniteSample(idx));
    }

    let n = samples.len();
    let (min, max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    let bandwidth = silverman_bandwidth(samples);
    if min == max || !(bandwidth > 0.0) || !bandwidth.is_finite() {
        return Err(DensityError::DegenerateBandwidth {
            n,
            min,
            max,
            bandwidth,
        });
    }

    let step = if num_points > 1 {
        (max - min) / (num_points - 1) as f64
    } else {
        0.0
    };
    let norm = n as f64 * bandwidth;

    let mut x = Vec::with_capacity(num_points);
    let mut y = Vec::with_capacity(num_points);
    for i in 0..num_points {
        let xi = if i + 1 == num_points && num_points > 1 {
            max
        } else {
            min + i as f64 * step
        };
        let mut density = 0.0;
        for &s in samples {
            density += gaussian_kernel((xi - s) / bandwidth);
        }
        x.push(xi);
        y.push(density / norm);
    }

    Ok(DensityCurve { x, y, bandwidth })
}

#[cfg(test)]
#[path = "../../tests/src_inline/density/kde.rs"]
mod tests;
