//! Granlund's Fourier-descriptor invariants.
//!
//! The outer boundary is read as a complex signal `z = x + iy`, resampled at
//! equal arc length, and transformed. With `a_k` the Fourier coefficients,
//! `b_k = a_(1+k) * a_(1-k) / a_1^2` is unchanged by translation, rotation,
//! scaling, and the choice of starting point. The descriptor keeps `|b_k|`
//! for `k = 2..=9`.

use crate::core::BinaryMask;
use crate::features::FeatureError;
use crate::features::contour::{largest_component, trace_outer_boundary};
use std::f64::consts::PI;

pub const GRANLUND_DESCRIPTORS: usize = 8;
pub const CONTOUR_SAMPLES: usize = 128;
const FIRST_ORDER: i64 = 2;

pub fn granlund_descriptors(
    mask: &BinaryMask,
) -> Result<[f64; GRANLUND_DESCRIPTORS], FeatureError> {
    if mask.is_empty() {
        return Err(FeatureError::EmptyShape);
    }
    let blob = largest_component(mask);
    let boundary = trace_outer_boundary(&blob);
    if boundary.len() < 3 {
        return Err(FeatureError::DegenerateShape(format!(
            "boundary has {} points",
            boundary.len()
        )));
    }

    let mut points: Vec<(f64, f64)> = boundary
        .into_iter()
        .map(|(x, y)| (x as f64, y as f64))
        .collect();
    if signed_area(&points) < 0.0 {
        points.reverse();
    }
    let samples = resample_closed(&points, CONTOUR_SAMPLES);

    let (a1_re, a1_im) = fourier_coefficient(&samples, 1);
    let a1_norm_sq = a1_re * a1_re + a1_im * a1_im;

    let mut out = [0.0; GRANLUND_DESCRIPTORS];
    for (slot, k) in out.iter_mut().zip(FIRST_ORDER..) {
        let upper = magnitude(fourier_coefficient(&samples, 1 + k));
        let lower = magnitude(fourier_coefficient(&samples, 1 - k));
        *slot = upper * lower / a1_norm_sq;
    }
    Ok(out)
}

/// Shoelace area; positive when the walk turns the same way as `a_1`.
fn signed_area(points: &[(f64, f64)]) -> f64 {
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % n];
            x0 * y1 - x1 * y0
        })
        .sum();
    twice / 2.0
}

/// `count` points spaced evenly along the closed polyline through `points`.
fn resample_closed(points: &[(f64, f64)], count: usize) -> Vec<(f64, f64)> {
    let n = points.len();
    let mut cumulative = Vec::with_capacity(n + 1);
    cumulative.push(0.0);
    for i in 0..n {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % n];
        let last = cumulative[i];
        cumulative.push(last + (x1 - x0).hypot(y1 - y0));
    }
    let perimeter = cumulative[n];

    let mut out = Vec::with_capacity(count);
    let mut segment = 0usize;
    for j in 0..count {
        let target = perimeter * j as f64 / count as f64;
        while segment + 1 < n && cumulative[segment + 1] <= target {
            segment += 1;
        }
        let length = cumulative[segment + 1] - cumulative[segment];
        let t = if length > 0.0 {
            (target - cumulative[segment]) / length
        } else {
            0.0
        };
        let (x0, y0) = points[segment];
        let (x1, y1) = points[(segment + 1) % n];
        out.push((x0 + t * (x1 - x0), y0 + t * (y1 - y0)));
    }
    out
}

/// `a_k = (1/N) * sum_n z_n * exp(-2*pi*i*k*n/N)`, returned as `(re, im)`.
fn fourier_coefficient(samples: &[(f64, f64)], k: i64) -> (f64, f64) {
    let n = samples.len() as f64;
    let mut re = 0.0;
    let mut im = 0.0;
    for (idx, &(x, y)) in samples.iter().enumerate() {
        let (s, c) = (-2.0 * PI * k as f64 * idx as f64 / n).sin_cos();
        re += x * c - y * s;
        im += x * s + y * c;
    }
    (re / n, im / n)
}

#[inline]
fn magnitude((re, im): (f64, f64)) -> f64 {
    re.hypot(im)
}
