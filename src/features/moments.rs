//! Geometric moments of a binary shape.
//!
//! Pixels are unit masses located at their integer coordinates. Central
//! moments are taken about the centroid, and the scale-normalized moments
//! follow `eta_pq = mu_pq / mu_00^(1 + (p + q) / 2)`.

use crate::core::BinaryMask;

/// Central moments up to order three.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralMoments {
    pub m00: f64,
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub mu20: f64,
    pub mu11: f64,
    pub mu02: f64,
    pub mu30: f64,
    pub mu21: f64,
    pub mu12: f64,
    pub mu03: f64,
}

/// Scale-normalized central moments up to order three.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedMoments {
    pub n20: f64,
    pub n11: f64,
    pub n02: f64,
    pub n30: f64,
    pub n21: f64,
    pub n12: f64,
    pub n03: f64,
}

impl CentralMoments {
    /// `None` when the mask has no foreground.
    pub fn of(mask: &BinaryMask) -> Option<Self> {
        let mut m00 = 0.0;
        let mut m10 = 0.0;
        let mut m01 = 0.0;
        for (x, y) in mask.foreground() {
            m00 += 1.0;
            m10 += x as f64;
            m01 += y as f64;
        }
        if m00 == 0.0 {
            return None;
        }

        let cx = m10 / m00;
        let cy = m01 / m00;
        let mut m = CentralMoments {
            m00,
            centroid_x: cx,
            centroid_y: cy,
            mu20: 0.0,
            mu11: 0.0,
            mu02: 0.0,
            mu30: 0.0,
            mu21: 0.0,
            mu12: 0.0,
            mu03: 0.0,
        };
        for (x, y) in mask.foreground() {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let dx2 = dx * dx;
            let dy2 = dy * dy;
            m.mu20 += dx2;
            m.mu11 += dx * dy;
            m.mu02 += dy2;
            m.mu30 += dx2 * dx;
            m.mu21 += dx2 * dy;
            m.mu12 += dx * dy2;
            m.mu03 += dy2 * dy;
        }
        Some(m)
    }

    pub fn normalized(&self) -> NormalizedMoments {
        let second = self.m00.powi(2);
        let third = self.m00.powf(2.5);
        NormalizedMoments {
            n20: self.mu20 / second,
            n11: self.mu11 / second,
            n02: self.mu02 / second,
            n30: self.mu30 / third,
            n21: self.mu21 / third,
            n12: self.mu12 / third,
            n03: self.mu03 / third,
        }
    }
}
