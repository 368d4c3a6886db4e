use crate::core::BinaryMask;
use crate::features::FeatureError;
use crate::features::moments::CentralMoments;

pub const HU_INVARIANTS: usize = 7;

/// The seven Hu invariants, `h1..h7`.
///
/// A mirrored shape yields the same values except `h7`, which changes sign.
pub fn hu_invariants(mask: &BinaryMask) -> Result<[f64; HU_INVARIANTS], FeatureError> {
    let moments = CentralMoments::of(mask).ok_or(FeatureError::EmptyShape)?;
    let n = moments.normalized();

    let t0 = n.n30 + n.n12;
    let t1 = n.n21 + n.n03;
    let q0 = t0 * t0;
    let q1 = t1 * t1;
    let a = n.n30 - 3.0 * n.n12;
    let b = 3.0 * n.n21 - n.n03;
    let d = n.n20 - n.n02;

    Ok([
        n.n20 + n.n02,
        d * d + 4.0 * n.n11 * n.n11,
        a * a + b * b,
        q0 + q1,
        a * t0 * (q0 - 3.0 * q1) + b * t1 * (3.0 * q0 - q1),
        d * (q0 - q1) + 4.0 * n.n11 * t0 * t1,
        b * t0 * (q0 - 3.0 * q1) - a * t1 * (3.0 * q0 - q1),
    ])
}
