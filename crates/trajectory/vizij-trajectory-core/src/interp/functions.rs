//! Interpolation primitives:
//! - lerp / lerp_array / lerp_slice (component-wise affine blend)
//! - segment_scale (normalized position of a timestamp inside a segment)
//! - integrate_constant_accel (second-order Taylor step)

/// Linear interpolation of scalars.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_array<const N: usize>(a: &[f64; N], b: &[f64; N], t: f64) -> [f64; N] {
    let mut out = [0.0; N];
    for (o, (aa, bb)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
        *o = lerp(*aa, *bb, t);
    }
    out
}

/// Component-wise blend of two equally sized slices.
pub fn lerp_slice(a: &[f64], b: &[f64], t: f64) -> Vec<f64> {
    debug_assert_eq!(a.len(), b.len(), "lerp_slice length mismatch");
    a.iter().zip(b.iter()).map(|(aa, bb)| lerp(*aa, *bb, t)).collect()
}

/// Fraction of the way `timestamp` lies between `start` and `end`.
/// Callers guarantee `end - start` is not near zero.
#[inline]
pub fn segment_scale(start: f64, end: f64, timestamp: f64) -> f64 {
    (timestamp - start) / (end - start)
}

/// Advance position and velocity by `tau` seconds under constant acceleration:
///
///   p(τ) = p₀ + v₀τ + ½aτ²
///   v(τ) = v₀ + aτ
///
/// Returns `(position, velocity)`.
#[inline]
pub fn integrate_constant_accel(p0: f64, v0: f64, a: f64, tau: f64) -> (f64, f64) {
    (p0 + v0 * tau + 0.5 * a * tau * tau, v0 + a * tau)
}
