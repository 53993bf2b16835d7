//! Scalar blend helpers and the cosine-eased bilinear lattice smoother.

use std::f64::consts::PI;

/// Linear interpolation: `a` at `t = 0`, `b` at `t = 1`. `t` is not clamped.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cosine-eased interpolation, `f = (1 - cos(πt)) / 2`.
///
/// Has zero slope at both ends, which hides the lattice grid that plain
/// linear interpolation leaves as visible creases.
#[inline]
pub fn cosine_interpolate(a: f64, b: f64, t: f64) -> f64 {
    let f = (1.0 - (t * PI).cos()) * 0.5;
    a * (1.0 - f) + b * f
}

/// Clamped Hermite step `t²(3 − 2t)` of `x` between `edge0` and `edge1`.
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Sample `hash` at the four lattice points around `(x, z)` and blend them
/// with [`cosine_interpolate`], first along x and then along z.
pub fn smooth_bilinear(x: f64, z: f64, hash: impl Fn(i32, i32) -> f64) -> f64 {
    let x0 = x.floor();
    let z0 = z.floor();
    let fx = x - x0;
    let fz = z - z0;
    let (ix, iz) = (x0 as i32, z0 as i32);

    let v1 = hash(ix, iz);
    let v2 = hash(ix.wrapping_add(1), iz);
    let v3 = hash(ix, iz.wrapping_add(1));
    let v4 = hash(ix.wrapping_add(1), iz.wrapping_add(1));

    let i1 = cosine_interpolate(v1, v2, fx);
    let i2 = cosine_interpolate(v3, v4, fx);
    cosine_interpolate(i1, i2, fz)
}
