//! Deterministic value noise used by the distortion stage.

use crate::foundation::math::{Vec2, fract, mix};

/// Stateless 2D -> `[0, 1)` hash.
///
/// Fract-of-scaled-sine construction: same input always yields the same
/// output, nearby inputs are intentionally uncorrelated. This is the raw
/// hash, not the smoothed field.
pub fn hash(p: Vec2) -> f32 {
    fract((p.x * 127.1 + p.y * 311.7).sin() * 43758.547)
}

/// Smoothed value noise in `[0, 1]`.
///
/// Bilinear blend of [`hash`] at the four surrounding lattice points using
/// smoothstep weights (`3t^2 - 2t^3`) on the fractional part, so the field is
/// continuous across lattice boundaries. At an integer lattice point this
/// returns exactly `hash` of that point.
pub fn value_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;

    let ux = f.x * f.x * (3.0 - 2.0 * f.x);
    let uy = f.y * f.y * (3.0 - 2.0 * f.y);

    let a = hash(i);
    let b = hash(i + Vec2::new(1.0, 0.0));
    let c = hash(i + Vec2::new(0.0, 1.0));
    let d = hash(i + Vec2::new(1.0, 1.0));

    mix(mix(a, b, ux), mix(c, d, ux), uy)
}
