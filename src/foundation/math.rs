use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// 2D point/vector in normalized texture space.
///
/// Kept as `f32` throughout: the whole pipeline is single-precision shader
/// math and must stay bit-stable between serial and parallel dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Construct from components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Both components set to `v`.
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Component-wise floor.
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Both components finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Fractional part, always in `[0, 1)` (GLSL `fract` semantics, including
/// negative inputs).
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Linear interpolation between `a` and `b`.
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep between edges `e0` and `e1`.
///
/// Degenerate edges (`e0 == e1`) fall back to a hard step so callers with
/// zero-softness parameters stay bounded instead of dividing by zero.
pub fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    if e0 == e1 {
        return if x < e0 { 0.0 } else { 1.0 };
    }
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fract_is_in_unit_interval_for_negative_inputs() {
        for x in [-3.75f32, -0.25, 0.0, 0.25, 7.5] {
            let f = fract(x);
            assert!((0.0..1.0).contains(&f), "fract({x}) = {f}");
        }
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_edges_and_midpoint() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_degenerate_edges_is_hard_step() {
        assert_eq!(smoothstep(0.5, 0.5, 0.49), 0.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.51), 1.0);
    }

    #[test]
    fn vec2_length_and_ops() {
        let v = Vec2::new(3.0, 4.0);
        assert!((v.length() - 5.0).abs() < 1e-6);
        assert_eq!(v - Vec2::splat(1.0), Vec2::new(2.0, 3.0));
        assert_eq!(v * 2.0, Vec2::new(6.0, 8.0));
    }
}
