//! Cinematic per-channel color grading.

use crate::foundation::core::Rgb;
use crate::foundation::error::{PostfxError, PostfxResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorGradeParams {
    /// Per-channel gamma exponents `[r, g, b]`.
    pub gamma: [f32; 3],
    /// Per-channel gain `[r, g, b]`.
    pub gain: [f32; 3],
}

impl Default for ColorGradeParams {
    fn default() -> Self {
        // Warm highlights, cool shadows.
        Self {
            gamma: [0.9, 1.0, 1.1],
            gain: [1.05, 1.0, 0.95],
        }
    }
}

impl ColorGradeParams {
    pub(crate) fn validate(&self) -> PostfxResult<()> {
        for g in self.gamma {
            if !g.is_finite() || g <= 0.0 {
                return Err(PostfxError::validation(
                    "color_grade.gamma channels must be finite and > 0",
                ));
            }
        }
        for g in self.gain {
            if !g.is_finite() || g < 0.0 {
                return Err(PostfxError::validation(
                    "color_grade.gain channels must be finite and >= 0",
                ));
            }
        }
        Ok(())
    }
}

/// Apply per-channel gamma then gain. Channels are floored at zero before the
/// exponent so additive overshoot never produces NaN.
pub fn apply(c: Rgb, params: &ColorGradeParams) -> Rgb {
    fn grade(v: f32, gamma: f32, gain: f32) -> f32 {
        v.max(0.0).powf(gamma) * gain
    }
    Rgb::new(
        grade(c.r, params.gamma[0], params.gain[0]),
        grade(c.g, params.gamma[1], params.gain[1]),
        grade(c.b, params.gamma[2], params.gain[2]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_params_are_the_identity() {
        let p = ColorGradeParams {
            gamma: [1.0; 3],
            gain: [1.0; 3],
        };
        let c = Rgb::new(0.2, 0.5, 0.8);
        assert_eq!(apply(c, &p), c);
    }

    #[test]
    fn black_and_white_are_preserved_by_gamma() {
        let p = ColorGradeParams {
            gain: [1.0; 3],
            ..ColorGradeParams::default()
        };
        assert_eq!(apply(Rgb::splat(0.0), &p), Rgb::splat(0.0));
        assert_eq!(apply(Rgb::splat(1.0), &p), Rgb::splat(1.0));
    }

    #[test]
    fn negative_overshoot_floors_to_zero() {
        let p = ColorGradeParams::default();
        let out = apply(Rgb::new(-0.5, 0.5, 0.5), &p);
        assert_eq!(out.r, 0.0);
        assert!(out.g.is_finite() && out.b.is_finite());
    }

    #[test]
    fn validate_rejects_non_positive_gamma() {
        assert!(
            ColorGradeParams {
                gamma: [0.0, 1.0, 1.0],
                gain: [1.0; 3]
            }
            .validate()
            .is_err()
        );
    }
}
