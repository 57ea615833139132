//! Radial darkening toward the frame edges.

use crate::foundation::error::{PostfxError, PostfxResult};
use crate::foundation::math::{Vec2, smoothstep};

/// Vignette falloff parameters, in normalized-UV distance from frame center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VignetteParams {
    /// Distance beyond which pixels are fully dark.
    pub radius: f32,
    /// Width of the smooth falloff band inside `radius`.
    pub softness: f32,
}

impl Default for VignetteParams {
    fn default() -> Self {
        Self {
            radius: 0.75,
            softness: 0.45,
        }
    }
}

impl VignetteParams {
    pub(crate) fn validate(&self) -> PostfxResult<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(PostfxError::validation(
                "vignette.radius must be finite and > 0",
            ));
        }
        if !self.softness.is_finite() || self.softness < 0.0 {
            return Err(PostfxError::validation(
                "vignette.softness must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Multiplicative mask: 1 inside `radius - softness`, 0 beyond `radius`,
/// smooth in between. Monotonically non-increasing in distance from center.
pub fn mask(uv: Vec2, params: &VignetteParams) -> f32 {
    let d = (uv - Vec2::splat(0.5)).length();
    1.0 - smoothstep(params.radius - params.softness, params.radius, d)
}
