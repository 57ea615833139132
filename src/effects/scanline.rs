//! Moving horizontal scanline modulation.

use crate::foundation::error::{PostfxError, PostfxResult};
use crate::foundation::math::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScanlineParams {
    /// Line frequency in screen-space units. The reference uses a fixed
    /// density; callers tracking resolution changes scale this with the
    /// output height.
    pub density: f32,
    /// Mask level the lines oscillate around.
    pub base: f32,
    /// Oscillation amplitude.
    pub amplitude: f32,
    /// Vertical scroll speed (phase per second).
    pub scroll: f32,
}

impl Default for ScanlineParams {
    fn default() -> Self {
        Self {
            density: 800.0,
            base: 0.9,
            amplitude: 0.1,
            scroll: 2.0,
        }
    }
}

impl ScanlineParams {
    pub(crate) fn validate(&self) -> PostfxResult<()> {
        for (name, v) in [
            ("density", self.density),
            ("base", self.base),
            ("amplitude", self.amplitude),
            ("scroll", self.scroll),
        ] {
            if !v.is_finite() {
                return Err(PostfxError::validation(format!(
                    "scanline.{name} must be finite"
                )));
            }
        }
        if self.base < 0.0 || self.amplitude < 0.0 {
            return Err(PostfxError::validation(
                "scanline.base and scanline.amplitude must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Multiplicative mask for one pixel. `phase` is the time term
/// (`time * scroll`), resolved once per frame.
pub fn mask(uv: Vec2, phase: f32, params: &ScanlineParams) -> f32 {
    (params.base + params.amplitude * (uv.y * params.density + phase).sin()).clamp(0.0, 1.0)
}
