//! Glow around bright regions via smooth brightness thresholding.

use crate::foundation::error::{PostfxError, PostfxResult};
use crate::foundation::math::{Vec2, smoothstep};
use crate::texture::SceneTexture;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BloomParams {
    /// Brightness at which glow starts to appear.
    pub threshold_low: f32,
    /// Brightness at which glow saturates.
    pub threshold_high: f32,
    /// Scale on the additive glow.
    pub weight: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            threshold_low: 0.6,
            threshold_high: 1.0,
            weight: 0.8,
        }
    }
}

impl BloomParams {
    pub(crate) fn validate(&self) -> PostfxResult<()> {
        if !self.threshold_low.is_finite()
            || !self.threshold_high.is_finite()
            || self.threshold_low > self.threshold_high
        {
            return Err(PostfxError::validation(
                "bloom thresholds must be finite with low <= high",
            ));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(PostfxError::validation(
                "bloom.weight must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Greyscale glow scalar for one pixel.
///
/// Brightness proxy is the channel max, not luminance; the soft knee between
/// the two thresholds replaces a hard cutoff.
pub fn glow(tex: &SceneTexture, uv: Vec2, params: &BloomParams) -> f32 {
    let brightness = tex.sample(uv).max_channel();
    smoothstep(params.threshold_low, params.threshold_high, brightness)
}
