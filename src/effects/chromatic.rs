//! Chromatic aberration: per-channel offsets simulating lens dispersion.

use crate::foundation::core::Rgb;
use crate::foundation::error::{PostfxError, PostfxResult};
use crate::foundation::math::Vec2;
use crate::texture::SceneTexture;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChromaticAberrationParams {
    /// Offset magnitude in normalized UV units.
    pub magnitude: f32,
}

impl Default for ChromaticAberrationParams {
    fn default() -> Self {
        Self { magnitude: 0.005 }
    }
}

impl ChromaticAberrationParams {
    pub(crate) fn validate(&self) -> PostfxResult<()> {
        if !self.magnitude.is_finite() || self.magnitude < 0.0 {
            return Err(PostfxError::validation(
                "chromatic_aberration.magnitude must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Per-channel sampling offsets for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelOffsets {
    pub r: Vec2,
    pub g: Vec2,
    pub b: Vec2,
}

/// Resolve the three offsets from `time`, once per frame.
///
/// Distinct phase/frequency pairs per channel keep the offsets diverging and
/// re-converging without a short common period; identical offsets would make
/// the effect vanish.
pub fn channel_offsets(time: f32, params: &ChromaticAberrationParams) -> ChannelOffsets {
    let m = params.magnitude;
    ChannelOffsets {
        r: Vec2::new((time * 1.1).sin(), (time * 1.9).cos()) * m,
        g: Vec2::new((time * 1.7 + 2.0).sin(), (time * 0.8 + 1.0).cos()) * m,
        b: Vec2::new((time * 1.3 + 4.0).sin(), (time * 1.5 + 3.0).cos()) * m,
    }
}

/// Sample the base texture three times, keeping the matching channel from
/// each misaligned sample.
pub fn sample(tex: &SceneTexture, uv: Vec2, offsets: &ChannelOffsets) -> Rgb {
    Rgb::new(
        tex.sample(uv + offsets.r).r,
        tex.sample(uv + offsets.g).g,
        tex.sample(uv + offsets.b).b,
    )
}
