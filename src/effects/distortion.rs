//! Iterative noise-based UV distortion.

use crate::foundation::error::{PostfxError, PostfxResult};
use crate::foundation::math::Vec2;
use crate::noise::value_noise;

const MAX_ITERATIONS: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DistortionParams {
    /// Feedback iterations; each one warps the output of the previous.
    pub iterations: u32,
    /// Sinusoid amplitude in UV units.
    pub amplitude: f32,
    /// Sinusoid spatial frequency.
    pub frequency: f32,
    /// Time scale on the per-iteration phase.
    pub time_scale: f32,
    /// Noise perturbation amplitude in UV units.
    pub noise_amplitude: f32,
    /// Lattice scale for the noise samples.
    pub noise_scale: f32,
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self {
            iterations: 3,
            amplitude: 0.02,
            frequency: 9.0,
            time_scale: 0.6,
            noise_amplitude: 0.01,
            noise_scale: 6.0,
        }
    }
}

impl DistortionParams {
    pub(crate) fn validate(&self) -> PostfxResult<()> {
        if self.iterations > MAX_ITERATIONS {
            return Err(PostfxError::validation(format!(
                "distortion.iterations must be <= {MAX_ITERATIONS}"
            )));
        }
        for (name, v) in [
            ("amplitude", self.amplitude),
            ("frequency", self.frequency),
            ("time_scale", self.time_scale),
            ("noise_amplitude", self.noise_amplitude),
            ("noise_scale", self.noise_scale),
        ] {
            if !v.is_finite() {
                return Err(PostfxError::validation(format!(
                    "distortion.{name} must be finite"
                )));
            }
        }
        if self.amplitude < 0.0 || self.noise_amplitude < 0.0 {
            return Err(PostfxError::validation(
                "distortion amplitudes must be >= 0",
            ));
        }
        Ok(())
    }

    pub(crate) fn is_identity(&self) -> bool {
        self.iterations == 0 || (self.amplitude == 0.0 && self.noise_amplitude == 0.0)
    }
}

/// Warp a coordinate through the iterative feedback map.
///
/// Each iteration adds a sinusoid with swapped axes, phase-shifted by
/// `phase * iteration`, then a noise perturbation sampled at the
/// already-perturbed coordinate. Iteration order is load-bearing: each
/// iteration's output feeds the next. `phase` is the time term
/// (`time * time_scale`), resolved once per frame. The result is not clamped
/// to the unit square; sampling resolves out-of-range coordinates.
pub fn warp(uv: Vec2, phase: f32, params: &DistortionParams) -> Vec2 {
    let mut q = uv;
    for i in 1..=params.iterations {
        let ph = phase * i as f32;
        q.x += (q.y * params.frequency + ph).sin() * params.amplitude;
        q.y += (q.x * params.frequency + ph).cos() * params.amplitude;

        let n = Vec2::new(
            value_noise(q * params.noise_scale + Vec2::splat(phase)),
            value_noise(q * params.noise_scale + Vec2::new(17.3, 9.1) + Vec2::splat(phase)),
        );
        q += (n - Vec2::splat(0.5)) * (2.0 * params.noise_amplitude);
    }
    q
}
