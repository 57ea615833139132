//! Volumetric light shafts: decayed radial accumulation toward a moving
//! light position.

use crate::foundation::error::{PostfxError, PostfxResult};
use crate::foundation::math::Vec2;
use crate::texture::SceneTexture;

/// Cap on the fixed per-pixel sample walk. 30 samples is already the most
/// expensive stage in the pipeline.
const MAX_SAMPLES: u32 = 256;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GodRaysParams {
    /// Fixed number of samples walked from the pixel toward the light.
    pub samples: u32,
    /// Fraction of the pixel-to-light distance covered by the walk (< 1 keeps
    /// rays from reaching fully to the light).
    pub density: f32,
    /// Geometric per-sample falloff. 0 leaves only the first sample, 1 weights
    /// all samples equally.
    pub decay: f32,
    /// Per-sample weight applied before decay.
    pub weight: f32,
    /// Final scale on the accumulated sum.
    pub exposure: f32,
    /// Light orbit amplitude around frame center, per axis.
    pub orbit_amplitude: Vec2,
    /// Light orbit angular speed, per axis (radians per second).
    pub orbit_speed: Vec2,
}

impl Default for GodRaysParams {
    fn default() -> Self {
        Self {
            samples: 30,
            density: 0.8,
            decay: 0.95,
            weight: 0.06,
            exposure: 0.35,
            orbit_amplitude: Vec2::new(0.3, 0.2),
            orbit_speed: Vec2::new(0.5, 0.3),
        }
    }
}

impl GodRaysParams {
    pub(crate) fn validate(&self) -> PostfxResult<()> {
        if self.samples > MAX_SAMPLES {
            return Err(PostfxError::validation(format!(
                "god_rays.samples must be <= {MAX_SAMPLES}"
            )));
        }
        for (name, v) in [
            ("density", self.density),
            ("decay", self.decay),
            ("weight", self.weight),
            ("exposure", self.exposure),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(PostfxError::validation(format!(
                    "god_rays.{name} must be finite and >= 0"
                )));
            }
        }
        if !self.orbit_amplitude.is_finite() || !self.orbit_speed.is_finite() {
            return Err(PostfxError::validation(
                "god_rays light orbit must be finite",
            ));
        }
        Ok(())
    }
}

/// Light position for this frame: an oscillation around the frame center,
/// recomputed from `time` (never persisted state).
pub fn light_position(time: f32, params: &GodRaysParams) -> Vec2 {
    Vec2::new(
        0.5 + (time * params.orbit_speed.x).sin() * params.orbit_amplitude.x,
        0.5 + (time * params.orbit_speed.y).cos() * params.orbit_amplitude.y,
    )
}

/// Accumulated shaft brightness for one pixel.
///
/// Walks `samples` evenly spaced steps from `uv` toward `light_pos`, sampling
/// the base texture's red channel as a cheap brightness proxy. The fixed
/// iteration count keeps the degenerate `light_pos == uv` case (zero step,
/// every sample on the same texel) terminating with a bounded value.
pub fn accumulate(
    tex: &SceneTexture,
    uv: Vec2,
    light_pos: Vec2,
    params: &GodRaysParams,
) -> f32 {
    if params.samples == 0 {
        return 0.0;
    }

    let step = (uv - light_pos) * (params.density / params.samples as f32);
    let mut pos = uv;
    let mut illumination = 1.0f32;
    let mut sum = 0.0f32;

    for _ in 0..params.samples {
        pos = pos - step;
        sum += tex.sample(pos).r * params.weight * illumination;
        illumination *= params.decay;
    }

    sum * params.exposure
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_tex() -> SceneTexture {
        SceneTexture::solid(8, 8, [255, 255, 255, 255]).unwrap()
    }

    #[test]
    fn zero_decay_keeps_only_the_first_sample() {
        let p = GodRaysParams {
            decay: 0.0,
            weight: 1.0,
            exposure: 1.0,
            ..GodRaysParams::default()
        };
        let got = accumulate(&white_tex(), Vec2::new(0.8, 0.5), Vec2::splat(0.5), &p);
        assert!((got - 1.0).abs() < 1e-6);
    }

    #[test]
    fn unit_decay_weights_all_samples_equally() {
        let p = GodRaysParams {
            decay: 1.0,
            weight: 1.0,
            exposure: 1.0,
            samples: 30,
            ..GodRaysParams::default()
        };
        let got = accumulate(&white_tex(), Vec2::new(0.8, 0.5), Vec2::splat(0.5), &p);
        assert!((got - 30.0).abs() < 1e-4);
    }

    #[test]
    fn light_coincident_with_pixel_is_bounded() {
        let p = GodRaysParams::default();
        let uv = Vec2::splat(0.5);
        let got = accumulate(&white_tex(), uv, uv, &p);
        assert!(got.is_finite());
        // Geometric series bound: weight / (1 - decay) * exposure.
        assert!(got <= p.weight / (1.0 - p.decay) * p.exposure + 1e-4);
    }

    #[test]
    fn zero_samples_contributes_nothing() {
        let p = GodRaysParams {
            samples: 0,
            ..GodRaysParams::default()
        };
        assert_eq!(
            accumulate(&white_tex(), Vec2::new(0.2, 0.2), Vec2::splat(0.5), &p),
            0.0
        );
    }

    #[test]
    fn brightness_decreases_with_distance_from_a_point_light() {
        // Bright block around the light, black elsewhere; pixels farther
        // along the ray path accumulate less.
        let mut tex = SceneTexture::solid(64, 64, [0, 0, 0, 255]).unwrap();
        for y in 28..=36 {
            for x in 28..=36 {
                tex.put_pixel(x, y, [255, 0, 0, 255]);
            }
        }
        let light = Vec2::splat(0.5);
        let p = GodRaysParams::default();

        let mut prev = f32::INFINITY;
        for px_off in [0u32, 4, 8, 16, 24, 30] {
            let uv = Vec2::new((32.5 + px_off as f32) / 64.0, 0.5078125);
            let v = accumulate(&tex, uv, light, &p);
            assert!(
                v <= prev + 1e-6,
                "ray brightness increased at offset {px_off}: {v} > {prev}"
            );
            prev = v;
        }
    }

    #[test]
    fn orbit_oscillates_around_center() {
        let p = GodRaysParams::default();
        let at0 = light_position(0.0, &p);
        assert!((at0.x - 0.5).abs() < 1e-6);
        assert!((at0.y - (0.5 + p.orbit_amplitude.y)).abs() < 1e-6);
        for t in [0.0f32, 1.3, 7.7, 100.0] {
            let lp = light_position(t, &p);
            assert!((lp.x - 0.5).abs() <= p.orbit_amplitude.x + 1e-6);
            assert!((lp.y - 0.5).abs() <= p.orbit_amplitude.y + 1e-6);
        }
    }

    #[test]
    fn validate_rejects_excess_samples_and_negatives() {
        assert!(
            GodRaysParams {
                samples: 10_000,
                ..GodRaysParams::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            GodRaysParams {
                decay: -0.1,
                ..GodRaysParams::default()
            }
            .validate()
            .is_err()
        );
    }
}
