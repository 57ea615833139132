//! Per-frame compile step.
//!
//! Resolves every time-dependent term exactly once per frame (light position,
//! channel offsets, phases) and drops stages that cannot contribute, so the
//! per-pixel loop only pays for work that is visible. The resulting plan is
//! the immutable snapshot shared by all pixel workers for one frame.

use smallvec::SmallVec;

use crate::config::{PipelineConfig, Stage};
use crate::effects::bloom::BloomParams;
use crate::effects::chromatic::{ChannelOffsets, channel_offsets};
use crate::effects::distortion::DistortionParams;
use crate::effects::god_rays::{GodRaysParams, light_position};
use crate::effects::grade::ColorGradeParams;
use crate::effects::hue::HueRotateParams;
use crate::effects::scanline::ScanlineParams;
use crate::effects::vignette::VignetteParams;
use crate::foundation::core::Resolution;
use crate::foundation::error::{PostfxError, PostfxResult};
use crate::foundation::math::{Vec2, fract};

/// One resolved per-pixel operation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PlanOp {
    Distort {
        params: DistortionParams,
        phase: f32,
    },
    Chroma {
        offsets: ChannelOffsets,
    },
    Hue {
        params: HueRotateParams,
        base_hue: f32,
    },
    Rays {
        params: GodRaysParams,
        light_pos: Vec2,
    },
    Bloom(BloomParams),
    Grade(ColorGradeParams),
    Scanline {
        params: ScanlineParams,
        phase: f32,
    },
    Vignette(VignetteParams),
}

/// Immutable per-frame execution plan.
#[derive(Clone, Debug)]
pub(crate) struct FramePlan {
    pub(crate) ops: SmallVec<[PlanOp; 8]>,
    pub(crate) resolution: Resolution,
}

/// Compile a configuration against one frame's time snapshot.
///
/// Stage elision here is a performance requirement, not cosmetic: a skipped
/// stage (disabled lighting, zero weight, identity warp) costs nothing per
/// pixel instead of being computed with zero effect.
pub(crate) fn compile_frame(
    config: &PipelineConfig,
    time: f32,
    resolution: Resolution,
) -> PostfxResult<FramePlan> {
    if !time.is_finite() {
        return Err(PostfxError::validation("frame time must be finite"));
    }
    config.validate()?;

    let mut ops = SmallVec::new();
    for stage in &config.stages {
        match stage {
            Stage::Distortion(p) => {
                if p.is_identity() {
                    continue;
                }
                ops.push(PlanOp::Distort {
                    params: *p,
                    phase: time * p.time_scale,
                });
            }
            Stage::GodRays(p) => {
                if !config.lighting || p.samples == 0 || p.weight == 0.0 || p.exposure == 0.0 {
                    continue;
                }
                ops.push(PlanOp::Rays {
                    params: *p,
                    light_pos: light_position(time, p),
                });
            }
            Stage::Bloom(p) => {
                if p.weight == 0.0 {
                    continue;
                }
                ops.push(PlanOp::Bloom(*p));
            }
            Stage::ChromaticAberration(p) => {
                // Zero magnitude reduces to the plain base sample; not worth
                // three texture reads per pixel.
                if p.magnitude == 0.0 {
                    continue;
                }
                ops.push(PlanOp::Chroma {
                    offsets: channel_offsets(time, p),
                });
            }
            Stage::HueRotate(p) => {
                if p.mix == 0.0 {
                    continue;
                }
                ops.push(PlanOp::Hue {
                    params: *p,
                    base_hue: fract(time * p.speed),
                });
            }
            Stage::Scanline(p) => {
                if p.amplitude == 0.0 && p.base >= 1.0 {
                    continue;
                }
                ops.push(PlanOp::Scanline {
                    params: *p,
                    phase: time * p.scroll,
                });
            }
            Stage::ColorGrade(p) => ops.push(PlanOp::Grade(*p)),
            Stage::Vignette(p) => ops.push(PlanOp::Vignette(*p)),
        }
    }

    tracing::debug!(
        stages = config.stages.len(),
        ops = ops.len(),
        time,
        "compiled frame plan"
    );

    Ok(FramePlan { ops, resolution })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res() -> Resolution {
        Resolution::new(64, 64).unwrap()
    }

    #[test]
    fn lighting_toggle_drops_god_rays_before_dispatch() {
        let mut cfg = PipelineConfig::preset_rays();
        cfg.lighting = false;
        let plan = compile_frame(&cfg, 1.0, res()).unwrap();
        assert!(
            !plan
                .ops
                .iter()
                .any(|op| matches!(op, PlanOp::Rays { .. }))
        );
        // Other stages survive.
        assert!(plan.ops.iter().any(|op| matches!(op, PlanOp::Bloom(_))));
    }

    #[test]
    fn identity_distortion_is_elided() {
        let cfg = PipelineConfig {
            stages: vec![Stage::Distortion(DistortionParams {
                amplitude: 0.0,
                noise_amplitude: 0.0,
                ..DistortionParams::default()
            })],
            lighting: true,
        };
        let plan = compile_frame(&cfg, 0.0, res()).unwrap();
        assert!(plan.ops.is_empty());
    }

    #[test]
    fn zero_weight_stages_are_elided() {
        use crate::effects::chromatic::ChromaticAberrationParams;

        let cfg = PipelineConfig {
            stages: vec![
                Stage::Bloom(BloomParams {
                    weight: 0.0,
                    ..BloomParams::default()
                }),
                Stage::HueRotate(HueRotateParams {
                    mix: 0.0,
                    ..HueRotateParams::default()
                }),
                Stage::ChromaticAberration(ChromaticAberrationParams { magnitude: 0.0 }),
            ],
            lighting: true,
        };
        let plan = compile_frame(&cfg, 0.0, res()).unwrap();
        assert!(plan.ops.is_empty());
    }

    #[test]
    fn time_terms_are_snapshotted_once() {
        let cfg = PipelineConfig::preset_crt();
        let a = compile_frame(&cfg, 2.5, res()).unwrap();
        let b = compile_frame(&cfg, 2.5, res()).unwrap();
        assert_eq!(a.ops, b.ops);

        let later = compile_frame(&cfg, 3.5, res()).unwrap();
        assert_ne!(a.ops, later.ops);
    }

    #[test]
    fn non_finite_time_is_rejected() {
        let cfg = PipelineConfig::passthrough();
        assert!(compile_frame(&cfg, f32::NAN, res()).is_err());
        assert!(compile_frame(&cfg, f32::INFINITY, res()).is_err());
    }

    #[test]
    fn plan_preserves_stage_order() {
        let cfg = PipelineConfig::preset_crt();
        let plan = compile_frame(&cfg, 1.0, res()).unwrap();
        let kinds: Vec<&'static str> = plan
            .ops
            .iter()
            .map(|op| match op {
                PlanOp::Distort { .. } => "distort",
                PlanOp::Chroma { .. } => "chroma",
                PlanOp::Hue { .. } => "hue",
                PlanOp::Scanline { .. } => "scanline",
                PlanOp::Vignette(_) => "vignette",
                _ => "other",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["distort", "chroma", "hue", "scanline", "vignette"]
        );
    }
}
