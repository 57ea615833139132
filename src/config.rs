//! Data-driven pipeline configuration.
//!
//! A pipeline is an ordered list of tagged stages, each carrying its own
//! parameter record. The two built-in presets reproduce the project's two
//! original shader variants; any other subset/order is plain data.

use crate::effects::bloom::BloomParams;
use crate::effects::chromatic::ChromaticAberrationParams;
use crate::effects::distortion::DistortionParams;
use crate::effects::god_rays::GodRaysParams;
use crate::effects::grade::ColorGradeParams;
use crate::effects::hue::HueRotateParams;
use crate::effects::scanline::ScanlineParams;
use crate::effects::vignette::VignetteParams;
use crate::foundation::error::{PostfxError, PostfxResult};

/// One pipeline stage with its parameters.
///
/// The set is closed: the compositor knows how each variant consumes and
/// produces color. Order in the stage list is execution order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stage {
    /// Iterative UV warp; rewrites the sampling coordinate for later stages.
    Distortion(DistortionParams),
    /// Additive volumetric light shafts.
    GodRays(GodRaysParams),
    /// Additive glow around bright regions.
    Bloom(BloomParams),
    /// Per-channel misaligned base sampling.
    ChromaticAberration(ChromaticAberrationParams),
    /// Procedural hue sweep blended into the color.
    HueRotate(HueRotateParams),
    /// Multiplicative moving line mask.
    Scanline(ScanlineParams),
    /// Per-channel gamma/gain grade.
    ColorGrade(ColorGradeParams),
    /// Multiplicative radial edge darkening.
    Vignette(VignetteParams),
}

impl Stage {
    pub(crate) fn validate(&self) -> PostfxResult<()> {
        match self {
            Stage::Distortion(p) => p.validate(),
            Stage::GodRays(p) => p.validate(),
            Stage::Bloom(p) => p.validate(),
            Stage::ChromaticAberration(p) => p.validate(),
            Stage::HueRotate(p) => p.validate(),
            Stage::Scanline(p) => p.validate(),
            Stage::ColorGrade(p) => p.validate(),
            Stage::Vignette(p) => p.validate(),
        }
    }
}

/// Complete per-frame pipeline configuration.
///
/// Must stay fixed for the full duration of one frame's dispatch; swap whole
/// configs between frames instead of mutating mid-frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    /// Ordered stages to execute.
    pub stages: Vec<Stage>,
    /// Runtime light-shaft toggle: when `false`, god-ray stages are dropped
    /// before dispatch. Mirrors the game's live `environment.lighting`
    /// console switch.
    #[serde(default = "default_true")]
    pub lighting: bool,
}

fn default_true() -> bool {
    true
}

impl PipelineConfig {
    /// Ambience preset: god rays + bloom over the base scene, graded, with a
    /// vignette darkening the edges last so it masks the additive glow too.
    pub fn preset_rays() -> Self {
        Self {
            stages: vec![
                Stage::GodRays(GodRaysParams::default()),
                Stage::Bloom(BloomParams::default()),
                Stage::ColorGrade(ColorGradeParams::default()),
                Stage::Vignette(VignetteParams::default()),
            ],
            lighting: true,
        }
    }

    /// CRT preset: warped sampling, channel misalignment, a spatial hue
    /// sweep, scanlines and vignette.
    pub fn preset_crt() -> Self {
        Self {
            stages: vec![
                Stage::Distortion(DistortionParams::default()),
                Stage::ChromaticAberration(ChromaticAberrationParams::default()),
                Stage::HueRotate(HueRotateParams::default()),
                Stage::Scanline(ScanlineParams::default()),
                Stage::Vignette(VignetteParams::default()),
            ],
            lighting: true,
        }
    }

    /// Pass-through configuration (no stages).
    pub fn passthrough() -> Self {
        Self {
            stages: Vec::new(),
            lighting: true,
        }
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> PostfxResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| PostfxError::serde(format!("invalid pipeline config: {e}")))
    }

    /// Parse a configuration from a JSON reader (a config file, typically).
    pub fn from_json_reader(reader: impl std::io::Read) -> PostfxResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| PostfxError::serde(format!("invalid pipeline config: {e}")))
    }

    /// Validate every stage's parameters.
    pub fn validate(&self) -> PostfxResult<()> {
        for stage in &self.stages {
            stage.validate()?;
        }
        Ok(())
    }
}
