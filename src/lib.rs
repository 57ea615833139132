//! Postfx is a real-time CPU post-processing pipeline for rendered frames.
//!
//! The crate takes one fully-composited scene texture plus per-frame scalars
//! (elapsed time, output resolution) and applies a chained, time-varying,
//! per-pixel effect pipeline: UV distortion, god rays, bloom, chromatic
//! aberration, hue sweep, scanlines, color grading and vignette.
//!
//! - Describe the pipeline as an ordered [`PipelineConfig`] of [`Stage`]s
//!   (or start from a preset)
//! - Wrap the frame's pixels in a [`SceneTexture`]
//! - Call [`render_frame`] once per frame
//!
//! Every stage is a pure function of (coordinate, time, texture, parameters);
//! time-dependent terms are snapshotted once per frame, so pixel shading is
//! embarrassingly parallel and serial/parallel dispatch are byte-identical.
#![forbid(unsafe_code)]

mod foundation;
mod plan;

pub mod config;
pub mod effects;
pub mod noise;
pub mod render;
pub mod texture;

pub use crate::config::{PipelineConfig, Stage};
pub use crate::foundation::core::{FrameRgba, Resolution, Rgb};
pub use crate::foundation::error::{PostfxError, PostfxResult};
pub use crate::foundation::math::Vec2;
pub use crate::render::{RenderOpts, render_frame, render_frame_with_opts};
pub use crate::texture::{AddressMode, SceneTexture};

pub use crate::effects::bloom::BloomParams;
pub use crate::effects::chromatic::ChromaticAberrationParams;
pub use crate::effects::distortion::DistortionParams;
pub use crate::effects::god_rays::GodRaysParams;
pub use crate::effects::grade::ColorGradeParams;
pub use crate::effects::hue::HueRotateParams;
pub use crate::effects::scanline::ScanlineParams;
pub use crate::effects::vignette::VignetteParams;
