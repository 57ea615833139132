//! Frame rendering: plan compilation plus serial or row-parallel dispatch.

use rayon::prelude::*;

use crate::config::PipelineConfig;
use crate::effects::{bloom, chromatic, distortion, god_rays, grade, hue, scanline, vignette};
use crate::foundation::core::{FrameRgba, Rgb};
use crate::foundation::error::{PostfxError, PostfxResult};
use crate::foundation::math::Vec2;
use crate::plan::{FramePlan, PlanOp, compile_frame};
use crate::texture::SceneTexture;

/// Threading controls for frame rendering.
#[derive(Clone, Copy, Debug)]
pub struct RenderOpts {
    /// Shade rows on a rayon pool when `true`; single-threaded otherwise.
    /// Output is byte-identical either way.
    pub parallel: bool,
    /// Optional explicit worker thread count. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

/// Render one frame with default threading.
///
/// `time` is seconds since pipeline start, monotonically increasing across a
/// shot; it is snapshotted into the frame plan before any pixel work starts.
pub fn render_frame(
    tex: &SceneTexture,
    config: &PipelineConfig,
    time: f32,
) -> PostfxResult<FrameRgba> {
    render_frame_with_opts(tex, config, time, RenderOpts::default())
}

/// Render one frame with explicit threading controls.
#[tracing::instrument(skip(tex, config), fields(width = tex.resolution().width, height = tex.resolution().height))]
pub fn render_frame_with_opts(
    tex: &SceneTexture,
    config: &PipelineConfig,
    time: f32,
    opts: RenderOpts,
) -> PostfxResult<FrameRgba> {
    let resolution = tex.resolution();
    let plan = compile_frame(config, time, resolution)?;

    let width = resolution.width as usize;
    let height = resolution.height as usize;
    let row_bytes = width * 4;
    let mut data = vec![0u8; row_bytes * height];

    if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            data.par_chunks_mut(row_bytes)
                .enumerate()
                .for_each(|(y, row)| shade_row(tex, &plan, y, row));
        });
    } else {
        for (y, row) in data.chunks_mut(row_bytes).enumerate() {
            shade_row(tex, &plan, y, row);
        }
    }

    Ok(FrameRgba {
        width: resolution.width,
        height: resolution.height,
        data,
    })
}

fn build_thread_pool(threads: Option<usize>) -> PostfxResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PostfxError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn shade_row(tex: &SceneTexture, plan: &FramePlan, y: usize, row: &mut [u8]) {
    let width = plan.resolution.width as f32;
    let height = plan.resolution.height as f32;
    let v = (y as f32 + 0.5) / height;

    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        let uv = Vec2::new((x as f32 + 0.5) / width, v);
        px.copy_from_slice(&shade_pixel(tex, plan, uv).to_rgba8());
    }
}

/// Shade one pixel: a pure function of the frame plan, the base texture and
/// the fragment coordinate.
///
/// `coord` is the sampling coordinate, rewritten by distortion ops; masks and
/// the hue sweep's spatial term stay on the raw fragment `uv` so screen-space
/// patterns are not warped with the image.
fn shade_pixel(tex: &SceneTexture, plan: &FramePlan, uv: Vec2) -> Rgb {
    let mut coord = uv;
    let mut color: Option<Rgb> = None;

    for op in &plan.ops {
        match op {
            PlanOp::Distort { params, phase } => {
                coord = distortion::warp(coord, *phase, params);
            }
            PlanOp::Chroma { offsets } => {
                color = Some(chromatic::sample(tex, coord, offsets));
            }
            PlanOp::Hue { params, base_hue } => {
                let c = color.get_or_insert_with(|| tex.sample(coord));
                *c = c.mix(hue::hue_color(uv, *base_hue, params), params.mix);
            }
            PlanOp::Rays { params, light_pos } => {
                let rays = god_rays::accumulate(tex, coord, *light_pos, params);
                let c = color.get_or_insert_with(|| tex.sample(coord));
                *c = c.add(Rgb::splat(rays));
            }
            PlanOp::Bloom(params) => {
                let g = bloom::glow(tex, coord, params) * params.weight;
                let c = color.get_or_insert_with(|| tex.sample(coord));
                *c = c.add(Rgb::splat(g));
            }
            PlanOp::Grade(params) => {
                let c = color.get_or_insert_with(|| tex.sample(coord));
                *c = grade::apply(*c, params);
            }
            PlanOp::Scanline { params, phase } => {
                let c = color.get_or_insert_with(|| tex.sample(coord));
                *c = c.scale(scanline::mask(uv, *phase, params));
            }
            PlanOp::Vignette(params) => {
                let c = color.get_or_insert_with(|| tex.sample(coord));
                *c = c.scale(vignette::mask(uv, params));
            }
        }
    }

    color.unwrap_or_else(|| tex.sample(coord))
}
