use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "postfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a post-processing pipeline to a PNG and write the result.
    Frame(FrameArgs),
    /// Print a pipeline configuration as JSON.
    DumpConfig(DumpConfigArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene PNG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Frame time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f32,

    /// Built-in preset to run.
    #[arg(long, value_enum, default_value_t = PresetChoice::Rays)]
    preset: PresetChoice,

    /// Pipeline configuration JSON (overrides --preset).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable the light-shaft stage for this frame.
    #[arg(long)]
    no_lighting: bool,

    /// Texture addressing for out-of-range sampling.
    #[arg(long, value_enum, default_value_t = AddressChoice::Clamp)]
    address: AddressChoice,

    /// Shade single-threaded instead of on a worker pool.
    #[arg(long)]
    serial: bool,

    /// Worker thread count (default: rayon's choice).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct DumpConfigArgs {
    /// Preset to dump.
    #[arg(long, value_enum, default_value_t = PresetChoice::Rays)]
    preset: PresetChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetChoice {
    /// God rays + bloom + grade + vignette.
    Rays,
    /// Distortion + chromatic aberration + hue + scanlines + vignette.
    Crt,
}

impl PresetChoice {
    fn config(self) -> postfx::PipelineConfig {
        match self {
            PresetChoice::Rays => postfx::PipelineConfig::preset_rays(),
            PresetChoice::Crt => postfx::PipelineConfig::preset_crt(),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AddressChoice {
    Clamp,
    Repeat,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::DumpConfig(args) => cmd_dump_config(args),
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<postfx::PipelineConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let config = postfx::PipelineConfig::from_json_reader(BufReader::new(f))
        .with_context(|| format!("load pipeline config '{}'", path.display()))?;
    Ok(config)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => read_config_json(path)?,
        None => args.preset.config(),
    };
    if args.no_lighting {
        config.lighting = false;
    }
    config.validate()?;

    let img = image::open(&args.in_path)
        .with_context(|| format!("open scene image '{}'", args.in_path.display()))?
        .to_rgba8();

    let address = match args.address {
        AddressChoice::Clamp => postfx::AddressMode::ClampToEdge,
        AddressChoice::Repeat => postfx::AddressMode::Repeat,
    };
    let tex = postfx::SceneTexture::from_image(&img)?.with_address_mode(address);

    let opts = postfx::RenderOpts {
        parallel: !args.serial,
        threads: args.threads,
    };
    let frame = postfx::render_frame_with_opts(&tex, &config, args.time, opts)?;

    let out = image::RgbaImage::from_raw(frame.width, frame.height, frame.data)
        .context("assemble output image")?;
    out.save(&args.out)
        .with_context(|| format!("write output PNG '{}'", args.out.display()))?;

    Ok(())
}

fn cmd_dump_config(args: DumpConfigArgs) -> anyhow::Result<()> {
    let config = args.preset.config();
    let json = serde_json::to_string_pretty(&config)?;
    println!("{json}");
    Ok(())
}
