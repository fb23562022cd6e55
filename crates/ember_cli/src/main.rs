//! Ember command line renderer.
//!
//! Renders one of the built-in scenes and writes it as PPM (stdout or file)
//! or PNG.
//!
//! ```text
//! ember [--scene <name>] [--config <camera.json>] [--seed <u64>]
//!       [--bucket-size <px>] [output.ppm|output.png]
//! ```

mod output;
mod scenes;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ember_renderer::{render, BvhNode, Camera, CameraConfig, RenderSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scenes::ScenePreset;

/// ember: render a built-in scene with the CPU path tracer
#[derive(Parser, Debug)]
#[command(name = "ember", version, about)]
struct Cli {
    /// Scene preset to render
    #[arg(short, long, value_enum, default_value_t = ScenePreset::Earth)]
    scene: ScenePreset,

    /// JSON file whose fields override the preset's camera settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for every random choice made while building and rendering
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Edge length in pixels of the tiles rendered in parallel
    #[arg(long, default_value_t = ember_renderer::DEFAULT_BUCKET_SIZE,
          value_parser = clap::value_parser!(u32).range(1..))]
    bucket_size: u32,

    /// Output image (.ppm or .png); PPM goes to stdout when omitted
    output: Option<PathBuf>,
}

/// Overlay the fields present in a JSON document onto `base`.
fn overlay_config(base: &CameraConfig, overlay: serde_json::Value) -> Result<CameraConfig> {
    let serde_json::Value::Object(fields) = overlay else {
        bail!("Camera config must be a JSON object");
    };

    let mut merged = serde_json::to_value(base).context("Failed to serialize camera config")?;
    if let serde_json::Value::Object(target) = &mut merged {
        target.extend(fields);
    }

    serde_json::from_value(merged).context("Invalid camera config")
}

fn load_config(base: &CameraConfig, path: &Path) -> Result<CameraConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let overlay: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let config = overlay_config(base, overlay)?;
    log::info!("Applied camera overrides from {}", path.display());
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Cli::parse();
    log::info!("Starting Ember (scene {:?}, seed {})", args.scene, args.seed);

    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(args.seed);

    let scene = scenes::build(args.scene, &mut rng);
    let config = match &args.config {
        Some(path) => load_config(&scene.camera, path)?,
        None => scene.camera,
    };
    let camera = Camera::new(config).context("Invalid camera configuration")?;
    let world = BvhNode::from_list(scene.world, &mut rng).context("Failed to build BVH")?;
    log::info!("Scene ready in {:.2?}", start.elapsed());

    let settings = RenderSettings {
        seed: args.seed,
        bucket_size: args.bucket_size,
    };
    let render_start = Instant::now();
    let image = render(&camera, &world, &settings);
    log::info!("Render time: {:.2?}", render_start.elapsed());

    match &args.output {
        Some(path) => output::save(&image, path)?,
        None => output::write_stdout(&image)?,
    }

    log::info!("Total time: {:.2?}", start.elapsed());
    Ok(())
}
