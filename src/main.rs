//! Carousel engine headless host.
//!
//! Drives the gallery animation core without a browser:
//! - **bevy_ecs** for the per-frame schedule
//! - scripted pointer input instead of a mouse
//! - a recording sink instead of CSS custom properties
//!
//! # Main Loop
//!
//! 1. Load `gallery.ini` (or `--config`), apply command-line overrides
//! 2. Pick placeholder image URLs and random captions
//! 3. Build the scene: ring, slide tilts, intro
//! 4. Run `--frames` frames at the configured rate, logging once per second
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 600
//! ```

use carouselengine::game;
use carouselengine::resources::galleryconfig::GalleryConfig;
use carouselengine::resources::imagesource::PlaceholderSource;
use carouselengine::systems::imageloader::{FallbackPolicy, load_images};
use clap::Parser;
use std::path::PathBuf;

/// Headless host of the dog gallery animation core.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = "./gallery.ini")]
    config: PathBuf,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Override the simulated refresh rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Override the ring background offset (percent).
    #[arg(long)]
    offset: Option<f32>,

    /// Seed for caption selection.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GalleryConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::info!("{}, using defaults", e);
    }
    if let Some(fps) = cli.fps {
        config.target_fps = fps.max(1);
    }
    if let Some(offset) = cli.offset {
        config.ring.offset = offset;
    }

    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Configuration written to {}", config.config_path.display());
        return;
    }

    let urls = load_images(
        &PlaceholderSource,
        config.image_count as usize,
        FallbackPolicy::Placeholders,
    );

    let mut world = game::build_world(config, urls, cli.seed);
    let mut schedule = game::build_schedule();
    game::run(&mut world, &mut schedule, cli.frames);
}
