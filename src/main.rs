#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use clap::Parser;

use landmass::app::LandmassApp;
use landmass::config::{Config, DEFAULT_CONFIG_PATH};
use landmass::error::AppError;
use landmass::world::World;

/// Height of the status bar below the map, in points.
const STATUS_BAR_HEIGHT: f32 = 24.0;

#[derive(Parser, Debug)]
#[command(name = "landmass")]
#[command(about = "Generate a procedural continent heightmap and explore it")]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Generation seed (overrides MAP_SEED from the config)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Ignore the heightmap cache and generate a new map
    #[arg(long)]
    regenerate: bool,

    /// Write the full-resolution color map to IMAGE_PATH
    #[arg(long)]
    export: bool,

    /// Do not open a window
    #[arg(long)]
    headless: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Args::parse()) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = Config::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    // A new seed means the cached map belongs to some other world
    let regenerate = args.regenerate || args.seed.is_some();
    let world = World::load_or_generate(&config, regenerate)?;

    if args.export {
        if let Err(err) = world.export_image(&config.image_path) {
            log::error!(
                "Failed to export map image {}: {err}",
                config.image_path.display()
            );
            if args.headless {
                return Err(err.into());
            }
        }
    }

    if args.headless {
        log::info!("Headless run finished");
        return Ok(());
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("The World")
            .with_inner_size([
                config.window_width as f32,
                config.window_height as f32 + STATUS_BAR_HEIGHT,
            ])
            .with_resizable(false),
        ..Default::default()
    };
    eframe::run_native(
        "The World",
        native_options,
        Box::new(move |cc| Ok(Box::new(LandmassApp::new(cc, &config, world)))),
    )?;
    Ok(())
}
