//! 打印地形生成的高度统计

use std::path::PathBuf;

use clap::Parser;

use landmass::config::{Config, DEFAULT_CONFIG_PATH};
use landmass::error::ConfigError;
use landmass::terrain::generate_terrain;

#[derive(Parser, Debug)]
#[command(name = "check_heights")]
#[command(about = "Print height and land statistics for a generated map")]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Generation seed (overrides MAP_SEED from the config)
    #[arg(short, long)]
    seed: Option<u32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(Args::parse()) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), ConfigError> {
    let mut config = Config::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let terrain = generate_terrain(&config, config.seed);
    let heights = terrain.heightmap.data();
    let total = heights.len().max(1) as f32;

    let min = heights.iter().copied().fold(f32::INFINITY, f32::min);
    let max = heights.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let avg = heights.iter().sum::<f32>() / total;

    let land = heights.iter().filter(|&&h| h >= 0.0).count();
    let sea = heights.len() - land;
    let mask_land = terrain.mask.data().iter().filter(|&&cell| cell).count();

    println!("Height stats ({}x{}, seed {}):", config.map_width, config.map_height, config.seed);
    println!("  Min: {:.4}", min);
    println!("  Max: {:.4}", max);
    println!("  Avg: {:.4}", avg);
    println!("  Land cells (h>=0): {} ({:.1}%)", land, land as f32 * 100.0 / total);
    println!("  Sea cells (h<0): {} ({:.1}%)", sea, sea as f32 * 100.0 / total);
    println!("  Mask land cells: {} ({:.1}%)", mask_land, mask_land as f32 * 100.0 / total);
    Ok(())
}
