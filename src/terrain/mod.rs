// 地形生成模块

pub mod distance;
pub mod heightmap;
pub mod landmass;
pub mod noise;

pub use self::distance::*;
pub use self::heightmap::*;
pub use self::landmass::*;
pub use self::noise::*;

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::Config;

/// Output of a full generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    pub mask: Mask,
    pub heightmap: Heightmap,
}

/// Run the whole pipeline for `seed`: landmass mask, coastline distance,
/// noise, normalization.
///
/// The RNG is created here from `seed` and threaded through explicitly, so
/// two calls with the same config and seed return identical terrain.
pub fn generate_terrain(config: &Config, seed: u32) -> Terrain {
    let started = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);

    let mask = LandmassGenerator::new(config).generate(&mut rng);
    let land = mask.data().iter().filter(|&&cell| cell).count();
    log::info!(
        "Landmass mask: {} of {} cells are land ({:.1}%)",
        land,
        mask.len(),
        100.0 * land as f64 / mask.len().max(1) as f64
    );

    let heightmap = HeightmapGenerator::new(config).generate(seed, &mask);
    log::info!(
        "Generated {}x{} heightmap with seed {} in {:.2?}",
        heightmap.width(),
        heightmap.height(),
        seed,
        started.elapsed()
    );

    Terrain { mask, heightmap }
}
