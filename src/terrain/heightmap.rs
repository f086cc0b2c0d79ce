//! Heightmap synthesis: coherent noise biased by the coastline distance
//! field, then stretched to exactly `[-1, 1]`.

use rayon::prelude::*;

use super::distance::signed_distance;
use super::landmass::Mask;
use super::noise::{NoiseConfig, NoiseField};
use crate::config::Config;
use crate::grid::Grid;

/// Normalized terrain elevation; negative is below sea level.
pub type Heightmap = Grid<f32>;

/// Weight of the coastline term. Above 1 so the distance field dominates the
/// noise and land never dips below water right at the coast.
pub const COAST_WEIGHT: f32 = 1.1;

/// Combines noise with a landmass mask into a heightmap.
pub struct HeightmapGenerator {
    noise: NoiseConfig,
}

impl HeightmapGenerator {
    pub fn new(config: &Config) -> Self {
        Self {
            noise: config.noise_config(config.seed),
        }
    }

    pub fn from_noise_config(noise: NoiseConfig) -> Self {
        Self { noise }
    }

    /// Build the heightmap for `mask`, seeding the noise with `seed`.
    ///
    /// Every cell gets `noise(col / scale, row / scale) + 1.1 * distance`,
    /// then the whole grid is rescaled once so its minimum is -1 and its
    /// maximum is 1. A perfectly flat result becomes all zeros.
    pub fn generate(&self, seed: u32, mask: &Mask) -> Heightmap {
        let (width, height) = mask.dimensions();
        let distance = signed_distance(mask);
        let noise = NoiseField::new(&NoiseConfig {
            seed,
            ..self.noise.clone()
        });

        let mut heights: Heightmap = Grid::new(width, height);
        heights
            .data_mut()
            .par_chunks_mut(width)
            .zip(distance.data().par_chunks(width))
            .enumerate()
            .for_each(|(row, (cells, coast))| {
                for (col, (cell, &d)) in cells.iter_mut().zip(coast).enumerate() {
                    let raw = noise.sample(col as f64, row as f64) as f32;
                    *cell = raw + COAST_WEIGHT * d;
                }
            });

        if let Some((min, max)) = heights.min_max() {
            log::debug!("Raw height range before normalization: {min:.4}..{max:.4}");
        }
        heights.normalize_mut(-1.0, 1.0, 0.0);
        heights
    }
}
