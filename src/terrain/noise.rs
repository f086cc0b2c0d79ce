use noise::{Fbm, MultiFractal, NoiseFn, Simplex};
use serde::{Deserialize, Serialize};

/// Offset between the x and y warp samples, so the two displacement
/// components come from uncorrelated regions of the same noise field.
const WARP_AXIS_OFFSET: f64 = 100.0;

/// fBm parameters for the height noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    pub seed: u32,

    /// Cells per unit of noise space. Larger values give broader features.
    pub scale: f64,

    /// Layers summed by the fBm; clamped to what the backend supports.
    pub octaves: usize,

    /// Amplitude ratio between successive octaves.
    pub persistence: f64,

    /// Frequency ratio between successive octaves.
    pub lacunarity: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            scale: 100.0,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl NoiseConfig {
    pub fn new(seed: u32, scale: f64, octaves: usize, persistence: f64, lacunarity: f64) -> Self {
        Self {
            seed,
            scale,
            octaves,
            persistence,
            lacunarity,
        }
    }
}

/// Multi-octave simplex noise (fractional Brownian motion) sampled on grid
/// coordinates.
pub struct NoiseField {
    fbm: Fbm<Simplex>,
    scale: f64,
}

impl NoiseField {
    pub fn new(config: &NoiseConfig) -> Self {
        // set_octaves rebuilds the per-octave sources and clamps to what the
        // backend supports; assigning the field directly would not.
        let fbm = Fbm::<Simplex>::new(config.seed)
            .set_frequency(1.0)
            .set_octaves(config.octaves.clamp(1, Fbm::<Simplex>::MAX_OCTAVES))
            .set_persistence(config.persistence)
            .set_lacunarity(config.lacunarity);

        Self {
            fbm,
            scale: config.scale,
        }
    }

    /// Raw noise at grid cell `(col, row)`, roughly in `[-1, 1]`.
    pub fn sample(&self, col: f64, row: f64) -> f64 {
        self.fbm.get([col / self.scale, row / self.scale])
    }

    /// Noise at `(col, row)` remapped to `[0, 1]`.
    pub fn sample_unit(&self, col: f64, row: f64) -> f64 {
        ((self.sample(col, row) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Single-octave simplex field used to displace mask lookups.
pub struct WarpField {
    simplex: Simplex,
    frequency: f64,
}

impl WarpField {
    pub fn new(seed: u32, frequency: f64) -> Self {
        Self {
            simplex: Simplex::new(seed),
            frequency,
        }
    }

    /// Displacement `(dx, dy)`, roughly in `[-1, 1]`, for a point given in unit
    /// coordinates (`col / width`, `row / height`).
    pub fn offset(&self, u: f64, v: f64) -> (f64, f64) {
        let nx = u * self.frequency;
        let ny = v * self.frequency;
        let dx = self.simplex.get([nx, ny]);
        let dy = self
            .simplex
            .get([nx + WARP_AXIS_OFFSET, ny + WARP_AXIS_OFFSET]);
        (dx, dy)
    }
}
