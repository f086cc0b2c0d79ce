use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color_map::Rgb;
use crate::error::ConfigError;
use crate::terrain::NoiseConfig;

pub const DEFAULT_SEED: u32 = 42;
pub const DEFAULT_CONFIG_PATH: &str = "res/config.json";
pub const DEFAULT_CACHE_PATH: &str = "res/map.json";
pub const DEFAULT_IMAGE_PATH: &str = "res/map.png";

/// River tuning values.
///
/// Parsed so existing config files load unchanged; nothing in the generation
/// pipeline reads them yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiverConfig {
    #[serde(rename = "RIVER_MIN_PROXIMITY", default)]
    pub min_proximity: Option<f64>,
    #[serde(rename = "RIVER_MIN_LENGTH", default)]
    pub min_length: Option<f64>,
    #[serde(rename = "RIVER_MAX_LENGTH", default)]
    pub max_length: Option<f64>,
    #[serde(rename = "RIVER_MAX_BRANCHES", default)]
    pub max_branches: Option<u32>,
    #[serde(rename = "RIVER_START_HEIGHT_THRESHOLD", default)]
    pub start_height_threshold: Option<f64>,
    #[serde(rename = "RIVER_SEA_LEVEL", default)]
    pub sea_level: Option<f64>,
    #[serde(rename = "RIVER_MAX_ATTEMPTS", default)]
    pub max_attempts: Option<u32>,
}

/// Everything the generator and the viewer need, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "MAP_WIDTH")]
    pub map_width: usize,
    #[serde(rename = "MAP_HEIGHT")]
    pub map_height: usize,
    #[serde(rename = "WINDOW_WIDTH")]
    pub window_width: usize,
    #[serde(rename = "WINDOW_HEIGHT")]
    pub window_height: usize,
    #[serde(rename = "MAP_BLOCK_SIZE")]
    pub block_size: usize,

    #[serde(rename = "MAP_NUM_ELLIPSES")]
    pub num_ellipses: usize,
    #[serde(rename = "MAP_WARP_FREQUENCY")]
    pub warp_frequency: f64,
    // Older config files carry the misspelled key.
    #[serde(rename = "MAP_WARP_MAGNITUDE", alias = "MAP_WARM_MAGNITUDE")]
    pub warp_magnitude: f64,

    #[serde(rename = "NOISE_SCALE")]
    pub noise_scale: f64,
    #[serde(rename = "NOISE_OCTAVES")]
    pub noise_octaves: usize,
    #[serde(rename = "NOISE_PERSISTENCE")]
    pub noise_persistence: f64,
    #[serde(rename = "NOISE_LACUNARITY")]
    pub noise_lacunarity: f64,

    /// Land ramp, lowest ground first.
    #[serde(rename = "COLORS_GREEN_SHADES")]
    pub green_shades: Vec<Rgb>,
    /// Water ramp, shallowest water first.
    #[serde(rename = "COLORS_BLUE_SHADES")]
    pub blue_shades: Vec<Rgb>,

    #[serde(flatten)]
    pub rivers: RiverConfig,

    #[serde(rename = "MAP_SEED", default = "default_seed")]
    pub seed: u32,
    #[serde(rename = "CACHE_PATH", default = "default_cache_path")]
    pub cache_path: PathBuf,
    #[serde(rename = "IMAGE_PATH", default = "default_image_path")]
    pub image_path: PathBuf,
}

fn default_seed() -> u32 {
    DEFAULT_SEED
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_image_path() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGE_PATH)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map_width: 1000,
            map_height: 1000,
            window_width: 1000,
            window_height: 1000,
            block_size: 1,
            num_ellipses: 10,
            warp_frequency: 5.0,
            warp_magnitude: 20.0,
            noise_scale: 100.0,
            noise_octaves: 6,
            noise_persistence: 0.5,
            noise_lacunarity: 2.0,
            green_shades: vec![
                Rgb([144, 238, 144]),
                Rgb([124, 205, 124]),
                Rgb([34, 139, 34]),
                Rgb([0, 128, 0]),
                Rgb([0, 100, 0]),
            ],
            blue_shades: vec![
                Rgb([173, 216, 230]),
                Rgb([100, 149, 237]),
                Rgb([65, 105, 225]),
                Rgb([0, 0, 205]),
                Rgb([0, 0, 139]),
            ],
            rivers: RiverConfig::default(),
            seed: DEFAULT_SEED,
            cache_path: default_cache_path(),
            image_path: default_image_path(),
        }
    }
}

impl Config {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&contents)?;
        log::info!(
            "Loaded config from {}: {}x{} map, {}x{} window",
            path.as_ref().display(),
            config.map_width,
            config.map_height,
            config.window_width,
            config.window_height
        );
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width == 0 || self.map_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "map must be at least 1x1, got {}x{}",
                self.map_width, self.map_height
            )));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window must be at least 1x1, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if self.block_size == 0 {
            return Err(ConfigError::Invalid("MAP_BLOCK_SIZE must be >= 1".into()));
        }
        if !(self.noise_scale.is_finite() && self.noise_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "NOISE_SCALE must be positive, got {}",
                self.noise_scale
            )));
        }
        if self.noise_octaves == 0 {
            return Err(ConfigError::Invalid("NOISE_OCTAVES must be >= 1".into()));
        }
        if !self.warp_frequency.is_finite() || !self.warp_magnitude.is_finite() {
            return Err(ConfigError::Invalid(
                "warp frequency and magnitude must be finite".into(),
            ));
        }
        if self.green_shades.is_empty() {
            return Err(ConfigError::Invalid("COLORS_GREEN_SHADES is empty".into()));
        }
        if self.blue_shades.is_empty() {
            return Err(ConfigError::Invalid("COLORS_BLUE_SHADES is empty".into()));
        }
        Ok(())
    }

    pub fn noise_config(&self, seed: u32) -> NoiseConfig {
        NoiseConfig::new(
            seed,
            self.noise_scale,
            self.noise_octaves,
            self.noise_persistence,
            self.noise_lacunarity,
        )
    }
}
