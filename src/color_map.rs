use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::terrain::Heightmap;

/// 8-bit RGB triple, stored in config files as `[r, g, b]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn r(self) -> u8 {
        self.0[0]
    }

    pub fn g(self) -> u8 {
        self.0[1]
    }

    pub fn b(self) -> u8 {
        self.0[2]
    }
}

impl From<Rgb> for egui::Color32 {
    fn from(color: Rgb) -> Self {
        egui::Color32::from_rgb(color.r(), color.g(), color.b())
    }
}

pub type ColorGrid = Grid<Rgb>;

/// Maps normalized heights onto two discrete shade ramps.
///
/// Negative heights pick from the water ramp, everything else from the land
/// ramp. Both ramps run light to dark: index 0 is shallow water or low
/// ground, the last entry is deep water or high ground.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMapper {
    water: Vec<Rgb>,
    land: Vec<Rgb>,
}

impl ColorMapper {
    pub fn new(water: Vec<Rgb>, land: Vec<Rgb>) -> Result<Self, ConfigError> {
        if water.is_empty() || land.is_empty() {
            return Err(ConfigError::Invalid(
                "color ramps must each hold at least one shade".into(),
            ));
        }
        Ok(Self { water, land })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(config.blue_shades.clone(), config.green_shades.clone())
    }

    pub fn water(&self) -> &[Rgb] {
        &self.water
    }

    pub fn land(&self) -> &[Rgb] {
        &self.land
    }

    /// Color for a single height. `0.0` counts as land.
    pub fn colorize(&self, value: f32) -> Rgb {
        if value < 0.0 {
            pick(&self.water, -value)
        } else {
            pick(&self.land, value)
        }
    }

    pub fn colorize_grid(&self, heights: &Heightmap) -> ColorGrid {
        let (width, height) = heights.dimensions();
        let mut colors: ColorGrid = Grid::new(width, height);
        colors
            .data_mut()
            .par_iter_mut()
            .zip(heights.data().par_iter())
            .for_each(|(color, &value)| *color = self.colorize(value));
        colors
    }
}

fn pick(ramp: &[Rgb], t: f32) -> Rgb {
    // NaN clamps to NaN and casts to 0, the lightest shade
    let t = t.clamp(0.0, 1.0);
    let index = (t * (ramp.len() - 1) as f32).round() as usize;
    ramp[index.min(ramp.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> ColorMapper {
        let config = Config::default();
        ColorMapper::from_config(&config).unwrap()
    }

    #[test]
    fn test_boundary_values() {
        let mapper = mapper();
        assert_eq!(mapper.colorize(0.0), mapper.land()[0]);
        assert_eq!(mapper.colorize(1.0), *mapper.land().last().unwrap());
        assert_eq!(mapper.colorize(-1.0), *mapper.water().last().unwrap());
    }

    #[test]
    fn test_just_below_zero_is_shallow_water() {
        let mapper = mapper();
        assert_eq!(mapper.colorize(-0.01), mapper.water()[0]);
    }

    #[test]
    fn test_rounds_to_nearest_shade() {
        // Five shades: index = round(t * 4)
        let mapper = mapper();
        assert_eq!(mapper.colorize(0.3), mapper.land()[1]);
        assert_eq!(mapper.colorize(0.4), mapper.land()[2]);
        assert_eq!(mapper.colorize(-0.6), mapper.water()[2]);
        assert_eq!(mapper.colorize(-0.9), mapper.water()[4]);
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let mapper = mapper();
        assert_eq!(mapper.colorize(7.5), *mapper.land().last().unwrap());
        assert_eq!(mapper.colorize(-3.0), *mapper.water().last().unwrap());
    }

    #[test]
    fn test_single_shade_ramp() {
        let mapper = ColorMapper::new(vec![Rgb::new(0, 0, 255)], vec![Rgb::new(0, 255, 0)]).unwrap();
        assert_eq!(mapper.colorize(-0.5), Rgb::new(0, 0, 255));
        assert_eq!(mapper.colorize(0.99), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_empty_ramp_is_rejected() {
        let err = ColorMapper::new(vec![], vec![Rgb::new(0, 255, 0)]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_colorize_grid_matches_cells() {
        let mapper = mapper();
        let heights = Grid::from_vec(3, 1, vec![-1.0, 0.0, 1.0]).unwrap();
        let colors = mapper.colorize_grid(&heights);
        assert_eq!(colors.dimensions(), (3, 1));
        assert_eq!(
            colors.data(),
            &[
                *mapper.water().last().unwrap(),
                mapper.land()[0],
                *mapper.land().last().unwrap()
            ]
        );
    }

    #[test]
    fn test_rgb_deserializes_from_array() {
        let color: Rgb = serde_json::from_str("[10, 20, 30]").unwrap();
        assert_eq!(color, Rgb::new(10, 20, 30));
        assert_eq!(egui::Color32::from(color), egui::Color32::from_rgb(10, 20, 30));
    }
}
