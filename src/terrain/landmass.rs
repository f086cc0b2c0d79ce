//! Binary land/water mask synthesis.
//!
//! Continents start as a union of randomly placed, rotated ellipses in a
//! normalized `[-1, 1]²` space. Two passes of domain warping then tear the
//! smooth outlines into irregular coastlines.

use std::f64::consts::TAU;

use rand::Rng;

use super::noise::WarpField;
use crate::config::Config;
use crate::grid::Grid;

/// Land/water mask; `true` is land.
pub type Mask = Grid<bool>;

/// Number of warp passes applied after the ellipses are placed.
pub const WARP_PASSES: usize = 2;

const CENTER_RANGE: std::ops::RangeInclusive<f64> = -0.5..=0.5;
const SEMI_AXIS_RANGE: std::ops::RangeInclusive<f64> = 0.1..=0.6;

/// A rotated ellipse in normalized map space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center_x: f64,
    pub center_y: f64,
    pub semi_x: f64,
    pub semi_y: f64,
    pub rotation: f64,
}

impl Ellipse {
    /// Draw a random ellipse. Centers stay within the middle half of the map
    /// so continents rarely touch the border.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self {
            center_x: rng.random_range(CENTER_RANGE),
            center_y: rng.random_range(CENTER_RANGE),
            semi_x: rng.random_range(SEMI_AXIS_RANGE),
            semi_y: rng.random_range(SEMI_AXIS_RANGE),
            rotation: rng.random_range(0.0..TAU),
        }
    }

    /// Whether the normalized point `(x, y)` lies inside or on the ellipse.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (sin_r, cos_r) = self.rotation.sin_cos();
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        let ex = cos_r * dx + sin_r * dy;
        let ey = -sin_r * dx + cos_r * dy;
        (ex / self.semi_x).powi(2) + (ey / self.semi_y).powi(2) <= 1.0
    }
}

/// Map a cell index onto `[-1, 1)` along an axis of length `len`.
fn normalized(index: usize, len: usize) -> f64 {
    index as f64 / len as f64 * 2.0 - 1.0
}

/// Builds continent masks from the config's ellipse and warp settings.
pub struct LandmassGenerator {
    width: usize,
    height: usize,
    num_ellipses: usize,
    warp_frequency: f64,
    warp_magnitude: f64,
}

impl LandmassGenerator {
    pub fn new(config: &Config) -> Self {
        Self {
            width: config.map_width,
            height: config.map_height,
            num_ellipses: config.num_ellipses,
            warp_frequency: config.warp_frequency,
            warp_magnitude: config.warp_magnitude,
        }
    }

    /// Full pipeline: ellipses, then [`WARP_PASSES`] warp passes.
    ///
    /// The warp noise seed is the first draw from `rng`, so the displacement
    /// field does not depend on the ellipse count. With a fixed seed, adding
    /// ellipses therefore only adds land, even after warping.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Mask {
        let warp = WarpField::new(rng.random(), self.warp_frequency);
        let ellipses: Vec<Ellipse> = (0..self.num_ellipses)
            .map(|_| Ellipse::sample(&mut *rng))
            .collect();
        let mut mask = self.spawn_ellipses(&ellipses);

        for _ in 0..WARP_PASSES {
            mask = self.warp(&mask, &warp);
        }

        let land = mask.data().iter().filter(|&&cell| cell).count();
        log::debug!(
            "Landmass: {} ellipses, {} of {} cells are land",
            ellipses.len(),
            land,
            mask.len()
        );
        mask
    }

    /// Rasterize the union of `ellipses` onto an all-water mask.
    pub fn spawn_ellipses(&self, ellipses: &[Ellipse]) -> Mask {
        Grid::from_fn(self.width, self.height, |col, row| {
            let x = normalized(col, self.width);
            let y = normalized(row, self.height);
            ellipses.iter().any(|ellipse| ellipse.contains(x, y))
        })
    }

    /// One domain-warp pass driven by `field`.
    pub fn warp(&self, source: &Mask, field: &WarpField) -> Mask {
        self.warp_by(source, |u, v| field.offset(u, v))
    }

    /// One domain-warp pass with an arbitrary displacement function of the
    /// cell's unit coordinates.
    ///
    /// Every lookup reads from `source`, never from cells already rewritten
    /// in this pass. Displaced positions outside the grid keep the cell's
    /// current value.
    pub fn warp_by(&self, source: &Mask, offset: impl Fn(f64, f64) -> (f64, f64)) -> Mask {
        let (width, height) = source.dimensions();
        Grid::from_fn(width, height, |col, row| {
            let (dx, dy) = offset(col as f64 / width as f64, row as f64 / height as f64);
            let wx = (col as f64 + dx * self.warp_magnitude).floor() as isize;
            let wy = (row as f64 + dy * self.warp_magnitude).floor() as isize;
            if source.in_bounds(wx, wy) {
                *source.get(wx as usize, wy as usize)
            } else {
                *source.get(col, row)
            }
        })
    }
}
