use std::path::Path;

use crate::color_map::{ColorGrid, ColorMapper, Rgb};
use crate::config::Config;
use crate::error::{ConfigError, StoreError, ViewportError};
use crate::map_store;
use crate::terrain::{generate_terrain, Heightmap};

/// Where the session's heightmap came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldSource {
    Cache,
    Generated,
}

/// The heightmap and its color grid for one session.
///
/// Both are built once and never change afterwards, so their dimensions stay
/// equal for the lifetime of the world.
#[derive(Debug, Clone)]
pub struct World {
    heightmap: Heightmap,
    colors: ColorGrid,
    source: WorldSource,
}

impl World {
    pub fn from_heightmap(heightmap: Heightmap, mapper: &ColorMapper, source: WorldSource) -> Self {
        let colors = mapper.colorize_grid(&heightmap);
        Self {
            heightmap,
            colors,
            source,
        }
    }

    /// Generate a fresh world for `config.seed`, ignoring any cache.
    pub fn generate(config: &Config) -> Result<Self, ConfigError> {
        let mapper = ColorMapper::from_config(config)?;
        let terrain = generate_terrain(config, config.seed);
        Ok(Self::from_heightmap(
            terrain.heightmap,
            &mapper,
            WorldSource::Generated,
        ))
    }

    /// Load the cached heightmap when it exists and fits the configured map,
    /// otherwise generate one and write it to the cache.
    ///
    /// A failed cache write is logged; the generated world is still returned.
    pub fn load_or_generate(config: &Config, regenerate: bool) -> Result<Self, ConfigError> {
        let mapper = ColorMapper::from_config(config)?;

        if !regenerate {
            if let Some(heightmap) =
                map_store::load_or_warn(&config.cache_path, config.map_width, config.map_height)
            {
                return Ok(Self::from_heightmap(heightmap, &mapper, WorldSource::Cache));
            }
        }

        let terrain = generate_terrain(config, config.seed);
        if let Err(err) = map_store::save(&config.cache_path, &terrain.heightmap) {
            log::error!(
                "Failed to write heightmap cache {}: {err}",
                config.cache_path.display()
            );
        }
        Ok(Self::from_heightmap(
            terrain.heightmap,
            &mapper,
            WorldSource::Generated,
        ))
    }

    pub fn width(&self) -> usize {
        self.heightmap.width()
    }

    pub fn height(&self) -> usize {
        self.heightmap.height()
    }

    pub fn heightmap(&self) -> &Heightmap {
        &self.heightmap
    }

    pub fn colors(&self) -> &ColorGrid {
        &self.colors
    }

    pub fn source(&self) -> WorldSource {
        self.source
    }

    /// Rows of the color grid covering `[start_x, end_x) x [start_y, end_y)`.
    pub fn color_window(
        &self,
        start_x: usize,
        start_y: usize,
        end_x: usize,
        end_y: usize,
    ) -> Result<Vec<&[Rgb]>, ViewportError> {
        let (width, height) = self.colors.dimensions();
        if end_x > width || end_y > height {
            return Err(ViewportError::OutOfBounds {
                start_x,
                start_y,
                end_x,
                end_y,
                width,
                height,
            });
        }
        if start_x >= end_x || start_y >= end_y {
            return Err(ViewportError::Inverted {
                start_x,
                start_y,
                end_x,
                end_y,
            });
        }

        Ok((start_y..end_y)
            .map(|y| &self.colors.row(y)[start_x..end_x])
            .collect())
    }

    pub fn export_image(&self, path: &Path) -> Result<(), StoreError> {
        map_store::export_png(path, &self.colors)
    }
}
