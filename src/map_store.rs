//! Heightmap cache and PNG export.
//!
//! The cache is a pretty-printed JSON document `{"map": [[h, ...], ...]}`
//! holding one array per row, each value rounded to four decimal places.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

use crate::color_map::ColorGrid;
use crate::error::StoreError;
use crate::grid::Grid;
use crate::terrain::Heightmap;

/// Decimal places kept in the cache file.
pub const CACHE_PRECISION: i32 = 4;

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    map: Vec<Vec<f32>>,
}

fn round_to_precision(value: f32) -> f32 {
    let factor = 10f64.powi(CACHE_PRECISION);
    ((value as f64 * factor).round() / factor) as f32
}

fn create_parent_dir(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write `heights` to the JSON cache at `path`, creating parent directories.
pub fn save(path: &Path, heights: &Heightmap) -> Result<(), StoreError> {
    let cache = CacheFile {
        map: heights
            .rows()
            .map(|row| row.iter().copied().map(round_to_precision).collect())
            .collect(),
    };

    create_parent_dir(path)?;
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &cache)?;
    log::info!(
        "Saved {}x{} heightmap cache to {}",
        heights.width(),
        heights.height(),
        path.display()
    );
    Ok(())
}

/// Read a cached heightmap.
///
/// Returns `Ok(None)` when no cache file exists. A file that exists but does
/// not parse, whose rows do not form a `width` x `height` grid, or that holds
/// a value outside `[-1, 1]` is an error.
pub fn load(path: &Path, width: usize, height: usize) -> Result<Option<Heightmap>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let cache: CacheFile = serde_json::from_reader(BufReader::new(file))?;

    if cache.map.len() != height {
        return Err(StoreError::Shape(format!(
            "expected {height} rows, found {}",
            cache.map.len()
        )));
    }
    if let Some((y, row)) = cache.map.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(StoreError::Shape(format!(
            "row {y} has {} values, expected {width}",
            row.len()
        )));
    }

    // Numbers too large for f32 parse as infinity
    for (y, row) in cache.map.iter().enumerate() {
        if let Some(x) = row.iter().position(|h| !(-1.0..=1.0).contains(h)) {
            return Err(StoreError::Value(format!("{} at ({x}, {y})", row[x])));
        }
    }

    let data: Vec<f32> = cache.map.into_iter().flatten().collect();
    let heights = Grid::from_vec(width, height, data)
        .ok_or_else(|| StoreError::Shape(format!("cannot form a {width}x{height} grid")))?;
    Ok(Some(heights))
}

/// [`load`], with failures logged and treated as a cache miss.
pub fn load_or_warn(path: &Path, width: usize, height: usize) -> Option<Heightmap> {
    match load(path, width, height) {
        Ok(Some(heights)) => {
            log::info!("Loaded heightmap cache from {}", path.display());
            Some(heights)
        }
        Ok(None) => {
            log::info!("No heightmap cache at {}", path.display());
            None
        }
        Err(err) => {
            log::warn!(
                "Ignoring heightmap cache {}: {err}; regenerating",
                path.display()
            );
            None
        }
    }
}

/// Write the full-resolution color grid to `path` as an RGB PNG.
pub fn export_png(path: &Path, colors: &ColorGrid) -> Result<(), StoreError> {
    let (width, height) = colors.dimensions();
    let raw: Vec<u8> = colors.data().iter().flat_map(|color| color.0).collect();

    create_parent_dir(path)?;
    let writer = BufWriter::new(File::create(path)?);
    PngEncoder::new(writer).write_image(
        &raw,
        width as u32,
        height as u32,
        ExtendedColorType::Rgb8,
    )?;
    log::info!("Exported {width}x{height} map image to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_map::Rgb;
    use tempfile::tempdir;

    fn sample_heights() -> Heightmap {
        Grid::from_fn(7, 5, |x, y| ((x as f32 * 0.37) - (y as f32 * 0.21)).sin())
    }

    #[test]
    fn test_round_trip_within_precision() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.json");
        let heights = sample_heights();

        save(&path, &heights).unwrap();
        let loaded = load(&path, 7, 5).unwrap().expect("cache should exist");

        assert_eq!(loaded.dimensions(), heights.dimensions());
        for (a, b) in heights.data().iter().zip(loaded.data()) {
            assert!((a - b).abs() <= 0.5e-4 + 1e-6, "{a} vs {b}");
        }
    }

    #[test]
    fn test_cache_layout_is_rows_of_rounded_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("map.json");
        let heights = Grid::from_vec(2, 1, vec![0.123456f32, -1.0]).unwrap();

        save(&path, &heights).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let rows = json["map"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        let first = rows[0][0].as_f64().unwrap();
        assert!((first - 0.1235).abs() < 1e-6, "got {first}");
        assert_eq!(rows[0][1].as_f64().unwrap(), -1.0);
    }

    #[test]
    fn test_missing_cache_is_none() {
        let dir = tempdir().unwrap();
        assert!(load(&dir.path().join("absent.json"), 4, 4).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_cache_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.json");
        fs::write(&path, "{\"map\": [[0.1, 0.2],").unwrap();

        assert!(matches!(load(&path, 2, 1), Err(StoreError::Json(_))));
        assert!(load_or_warn(&path, 2, 1).is_none());
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.json");
        save(&path, &sample_heights()).unwrap();

        assert!(matches!(load(&path, 7, 6), Err(StoreError::Shape(_))));
        assert!(matches!(load(&path, 8, 5), Err(StoreError::Shape(_))));
        assert!(load_or_warn(&path, 7, 6).is_none());
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.json");

        fs::write(&path, "{\"map\": [[0.1, 1.5], [-0.2, 0.3]]}").unwrap();
        match load(&path, 2, 2) {
            Err(StoreError::Value(msg)) => assert!(msg.contains("(1, 0)"), "got: {msg}"),
            other => panic!("expected a value error, got {other:?}"),
        }
        assert!(load_or_warn(&path, 2, 2).is_none());

        fs::write(&path, "{\"map\": [[0.1, 0.2], [1e39, 0.3]]}").unwrap();
        assert!(matches!(load(&path, 2, 2), Err(StoreError::Value(_))));

        fs::write(&path, "{\"map\": [[-1.0, 1.0], [0.0, -0.5]]}").unwrap();
        assert!(load(&path, 2, 2).unwrap().is_some());
    }

    #[test]
    fn test_export_png_writes_colors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.png");
        let colors = Grid::from_fn(3, 2, |x, y| Rgb::new(x as u8 * 100, y as u8 * 100, 7));

        export_png(&path, &colors).unwrap();

        let image = image::open(&path).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [200, 100, 7]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 7]);
    }
}
