//! Signed distance-to-coastline field.
//!
//! Uses the exact Euclidean distance transform of Felzenszwalb and
//! Huttenlocher: a 1D lower-envelope-of-parabolas pass over every column,
//! then over every row of the intermediate result.

use rayon::prelude::*;

use super::landmass::Mask;
use crate::grid::Grid;

/// Stand-in for "no feature on this line yet". Large enough to never win a
/// comparison, small enough that the envelope arithmetic stays finite.
const FAR: f64 = 1.0e20;

/// Squared 1D distance transform of `f` into `out`.
///
/// `f[i]` is 0 at feature cells and [`FAR`] elsewhere (or the output of a
/// previous pass). `v` and `z` are scratch buffers of length `n` and `n + 1`.
fn transform_1d(f: &[f64], out: &mut [f64], v: &mut [usize], z: &mut [f64]) {
    let n = f.len();
    if n == 0 {
        return;
    }

    let mut k = 0usize;
    v[0] = 0;
    z[0] = f64::NEG_INFINITY;
    z[1] = f64::INFINITY;

    for q in 1..n {
        let qf = q as f64;
        let mut s;
        loop {
            let p = v[k] as f64;
            s = ((f[q] + qf * qf) - (f[v[k]] + p * p)) / (2.0 * qf - 2.0 * p);
            if s <= z[k] {
                // z[0] is -inf, so this never underflows
                k -= 1;
            } else {
                break;
            }
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f64::INFINITY;
    }

    k = 0;
    for (q, slot) in out.iter_mut().enumerate() {
        let qf = q as f64;
        while z[k + 1] < qf {
            k += 1;
        }
        let p = v[k] as f64;
        *slot = (qf - p) * (qf - p) + f[v[k]];
    }
}

/// Euclidean distance from every cell to the nearest cell whose mask value
/// equals `target`. Cells equal to `target` get 0.
///
/// If no cell matches `target` every distance is 0; there is nothing to
/// measure against.
pub fn distance_to(mask: &Mask, target: bool) -> Grid<f32> {
    let (width, height) = mask.dimensions();
    if !mask.data().iter().any(|&cell| cell == target) {
        return Grid::new(width, height);
    }

    let mut squared: Vec<f64> = mask
        .data()
        .iter()
        .map(|&cell| if cell == target { 0.0 } else { FAR })
        .collect();

    // Columns
    let mut column = vec![0.0; height];
    let mut column_out = vec![0.0; height];
    let mut v = vec![0usize; height.max(width)];
    let mut z = vec![0.0; height.max(width) + 1];
    for x in 0..width {
        for y in 0..height {
            column[y] = squared[y * width + x];
        }
        transform_1d(&column, &mut column_out, &mut v, &mut z);
        for y in 0..height {
            squared[y * width + x] = column_out[y];
        }
    }

    // Rows are independent, so they run in parallel.
    let mut distances: Grid<f32> = Grid::new(width, height);
    distances
        .data_mut()
        .par_chunks_mut(width)
        .zip(squared.par_chunks(width))
        .for_each_init(
            || (vec![0.0; width], vec![0usize; width], vec![0.0; width + 1]),
            |(row_out, v, z), (dst, src)| {
                transform_1d(src, row_out, v, z);
                for (d, &sq) in dst.iter_mut().zip(row_out.iter()) {
                    *d = sq.sqrt() as f32;
                }
            },
        );
    distances
}

/// Signed, normalized distance to the coastline.
///
/// Land cells carry their distance to the nearest water cell and water cells
/// their distance to the nearest land cell. Each half is min-max scaled to
/// `[0, 1]` on its own, and the result is `land - water`: positive inland,
/// negative offshore, zero nowhere except on a map with a single class.
pub fn signed_distance(mask: &Mask) -> Grid<f32> {
    let mut land = distance_to(mask, false);
    let mut water = distance_to(mask, true);
    land.normalize_mut(0.0, 1.0, 0.0);
    water.normalize_mut(0.0, 1.0, 0.0);

    let (width, height) = mask.dimensions();
    Grid::from_fn(width, height, |x, y| land.get(x, y) - water.get(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_mask(size: usize, from: usize, to: usize) -> Mask {
        Grid::from_fn(size, size, |x, y| (from..to).contains(&x) && (from..to).contains(&y))
    }

    fn brute_force(mask: &Mask, target: bool) -> Grid<f32> {
        let targets: Vec<(usize, usize)> = mask
            .iter()
            .filter(|(_, _, &cell)| cell == target)
            .map(|(x, y, _)| (x, y))
            .collect();
        let (w, h) = mask.dimensions();
        Grid::from_fn(w, h, |x, y| {
            targets
                .iter()
                .map(|&(tx, ty)| {
                    let dx = tx as f32 - x as f32;
                    let dy = ty as f32 - y as f32;
                    (dx * dx + dy * dy).sqrt()
                })
                .fold(f32::INFINITY, f32::min)
        })
    }

    #[test]
    fn matches_brute_force_on_irregular_mask() {
        let mask = Grid::from_fn(13, 9, |x, y| (x * 7 + y * 3) % 11 < 2 || (x == 6 && y > 2));
        for target in [true, false] {
            let fast = distance_to(&mask, target);
            let slow = brute_force(&mask, target);
            for (a, b) in fast.data().iter().zip(slow.data()) {
                assert!((a - b).abs() < 1e-4, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn target_cells_have_zero_distance() {
        let mask = block_mask(8, 2, 5);
        let to_water = distance_to(&mask, false);
        for (x, y, &cell) in mask.iter() {
            if !cell {
                assert_eq!(*to_water.get(x, y), 0.0);
            }
        }
    }

    #[test]
    fn single_class_mask_gives_zero_field() {
        let water = Grid::new_with(5, 5, false);
        assert!(signed_distance(&water).data().iter().all(|v| *v == 0.0));
        let land = Grid::new_with(5, 5, true);
        assert!(signed_distance(&land).data().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn sign_follows_land_and_water_on_small_block() {
        // 2x2 island in a 4x4 ocean
        let mask = block_mask(4, 1, 3);
        let field = signed_distance(&mask);

        for (x, y, &is_land) in mask.iter() {
            let value = *field.get(x, y);
            if is_land {
                assert!(value > 0.0, "land cell ({x}, {y}) = {value}");
            } else {
                assert!(value < 0.0, "water cell ({x}, {y}) = {value}");
            }
        }

        // Corners are further from the island than edge-adjacent water
        assert!(field.get(0, 0) < field.get(1, 0));
        assert!((field.get(0, 0) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn magnitude_grows_away_from_coast() {
        let mask = block_mask(15, 3, 12);
        let field = signed_distance(&mask);

        // Inland, walking from the coast to the center
        assert!(field.get(3, 7) < field.get(5, 7));
        assert!(field.get(5, 7) < field.get(7, 7));
        assert!((field.get(7, 7) - 1.0).abs() < 1e-6);

        // Offshore, walking away from the coast
        assert!(field.get(2, 7) > field.get(1, 7));
        assert!(field.get(1, 7) > field.get(0, 7));
    }
}
