//! Pan/zoom windowing over the color grid.
//!
//! All coordinates here are plain integers. The focus lives in pixel space
//! (cell index times block size); the visible window is in cell space.
//! Nothing in this module issues draw calls.

pub mod input;

pub use input::{DragState, ViewportEvent};

use crate::color_map::Rgb;
use crate::config::Config;
use crate::error::ViewportError;
use crate::world::World;

/// Half-open cell range `[start_x, end_x) x [start_y, end_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    pub start_x: usize,
    pub start_y: usize,
    pub end_x: usize,
    pub end_y: usize,
}

impl VisibleWindow {
    pub fn width(&self) -> usize {
        self.end_x.saturating_sub(self.start_x)
    }

    pub fn height(&self) -> usize {
        self.end_y.saturating_sub(self.start_y)
    }
}

/// Destination square for one cell, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleCell {
    pub color: Rgb,
    pub rect: PixelRect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    focus_x: i64,
    focus_y: i64,
    block_size: usize,
    window_width: usize,
    window_height: usize,
    grid_width: usize,
    grid_height: usize,
    pub(crate) drag: DragState,
}

impl Viewport {
    /// Start centered on the grid at `block_size`, clamped to the zoom range.
    pub fn new(
        grid_width: usize,
        grid_height: usize,
        window_width: usize,
        window_height: usize,
        block_size: usize,
    ) -> Self {
        let mut viewport = Self {
            focus_x: 0,
            focus_y: 0,
            block_size: 1,
            window_width: window_width.max(1),
            window_height: window_height.max(1),
            grid_width,
            grid_height,
            drag: DragState::Idle,
        };
        viewport.block_size = block_size.clamp(1, viewport.max_block_size());
        let block = viewport.block_size as i64;
        viewport.set_focus(
            (grid_width / 2) as i64 * block,
            (grid_height / 2) as i64 * block,
        );
        viewport
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.map_width,
            config.map_height,
            config.window_width,
            config.window_height,
            config.block_size,
        )
    }

    pub fn focus(&self) -> (i64, i64) {
        (self.focus_x, self.focus_y)
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Largest zoom at which at least one whole block still fits the window.
    pub fn max_block_size(&self) -> usize {
        self.window_width.min(self.window_height).max(1)
    }

    /// Cells that fit across the window at the current zoom.
    pub fn blocks_x(&self) -> usize {
        self.window_width / self.block_size
    }

    pub fn blocks_y(&self) -> usize {
        self.window_height / self.block_size
    }

    /// Move the focus, then clamp it to `[0, (grid - 2) * block]` per axis.
    pub fn set_focus(&mut self, x: i64, y: i64) {
        self.focus_x = x;
        self.focus_y = y;
        self.clamp_focus();
    }

    /// Resize the window the blocks are laid out in. The block size is pulled
    /// back into the new zoom range and the focus re-clamped.
    ///
    /// Returns whether anything changed.
    pub fn set_window_size(&mut self, width: usize, height: usize) -> bool {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) == (self.window_width, self.window_height) {
            return false;
        }
        log::debug!(
            "Viewport window resized: {}x{} -> {}x{}",
            self.window_width,
            self.window_height,
            width,
            height
        );
        self.window_width = width;
        self.window_height = height;
        self.block_size = self.block_size.clamp(1, self.max_block_size());
        self.clamp_focus();
        true
    }

    pub(crate) fn clamp_focus(&mut self) {
        let block = self.block_size as i64;
        let max_x = ((self.grid_width as i64 - 2) * block).max(0);
        let max_y = ((self.grid_height as i64 - 2) * block).max(0);
        self.focus_x = self.focus_x.clamp(0, max_x);
        self.focus_y = self.focus_y.clamp(0, max_y);
    }

    /// Cell window centered on the focus.
    ///
    /// When the window would run past the grid, its end is pulled back to
    /// `grid - 1` and its start shifted so the width is kept where possible.
    /// That clamp leaves the last row and column reachable only when the
    /// window ends exactly on the grid edge.
    pub fn visible_window(&self) -> VisibleWindow {
        let (start_x, end_x) = axis_window(
            self.focus_x,
            self.block_size,
            self.blocks_x(),
            self.grid_width,
        );
        let (start_y, end_y) = axis_window(
            self.focus_y,
            self.block_size,
            self.blocks_y(),
            self.grid_height,
        );
        VisibleWindow {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    /// Pixel position of the window's first cell.
    pub fn draw_origin(&self) -> (i64, i64) {
        (
            axis_origin(self.focus_x, self.block_size, self.blocks_x(), self.grid_width),
            axis_origin(self.focus_y, self.block_size, self.blocks_y(), self.grid_height),
        )
    }

    /// Color and destination rectangle of every cell in the visible window,
    /// row by row.
    pub fn visible_cells(&self, world: &World) -> Result<Vec<VisibleCell>, ViewportError> {
        let window = self.visible_window();
        let rows = world.color_window(window.start_x, window.start_y, window.end_x, window.end_y)?;
        let (origin_x, origin_y) = self.draw_origin();
        let block = self.block_size as i64;

        let mut cells = Vec::with_capacity(window.width() * window.height());
        for (j, row) in rows.iter().enumerate() {
            for (i, &color) in row.iter().enumerate() {
                cells.push(VisibleCell {
                    color,
                    rect: PixelRect {
                        x: origin_x + i as i64 * block,
                        y: origin_y + j as i64 * block,
                        size: self.block_size,
                    },
                });
            }
        }
        Ok(cells)
    }
}

fn axis_window(focus: i64, block: usize, blocks: usize, grid: usize) -> (usize, usize) {
    let centered = focus / block as i64 - (blocks / 2) as i64;
    let mut start = centered.max(0) as usize;
    let mut end = start + blocks;
    if end > grid {
        end = grid.saturating_sub(1);
        start = end.saturating_sub(blocks);
    }
    (start, end)
}

fn axis_origin(focus: i64, block: usize, blocks: usize, grid: usize) -> i64 {
    let block = block as i64;
    let origin = (focus / block - (blocks / 2) as i64) * block - focus;
    origin.clamp(0, (grid as i64 - 1).max(0))
}
