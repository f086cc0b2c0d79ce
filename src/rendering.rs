use egui::{Color32, ColorImage, Context, Rect, TextureHandle, TextureOptions, Vec2};

use crate::error::ViewportError;
use crate::viewport::{VisibleCell, Viewport};
use crate::world::World;

/// Texture holding the currently visible cells, one texel per cell.
///
/// Rebuilt only when the viewport reports a change; every other frame just
/// redraws the existing texture.
pub struct WindowRenderer {
    texture: Option<TextureHandle>,
    /// Offset and size of the texture on screen, relative to the canvas.
    placement: Rect,
    dirty: bool,
}

impl Default for WindowRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRenderer {
    pub fn new() -> Self {
        Self {
            texture: None,
            placement: Rect::NOTHING,
            dirty: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Re-upload the visible window if anything changed since the last
    /// upload. On error the previous texture stays on screen until the next
    /// change.
    pub fn refresh(
        &mut self,
        ctx: &Context,
        world: &World,
        viewport: &Viewport,
    ) -> Result<(), ViewportError> {
        if !self.dirty {
            return Ok(());
        }
        self.dirty = false;
        let cells = viewport.visible_cells(world)?;
        let window = viewport.visible_window();
        let image = window_image(&cells, [window.width(), window.height()]);

        let block = viewport.block_size() as f32;
        let (origin_x, origin_y) = viewport.draw_origin();
        self.placement = Rect::from_min_size(
            egui::pos2(origin_x as f32, origin_y as f32),
            Vec2::new(window.width() as f32 * block, window.height() as f32 * block),
        );

        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("visible_window", image, TextureOptions::NEAREST))
            }
        }
        log::trace!("Uploaded {}x{} visible cells", window.width(), window.height());
        Ok(())
    }

    /// Draw the last uploaded window into `canvas`.
    pub fn paint(&self, painter: &egui::Painter, canvas: Rect) {
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                self.placement.translate(canvas.min.to_vec2()),
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }
}

/// Pack row-ordered cells into an image of `size` texels.
fn window_image(cells: &[VisibleCell], size: [usize; 2]) -> ColorImage {
    ColorImage {
        size,
        pixels: cells.iter().map(|cell| Color32::from(cell.color)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_map::{ColorMapper, Rgb};
    use crate::config::Config;
    use crate::grid::Grid;
    use crate::viewport::PixelRect;
    use crate::world::WorldSource;

    #[test]
    fn test_window_image_keeps_row_order() {
        let cell = |r: u8| VisibleCell {
            color: Rgb::new(r, 0, 0),
            rect: PixelRect { x: 0, y: 0, size: 1 },
        };
        let image = window_image(&[cell(1), cell(2), cell(3), cell(4)], [2, 2]);
        assert_eq!(image.size, [2, 2]);
        assert_eq!(image.pixels[1], Color32::from_rgb(2, 0, 0));
        assert_eq!(image.pixels[2], Color32::from_rgb(3, 0, 0));
    }

    #[test]
    fn test_refresh_uploads_once_until_marked_dirty() {
        let ctx = Context::default();
        let mapper = ColorMapper::from_config(&Config::default()).unwrap();
        let world = World::from_heightmap(
            Grid::from_fn(20, 20, |x, _| x as f32 / 10.0 - 1.0),
            &mapper,
            WorldSource::Generated,
        );
        let viewport = Viewport::new(20, 20, 40, 40, 4);

        let mut renderer = WindowRenderer::new();
        assert!(renderer.is_dirty());
        renderer.refresh(&ctx, &world, &viewport).unwrap();
        assert!(!renderer.is_dirty());
        assert_eq!(renderer.placement.size(), Vec2::new(40.0, 40.0));

        renderer.mark_dirty();
        renderer.refresh(&ctx, &world, &viewport).unwrap();
        assert!(!renderer.is_dirty());
    }
}
