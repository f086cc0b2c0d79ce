use egui::{Pos2, Rect, Response, Sense, Ui};

use crate::rendering::WindowRenderer;
use crate::viewport::{Viewport, ViewportEvent};
use crate::world::World;

/// 地图画布：把 egui 输入转换为视口事件，并绘制可见窗口
pub struct MapCanvas {
    pub viewport: Viewport,
    renderer: WindowRenderer,
}

impl MapCanvas {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            renderer: WindowRenderer::new(),
        }
    }

    pub fn show(&mut self, ui: &mut Ui, world: &World) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        // The canvas gets what the status bar leaves, not the configured size
        let mut changed = self
            .viewport
            .set_window_size(rect.width() as usize, rect.height() as usize);
        for event in pointer_events(ui, rect) {
            changed |= self.viewport.handle(event);
        }
        if changed {
            self.renderer.mark_dirty();
        }

        if let Err(err) = self.renderer.refresh(ui.ctx(), world, &self.viewport) {
            log::error!("Skipping frame: {err}");
        }
        self.renderer.paint(&ui.painter_at(rect), rect);
        response
    }
}

/// This frame's pointer input, in canvas-relative pixels.
fn pointer_events(ui: &Ui, rect: Rect) -> Vec<ViewportEvent> {
    let local = |pos: Pos2| (pos - rect.min).to_pos2();
    ui.input(|i| {
        let mut events = Vec::new();
        let hover = i.pointer.hover_pos();

        if i.pointer.primary_pressed() {
            if let Some(pos) = i.pointer.interact_pos().filter(|p| rect.contains(*p)) {
                events.push(ViewportEvent::PointerPressed { pos: local(pos) });
            }
        }
        if i.pointer.is_moving() {
            if let Some(pos) = hover {
                events.push(ViewportEvent::PointerMoved { pos: local(pos) });
            }
        }
        if i.pointer.primary_released() {
            events.push(ViewportEvent::PointerReleased);
        }

        let scroll = i.raw_scroll_delta.y;
        if scroll != 0.0 {
            if let Some(pos) = hover.filter(|p| rect.contains(*p)) {
                events.push(ViewportEvent::Scrolled {
                    delta: scroll,
                    pos: local(pos),
                });
            }
        }
        events
    })
}
