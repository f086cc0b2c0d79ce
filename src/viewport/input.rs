use egui::Pos2;

use super::Viewport;

/// Pointer input already translated into window-relative pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// Primary button went down at `pos`.
    PointerPressed { pos: Pos2 },
    PointerMoved { pos: Pos2 },
    PointerReleased,
    /// Wheel step; positive `delta` zooms in. `pos` is the pointer position.
    Scrolled { delta: f32, pos: Pos2 },
}

/// 拖拽状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,

    /// `anchor` is the pointer position already applied to the focus.
    Dragging { anchor: Pos2 },
}

impl Viewport {
    fn transition_to(&mut self, new_state: DragState) {
        log::debug!("Viewport drag state: {:?} -> {:?}", self.drag, new_state);
        self.drag = new_state;
    }

    /// Apply one input event. Returns `true` when the visible result may have
    /// changed and the window should be redrawn.
    pub fn handle(&mut self, event: ViewportEvent) -> bool {
        match event {
            ViewportEvent::PointerPressed { pos } => {
                self.transition_to(DragState::Dragging { anchor: pos });
                true
            }
            ViewportEvent::PointerReleased => {
                if self.drag == DragState::Idle {
                    return false;
                }
                self.transition_to(DragState::Idle);
                true
            }
            ViewportEvent::PointerMoved { pos } => self.drag_to(pos),
            ViewportEvent::Scrolled { delta, pos } => self.zoom_at(delta, pos),
        }
    }

    fn drag_to(&mut self, pos: Pos2) -> bool {
        let DragState::Dragging { anchor } = self.drag else {
            return false;
        };

        // Only whole pixels move the focus; the remainder stays in the anchor
        let dx = (pos.x - anchor.x).round();
        let dy = (pos.y - anchor.y).round();
        if dx == 0.0 && dy == 0.0 {
            return false;
        }

        let before = self.focus();
        self.set_focus(before.0 - dx as i64, before.1 - dy as i64);
        self.drag = DragState::Dragging {
            anchor: Pos2::new(anchor.x + dx, anchor.y + dy),
        };
        log::trace!("Dragged focus {:?} -> {:?}", before, self.focus());
        self.focus() != before
    }

    /// Step the block size by one and keep the cell under `pos` in place.
    fn zoom_at(&mut self, delta: f32, pos: Pos2) -> bool {
        let step: i64 = if delta > 0.0 {
            1
        } else if delta < 0.0 {
            -1
        } else {
            return false;
        };

        let old_block = self.block_size as i64;
        let new_block = (old_block + step).clamp(1, self.max_block_size() as i64);
        if new_block == old_block {
            return false;
        }

        let px = pos.x.max(0.0) as i64;
        let py = pos.y.max(0.0) as i64;
        let window = self.visible_window();
        let cell_x = window.start_x as i64 + px / old_block;
        let cell_y = window.start_y as i64 + py / old_block;

        self.block_size = new_block as usize;
        let half_x = (self.blocks_x() / 2) as i64;
        let half_y = (self.blocks_y() / 2) as i64;
        let before = self.focus();
        self.set_focus(
            (cell_x - px / new_block + half_x) * new_block,
            (cell_y - py / new_block + half_y) * new_block,
        );

        log::debug!(
            "Zoom: block size {} -> {}, focus {:?} -> {:?}, anchored on cell ({}, {})",
            old_block,
            new_block,
            before,
            self.focus(),
            cell_x,
            cell_y
        );
        true
    }
}
