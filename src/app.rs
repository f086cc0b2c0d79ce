use crate::config::Config;
use crate::ui::MapCanvas;
use crate::viewport::Viewport;
use crate::world::{World, WorldSource};

/// Interactive viewer over a world built before the window opened.
pub struct LandmassApp {
    world: World,
    canvas: MapCanvas,
    seed: u32,
}

impl LandmassApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &Config, world: World) -> Self {
        Self::from_parts(config, world)
    }

    pub fn from_parts(config: &Config, world: World) -> Self {
        let viewport = Viewport::new(
            world.width(),
            world.height(),
            config.window_width,
            config.window_height,
            config.block_size,
        );
        Self {
            world,
            canvas: MapCanvas::new(viewport),
            seed: config.seed,
        }
    }

    fn status_line(&self) -> String {
        let viewport = &self.canvas.viewport;
        let window = viewport.visible_window();
        let source = match self.world.source() {
            WorldSource::Cache => "cache".to_owned(),
            WorldSource::Generated => format!("seed {}", self.seed),
        };
        format!(
            "{}x{} map ({}) | block size {} | cells ({}, {})..({}, {})",
            self.world.width(),
            self.world.height(),
            source,
            viewport.block_size(),
            window.start_x,
            window.start_y,
            window.end_x,
            window.end_y
        )
    }
}

impl eframe::App for LandmassApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status_line());
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.canvas.show(ui, &self.world);
            });
    }
}
