pub mod canvas;

pub use canvas::MapCanvas;
