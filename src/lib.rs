#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color_map;
pub mod config;
pub mod error;
pub mod grid;
pub mod map_store;
pub mod rendering;
pub mod terrain;
pub mod ui;
pub mod viewport;
pub mod world;

pub use app::LandmassApp;
pub use config::Config;
pub use world::World;
