use thiserror::Error;

/// Errors raised while loading the configuration file.
///
/// All of these are fatal at startup: without a valid config there is no
/// grid size, no noise parameters and no palette to render with.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors from the heightmap cache and the image exporter.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cached map has the wrong shape: {0}")]
    Shape(String),
    #[error("Cached map holds a height outside [-1, 1]: {0}")]
    Value(String),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Precondition violations when slicing the color grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewportError {
    #[error(
        "Window ({start_x}, {start_y})..({end_x}, {end_y}) is out of map bounds {width}x{height}"
    )]
    OutOfBounds {
        start_x: usize,
        start_y: usize,
        end_x: usize,
        end_y: usize,
        width: usize,
        height: usize,
    },
    #[error("Start ({start_x}, {start_y}) must be less than end ({end_x}, {end_y})")]
    Inverted {
        start_x: usize,
        start_y: usize,
        end_x: usize,
        end_y: usize,
    },
}

/// Anything that ends the process with a failure.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Window error: {0}")]
    Window(#[from] eframe::Error),
}
