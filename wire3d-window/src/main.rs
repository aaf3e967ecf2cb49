//! Wire3D - Orbiting Cube
//!
//! Opens a 1920x1080 window and draws the wireframe cube.
//! Controls:
//!   - M: Toggle orbit / manual mode
//!   - Arrow Keys, PageUp/PageDown: Move the cube (manual mode)
//!   - ESC: Quit

use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use wire3d_core::{Config, Mesh};

fn main() -> anyhow::Result<()> {
    // Set up tracing
    let fmt_layer = fmt::layer().with_target(false);
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    info!("Starting Wire3D");

    let config = Config::default();
    config.validate()?;

    wire3d_window::run(Mesh::cube(2.0), &config)
}
