//! Wire3D Terminal Demo - Orbiting Cube
//!
//! Renders the 1920x1080 wireframe frame downsampled to ASCII.
//! Controls:
//!   - M: Toggle orbit / manual mode
//!   - Arrow Keys, PageUp/PageDown: Move the cube (manual mode)
//!   - Q/ESC: Quit

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use wire3d_core::{Config, Mesh};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; keep them quiet by default so they don't tear the frame
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let config = Config::default();
    config.validate()?;

    wire3d_terminal::run(Mesh::cube(2.0), &config)?;

    println!("Thank you for using Wire3D Terminal!");
    Ok(())
}
