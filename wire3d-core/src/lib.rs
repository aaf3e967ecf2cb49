//! Wire3D Core Library - projection, wireframe drawing and the render loop
//!
//! Everything platform-specific (windows, terminals, keyboards) sits behind
//! the [`Platform`], [`Surface`] and [`Clock`] traits so frontends stay thin.

pub mod animation;
pub mod app;
pub mod config;
pub mod framebuffer;
pub mod input;
pub mod mesh;
pub mod projection;
pub mod renderer;

// Re-export commonly used types
pub use animation::{AnimationController, InvalidModeError, Mode};
pub use app::{Clock, FrameStats, LoopControl, MainLoop, Platform, SystemClock};
pub use config::{Config, ConfigError};
pub use framebuffer::{FrameBuffer, Rgb, Sprite, Surface};
pub use input::{HeldKeys, InputEvent, Key};
pub use mesh::{Face, Mesh, MeshError, Vertex};
pub use projection::{Camera, ScreenCoord};
pub use renderer::{FrameReport, RenderContext, EDGE_COORD_LIMIT};
