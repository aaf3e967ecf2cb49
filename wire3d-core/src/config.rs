//! Startup settings shared by every frontend
use std::time::Duration;
use thiserror::Error;

use crate::animation::{InvalidModeError, Mode};
use crate::framebuffer::Rgb;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("resolution must be non-zero, got {width}x{height}")]
    Resolution { width: u32, height: u32 },
    #[error("tick length must be positive")]
    TickLength,
    #[error("orbit period must be positive and at least one tick long, got {0}s")]
    Period(f64),
    #[error("focal length and viewport width must be positive")]
    Lens,
    #[error("marker scale must be non-zero")]
    MarkerScale,
    #[error(transparent)]
    InitialMode(#[from] InvalidModeError),
}

/// Renderer configuration.
///
/// Everything is fixed at startup; the defaults reproduce the stock
/// 1920x1080, 25 ticks-per-second setup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub tick_length: Duration,
    /// Orbit period in seconds
    pub period: f64,
    /// Manual-mode translation per held key per tick
    pub manual_step: f64,
    pub focal_length: f64,
    pub viewport_width: f64,
    /// Marker diameter is `width / marker_scale`
    pub marker_scale: u32,
    /// Raw mode index, `0` (orbit) or `1` (manual)
    pub initial_mode: u8,
    pub foreground: Rgb,
    pub background: Rgb,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            tick_length: Duration::from_millis(40),
            period: 10.0,
            manual_step: 0.2,
            focal_length: 0.6,
            viewport_width: 1.0,
            marker_scale: 80,
            initial_mode: 0,
            foreground: Rgb::WHITE,
            background: Rgb::BLACK,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Resolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.tick_length.is_zero() {
            return Err(ConfigError::TickLength);
        }
        if self.period.is_nan() || self.period < self.tick_length.as_secs_f64() {
            return Err(ConfigError::Period(self.period));
        }
        let positive = |v: f64| v > 0.0;
        if !positive(self.focal_length) || !positive(self.viewport_width) {
            return Err(ConfigError::Lens);
        }
        if self.marker_scale == 0 {
            return Err(ConfigError::MarkerScale);
        }
        self.mode()?;
        Ok(())
    }

    pub fn mode(&self) -> Result<Mode, InvalidModeError> {
        Mode::try_from(self.initial_mode)
    }

    /// Whole ticks in one orbit period
    pub fn ticks_per_period(&self) -> u64 {
        (self.period / self.tick_length.as_secs_f64()).round().max(1.0) as u64
    }
}
