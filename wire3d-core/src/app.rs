//! Fixed-tick main loop tying input, animation and rendering together
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::animation::{AnimationController, InvalidModeError, Mode};
use crate::config::Config;
use crate::framebuffer::{Rgb, Surface};
use crate::input::{HeldKeys, InputEvent, Key};
use crate::mesh::Mesh;
use crate::renderer::{FrameReport, RenderContext};

/// Window, input queue and frame presentation provided by a frontend
pub trait Platform {
    type Surface: Surface;
    type Error;

    /// Drain every event queued since the last call
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, Self::Error>;
    /// Direction keys held right now
    fn held_keys(&self) -> HeldKeys;
    fn surface(&mut self) -> &mut Self::Surface;
    /// Latest frame rate and mode, handed over just before each present
    fn report_status(&mut self, _fps: f32, _mode: Mode) {}
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Monotonic time source used to pace ticks
pub trait Clock {
    fn now(&self) -> Instant;
    /// Block until `deadline`; returns immediately if it already passed
    fn sleep_until(&mut self, deadline: Instant);
}

/// Wall clock that sleeps out the rest of each tick
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep_until(&mut self, deadline: Instant) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Frames-per-second counter, refreshed once per second
#[derive(Debug, Clone)]
pub struct FrameStats {
    window_start: Instant,
    frames: u32,
    fps: f32,
}

impl FrameStats {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count a frame; returns the new rate when a full second has elapsed
    pub fn record(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= Duration::from_secs(1) {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.window_start = now;
            Some(self.fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Owns all per-run state: tick counter, animation, render context
pub struct MainLoop<P: Platform, C: Clock = SystemClock> {
    platform: P,
    clock: C,
    mesh: Mesh,
    context: RenderContext,
    animation: AnimationController,
    background: Rgb,
    tick_length: Duration,
    tick: u64,
    running: bool,
    stats: FrameStats,
    last_report: FrameReport,
}

impl<P: Platform> MainLoop<P, SystemClock> {
    pub fn new(platform: P, mesh: Mesh, config: &Config) -> Result<Self, InvalidModeError> {
        Self::with_clock(platform, SystemClock, mesh, config)
    }
}

impl<P: Platform, C: Clock> MainLoop<P, C> {
    pub fn with_clock(
        mut platform: P,
        clock: C,
        mesh: Mesh,
        config: &Config,
    ) -> Result<Self, InvalidModeError> {
        let surface = platform.surface();
        let context = RenderContext::from_config(&Config {
            width: surface.width(),
            height: surface.height(),
            ..config.clone()
        });
        let stats = FrameStats::new(clock.now());

        Ok(Self {
            animation: AnimationController::from_config(config)?,
            platform,
            clock,
            mesh,
            context,
            background: config.background,
            tick_length: config.tick_length,
            tick: 0,
            running: true,
            stats,
            last_report: FrameReport::default(),
        })
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn mode(&self) -> Mode {
        self.animation.mode()
    }

    pub fn animation(&self) -> &AnimationController {
        &self.animation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn fps(&self) -> f32 {
        self.stats.fps()
    }

    pub fn last_report(&self) -> FrameReport {
        self.last_report
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run ticks until a quit request is seen
    pub fn run(&mut self) -> Result<(), P::Error> {
        info!(
            vertices = self.mesh.vertex_count(),
            mode = ?self.animation.mode(),
            "render loop started"
        );

        while self.tick()? == LoopControl::Continue {}

        info!(ticks = self.tick, "render loop finished");
        Ok(())
    }

    /// One full iteration: input, clear, animate, draw, present, wait.
    ///
    /// A quit request still lets the current frame finish.
    pub fn tick(&mut self) -> Result<LoopControl, P::Error> {
        let tick_start = self.clock.now();
        self.tick += 1;

        for event in self.platform.poll_events()? {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => self.running = false,
                InputEvent::KeyDown(Key::ToggleMode) => {
                    self.animation.toggle_mode();
                }
                InputEvent::KeyDown(_) => {}
            }
        }

        let held = self.platform.held_keys();
        let translation = self.animation.advance(self.tick, &held);

        let surface = self.platform.surface();
        surface.fill(self.background);
        self.last_report = self.context.draw_mesh(surface, &self.mesh, &translation);

        if let Some(fps) = self.stats.record(self.clock.now()) {
            debug!(fps, skipped_edges = self.last_report.edges_skipped, "frame stats");
        }
        self.platform.report_status(self.stats.fps(), self.animation.mode());
        self.platform.present()?;

        // No catch-up: an overrun tick simply starts the next one late
        self.clock.sleep_until(tick_start + self.tick_length);

        Ok(if self.running {
            LoopControl::Continue
        } else {
            LoopControl::Exit
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_stats() {
        let start = Instant::now();
        let mut stats = FrameStats::new(start);
        for i in 1..25 {
            assert_eq!(stats.record(start + Duration::from_millis(40 * i)), None);
        }
        let fps = stats.record(start + Duration::from_millis(1000)).unwrap();
        assert!((fps - 25.0).abs() < 1e-3);
        assert_eq!(stats.fps(), fps);
    }

    #[test]
    fn test_system_clock_past_deadline() {
        let mut clock = SystemClock;
        let before = clock.now();
        clock.sleep_until(before);
        assert!(before.elapsed() < Duration::from_millis(40));
    }
}
