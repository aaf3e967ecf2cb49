//! Per-tick mesh translation: a closed-form orbit or keyboard-driven offsets
use std::f64::consts::PI;

use nalgebra::Vector3;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::input::HeldKeys;

/// Raised when a raw mode index does not name a [`Mode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid animation mode: {0}")]
pub struct InvalidModeError(pub u8);

/// Animation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Orbit,
    Manual,
}

impl Mode {
    pub const COUNT: u8 = 2;

    pub fn index(self) -> u8 {
        match self {
            Mode::Orbit => 0,
            Mode::Manual => 1,
        }
    }

    /// Next mode in the `(index + 1) mod 2` cycle
    pub fn toggle(self) -> Self {
        match self {
            Mode::Orbit => Mode::Manual,
            Mode::Manual => Mode::Orbit,
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = InvalidModeError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Mode::Orbit),
            1 => Ok(Mode::Manual),
            other => Err(InvalidModeError(other)),
        }
    }
}

/// Drives the translation applied to every mesh vertex.
///
/// One translation is shared by both modes: orbit overwrites it each tick,
/// manual accumulates onto whatever it currently holds. Switching modes never
/// resets it.
#[derive(Debug, Clone)]
pub struct AnimationController {
    mode: Mode,
    translation: Vector3<f64>,
    ticks_per_period: u64,
    manual_step: f64,
}

impl AnimationController {
    pub fn new(mode: Mode, ticks_per_period: u64, manual_step: f64) -> Self {
        Self {
            mode,
            translation: Vector3::zeros(),
            ticks_per_period: ticks_per_period.max(1),
            manual_step,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, InvalidModeError> {
        Ok(Self::new(
            config.mode()?,
            config.ticks_per_period(),
            config.manual_step,
        ))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn translation(&self) -> Vector3<f64> {
        self.translation
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggle();
        debug!(mode = ?self.mode, "animation mode switched");
        self.mode
    }

    /// Orbit position for a tick; depends on nothing but `tick`
    pub fn orbit_position(&self, tick: u64) -> Vector3<f64> {
        let phase = (tick % self.ticks_per_period) as f64 / self.ticks_per_period as f64;

        Vector3::new(
            (phase * 2.0 * PI).sin() * 3.0 - 0.5,
            6.0 + (phase * 4.0 * PI).cos() * 4.0 - 0.5,
            (phase * 2.0 * PI).cos() * 3.0 - 0.5,
        )
    }

    /// Manual offset for one tick of held keys; simultaneous keys add up
    pub fn manual_delta(&self, held: &HeldKeys) -> Vector3<f64> {
        let step = self.manual_step;
        let mut delta = Vector3::zeros();

        if held.up {
            delta.z += step;
        }
        if held.down {
            delta.z -= step;
        }
        if held.left {
            delta.x -= step;
        }
        if held.right {
            delta.x += step;
        }
        if held.page_up {
            delta.y += step;
        }
        if held.page_down {
            delta.y -= step;
        }

        delta
    }

    /// Advance one tick in the active mode and return the new translation
    pub fn advance(&mut self, tick: u64, held: &HeldKeys) -> Vector3<f64> {
        self.translation = match self.mode {
            Mode::Orbit => self.orbit_position(tick),
            Mode::Manual => self.translation + self.manual_delta(held),
        };
        self.translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    fn controller(mode: Mode) -> AnimationController {
        AnimationController::from_config(&Config {
            initial_mode: mode.index(),
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn test_mode_cycle() {
        let mut mode = Mode::Orbit;
        let mut seen = Vec::new();
        for _ in 0..4 {
            mode = mode.toggle();
            seen.push(mode.index());
        }
        assert_eq!(seen, vec![1, 0, 1, 0]);
        assert_eq!(Mode::Manual.toggle().toggle(), Mode::Manual);
    }

    #[test]
    fn test_mode_from_index() {
        assert_eq!(Mode::try_from(0), Ok(Mode::Orbit));
        assert_eq!(Mode::try_from(1), Ok(Mode::Manual));
        assert_eq!(Mode::try_from(Mode::COUNT), Err(InvalidModeError(2)));
    }

    #[test]
    fn test_orbit_start() {
        let anim = controller(Mode::Orbit);
        let start = anim.orbit_position(0);
        assert!((start - Vector3::new(-0.5, 9.5, 2.5)).norm() < 1e-12);

        // roughly a quarter of the way round: x near its peak, y near its trough
        let quarter = anim.orbit_position(62 + 250 * 3);
        assert!((quarter.x - 2.5).abs() < 0.01);
        assert!(quarter.y < 2.0);
    }

    #[test]
    fn test_orbit_is_periodic() {
        let anim = controller(Mode::Orbit);
        for tick in [0, 1, 17, 124, 249, 250, 9_999] {
            assert_eq!(anim.orbit_position(tick), anim.orbit_position(tick + 250));
        }
    }

    #[test]
    fn test_orbit_overwrites_translation() {
        let mut anim = controller(Mode::Orbit);
        let first = anim.advance(5, &HeldKeys::from_keys([Key::Right]));
        assert_eq!(first, anim.orbit_position(5));
        assert_eq!(anim.advance(5, &HeldKeys::none()), first);
    }

    #[test]
    fn test_manual_right_accumulates() {
        let mut anim = controller(Mode::Manual);
        let held = HeldKeys::from_keys([Key::Right]);
        let n = 7;
        for tick in 1..=n {
            anim.advance(tick, &held);
        }
        let t = anim.translation();
        assert!((t.x - 0.2 * n as f64).abs() < 1e-9);
        assert_eq!(t.y, 0.0);
        assert_eq!(t.z, 0.0);
    }

    #[test]
    fn test_manual_keys_compose() {
        let anim = controller(Mode::Manual);
        let opposed = HeldKeys::from_keys([Key::Up, Key::Down, Key::Left, Key::Right]);
        assert_eq!(anim.manual_delta(&opposed), Vector3::zeros());

        let diagonal = HeldKeys::from_keys([Key::Up, Key::Left, Key::PageUp]);
        assert_eq!(anim.manual_delta(&diagonal), Vector3::new(-0.2, 0.2, 0.2));
    }

    #[test]
    fn test_manual_continues_from_orbit() {
        let mut anim = controller(Mode::Orbit);
        let orbit = anim.advance(10, &HeldKeys::none());

        anim.toggle_mode();
        let moved = anim.advance(11, &HeldKeys::from_keys([Key::PageDown]));
        assert_eq!(moved, orbit + Vector3::new(0.0, -0.2, 0.0));

        anim.toggle_mode();
        anim.toggle_mode();
        assert_eq!(anim.mode(), Mode::Manual);
        assert_eq!(anim.advance(12, &HeldKeys::none()), moved);
    }
}
