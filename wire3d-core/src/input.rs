//! Platform-neutral input events and key state

/// Keys the main loop cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    /// Cycles the animation mode (`M` on a keyboard)
    ToggleMode,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Other,
}

/// A discrete event drained from the platform queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
}

/// Snapshot of which direction keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub page_up: bool,
    pub page_down: bool,
}

impl HeldKeys {
    pub fn none() -> Self {
        Self::default()
    }

    /// Build a snapshot from a list of held keys; non-direction keys are ignored
    pub fn from_keys<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        let mut held = Self::none();
        for key in keys {
            held.set(key, true);
        }
        held
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::PageUp => self.page_up = pressed,
            Key::PageDown => self.page_down = pressed,
            Key::Escape | Key::ToggleMode | Key::Other => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keys() {
        let held = HeldKeys::from_keys([Key::Up, Key::PageDown, Key::Escape]);
        assert!(held.up);
        assert!(held.page_down);
        assert!(!held.down);
        assert!(!held.is_empty());
        assert!(HeldKeys::from_keys([Key::Other, Key::ToggleMode]).is_empty());
    }

    #[test]
    fn test_set_release() {
        let mut held = HeldKeys::from_keys([Key::Left]);
        held.set(Key::Left, false);
        assert!(held.is_empty());
    }
}
