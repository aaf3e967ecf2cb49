//! Native window frontend backed by `minifb`
use minifb::{Key as WindowKey, KeyRepeat, Window, WindowOptions};
use tracing::info;
use wire3d_core::{
    Config, FrameBuffer, HeldKeys, InputEvent, Key, MainLoop, Mesh, Mode, Platform, Surface,
};

pub const TITLE: &str = "Wire3D";

/// Map a window key to the loop's key set
pub fn map_key(key: WindowKey) -> Key {
    match key {
        WindowKey::Escape => Key::Escape,
        WindowKey::M => Key::ToggleMode,
        WindowKey::Up => Key::Up,
        WindowKey::Down => Key::Down,
        WindowKey::Left => Key::Left,
        WindowKey::Right => Key::Right,
        WindowKey::PageUp => Key::PageUp,
        WindowKey::PageDown => Key::PageDown,
        _ => Key::Other,
    }
}

/// A fixed-size window presenting the software frame each tick
pub struct WindowPlatform {
    window: Window,
    frame: FrameBuffer,
    status: Option<(u32, Mode)>,
}

impl WindowPlatform {
    pub fn new(config: &Config) -> Result<Self, minifb::Error> {
        let window = Window::new(
            TITLE,
            config.width as usize,
            config.height as usize,
            WindowOptions {
                resize: false,
                scale: minifb::Scale::X1,
                ..WindowOptions::default()
            },
        )?;

        Ok(Self {
            window,
            frame: FrameBuffer::new(config.width, config.height),
            status: None,
        })
    }
}

impl Platform for WindowPlatform {
    type Surface = FrameBuffer;
    type Error = minifb::Error;

    fn poll_events(&mut self) -> Result<Vec<InputEvent>, minifb::Error> {
        // minifb refreshes its key state inside `update_with_buffer`
        let mut events: Vec<InputEvent> = self
            .window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .map(|key| InputEvent::KeyDown(map_key(key)))
            .collect();

        if !self.window.is_open() {
            events.push(InputEvent::Quit);
        }
        Ok(events)
    }

    fn held_keys(&self) -> HeldKeys {
        HeldKeys::from_keys(self.window.get_keys().into_iter().map(map_key))
    }

    fn surface(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    fn report_status(&mut self, fps: f32, mode: Mode) {
        // title updates are slow on some platforms, only touch it on change
        let status = (fps.round() as u32, mode);
        if self.status != Some(status) {
            self.window
                .set_title(&format!("{TITLE} - {:?} - {} FPS", mode, status.0));
            self.status = Some(status);
        }
    }

    fn present(&mut self) -> Result<(), minifb::Error> {
        let (width, height) = (self.frame.width() as usize, self.frame.height() as usize);
        self.window.update_with_buffer(self.frame.pixels(), width, height)
    }
}

/// Open the window and run the loop until it is closed or Escape is pressed
pub fn run(mesh: Mesh, config: &Config) -> anyhow::Result<()> {
    let platform = WindowPlatform::new(config)?;
    info!(width = config.width, height = config.height, "window opened");

    let mut app = MainLoop::new(platform, mesh, config)?;
    app.run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(WindowKey::Escape), Key::Escape);
        assert_eq!(map_key(WindowKey::M), Key::ToggleMode);
        assert_eq!(map_key(WindowKey::PageUp), Key::PageUp);
        assert_eq!(map_key(WindowKey::Space), Key::Other);
    }

    #[test]
    fn test_held_from_window_keys() {
        let keys = vec![WindowKey::Right, WindowKey::PageDown, WindowKey::A];
        let held = HeldKeys::from_keys(keys.into_iter().map(map_key));
        assert!(held.right);
        assert!(held.page_down);
        assert!(!held.left);
    }
}
