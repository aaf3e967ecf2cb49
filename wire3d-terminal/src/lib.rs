//! Terminal frontend: runs the render loop on a pixel frame shown as ASCII art
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;
use tracing::{info, warn};
use wire3d_core::{Config, FrameBuffer, HeldKeys, InputEvent, Key, MainLoop, Mesh, Mode, Platform, Rgb};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Map a terminal key to the loop's key set
pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Esc => Key::Escape,
        KeyCode::Char('m') | KeyCode::Char('M') => Key::ToggleMode,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => Key::Other,
    }
}

/// Tracks held direction keys from a terminal key stream.
///
/// Terminals that report key releases give true held state. Elsewhere a key
/// counts as held for the tick in which it was pressed or auto-repeated.
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    reports_release: bool,
    held: HeldKeys,
}

impl KeyTracker {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            held: HeldKeys::none(),
        }
    }

    /// Call once per tick before feeding that tick's events
    pub fn begin_tick(&mut self) {
        if !self.reports_release {
            self.held = HeldKeys::none();
        }
    }

    /// Feed one key event; returns the discrete event it produces, if any
    pub fn handle(&mut self, key: KeyEvent) -> Option<InputEvent> {
        let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
        if key.kind != KeyEventKind::Release && (ctrl_c || key.code == KeyCode::Char('q')) {
            return Some(InputEvent::Quit);
        }

        let mapped = map_key(key.code);
        match key.kind {
            KeyEventKind::Press => {
                self.held.set(mapped, true);
                Some(InputEvent::KeyDown(mapped))
            }
            KeyEventKind::Repeat => {
                self.held.set(mapped, true);
                None
            }
            KeyEventKind::Release => {
                self.held.set(mapped, false);
                None
            }
        }
    }

    pub fn held(&self) -> HeldKeys {
        self.held
    }
}

/// Terminal-backed [`Platform`]: the frame is rendered at full resolution
/// and downsampled to the terminal grid on present
pub struct TerminalPlatform {
    frame: FrameBuffer,
    ascii: AsciiRenderer,
    keys: KeyTracker,
    background: Rgb,
    out: Stdout,
    fps: f32,
    mode: Mode,
}

impl TerminalPlatform {
    pub fn new(config: &Config, reports_release: bool) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;

        Ok(Self {
            frame: FrameBuffer::new(config.width, config.height),
            ascii: AsciiRenderer::new(cols as usize, rows.saturating_sub(1) as usize),
            keys: KeyTracker::new(reports_release),
            background: config.background,
            out: stdout(),
            fps: 0.0,
            mode: Mode::default(),
        })
    }
}

impl Platform for TerminalPlatform {
    type Surface = FrameBuffer;
    type Error = io::Error;

    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        self.keys.begin_tick();

        let mut events = Vec::new();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => events.extend(self.keys.handle(key)),
                Event::Resize(cols, rows) => {
                    self.ascii.resize(cols as usize, rows.saturating_sub(1) as usize);
                    queue!(self.out, terminal::Clear(ClearType::All))?;
                }
                _ => {}
            }
        }
        Ok(events)
    }

    fn held_keys(&self) -> HeldKeys {
        self.keys.held()
    }

    fn surface(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    fn report_status(&mut self, fps: f32, mode: Mode) {
        self.fps = fps;
        self.mode = mode;
    }

    fn present(&mut self) -> io::Result<()> {
        self.ascii.rasterize(&self.frame, self.background);

        queue!(self.out, cursor::MoveTo(0, 1))?;
        self.ascii.draw(&mut self.out)?;

        // Draw UI overlay
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Wire3D Terminal | FPS: {:.1} | Mode: {:?} | M=Mode Arrows/PgUp/PgDn=Move Esc/Q=Quit",
                self.fps, self.mode
            )),
            ResetColor
        )?;

        self.out.flush()
    }
}

/// Set up the terminal, run the loop until quit, and always restore the terminal
pub fn run(mesh: Mesh, config: &Config) -> anyhow::Result<()> {
    let reports_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if !reports_release {
        warn!("terminal does not report key releases, held keys last one tick");
    }

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
    if reports_release {
        execute!(
            out,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let result = main_loop(mesh, config, reports_release);

    // Cleanup
    if reports_release {
        execute!(out, PopKeyboardEnhancementFlags)?;
    }
    execute!(out, terminal::LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()?;

    result
}

fn main_loop(mesh: Mesh, config: &Config, reports_release: bool) -> anyhow::Result<()> {
    let platform = TerminalPlatform::new(config, reports_release)?;
    let mut app = MainLoop::new(platform, mesh, config)?;
    app.run()?;
    info!(ticks = app.tick_count(), "terminal session ended");
    Ok(())
}
