use crate::config::Settings;
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use spinbrush::color::Palette;
use spinbrush::graphics::{PixelBuffer, Surface};
use spinbrush::math::Bounds;
use spinbrush::render;
use spinbrush::sim::{self, Hud, TickOutcome};
use spinbrush::state::{SimState, ToggleFlags};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Terminal rows kept below the canvas for the HUD.
const HUD_ROWS: u16 = 3;

/// Key bindings, the terminal's stand-in for checkboxes and the pause button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleColor,
    ToggleSmooth,
    ToggleResize,
    ToggleSpin,
    ToggleLinear,
    TogglePause,
    ToggleDebug,
    Quit,
}

/// Maps a pressed key to its action, if it has one.
pub fn key_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::ToggleColor),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::ToggleSmooth),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::ToggleResize),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::ToggleSpin),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(Action::ToggleLinear),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::ToggleDebug),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Puts the terminal in raw alternate-screen mode and restores it on drop.
struct TermGuard {
    out: Stdout,
}

impl TermGuard {
    fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            EnterAlternateScreen,
            DisableLineWrap,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { out })
    }
}

impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            EndSynchronizedUpdate,
            ResetColor,
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Canvas size in pixels for a terminal of `cols` x `rows` cells. Each cell
/// shows two pixels stacked with a half block.
pub fn canvas_size(cols: u16, rows: u16) -> (usize, usize) {
    let canvas_rows = rows.saturating_sub(HUD_ROWS).max(1);
    (usize::from(cols.max(1)), usize::from(canvas_rows) * 2)
}

fn to_term(color: Palette) -> Color {
    let (r, g, b) = color.channels();
    Color::Rgb { r, g, b }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on "
    } else {
        "off"
    }
}

/// Canvas presenter and keyboard handler
pub struct BrushWidget {
    canvas: PixelBuffer,
    /// Visible terminal size, which may drift from the canvas after a resize
    viewport: (u16, u16),
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
    debug: bool,
    should_quit: bool,
    last_hud: Option<Hud>,
}

impl BrushWidget {
    /// Creates a widget that presents `canvas` in a terminal of `viewport`
    /// columns and rows.
    pub fn new(canvas: PixelBuffer, viewport: (u16, u16)) -> Self {
        BrushWidget {
            canvas,
            viewport,
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
            debug: false,
            should_quit: false,
            last_hud: None,
        }
    }

    /// The painted canvas
    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    /// Whether a quit key was pressed
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies a key binding to the flags and state.
    pub fn handle_action(
        &mut self,
        action: Action,
        state: &mut SimState,
        flags: &mut ToggleFlags,
    ) {
        match action {
            Action::ToggleColor => flags.color_change = !flags.color_change,
            Action::ToggleSmooth => flags.smooth_color = !flags.smooth_color,
            Action::ToggleResize => flags.size_change = !flags.size_change,
            Action::ToggleSpin => flags.spin_mode = !flags.spin_mode,
            Action::ToggleLinear => flags.linear_mode = !flags.linear_mode,
            Action::TogglePause => {
                state.toggle_pause();
            }
            Action::ToggleDebug => self.debug = !self.debug,
            Action::Quit => self.should_quit = true,
        }
        debug!(?action, ?flags, "input");
    }

    /// Paints a tick's draw command and remembers its HUD.
    pub fn apply(&mut self, outcome: TickOutcome) {
        if let TickOutcome::Drew { command, hud, .. } = outcome {
            render::draw(&mut self.canvas, &command);
            self.last_hud = Some(hud);
        }
    }

    /// Records a new terminal size. The canvas keeps its size and is clipped.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport = (cols, rows);
    }

    /// HUD text for the current state
    fn hud_line(&self, state: &SimState) -> String {
        match &self.last_hud {
            Some(hud) => hud.to_string(),
            None => Hud::new(&state.shape, state.color).to_string(),
        }
    }

    fn toggles_line(flags: &ToggleFlags) -> String {
        format!(
            "[c]olor {}  [s]mooth {}  [r]esize {}  s[p]in {}  [l]inear {}  ",
            on_off(flags.color_change),
            on_off(flags.smooth_color),
            on_off(flags.size_change),
            on_off(flags.spin_mode),
            on_off(flags.linear_mode),
        )
    }

    fn debug_line(&self, state: &SimState, flags: &ToggleFlags, seed: u64) -> String {
        format!(
            "{} {}  fps:{:.1}  ticks:{}  spins:{}  angle:{:.3}  brush:{}  seed:{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            self.fps,
            state.ticks,
            state.revolutions,
            state.spin_progress,
            flags.brush().name(),
            seed,
        )
    }

    /// Draws the canvas and HUD to the terminal
    pub fn paint<W: Write>(
        &mut self,
        out: &mut W,
        state: &SimState,
        flags: &ToggleFlags,
        seed: u64,
    ) -> io::Result<()> {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        let (cols, rows) = self.viewport;
        let width = self.canvas.width().min(usize::from(cols));
        let cell_rows =
            (self.canvas.height() / 2).min(usize::from(rows.saturating_sub(HUD_ROWS)));

        queue!(out, BeginSynchronizedUpdate)?;

        for cy in 0..cell_rows {
            queue!(out, cursor::MoveTo(0, cy as u16))?;
            let mut current: Option<(Palette, Palette)> = None;
            for cx in 0..width {
                let top = self.canvas.pixel(cx, cy * 2).unwrap_or(Palette::BLACK);
                let bottom = self.canvas.pixel(cx, cy * 2 + 1).unwrap_or(Palette::BLACK);
                if current != Some((top, bottom)) {
                    queue!(
                        out,
                        SetForegroundColor(to_term(top)),
                        SetBackgroundColor(to_term(bottom))
                    )?;
                    current = Some((top, bottom));
                }
                queue!(out, Print('▀'))?;
            }
        }
        queue!(out, ResetColor)?;

        let hud_top = cell_rows as u16;
        let line_width = usize::from(cols);
        let fit = |mut line: String| {
            if line.chars().count() > line_width {
                line = line.chars().take(line_width).collect();
            }
            line
        };

        queue!(
            out,
            cursor::MoveTo(0, hud_top),
            terminal::Clear(ClearType::UntilNewLine),
            SetForegroundColor(to_term(state.color)),
            Print('●'),
            ResetColor,
            Print(fit(format!(" {}", self.hud_line(state)))),
        )?;

        let toggles = Self::toggles_line(flags);
        let button = format!("[ {} ]", state.pause.label());
        queue!(
            out,
            cursor::MoveTo(0, hud_top + 1),
            terminal::Clear(ClearType::UntilNewLine),
            SetForegroundColor(Color::DarkGrey),
            Print(fit(toggles.clone())),
            ResetColor,
        )?;
        if toggles.chars().count() + button.len() <= line_width {
            queue!(
                out,
                SetForegroundColor(Color::Black),
                SetBackgroundColor(to_term(state.pause.background())),
                Print(button),
                ResetColor,
                SetForegroundColor(Color::DarkGrey),
                Print(fit(" (space) (d debug) (q quit)".to_string())),
                ResetColor,
            )?;
        }

        queue!(
            out,
            cursor::MoveTo(0, hud_top + 2),
            terminal::Clear(ClearType::UntilNewLine)
        )?;
        if self.debug {
            queue!(
                out,
                SetForegroundColor(Color::DarkGrey),
                Print(fit(self.debug_line(state, flags, seed))),
                ResetColor
            )?;
        }

        queue!(out, EndSynchronizedUpdate)?;
        out.flush()
    }
}

/// Runs the interactive toy until the user quits.
pub fn run(settings: &Settings) -> Result<()> {
    let size = termsize::get().context("could not read the terminal size")?;
    let (width, height) = canvas_size(size.cols, size.rows);
    info!(width, height, "canvas sized from terminal");

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let color = Palette::random(&mut rng);
    let mut state = SimState::new(
        Bounds::new(width as f64, height as f64),
        settings.sim,
        color,
        settings.playing,
    );
    let mut flags = settings.flags;
    let mut widget = BrushWidget::new(
        PixelBuffer::new(width, height, settings.background),
        (size.cols, size.rows),
    );

    let mut guard = TermGuard::new()?;
    let out = &mut guard.out;

    let mut last = Instant::now();
    let mut pending = Duration::ZERO;

    while !widget.should_quit() {
        let frame_start = Instant::now();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press => {
                    if let Some(action) = key_action(k.code) {
                        widget.handle_action(action, &mut state, &mut flags);
                    }
                }
                Event::Resize(cols, rows) => {
                    widget.resize(cols, rows);
                    execute!(out, terminal::Clear(ClearType::All))?;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        pending += now.duration_since(last);
        last = now;

        let mut ran = 0;
        while pending >= settings.tick_interval && ran < settings.max_ticks_per_frame {
            pending -= settings.tick_interval;
            ran += 1;
            widget.apply(sim::tick(&mut state, &flags, &mut rng));
        }
        if ran == settings.max_ticks_per_frame {
            // behind schedule; drop the backlog like a clamped host timer would
            pending = Duration::ZERO;
        }

        widget.paint(out, &state, &flags, settings.seed)?;

        let spent = frame_start.elapsed();
        if spent < settings.frame_interval {
            // waiting on input doubles as the frame sleep
            let _ = event::poll(settings.frame_interval - spent)?;
        }
    }

    let painted = width * height - widget.canvas().count(settings.background);
    info!(
        ticks = state.ticks,
        revolutions = state.revolutions,
        painted,
        "quit"
    );
    Ok(())
}
