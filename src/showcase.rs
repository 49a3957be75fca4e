use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::animation::AnimationFrameParams;
use crate::clock::FrameClock;
use crate::config::Config;
use crate::damper::Damper;
use crate::graphics::{Camera, Canvas};
use crate::input::MouseTracker;
use crate::math::Rgb;
use crate::scroll::ScrollTracker;
use crate::sections::{self, TextStyle};
use crate::shapes::{ShapeRenderer, SHAPES};
use crate::state::{PointerVector, ScrollState, Viewport};
use crate::terminal::Frame;

const BACKGROUND: Rgb = Rgb::from_hex(0x0b0b14);
const DIM_TEXT: Rgb = Rgb::from_hex(0x4a4a5a);

/// Whether the event loop should keep going after an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The whole scene: input trackers, the frame clock, the three shapes and
/// the canvas they are drawn on
pub struct Showcase {
    viewport: Viewport,
    wheel_rows: f64,
    mouse: MouseTracker,
    damper: Damper,
    scroll: ScrollTracker,
    shapes: Vec<ShapeRenderer>,
    clock: FrameClock,
    camera: Camera,
    canvas: Canvas,
    debug: bool,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl Showcase {
    pub fn new(config: &Config, viewport: Viewport) -> Self {
        let shapes = SHAPES
            .iter()
            .map(|config| {
                let mut shape = ShapeRenderer::new(*config);
                shape.attach();
                shape
            })
            .collect();

        Showcase {
            viewport,
            wheel_rows: f64::from(config.wheel_rows),
            mouse: MouseTracker::new(),
            damper: Damper::new(config.damping),
            scroll: ScrollTracker::new(viewport.height),
            shapes,
            clock: FrameClock::new(config.fps),
            camera: Camera::default(),
            canvas: canvas_for(viewport),
            debug: config.debug,
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    pub fn start(&mut self, now: Instant) {
        log::info!(
            "frame clock started at {:?} per frame for a {}x{} viewport",
            self.clock.interval(),
            self.viewport.width,
            self.viewport.height
        );
        self.clock.start(now);
        self.last_fps_calculation = now;
    }

    /// Cancels all future frames
    pub fn stop(&mut self) {
        if self.clock.is_running() {
            log::info!("frame clock stopped");
        }
        self.clock.stop();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn time_until_next_frame(&self, now: Instant) -> Duration {
        self.clock.time_until_next_frame(now)
    }

    pub fn take_frame(&mut self, now: Instant) -> bool {
        self.clock.take_frame(now)
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }

    /// Damped pointer as of the last tick
    pub fn pointer(&self) -> PointerVector {
        self.damper.current()
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) -> Flow {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                return self.handle_key(key, now);
            }
            Event::Mouse(mouse) => {
                let (column, row) = (f64::from(mouse.column), f64::from(mouse.row));
                match mouse.kind {
                    MouseEventKind::Moved => {
                        self.mouse.on_pointer_move(column, row, self.viewport)
                    }
                    MouseEventKind::Drag(_) => {
                        self.mouse.on_touch_move(&[(column, row)], self.viewport)
                    }
                    MouseEventKind::ScrollDown => self.scroll_by(self.wheel_rows),
                    MouseEventKind::ScrollUp => self.scroll_by(-self.wheel_rows),
                    _ => {}
                }
            }
            Event::Resize(width, height) => self.resize(Viewport::new(*width, *height)),
            _ => {}
        }
        Flow::Continue
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> Flow {
        let page = self.scroll.viewport_height();
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.stop();
                return Flow::Quit;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.stop();
                return Flow::Quit;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.clock.toggle_pause(now);
                log::info!("paused: {}", self.clock.is_paused());
            }
            KeyCode::Char('d') | KeyCode::Char('D') => self.debug = !self.debug,
            KeyCode::Char(digit @ '1'..='3') => {
                let section = digit as usize - '1' as usize;
                self.update_scroll(|scroll| scroll.jump_to_section(section));
            }
            KeyCode::Up => self.scroll_by(-1.0),
            KeyCode::Down => self.scroll_by(1.0),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page),
            KeyCode::Home => self.update_scroll(|scroll| scroll.scroll_to(0.0)),
            KeyCode::End => self.update_scroll(|scroll| {
                let bottom = scroll.max_scroll_top();
                scroll.scroll_to(bottom)
            }),
            _ => {}
        }
        Flow::Continue
    }

    fn scroll_by(&mut self, rows: f64) {
        self.update_scroll(|scroll| scroll.scroll_by(rows));
    }

    fn update_scroll<F>(&mut self, change: F)
    where
        F: FnOnce(&mut ScrollTracker) -> ScrollState,
    {
        let before = self.scroll.state();
        let after = change(&mut self.scroll);
        if after.active_section != before.active_section {
            log::info!(
                "section {} -> {} at progress {:.3}",
                before.active_section,
                after.active_section,
                after.progress
            );
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.canvas = canvas_for(viewport);
        let height = viewport.height;
        self.update_scroll(|scroll| scroll.resize(height));
    }

    /// Samples the latest input and advances every shape by one frame
    pub fn tick(&mut self, now: Instant) {
        let pointer = self.damper.tick(self.mouse.target());
        let scroll = self.scroll.state();
        let elapsed = self.clock.elapsed(now);

        for (index, shape) in self.shapes.iter_mut().enumerate() {
            shape.update(&AnimationFrameParams {
                elapsed,
                scroll_progress: scroll.progress,
                pointer,
                is_active: index == scroll.active_section,
            });
        }
    }

    /// Rasterizes the shapes and lays the section copy over them
    pub fn compose(&mut self, now: Instant) -> Frame {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let duration = now.saturating_duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        self.canvas.clear(BACKGROUND);
        // Opaque surfaces first so wireframes can depth test against them
        for transparent in [false, true] {
            for shape in &self.shapes {
                if shape.config().material.is_transparent() == transparent {
                    shape.draw(&mut self.canvas, &self.camera);
                }
            }
        }

        let mut frame = Frame::from_canvas(&self.canvas);
        let scroll = self.scroll.state();
        let copy = sections::visible_lines(
            self.viewport,
            self.scroll.scroll_top(),
            scroll.active_section,
        );
        let overlay = copy
            .into_iter()
            .chain(sections::navigation(self.viewport, scroll.active_section));
        for line in overlay {
            let (color, bold) = text_color(line.style, line.active);
            frame.put_text(line.column, line.row, &line.text, color, bold);
        }

        if self.debug {
            let pointer = self.pointer();
            let featured = &self.shapes[scroll.active_section];
            let scale = featured.visual().map_or(0.0, |visual| visual.scale);
            let lines = [
                format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                format!(
                    "Scroll: {:.3}  Section: {}",
                    scroll.progress, scroll.active_section
                ),
                format!("Pointer: ({:.2}, {:.2})", pointer.x, pointer.y),
                format!("Shape: {} x{:.2}", featured.config().name, scale),
                format!("Time: {:.2}s", self.clock.elapsed(now)),
                format!("FPS: {:.2}", self.fps),
            ];
            for (row, text) in lines.iter().enumerate() {
                frame.put_text(1, row as u16, text, Rgb::WHITE, false);
            }
        }

        // Display 'Paused' if the clock is paused
        if self.clock.is_paused() {
            frame.dim(0.6);
            let text = "Paused";
            let column = (frame.width() / 2).saturating_sub(text.len() as u16 / 2);
            frame.put_text(column, frame.height() / 2, text, Rgb::WHITE, true);
        }

        frame
    }
}

fn canvas_for(viewport: Viewport) -> Canvas {
    Canvas::new(
        usize::from(viewport.width),
        usize::from(viewport.height) * 2,
        BACKGROUND,
    )
}

fn text_color(style: TextStyle, active: bool) -> (Rgb, bool) {
    match (style, active) {
        (TextStyle::Title, true) => (Rgb::WHITE, true),
        (TextStyle::Body, true) => (Rgb::from_hex(0xd4d4e0), false),
        (TextStyle::Item, true) => (Rgb::from_hex(0xc4b5fd), false),
        (TextStyle::Button, true) => (Rgb::from_hex(0xec4899), true),
        (TextStyle::Indicator, true) => (Rgb::from_hex(0xa78bfa), true),
        (TextStyle::Title | TextStyle::Indicator, false) => (Rgb::from_hex(0x5a5a6e), false),
        (_, false) => (DIM_TEXT, false),
    }
}
