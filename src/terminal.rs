use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::graphics::Canvas;
use crate::math::Rgb;
use crate::state::Viewport;

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '▀';

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

/// Character grid about to be written to the terminal
#[derive(Clone, Debug)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    /// Packs two canvas rows into each terminal row
    pub fn from_canvas(canvas: &Canvas) -> Self {
        let width = canvas.width().min(usize::from(u16::MAX));
        let height = (canvas.height() / 2).min(usize::from(u16::MAX));
        let mut cells = Vec::with_capacity(width * height);
        for row in 0..height {
            for column in 0..width {
                cells.push(Cell {
                    glyph: HALF_BLOCK,
                    fg: canvas.pixel(column, row * 2),
                    bg: canvas.pixel(column, row * 2 + 1),
                    bold: false,
                });
            }
        }
        Frame {
            width: width as u16,
            height: height as u16,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[cfg(test)]
    pub fn cell(&self, column: u16, row: u16) -> Option<&Cell> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.cells
            .get(usize::from(row) * usize::from(self.width) + usize::from(column))
    }

    /// Writes text over the picture, clipped at the right edge. The cell
    /// background becomes a darkened average of the two pixels it covered.
    pub fn put_text(&mut self, column: u16, row: u16, text: &str, color: Rgb, bold: bool) {
        if row >= self.height {
            return;
        }
        let start = usize::from(row) * usize::from(self.width);
        for (offset, glyph) in text.chars().enumerate() {
            let column = usize::from(column) + offset;
            if column >= usize::from(self.width) {
                break;
            }
            let cell = &mut self.cells[start + column];
            let backdrop = if cell.glyph == HALF_BLOCK {
                cell.fg.mix(cell.bg, 0.5).mix(Rgb::BLACK, 0.6)
            } else {
                cell.bg
            };
            *cell = Cell {
                glyph,
                fg: color,
                bg: backdrop,
                bold,
            };
        }
    }

    /// Blends every cell toward black by `amount`
    pub fn dim(&mut self, amount: f64) {
        for cell in &mut self.cells {
            cell.fg = cell.fg.mix(Rgb::BLACK, amount);
            cell.bg = cell.bg.mix(Rgb::BLACK, amount);
        }
    }

    /// Queues the whole grid, only emitting style changes where needed
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut current: Option<(Rgb, Rgb, bool)> = None;
        for row in 0..self.height {
            queue!(out, MoveTo(0, row))?;
            let start = usize::from(row) * usize::from(self.width);
            for cell in &self.cells[start..start + usize::from(self.width)] {
                let (last_fg, last_bg, last_bold) = match current {
                    Some(style) => (Some(style.0), Some(style.1), Some(style.2)),
                    None => (None, None, None),
                };
                if last_fg != Some(cell.fg) {
                    queue!(out, SetForegroundColor(to_color(cell.fg)))?;
                }
                if last_bg != Some(cell.bg) {
                    queue!(out, SetBackgroundColor(to_color(cell.bg)))?;
                }
                if last_bold != Some(cell.bold) {
                    let attribute = if cell.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    queue!(out, SetAttribute(attribute))?;
                }
                current = Some((cell.fg, cell.bg, cell.bold));
                queue!(out, Print(cell.glyph))?;
            }
        }
        queue!(out, ResetColor)
    }
}

fn to_color(color: Rgb) -> Color {
    let (r, g, b) = color.to_rgb8();
    Color::Rgb { r, g, b }
}

/// Current terminal size, preferring `termsize` and falling back to crossterm
pub fn viewport() -> io::Result<Viewport> {
    match termsize::get() {
        Some(size) if size.cols > 0 && size.rows > 0 => Ok(Viewport::new(size.cols, size.rows)),
        _ => {
            let (width, height) = terminal::size()?;
            Ok(Viewport::new(width, height))
        }
    }
}

/// Owns the terminal while the showcase runs: raw mode, the alternate
/// screen and mouse capture are released together on close or drop
pub struct TerminalSession {
    stdout: Stdout,
    closed: bool,
}

impl TerminalSession {
    pub fn open() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut session = TerminalSession {
            stdout: io::stdout(),
            closed: false,
        };
        execute!(session.stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        log::debug!("terminal session opened");
        Ok(session)
    }

    pub fn present(&mut self, frame: &Frame) -> io::Result<()> {
        frame.write_to(&mut self.stdout)?;
        self.stdout.flush()
    }

    pub fn close(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        execute!(
            self.stdout,
            ResetColor,
            Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        disable_raw_mode()?;
        log::debug!("terminal session closed");
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::warn!("failed to restore terminal: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn striped_canvas() -> Canvas {
        let mut canvas = Canvas::new(4, 4, Rgb::BLACK);
        let top = crate::vertex::Vertex {
            position: [0.0; 3],
            normal: [0.0, 0.0, 1.0],
            screen_position: [0.0, 0.0],
            depth: 1.0,
        };
        let right = crate::vertex::Vertex {
            screen_position: [4.0, 0.0],
            ..top
        };
        canvas.draw_line(&top, &right, Rgb::WHITE, 1.0);
        canvas
    }

    #[test]
    fn canvas_rows_pair_into_cells() {
        let frame = Frame::from_canvas(&striped_canvas());
        assert_eq!((frame.width(), frame.height()), (4, 2));
        let cell = frame.cell(1, 0).unwrap();
        assert_eq!(cell.glyph, HALF_BLOCK);
        assert_eq!(cell.fg, Rgb::WHITE);
        assert_eq!(cell.bg, Rgb::BLACK);
        assert_eq!(frame.cell(1, 1).unwrap().fg, Rgb::BLACK);
        assert!(frame.cell(4, 0).is_none());
    }

    #[test]
    fn text_is_clipped_at_the_edge() {
        let mut frame = Frame::from_canvas(&striped_canvas());
        frame.put_text(2, 1, "hello", Rgb::WHITE, true);
        assert_eq!(frame.cell(2, 1).unwrap().glyph, 'h');
        assert_eq!(frame.cell(3, 1).unwrap().glyph, 'e');
        assert!(frame.cell(3, 1).unwrap().bold);
        assert_eq!(frame.cell(1, 1).unwrap().glyph, HALF_BLOCK);

        frame.put_text(0, 9, "ignored", Rgb::WHITE, false);
    }

    #[test]
    fn dim_darkens_cells() {
        let mut frame = Frame::from_canvas(&striped_canvas());
        frame.dim(0.5);
        assert_eq!(frame.cell(0, 0).unwrap().fg, Rgb::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn writes_glyphs_and_true_colors() {
        let frame = Frame::from_canvas(&striped_canvas());
        let mut out = Vec::new();
        frame.write_to(&mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches(HALF_BLOCK).count(), 8);
        assert!(output.contains("38;2;255;255;255"));
        assert!(output.contains("48;2;0;0;0"));
    }
}
