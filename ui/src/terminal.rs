use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use gfx::{Buffer, CharCell, Display, Glyph, Rgb};
use glam::IVec2;

/// Truecolor terminal display.
///
/// Draws into a back buffer and only sends the cells that changed since the
/// last frame. Restores the terminal when dropped.
pub struct Terminal {
    out: Stdout,
    back: Buffer,
    /// What is currently on screen, `None` before the first frame.
    front: Option<Buffer>,
}

impl Terminal {
    pub fn new(size: IVec2) -> Result<Self> {
        let (w, h) = terminal::size().context("Reading terminal size")?;
        if (w as i32) < size.x || (h as i32) < size.y {
            log::warn!(
                "Terminal is {w}x{h}, the game wants {}x{}",
                size.x,
                size.y
            );
        }

        let mut out = io::stdout();
        enable_raw_mode().context("Enabling raw mode")?;
        execute!(out, EnterAlternateScreen, cursor::Hide)
            .context("Setting up terminal")?;

        Ok(Terminal {
            out,
            back: Buffer::new(size.x as u32, size.y as u32),
            front: None,
        })
    }
}

fn color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

impl Display for Terminal {
    fn dim(&self) -> IVec2 {
        self.back.dim()
    }

    fn draw(&mut self, pos: IVec2, glyph: Glyph) {
        self.back.draw(pos, glyph);
    }

    fn clear(&mut self) {
        self.back.clear();
    }

    fn present(&mut self) -> io::Result<()> {
        let mut prev: Option<CharCell> = None;
        let mut cursor_at: Option<IVec2> = None;

        for (pos, cell) in self.back.cells() {
            if self.front.as_ref().and_then(|f| f.get(pos)) == Some(cell) {
                continue;
            }

            if cursor_at != Some(pos) {
                queue!(self.out, cursor::MoveTo(pos.x as u16, pos.y as u16))?;
            }
            if prev.map(|p| p.fg) != Some(cell.fg) {
                queue!(self.out, SetForegroundColor(color(cell.fg)))?;
            }
            if prev.map(|p| p.bg) != Some(cell.bg) {
                queue!(self.out, SetBackgroundColor(color(cell.bg)))?;
            }
            queue!(self.out, Print(cell.c))?;

            prev = Some(cell);
            cursor_at = Some(pos + IVec2::X);
        }

        self.out.flush()?;
        self.front = Some(self.back.clone());
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ =
            execute!(self.out, ResetColor, LeaveAlternateScreen, cursor::Show);
        let _ = disable_raw_mode();
    }
}
