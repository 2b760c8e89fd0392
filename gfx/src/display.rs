use glam::{ivec2, IVec2};

use crate::Rgb;

/// What to draw on a single grid cell.
///
/// Colors left as `None` keep whatever color the cell already had, so
/// actors can be drawn over terrain without knowing the terrain color.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Glyph {
    pub c: char,
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
}

impl Glyph {
    pub const fn new(c: char) -> Self {
        Glyph {
            c,
            fg: None,
            bg: None,
        }
    }

    pub const fn fg(mut self, col: Rgb) -> Self {
        self.fg = Some(col);
        self
    }

    pub const fn bg(mut self, col: Rgb) -> Self {
        self.bg = Some(col);
        self
    }
}

impl From<char> for Glyph {
    fn from(c: char) -> Self {
        Glyph::new(c)
    }
}

/// Fully resolved grid cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CharCell {
    pub c: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for CharCell {
    fn default() -> Self {
        CharCell {
            c: ' ',
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
        }
    }
}

impl CharCell {
    pub fn apply(&mut self, glyph: Glyph) {
        self.c = glyph.c;
        if let Some(fg) = glyph.fg {
            self.fg = fg;
        }
        if let Some(bg) = glyph.bg {
            self.bg = bg;
        }
    }
}

/// Abstract character grid painter.
///
/// Drawing out of bounds is silently ignored.
pub trait Display {
    /// Grid size in cells.
    fn dim(&self) -> IVec2;

    fn draw(&mut self, pos: IVec2, glyph: Glyph);

    /// Reset every cell to blank default colors.
    fn clear(&mut self);

    /// Push the drawn frame to wherever it's shown.
    fn present(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn contains(&self, pos: IVec2) -> bool {
        let dim = self.dim();
        pos.x >= 0 && pos.y >= 0 && pos.x < dim.x && pos.y < dim.y
    }

    /// Write a line of text, clipped to `max_width` cells if given.
    fn draw_text(&mut self, pos: IVec2, text: &str, max_width: Option<usize>) {
        self.draw_colored_text(pos, text, max_width, None);
    }

    fn draw_colored_text(
        &mut self,
        pos: IVec2,
        text: &str,
        max_width: Option<usize>,
        fg: Option<Rgb>,
    ) {
        let max_width = max_width.unwrap_or(usize::MAX);
        for (i, c) in text.chars().take(max_width).enumerate() {
            self.draw(
                pos + ivec2(i as i32, 0),
                Glyph {
                    c,
                    fg,
                    bg: None,
                },
            );
        }
    }
}
