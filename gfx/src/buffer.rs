use glam::{ivec2, IVec2};

use crate::{CharCell, Display, Glyph};

/// In-memory character grid.
///
/// Serves as the back buffer of the terminal frontend and as a headless
/// display in tests.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Buffer {
    width: u32,
    height: u32,
    pub(crate) data: Vec<CharCell>,
}

impl AsRef<[CharCell]> for Buffer {
    fn as_ref(&self) -> &[CharCell] {
        &self.data
    }
}

impl Buffer {
    pub fn new(width: u32, height: u32) -> Self {
        Buffer {
            width,
            height,
            data: vec![Default::default(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn idx(&self, pos: IVec2) -> Option<usize> {
        self.contains(pos)
            .then(|| (pos.x + pos.y * self.width as i32) as usize)
    }

    pub fn get(&self, pos: IVec2) -> Option<CharCell> {
        self.idx(pos).map(|i| self.data[i])
    }

    /// Iterate cell positions and contents in row order.
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, CharCell)> + '_ {
        let w = self.width as i32;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, c)| (ivec2(i as i32 % w, i as i32 / w), *c))
    }

    /// Characters of a single row as a string.
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width as i32)
            .filter_map(|x| self.get(ivec2(x, y)))
            .map(|c| c.c)
            .collect()
    }
}

impl Display for Buffer {
    fn dim(&self) -> IVec2 {
        ivec2(self.width as i32, self.height as i32)
    }

    fn draw(&mut self, pos: IVec2, glyph: Glyph) {
        if let Some(i) = self.idx(pos) {
            self.data[i].apply(glyph);
        }
    }

    fn clear(&mut self) {
        self.data.fill(Default::default());
    }
}
