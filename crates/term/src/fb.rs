//! Character grid the game view draws into.
//!
//! Glyphs carry an [`Ink`] naming what they depict instead of concrete
//! colors. The renderer owns the palette.

use crate::types::PieceKind;

/// What a glyph depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ink {
    #[default]
    Blank,
    /// Well border
    Frame,
    /// Well border while a line clear flashes
    Flash,
    /// Empty well cell
    Well,
    /// Landing preview of the falling piece
    Ghost,
    Piece(PieceKind),
    /// Held piece that cannot be swapped back yet
    Spent(PieceKind),
    Label,
    Value,
    /// Lifecycle overlay text
    Banner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub ink: Ink,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph::new(' ', Ink::Blank);

    pub const fn new(ch: char, ink: Ink) -> Self {
        Self { ch, ink }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Row-major grid of glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::BLANK; usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn same_size(&self, other: &FrameBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Blank the grid at the given size. Reuses the allocation when it fits.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs
            .resize(usize::from(width) * usize::from(height), Glyph::BLANK);
    }

    /// Become a copy of `other` without reallocating when sizes match.
    pub fn copy_from(&mut self, other: &FrameBuffer) {
        self.width = other.width;
        self.height = other.height;
        self.glyphs.clear();
        self.glyphs.extend_from_slice(&other.glyphs);
    }

    pub fn row(&self, y: u16) -> &[Glyph] {
        if y >= self.height {
            return &[];
        }
        let start = usize::from(y) * usize::from(self.width);
        &self.glyphs[start..start + usize::from(self.width)]
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.row(y).get(usize::from(x)).copied()
    }

    /// Out-of-range writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, glyph: Glyph) {
        if x < self.width && y < self.height {
            let i = usize::from(y) * usize::from(self.width) + usize::from(x);
            self.glyphs[i] = glyph;
        }
    }

    /// Fill a `w`×`h` block, clipped to the grid.
    pub fn fill(&mut self, x: u16, y: u16, w: u16, h: u16, glyph: Glyph) {
        for cy in y..y.saturating_add(h).min(self.height) {
            for cx in x..x.saturating_add(w).min(self.width) {
                self.set(cx, cy, glyph);
            }
        }
    }

    /// Write `s` left to right; returns the column after the last character.
    pub fn text(&mut self, x: u16, y: u16, s: &str, ink: Ink) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            self.set(cx, y, Glyph::new(ch, ink));
            cx = cx.saturating_add(1);
        }
        cx
    }

    /// Write `value` in decimal without allocating; returns the next column.
    pub fn number(&mut self, x: u16, y: u16, value: u32, ink: Ink) -> u16 {
        let digits = value.checked_ilog10().unwrap_or(0) as u16 + 1;
        let mut rest = value;
        for i in (0..digits).rev() {
            let d = char::from(b'0' + (rest % 10) as u8);
            self.set(x.saturating_add(i), y, Glyph::new(d, ink));
            rest /= 10;
        }
        x.saturating_add(digits)
    }

    /// Characters of row `y`.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|g| g.ch).collect()
    }
}
