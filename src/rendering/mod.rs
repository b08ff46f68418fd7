//! # Rendering Module
//!
//! Glyph-grid rendering. The engine draws onto any [`DrawSurface`]; the
//! binary supplies a macroquad window, tests use [`TextSurface`].

pub mod display;
pub mod frame;
pub mod styles;
pub mod ui;

pub use display::*;
pub use frame::*;
pub use styles::*;
pub use ui::*;

use crate::game::Position;
use serde::{Deserialize, Serialize};

/// The sixteen console colors plus a "keep what is underneath" entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    DarkMagenta,
    DarkCyan,
    LightGray,
    DarkGray,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Transparent,
}

impl Color {
    /// The darker counterpart used for shadowed cells.
    pub fn shaded(self) -> Color {
        match self {
            Color::Red => Color::DarkRed,
            Color::Green => Color::DarkGreen,
            Color::Yellow => Color::DarkYellow,
            Color::Blue => Color::DarkBlue,
            Color::Magenta => Color::DarkMagenta,
            Color::Cyan => Color::DarkCyan,
            Color::White => Color::LightGray,
            Color::LightGray => Color::DarkGray,
            Color::DarkGray => Color::Black,
            other => other,
        }
    }
}

/// Foreground and background color of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Color::White, Color::Black)
    }
}

impl Style {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    pub fn swapped(self) -> Self {
        Self::new(self.bg, self.fg)
    }

    pub fn shaded(self) -> Self {
        Self::new(self.fg.shaded(), self.bg.shaded())
    }
}

/// A rectangular grid of glyph cells addressed by screen row and column.
pub trait DrawSurface {
    fn rows(&self) -> i32;

    fn cols(&self) -> i32;

    /// Writes one cell. Out-of-range positions are ignored; a transparent
    /// color keeps the cell's current color on that layer.
    fn put(&mut self, pos: Position, glyph: char, style: Style);

    /// Writes a string left to right starting at `pos`.
    fn put_str(&mut self, pos: Position, text: &str, style: Style) {
        for (offs, ch) in text.chars().enumerate() {
            self.put(Position::new(pos.r, pos.c + offs as i32), ch, style);
        }
    }

    fn is_on_screen(&self, pos: Position) -> bool {
        pos.r >= 0 && pos.c >= 0 && pos.r < self.rows() && pos.c < self.cols()
    }
}

/// In-memory surface. Later writes overwrite earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSurface {
    rows: i32,
    cols: i32,
    glyphs: Vec<char>,
    styles: Vec<Style>,
}

impl TextSurface {
    pub fn new(rows: i32, cols: i32) -> Self {
        let len = (rows.max(0) * cols.max(0)) as usize;
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
            glyphs: vec![' '; len],
            styles: vec![Style::default(); len],
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.is_on_screen(pos)
            .then(|| (pos.r * self.cols + pos.c) as usize)
    }

    pub fn glyph_at(&self, pos: Position) -> Option<char> {
        self.index(pos).map(|idx| self.glyphs[idx])
    }

    pub fn style_at(&self, pos: Position) -> Option<Style> {
        self.index(pos).map(|idx| self.styles[idx])
    }

    /// One string per row, for snapshot-style assertions.
    pub fn lines(&self) -> Vec<String> {
        self.glyphs
            .chunks(self.cols.max(1) as usize)
            .map(|row| row.iter().collect())
            .collect()
    }

    pub fn count_glyph(&self, glyph: char) -> usize {
        self.glyphs.iter().filter(|g| **g == glyph).count()
    }

    pub fn clear(&mut self) {
        self.glyphs.fill(' ');
        self.styles.fill(Style::default());
    }
}

impl DrawSurface for TextSurface {
    fn rows(&self) -> i32 {
        self.rows
    }

    fn cols(&self) -> i32 {
        self.cols
    }

    fn put(&mut self, pos: Position, glyph: char, style: Style) {
        let Some(idx) = self.index(pos) else {
            return;
        };
        self.glyphs[idx] = glyph;
        let cell = &mut self.styles[idx];
        if style.fg != Color::Transparent {
            cell.fg = style.fg;
        }
        if style.bg != Color::Transparent {
            cell.bg = style.bg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_surface_overwrites_and_clips() {
        let mut surface = TextSurface::new(3, 4);
        surface.put(Position::new(1, 1), 'a', Style::default());
        surface.put(Position::new(1, 1), 'b', Style::new(Color::Red, Color::Blue));
        surface.put(Position::new(5, 5), 'x', Style::default());
        surface.put(Position::new(-1, 0), 'x', Style::default());

        assert_eq!(surface.glyph_at(Position::new(1, 1)), Some('b'));
        assert_eq!(surface.glyph_at(Position::new(5, 5)), None);
        assert_eq!(surface.count_glyph('x'), 0);
        assert_eq!(surface.lines()[1], " b  ");
    }

    #[test]
    fn test_transparent_keeps_background() {
        let mut surface = TextSurface::new(1, 1);
        let origin = Position::origin();
        surface.put(origin, '.', Style::new(Color::Yellow, Color::DarkGreen));
        surface.put(origin, 'F', Style::new(Color::Cyan, Color::Transparent));
        assert_eq!(
            surface.style_at(origin),
            Some(Style::new(Color::Cyan, Color::DarkGreen))
        );
    }

    #[test]
    fn test_put_str_runs_along_a_row() {
        let mut surface = TextSurface::new(2, 6);
        surface.put_str(Position::new(1, 2), "hey!!", Style::default());
        assert_eq!(surface.lines()[1], "  hey!");
    }

    #[test]
    fn test_shading() {
        assert_eq!(Color::Yellow.shaded(), Color::DarkYellow);
        assert_eq!(Color::DarkBlue.shaded(), Color::DarkBlue);
        let style = Style::new(Color::White, Color::Green).shaded();
        assert_eq!(style, Style::new(Color::LightGray, Color::DarkGreen));
        assert_eq!(style.swapped().fg, Color::DarkGreen);
    }
}
