//! # Display Management
//!
//! Window output for the interactive binary using macroquad. Frames are
//! composed into a glyph buffer and presented in one pass.

use crate::game::Position;
use crate::rendering::{Color, DrawSurface, Style, TextSurface};
use macroquad::color::Color as MqColor;
use macroquad::prelude::{clear_background, draw_rectangle, draw_text, screen_height, screen_width};

/// Macroquad display manager.
///
/// Implements [`DrawSurface`] over an off-screen glyph buffer; call
/// [`MacroquadDisplay::present`] once per frame after drawing.
pub struct MacroquadDisplay {
    /// Cell height in pixels
    pub tile_size: f32,
    /// Font size used for glyphs
    pub font_size: f32,
    buffer: TextSurface,
}

impl MacroquadDisplay {
    /// Creates a display of `rows` x `cols` glyph cells.
    pub fn new(rows: i32, cols: i32) -> Self {
        let mut display = Self {
            tile_size: 16.0,
            font_size: 20.0,
            buffer: TextSurface::new(rows, cols),
        };
        display.fit_to_window();
        display
    }

    /// Picks the largest cell size that fits the grid into the window.
    pub fn fit_to_window(&mut self) {
        let rows = self.buffer.rows().max(1) as f32;
        let cols = self.buffer.cols().max(1) as f32;
        // Cells are taller than wide.
        let by_height = screen_height() / rows;
        let by_width = screen_width() / cols * crate::config::PIXEL_ASPECT;
        self.tile_size = by_height.min(by_width).max(4.0);
        self.font_size = self.tile_size * 1.2;
    }

    /// Resets the buffer before a new frame is drawn.
    pub fn begin_frame(&mut self) {
        self.buffer.clear();
    }

    /// Draws the buffered frame to the window.
    pub fn present(&self) {
        clear_background(to_macroquad(Color::Black));

        let cell_h = self.tile_size;
        let cell_w = self.tile_size / crate::config::PIXEL_ASPECT;
        let mut glyph_buf = [0u8; 4];
        for r in 0..self.buffer.rows() {
            for c in 0..self.buffer.cols() {
                let pos = Position::new(r, c);
                let (Some(glyph), Some(style)) = (self.buffer.glyph_at(pos), self.buffer.style_at(pos))
                else {
                    continue;
                };
                let x = c as f32 * cell_w;
                let y = r as f32 * cell_h;
                draw_rectangle(x, y, cell_w, cell_h, to_macroquad(style.bg));
                if glyph != ' ' {
                    let text = glyph.encode_utf8(&mut glyph_buf);
                    draw_text(text, x, y + cell_h * 0.8, self.font_size, to_macroquad(style.fg));
                }
            }
        }
    }
}

impl DrawSurface for MacroquadDisplay {
    fn rows(&self) -> i32 {
        self.buffer.rows()
    }

    fn cols(&self) -> i32 {
        self.buffer.cols()
    }

    fn put(&mut self, pos: Position, glyph: char, style: Style) {
        self.buffer.put(pos, glyph, style);
    }
}

/// Maps a console color onto an RGB value.
pub fn to_macroquad(color: Color) -> MqColor {
    match color {
        Color::Black => MqColor::from_rgba(0, 0, 0, 255),
        Color::DarkRed => MqColor::from_rgba(128, 0, 0, 255),
        Color::DarkGreen => MqColor::from_rgba(0, 128, 0, 255),
        Color::DarkYellow => MqColor::from_rgba(128, 128, 0, 255),
        Color::DarkBlue => MqColor::from_rgba(0, 0, 128, 255),
        Color::DarkMagenta => MqColor::from_rgba(128, 0, 128, 255),
        Color::DarkCyan => MqColor::from_rgba(0, 128, 128, 255),
        Color::LightGray => MqColor::from_rgba(192, 192, 192, 255),
        Color::DarkGray => MqColor::from_rgba(96, 96, 96, 255),
        Color::Red => MqColor::from_rgba(255, 0, 0, 255),
        Color::Green => MqColor::from_rgba(0, 255, 0, 255),
        Color::Yellow => MqColor::from_rgba(255, 255, 0, 255),
        Color::Blue => MqColor::from_rgba(0, 0, 255, 255),
        Color::Magenta => MqColor::from_rgba(255, 0, 255, 255),
        Color::Cyan => MqColor::from_rgba(0, 255, 255, 255),
        Color::White => MqColor::from_rgba(255, 255, 255, 255),
        Color::Transparent => MqColor::from_rgba(0, 0, 0, 0),
    }
}
