//! # Room Styles
//!
//! Randomized wall and floor looks assigned per room. The engine only stores
//! which style belongs to which room.

use crate::rendering::{Color, Style};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallType {
    Hash,
    Masonry,
    Masonry1,
    Masonry2,
    Masonry3,
    Masonry4,
    Temple,
    Line,
}

/// Glyphs used for the sides and corners of a box outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallGlyphs {
    pub horizontal: char,
    pub vertical: char,
    pub corner: char,
}

impl WallGlyphs {
    const fn uniform(ch: char) -> Self {
        Self {
            horizontal: ch,
            vertical: ch,
            corner: ch,
        }
    }
}

impl WallType {
    pub const ALL: [WallType; 8] = [
        WallType::Hash,
        WallType::Masonry,
        WallType::Masonry1,
        WallType::Masonry2,
        WallType::Masonry3,
        WallType::Masonry4,
        WallType::Temple,
        WallType::Line,
    ];

    pub fn glyphs(self) -> WallGlyphs {
        match self {
            WallType::Hash => WallGlyphs::uniform('#'),
            WallType::Masonry => WallGlyphs::uniform('='),
            WallType::Masonry1 => WallGlyphs::uniform('"'),
            WallType::Masonry2 => WallGlyphs::uniform('%'),
            WallType::Masonry3 => WallGlyphs::uniform('E'),
            WallType::Masonry4 => WallGlyphs::uniform('$'),
            WallType::Temple => WallGlyphs::uniform('I'),
            WallType::Line => WallGlyphs {
                horizontal: '-',
                vertical: '|',
                corner: '+',
            },
        }
    }

    /// Colors a wall of this type may be drawn in.
    pub fn palette(self) -> &'static [Style] {
        match self {
            WallType::Masonry
            | WallType::Masonry1
            | WallType::Masonry2
            | WallType::Masonry3
            | WallType::Masonry4 => &MASONRY_PALETTE,
            WallType::Temple => &TEMPLE_PALETTE,
            WallType::Hash | WallType::Line => &OTHER_PALETTE,
        }
    }
}

static MASONRY_PALETTE: [Style; 3] = [
    Style::new(Color::DarkGray, Color::LightGray),
    Style::new(Color::LightGray, Color::DarkGray),
    Style::new(Color::Black, Color::DarkGray),
];

static TEMPLE_PALETTE: [Style; 3] = [
    Style::new(Color::White, Color::DarkYellow),
    Style::new(Color::Yellow, Color::DarkYellow),
    Style::new(Color::LightGray, Color::DarkMagenta),
];

static OTHER_PALETTE: [Style; 4] = [
    Style::new(Color::DarkGray, Color::LightGray),
    Style::new(Color::White, Color::DarkGray),
    Style::new(Color::Black, Color::LightGray),
    Style::new(Color::DarkCyan, Color::Black),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorType {
    None,
    Sand,
    Grass,
    Stone,
    Stone2,
    Water,
    Wood,
}

impl FloorType {
    pub const ALL: [FloorType; 7] = [
        FloorType::None,
        FloorType::Sand,
        FloorType::Grass,
        FloorType::Stone,
        FloorType::Stone2,
        FloorType::Water,
        FloorType::Wood,
    ];

    pub fn fill_glyph(self) -> char {
        match self {
            FloorType::None => ' ',
            FloorType::Sand => ':',
            FloorType::Grass => '|',
            FloorType::Stone => 'H',
            FloorType::Stone2 => '8',
            FloorType::Water => '~',
            FloorType::Wood => 'W',
        }
    }

    fn base_style(self) -> Style {
        let bright = |c: Color| Style::new(c, c.shaded());
        match self {
            FloorType::None => Style::new(Color::DarkGray, Color::LightGray),
            FloorType::Sand => bright(Color::Yellow),
            FloorType::Grass => bright(Color::Green),
            FloorType::Stone | FloorType::Stone2 => Style::new(Color::White, Color::LightGray),
            FloorType::Water => bright(Color::Blue),
            FloorType::Wood => Style::new(Color::DarkRed, Color::Yellow),
        }
    }
}

/// Visual description of one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStyle {
    pub wall_type: WallType,
    pub wall_style: Style,
    pub floor_type: FloorType,
    /// Underground rooms swap their fill colors and cast no shadow
    pub is_underground: bool,
}

impl Default for RoomStyle {
    fn default() -> Self {
        Self {
            wall_type: WallType::Hash,
            wall_style: Style::new(Color::DarkGray, Color::LightGray),
            floor_type: FloorType::None,
            is_underground: true,
        }
    }
}

impl RoomStyle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let wall_type = WallType::ALL[rng.gen_range(0..WallType::ALL.len())];
        let palette = wall_type.palette();
        Self {
            wall_type,
            wall_style: palette[rng.gen_range(0..palette.len())],
            floor_type: FloorType::ALL[rng.gen_range(0..FloorType::ALL.len())],
            is_underground: rng.gen_bool(0.5),
        }
    }

    /// The fixed look of every corridor.
    pub fn corridor() -> Self {
        Self {
            wall_type: WallType::Masonry4,
            wall_style: Style::new(Color::LightGray, Color::Black),
            floor_type: FloorType::Stone2,
            is_underground: false,
        }
    }

    pub fn fill_glyph(&self) -> char {
        self.floor_type.fill_glyph()
    }

    pub fn fill_style(&self) -> Style {
        let style = self.floor_type.base_style();
        if self.is_underground {
            style.swapped()
        } else {
            style
        }
    }

    pub fn shadow_style(&self) -> Style {
        self.fill_style().shaded()
    }

    pub fn casts_shadow(&self) -> bool {
        !self.is_underground
    }
}
