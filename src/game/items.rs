//! # Items
//!
//! Pickable keys and lamps. Items are never removed; picking one up only
//! sets its flag so it stops being drawn.

use crate::game::Position;
use crate::rendering::{Color, Style};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// State shared by every pickable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub pos: Position,
    pub picked_up: bool,
    pub style: Style,
    pub glyph: char,
    /// True until the item has been seen
    pub fog_of_war: bool,
}

impl Item {
    fn new(pos: Position, glyph: char, style: Style) -> Self {
        Self {
            pos,
            picked_up: false,
            style,
            glyph,
            fog_of_war: true,
        }
    }

    /// Whether the item would be drawn under the given fog setting.
    pub fn is_drawable(&self, use_fog_of_war: bool) -> bool {
        !self.picked_up && !(use_fog_of_war && self.fog_of_war)
    }
}

/// Colors a key may be drawn in.
pub const KEY_FG_PALETTE: [Color; 6] = [
    Color::Green,
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Red,
    Color::White,
];

/// A key opening the locked door with the same `key_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub item: Item,
    pub key_id: i32,
}

impl Key {
    pub fn new(pos: Position, key_id: i32) -> Self {
        Self {
            item: Item::new(pos, 'F', Style::new(Color::Green, Color::Transparent)),
            key_id,
        }
    }

    pub fn randomize_fg_color<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.item.style.fg = KEY_FG_PALETTE[rng.gen_range(0..KEY_FG_PALETTE.len())];
    }
}

/// How a lamp spreads its light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LampType {
    Isotropic,
    Directional,
}

impl LampType {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            LampType::Isotropic
        } else {
            LampType::Directional
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LampType::Isotropic => "isotropic",
            LampType::Directional => "directional",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lamp {
    pub item: Item,
    pub lamp_type: LampType,
}

impl Lamp {
    pub fn new(pos: Position, lamp_type: LampType) -> Self {
        Self {
            item: Item::new(pos, 'Y', Style::new(Color::Yellow, Color::Transparent)),
            lamp_type,
        }
    }
}
