//! # Input Module
//!
//! Keyboard decoding into the single input event the engine consumes per
//! tick.

pub mod commands;

pub use commands::*;

use crate::game::Direction;
use macroquad::prelude::{is_key_pressed, KeyCode};
use serde::{Deserialize, Serialize};

/// One decoded input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Step one cell; only cardinal directions move the player
    Move(Direction),
    /// Toggle adjacent doors and pick up items underfoot
    Interact,
    ToggleInventory,
    /// End the session; ignored by the engine itself
    Quit,
    #[default]
    None,
}

/// Input handler for the macroquad window.
pub struct InputHandler {
    /// Whether the arrow keys move the player as well as WASD
    pub arrow_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use lantern::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(input_handler.arrow_keys_enabled);
    /// ```
    pub fn new() -> Self {
        Self {
            arrow_keys_enabled: true,
        }
    }

    /// Polls the keys pressed since the last frame.
    pub fn get_input(&self) -> PlayerInput {
        if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
            return PlayerInput::Quit;
        }

        if self.arrow_keys_enabled {
            let arrows = [
                (KeyCode::Up, Direction::North),
                (KeyCode::Down, Direction::South),
                (KeyCode::Left, Direction::West),
                (KeyCode::Right, Direction::East),
            ];
            if let Some((_, dir)) = arrows.iter().find(|(key, _)| is_key_pressed(*key)) {
                return PlayerInput::Move(*dir);
            }
        }

        let keys = [
            (KeyCode::W, 'w'),
            (KeyCode::A, 'a'),
            (KeyCode::S, 's'),
            (KeyCode::D, 'd'),
            (KeyCode::Space, ' '),
            (KeyCode::I, 'i'),
        ];
        keys.iter()
            .find(|(key, _)| is_key_pressed(*key))
            .map_or(PlayerInput::None, |(_, ch)| decode_key(*ch))
    }
}
