//! # Key Bindings
//!
//! Maps typed characters onto [`PlayerInput`] events.

use crate::game::Direction;
use crate::input::PlayerInput;

/// Escape as delivered by a terminal.
pub const ESCAPE: char = '\u{1b}';

/// Decodes one typed character.
///
/// # Examples
///
/// ```
/// use lantern::{decode_key, Direction, PlayerInput};
///
/// assert_eq!(decode_key('D'), PlayerInput::Move(Direction::East));
/// assert_eq!(decode_key(' '), PlayerInput::Interact);
/// assert_eq!(decode_key('x'), PlayerInput::None);
/// ```
pub fn decode_key(ch: char) -> PlayerInput {
    match ch.to_ascii_lowercase() {
        'w' => PlayerInput::Move(Direction::North),
        'a' => PlayerInput::Move(Direction::West),
        's' => PlayerInput::Move(Direction::South),
        'd' => PlayerInput::Move(Direction::East),
        ' ' => PlayerInput::Interact,
        'i' => PlayerInput::ToggleInventory,
        'q' | ESCAPE => PlayerInput::Quit,
        _ => PlayerInput::None,
    }
}
