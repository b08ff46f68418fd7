//! # Door State Machine
//!
//! States are `{closed, open} x {unlocked, locked}`. Interaction toggles an
//! unlocked door from an orthogonally adjacent cell; a locked door only
//! changes by being unlocked with its matching key.

use crate::game::{Door, Position};
use serde::{Deserialize, Serialize};

/// How a door presents itself to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorState {
    /// Plain opening without a door leaf
    Opening,
    Open,
    Locked,
    Closed,
}

impl DoorState {
    /// Glyph used when drawing the door.
    pub fn glyph(self) -> char {
        match self {
            DoorState::Opening => '^',
            DoorState::Open => 'L',
            DoorState::Locked => 'G',
            DoorState::Closed => 'D',
        }
    }
}

impl Door {
    pub fn state(&self) -> DoorState {
        if !self.is_door {
            DoorState::Opening
        } else if self.is_open {
            DoorState::Open
        } else if self.is_locked {
            DoorState::Locked
        } else {
            DoorState::Closed
        }
    }

    /// True when `pos` is exactly one cell away horizontally or vertically.
    pub fn is_adjacent_to(&self, pos: Position) -> bool {
        self.pos.euclidean_distance(pos) == 1.0
    }

    /// Flips `is_open` if this is an unlocked door adjacent to `agent_pos`.
    ///
    /// Returns whether the door toggled.
    pub fn try_toggle(&mut self, agent_pos: Position) -> bool {
        if !self.is_door || self.is_locked || !self.is_adjacent_to(agent_pos) {
            return false;
        }
        self.is_open = !self.is_open;
        log::debug!(
            "Door {} at {:?} is now {}",
            self.id.0,
            self.pos,
            if self.is_open { "open" } else { "closed" }
        );
        true
    }

    /// Clears `is_locked` if the agent is adjacent and holds a key with this
    /// door's `key_id`. The door stays closed.
    pub fn try_unlock<I>(&mut self, agent_pos: Position, mut held_key_ids: I) -> bool
    where
        I: Iterator<Item = i32>,
    {
        if !self.is_door || !self.is_locked || !self.is_adjacent_to(agent_pos) {
            return false;
        }
        if !held_key_ids.any(|key_id| key_id == self.key_id) {
            return false;
        }
        self.is_locked = false;
        log::info!("Door {} unlocked with key {}", self.id.0, self.key_id);
        true
    }
}
