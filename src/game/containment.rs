//! # Containment Tracking
//!
//! Keeps an agent's current room and corridor up to date without a global
//! search: only the doors of the boxes the agent already occupies are
//! checked. An agent straddles a room and a corridor at a shared door cell.

use crate::game::{CorridorId, Position, RoomId, Topology};
use crate::utils::BBLocation;
use serde::{Deserialize, Serialize};

/// The room and corridor an agent was last known to occupy.
///
/// Either may be unset before the first resolution. Updates only ever
/// replace a reference, never clear one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Containment {
    pub room: Option<RoomId>,
    pub corridor: Option<CorridorId>,
}

impl Containment {
    pub fn in_room(room: RoomId) -> Self {
        Self {
            room: Some(room),
            corridor: None,
        }
    }

    pub fn in_corridor(corridor: CorridorId) -> Self {
        Self {
            room: None,
            corridor: Some(corridor),
        }
    }

    /// True if `pos` lies inside the current room's or the current
    /// corridor's box. This is the only movement gate for the player.
    pub fn allows(&self, topology: &Topology, pos: Position) -> bool {
        self.corridor_containing(topology, pos).is_some()
            || self.room_containing(topology, pos).is_some()
    }

    /// The current corridor, if `pos` is inside it.
    pub fn corridor_containing(&self, topology: &Topology, pos: Position) -> Option<CorridorId> {
        self.corridor
            .filter(|id| topology.corridor(*id).is_some_and(|c| c.is_inside_corridor(pos)))
    }

    /// The current room, if `pos` is inside it.
    pub fn room_containing(&self, topology: &Topology, pos: Position) -> Option<RoomId> {
        self.room
            .filter(|id| topology.room(*id).is_some_and(|r| r.is_inside_room(pos)))
    }

    /// Classifies `pos` against the current corridor and current room.
    /// A missing reference yields [`BBLocation::None`].
    pub fn locate(&self, topology: &Topology, pos: Position) -> (BBLocation, BBLocation) {
        let corridor = self
            .corridor
            .and_then(|id| topology.corridor(id))
            .map_or(BBLocation::None, |c| c.bb.classify(pos));
        let room = self
            .room
            .and_then(|id| topology.room(id))
            .map_or(BBLocation::None, |r| r.bb.classify(pos));
        (corridor, room)
    }

    /// Door hand-off: standing on one of the current corridor's doors adopts
    /// that door's room; standing on one of the current room's doors adopts
    /// that door's corridor.
    pub fn update(&mut self, topology: &Topology, pos: Position) {
        if let Some(corridor) = self.corridor {
            if let Some(door) = topology
                .doors_of_corridor(corridor)
                .find(|door| door.pos == pos)
            {
                self.room = Some(door.room);
            }
        }
        if let Some(room) = self.room {
            if let Some(door) = topology.doors_of_room(room).find(|door| door.pos == pos) {
                self.corridor = Some(door.corridor);
            }
        }
    }
}
