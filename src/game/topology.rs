//! # Dungeon Topology
//!
//! Rooms, corridors and doors stored in per-type arenas and addressed by
//! stable integer ids. Doors point back at their room and corridor by id;
//! rooms and corridors list their doors by id. Only door `is_open`,
//! `is_locked`, `fog_of_war` and the fog bitmaps change after loading.

use crate::game::{FogGrid, Position};
use crate::utils::BoundingBox;
use crate::{LanternError, LanternResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Index of a room in [`Topology::rooms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub usize);

/// Index of a corridor in [`Topology::corridors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CorridorId(pub usize);

/// Index of a door in [`Topology::doors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoorId(pub usize);

/// A rectangular room including its walls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub bb: BoundingBox,
    pub doors: Vec<DoorId>,
    pub fog: FogGrid,
}

impl Room {
    /// Inclusive test against the room's box, walls included.
    pub fn is_inside_room(&self, pos: Position) -> bool {
        self.bb.is_inside(pos)
    }
}

/// A straight passage between two doors.
///
/// Either slot may be empty while the corridor end is not connected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corridor {
    pub id: CorridorId,
    pub bb: BoundingBox,
    pub doors: [Option<DoorId>; 2],
    pub fog: FogGrid,
}

impl Corridor {
    pub fn is_inside_corridor(&self, pos: Position) -> bool {
        self.bb.is_inside(pos)
    }

    /// The connected door ids, skipping empty slots.
    pub fn door_ids(&self) -> impl Iterator<Item = DoorId> + '_ {
        self.doors.iter().flatten().copied()
    }
}

/// A door cell shared by one room and one corridor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    pub id: DoorId,
    pub pos: Position,
    /// False for a plain opening that cannot be opened, closed or locked
    pub is_door: bool,
    pub is_locked: bool,
    pub is_open: bool,
    /// True until the door has been seen
    pub fog_of_war: bool,
    pub key_id: i32,
    pub room: RoomId,
    pub corridor: CorridorId,
}

/// What kind of door the topology generator placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorKind {
    /// An opening with no door leaf
    Opening,
    /// A closed, unlocked door
    Closed,
    /// A closed door that needs the key with this id
    Locked { key_id: i32 },
}

/// The complete read-only dungeon layout handed to the engine.
///
/// Deserializing validates the arenas and rebuilds `room_corridor_map`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "TopologyData")]
pub struct Topology {
    /// World extent in rows and columns
    pub world_size: Position,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub doors: Vec<Door>,
    /// Which corridor joins a pair of rooms (smaller id first)
    #[serde(skip)]
    pub room_corridor_map: HashMap<(RoomId, RoomId), CorridorId>,
}

/// Wire shape of a [`Topology`]; the association map is derived data.
#[derive(Deserialize)]
struct TopologyData {
    world_size: Position,
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
    doors: Vec<Door>,
}

impl TryFrom<TopologyData> for Topology {
    type Error = LanternError;

    fn try_from(data: TopologyData) -> LanternResult<Self> {
        let mut topology = Topology {
            world_size: data.world_size,
            rooms: data.rooms,
            corridors: data.corridors,
            doors: data.doors,
            room_corridor_map: HashMap::new(),
        };
        topology.validate()?;
        topology.rebuild_room_corridor_map();
        Ok(topology)
    }
}

impl Topology {
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.0)
    }

    pub fn corridor(&self, id: CorridorId) -> Option<&Corridor> {
        self.corridors.get(id.0)
    }

    pub fn corridor_mut(&mut self, id: CorridorId) -> Option<&mut Corridor> {
        self.corridors.get_mut(id.0)
    }

    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id.0)
    }

    pub fn door_mut(&mut self, id: DoorId) -> Option<&mut Door> {
        self.doors.get_mut(id.0)
    }

    /// True if `pos` lies on the floor of any room (walls excluded).
    pub fn is_inside_any_room(&self, pos: Position) -> bool {
        self.rooms.iter().any(|room| room.bb.is_inside_interior(pos))
    }

    /// The room whose floor contains `pos`, if any.
    pub fn room_interior_at(&self, pos: Position) -> Option<RoomId> {
        self.rooms
            .iter()
            .find(|room| room.bb.is_inside_interior(pos))
            .map(|room| room.id)
    }

    /// The first corridor whose box contains `pos`, if any.
    pub fn corridor_at(&self, pos: Position) -> Option<CorridorId> {
        self.corridors
            .iter()
            .find(|corridor| corridor.is_inside_corridor(pos))
            .map(|corridor| corridor.id)
    }

    /// Ids of the doors stored on a room or corridor, resolved to doors.
    pub fn doors_of_room(&self, id: RoomId) -> impl Iterator<Item = &Door> + '_ {
        self.room(id)
            .into_iter()
            .flat_map(|room| room.doors.iter())
            .filter_map(|door_id| self.door(*door_id))
    }

    pub fn doors_of_corridor(&self, id: CorridorId) -> impl Iterator<Item = &Door> + '_ {
        self.corridor(id)
            .into_iter()
            .flat_map(|corridor| corridor.door_ids())
            .filter_map(|door_id| self.door(door_id))
    }

    /// Recomputes the room-pair association from the corridors' doors.
    pub fn rebuild_room_corridor_map(&mut self) {
        self.room_corridor_map.clear();
        for idx in 0..self.corridors.len() {
            self.link_rooms(CorridorId(idx));
        }
    }

    /// Records the room pair once a corridor has both ends connected.
    fn link_rooms(&mut self, corridor: CorridorId) {
        let rooms: Vec<RoomId> = self
            .doors_of_corridor(corridor)
            .map(|door| door.room)
            .collect();
        if let &[a, b] = rooms.as_slice() {
            let key = if a <= b { (a, b) } else { (b, a) };
            self.room_corridor_map.insert(key, corridor);
        }
    }

    /// Checks that the arenas are mutually consistent.
    ///
    /// Every door must be listed exactly once by its room and by its
    /// corridor, lie inside both boxes, and every listed id must exist.
    pub fn validate(&self) -> LanternResult<()> {
        for (idx, room) in self.rooms.iter().enumerate() {
            if room.id.0 != idx {
                return Err(invalid(format!("room at index {} has id {}", idx, room.id.0)));
            }
            if room.fog.len() != room.bb.cell_count() {
                return Err(invalid(format!("room {} fog grid has wrong size", idx)));
            }
            let mut seen = HashSet::new();
            for door_id in &room.doors {
                let door = self
                    .door(*door_id)
                    .ok_or_else(|| invalid(format!("room {} lists missing door {}", idx, door_id.0)))?;
                if door.room != room.id || !seen.insert(*door_id) {
                    return Err(invalid(format!("room {} door list is inconsistent", idx)));
                }
            }
        }

        for (idx, corridor) in self.corridors.iter().enumerate() {
            if corridor.id.0 != idx {
                return Err(invalid(format!("corridor at index {} has id {}", idx, corridor.id.0)));
            }
            if corridor.fog.len() != corridor.bb.cell_count() {
                return Err(invalid(format!("corridor {} fog grid has wrong size", idx)));
            }
            if let [Some(a), Some(b)] = corridor.doors {
                if a == b {
                    return Err(invalid(format!("corridor {} lists door {} twice", idx, a.0)));
                }
            }
            for door_id in corridor.door_ids() {
                let door = self.door(door_id).ok_or_else(|| {
                    invalid(format!("corridor {} lists missing door {}", idx, door_id.0))
                })?;
                if door.corridor != corridor.id {
                    return Err(invalid(format!("corridor {} door list is inconsistent", idx)));
                }
            }
        }

        for (idx, door) in self.doors.iter().enumerate() {
            if door.id.0 != idx {
                return Err(invalid(format!("door at index {} has id {}", idx, door.id.0)));
            }
            let room = self
                .room(door.room)
                .ok_or_else(|| invalid(format!("door {} points at missing room", idx)))?;
            let corridor = self
                .corridor(door.corridor)
                .ok_or_else(|| invalid(format!("door {} points at missing corridor", idx)))?;
            if !room.doors.contains(&door.id) || !corridor.door_ids().any(|d| d == door.id) {
                return Err(invalid(format!("door {} is not listed by its owners", idx)));
            }
            if !room.bb.is_inside(door.pos) || !corridor.bb.is_inside(door.pos) {
                return Err(invalid(format!(
                    "door {} at {:?} is not shared by its room and corridor",
                    idx, door.pos
                )));
            }
        }

        Ok(())
    }
}

fn invalid(msg: String) -> LanternError {
    LanternError::InvalidTopology(msg)
}

/// Incrementally assembles a consistent [`Topology`].
///
/// # Examples
///
/// ```
/// use lantern::{BoundingBox, DoorKind, Position, TopologyBuilder};
///
/// let mut builder = TopologyBuilder::new(Position::new(100, 100));
/// let room = builder.add_room(BoundingBox::new(10, 10, 10, 10));
/// let corridor = builder.add_corridor(BoundingBox::new(2, 14, 8, 2));
/// builder.add_door(room, corridor, Position::new(10, 15), DoorKind::Closed).unwrap();
/// let topology = builder.build().unwrap();
/// assert_eq!(topology.doors.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TopologyBuilder {
    topology: Topology,
}

impl TopologyBuilder {
    pub fn new(world_size: Position) -> Self {
        Self {
            topology: Topology {
                world_size,
                ..Topology::default()
            },
        }
    }

    pub fn add_room(&mut self, bb: BoundingBox) -> RoomId {
        let id = RoomId(self.topology.rooms.len());
        self.topology.rooms.push(Room {
            id,
            bb,
            doors: Vec::new(),
            fog: FogGrid::new(bb.r_len, bb.c_len),
        });
        id
    }

    pub fn add_corridor(&mut self, bb: BoundingBox) -> CorridorId {
        let id = CorridorId(self.topology.corridors.len());
        self.topology.corridors.push(Corridor {
            id,
            bb,
            doors: [None, None],
            fog: FogGrid::new(bb.r_len, bb.c_len),
        });
        id
    }

    /// Adds a door joining `room` and `corridor` at `pos`.
    ///
    /// Fails if either id is unknown, the cell is not shared by both boxes,
    /// or the corridor already has two doors.
    pub fn add_door(
        &mut self,
        room: RoomId,
        corridor: CorridorId,
        pos: Position,
        kind: DoorKind,
    ) -> LanternResult<DoorId> {
        let id = DoorId(self.topology.doors.len());
        let room_bb = self
            .topology
            .room(room)
            .map(|r| r.bb)
            .ok_or_else(|| invalid(format!("unknown room {}", room.0)))?;
        let corridor_ref = self
            .topology
            .corridor(corridor)
            .ok_or_else(|| invalid(format!("unknown corridor {}", corridor.0)))?;
        if !room_bb.is_inside(pos) || !corridor_ref.bb.is_inside(pos) {
            return Err(invalid(format!(
                "door at {:?} must lie in both room {} and corridor {}",
                pos, room.0, corridor.0
            )));
        }
        let slot = corridor_ref
            .doors
            .iter()
            .position(Option::is_none)
            .ok_or_else(|| invalid(format!("corridor {} already has two doors", corridor.0)))?;

        let (is_door, is_locked, key_id) = match kind {
            DoorKind::Opening => (false, false, 0),
            DoorKind::Closed => (true, false, 0),
            DoorKind::Locked { key_id } => (true, true, key_id),
        };

        self.topology.doors.push(Door {
            id,
            pos,
            is_door,
            is_locked,
            is_open: false,
            fog_of_war: true,
            key_id,
            room,
            corridor,
        });
        if let Some(r) = self.topology.room_mut(room) {
            r.doors.push(id);
        }
        if let Some(c) = self.topology.corridor_mut(corridor) {
            c.doors[slot] = Some(id);
        }

        self.topology.link_rooms(corridor);
        Ok(id)
    }

    /// Validates and returns the finished topology.
    pub fn build(self) -> LanternResult<Topology> {
        self.topology.validate()?;
        Ok(self.topology)
    }
}
